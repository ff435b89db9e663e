//! Catalog and interaction log locations (`[catalog]` and `[interactions]`)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw catalog configuration from TOML
///
/// ```toml
/// [catalog]
/// path = "catalog.json"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCatalogConfig {
    /// JSON catalog file; the CLI's `--catalog` flag overrides it
    pub path: Option<PathBuf>,
}

/// Raw interaction persistence configuration from TOML
///
/// ```toml
/// [interactions]
/// log_path = "interactions.jsonl"
/// ```
///
/// With no `log_path`, interactions are recorded but never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInteractionsConfig {
    pub log_path: Option<PathBuf>,
}
