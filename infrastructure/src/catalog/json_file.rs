//! Catalog backed by a JSON file.

use super::record::CatalogRecord;
use async_trait::async_trait;
use shuffle_application::{CatalogError, CatalogSource};
use shuffle_domain::ContentItem;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads a JSON array of [`CatalogRecord`]s on every fetch.
///
/// Inactive records are dropped before they reach the engine.
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse a catalog document, keeping only active records
pub fn parse_catalog(json: &str) -> Result<Vec<ContentItem>, CatalogError> {
    let records: Vec<CatalogRecord> =
        serde_json::from_str(json).map_err(|e| CatalogError::Malformed(e.to_string()))?;

    let total = records.len();
    let items: Vec<ContentItem> = records
        .into_iter()
        .filter(CatalogRecord::is_active)
        .map(ContentItem::from)
        .collect();

    if items.len() < total {
        debug!("Skipped {} inactive catalog record(s)", total - items.len());
    }
    Ok(items)
}

#[async_trait]
impl CatalogSource for JsonFileCatalog {
    async fn fetch_active(&self) -> Result<Vec<ContentItem>, CatalogError> {
        let json = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CatalogError::Unavailable(format!("{} not found", self.path.display()))
            } else {
                CatalogError::Io(e)
            }
        })?;
        debug!("Read catalog from {}", self.path.display());
        parse_catalog(&json)
    }
}
