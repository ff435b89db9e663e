//! Infrastructure layer for smart-shuffle
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod catalog;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use catalog::{CatalogRecord, InMemoryCatalog, JsonFileCatalog};
pub use config::{
    ConfigLoader, FileCatalogConfig, FileConfig, FileEngineConfig, FileInteractionsConfig,
    FileOutputConfig, FileOutputFormat, FileViewerConfig,
};
pub use logging::JsonlInteractionLog;
