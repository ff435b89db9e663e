//! Catalog source port
//!
//! Defines where catalog snapshots come from (a database query, a file, an
//! in-memory fixture). Implementations live in the infrastructure layer.

use async_trait::async_trait;
use shuffle_domain::ContentItem;
use thiserror::Error;

/// Errors that can occur while fetching the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed catalog data: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of catalog snapshots
///
/// Only items flagged as active by the backing store should be returned.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every currently active item
    async fn fetch_active(&self) -> Result<Vec<ContentItem>, CatalogError>;
}
