//! Catalog adapters implementing the [`CatalogSource`](shuffle_application::CatalogSource) port.

mod in_memory;
mod json_file;
mod record;

pub use in_memory::InMemoryCatalog;
pub use json_file::{JsonFileCatalog, parse_catalog};
pub use record::CatalogRecord;
