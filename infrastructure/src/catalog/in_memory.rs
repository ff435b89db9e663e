//! In-memory catalog for tests and embedding.

use async_trait::async_trait;
use shuffle_application::{CatalogError, CatalogSource};
use shuffle_domain::ContentItem;
use std::sync::RwLock;

/// Catalog held in memory; contents can be swapped between fetches.
#[derive(Default)]
pub struct InMemoryCatalog {
    items: RwLock<Vec<ContentItem>>,
}

impl InMemoryCatalog {
    pub fn new(items: Vec<ContentItem>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// Replace the catalog contents. Takes effect on the next fetch.
    pub fn replace(&self, items: Vec<ContentItem>) {
        match self.items.write() {
            Ok(mut guard) => *guard = items,
            Err(poisoned) => *poisoned.into_inner() = items,
        }
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn fetch_active(&self) -> Result<Vec<ContentItem>, CatalogError> {
        self.items
            .read()
            .map(|items| items.clone())
            .map_err(|_| CatalogError::Unavailable("catalog lock poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replace_visible_on_next_fetch() {
        let catalog = InMemoryCatalog::new(vec![ContentItem::new("a", 100)]);
        assert_eq!(catalog.fetch_active().await.unwrap().len(), 1);

        catalog.replace(vec![ContentItem::new("b", 100), ContentItem::new("c", 100)]);
        let items = catalog.fetch_active().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id.as_str(), "b");
    }

    #[tokio::test]
    async fn test_default_is_empty() {
        let catalog = InMemoryCatalog::default();
        assert!(catalog.fetch_active().await.unwrap().is_empty());
    }
}
