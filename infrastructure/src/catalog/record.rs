//! Wire format of one catalog record

use serde::Deserialize;
use shuffle_domain::ContentItem;

/// One row of a catalog export.
///
/// Field names are snake_case. The aliases accept a raw `scenes` table
/// export (`duration`, `is_nsfw`, `is_premium`, `view_count`, `is_active`)
/// so either shape loads.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRecord {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(alias = "duration")]
    pub duration_seconds: u32,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default, alias = "is_nsfw")]
    pub is_restricted: Option<bool>,
    #[serde(default, alias = "is_premium")]
    pub is_premium_only: Option<bool>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, alias = "view_count")]
    pub popularity: Option<u64>,
    /// Missing or null counts as active
    #[serde(default, alias = "is_active")]
    pub active: Option<bool>,
}

impl CatalogRecord {
    pub fn is_active(&self) -> bool {
        self.active != Some(false)
    }
}

impl From<CatalogRecord> for ContentItem {
    fn from(record: CatalogRecord) -> Self {
        let mut item = ContentItem::new(record.id, record.duration_seconds)
            .with_tags(record.tags.unwrap_or_default());
        item.title = record.title;
        item.is_restricted = record.is_restricted.unwrap_or(false);
        item.is_premium_only = record.is_premium_only.unwrap_or(false);
        if let Some(rating) = record.rating {
            item = item.with_rating(rating);
        }
        item.popularity = record.popularity;
        item
    }
}
