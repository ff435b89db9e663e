//! Catalog snapshot
//!
//! An immutable view of the content that is currently available. The
//! caller refreshes it by building a new snapshot; clones share storage.

use crate::content::item::{ContentId, ContentItem, INTENSITY_TAG_PREFIX};
use crate::viewer::preferences::normalize_tag;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Read-only snapshot of available items (Aggregate)
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    items: Arc<[ContentItem]>,
    index: Arc<HashMap<ContentId, usize>>,
    taken_at: DateTime<Utc>,
    duplicates_dropped: usize,
}

impl CatalogSnapshot {
    /// Build a snapshot, normalizing tags and ratings.
    ///
    /// The first occurrence of an id wins; later duplicates are dropped.
    pub fn new(items: impl IntoIterator<Item = ContentItem>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        let mut duplicates_dropped = 0;

        for mut item in items {
            if !seen.insert(item.id.clone()) {
                duplicates_dropped += 1;
                continue;
            }
            item.tags = item.tags.iter().map(|t| normalize_tag(t)).collect();
            item.rating = item.rating.map(|r| r.clamp(0.0, 5.0));
            kept.push(item);
        }

        let index = kept
            .iter()
            .enumerate()
            .map(|(i, item)| (item.id.clone(), i))
            .collect();

        Self {
            items: kept.into(),
            index: Arc::new(index),
            taken_at: Utc::now(),
            duplicates_dropped,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ContentId) -> Option<&ContentItem> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    pub fn duplicates_dropped(&self) -> usize {
        self.duplicates_dropped
    }

    /// Count how many visible items carry each tag.
    ///
    /// Restricted items only count in unrestricted mode. Reserved
    /// `intensity:` tags are skipped. Sorted by count (desc), then tag.
    pub fn trending_tags(&self, unrestricted_mode_enabled: bool, limit: usize) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for item in self.items.iter() {
            if item.is_restricted && !unrestricted_mode_enabled {
                continue;
            }
            for tag in &item.tags {
                if !tag.starts_with(INTENSITY_TAG_PREFIX) {
                    *counts.entry(tag.as_str()).or_default() += 1;
                }
            }
        }

        let mut ranked: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);
        ranked
    }
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<ContentItem> for CatalogSnapshot {
    fn from_iter<T: IntoIterator<Item = ContentItem>>(iter: T) -> Self {
        Self::new(iter)
    }
}
