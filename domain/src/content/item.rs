//! Content item entity
//!
//! A [`ContentItem`] is one piece of shuffleable content as seen by the
//! engine. It is produced by the catalog collaborator and treated as
//! immutable for the duration of a selection call.

use crate::viewer::preferences::{DurationPreference, IntensityPreference};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Tag namespace used to encode an item's intensity (e.g. `intensity:soft`).
pub const INTENSITY_TAG_PREFIX: &str = "intensity:";

/// Upper bound of the `short` duration bucket, inclusive.
pub const SHORT_MAX_SECONDS: u32 = 600;
/// Upper bound of the `medium` duration bucket, inclusive.
pub const MEDIUM_MAX_SECONDS: u32 = 1200;

/// Stable identifier of a content item (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ContentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Length bucket an item falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationBucket {
    /// Up to 600 seconds
    Short,
    /// 601 to 1200 seconds
    Medium,
    /// More than 1200 seconds
    Long,
}

impl DurationBucket {
    pub fn from_seconds(seconds: u32) -> Self {
        if seconds <= SHORT_MAX_SECONDS {
            DurationBucket::Short
        } else if seconds <= MEDIUM_MAX_SECONDS {
            DurationBucket::Medium
        } else {
            DurationBucket::Long
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationBucket::Short => "short",
            DurationBucket::Medium => "medium",
            DurationBucket::Long => "long",
        }
    }

    /// Whether this bucket satisfies a duration preference
    pub fn matches(&self, preference: DurationPreference) -> bool {
        match preference {
            DurationPreference::Any => true,
            DurationPreference::Short => *self == DurationBucket::Short,
            DurationPreference::Medium => *self == DurationBucket::Medium,
            DurationPreference::Long => *self == DurationBucket::Long,
        }
    }
}

/// One piece of shuffleable content (Entity)
///
/// # Example
///
/// ```
/// use shuffle_domain::ContentItem;
///
/// let item = ContentItem::new("scene-1", 754)
///     .with_tags(["romantic", "intensity:soft"])
///     .with_rating(4.8);
/// assert!(item.has_tag("romantic"));
/// assert_eq!(item.rating, Some(4.8));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    /// Display title, carried through for output only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub duration_seconds: u32,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Only visible in unrestricted mode
    #[serde(default)]
    pub is_restricted: bool,
    #[serde(default)]
    pub is_premium_only: bool,
    /// Rating in [0, 5]
    #[serde(default)]
    pub rating: Option<f64>,
    /// View/engagement count
    #[serde(default)]
    pub popularity: Option<u64>,
}

impl ContentItem {
    pub fn new(id: impl Into<ContentId>, duration_seconds: u32) -> Self {
        Self {
            id: id.into(),
            title: None,
            duration_seconds,
            tags: BTreeSet::new(),
            is_restricted: false,
            is_premium_only: false,
            rating: None,
            popularity: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn restricted(mut self) -> Self {
        self.is_restricted = true;
        self
    }

    pub fn premium_only(mut self) -> Self {
        self.is_premium_only = true;
        self
    }

    /// Set the rating, clamped to [0, 5]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating.clamp(0.0, 5.0));
        self
    }

    pub fn with_popularity(mut self, popularity: u64) -> Self {
        self.popularity = Some(popularity);
        self
    }

    pub fn duration_bucket(&self) -> DurationBucket {
        DurationBucket::from_seconds(self.duration_seconds)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Whether the item carries the intensity tag required by `preference`
    pub fn matches_intensity(&self, preference: IntensityPreference) -> bool {
        match preference.as_tag_value() {
            None => true,
            Some(level) => self.has_tag(&format!("{}{}", INTENSITY_TAG_PREFIX, level)),
        }
    }

    /// Tags outside the reserved `intensity:` namespace
    pub fn display_tags(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .map(String::as_str)
            .filter(|t| !t.starts_with(INTENSITY_TAG_PREFIX))
    }

    /// Name to show the viewer: the title if known, otherwise the id
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(self.id.as_str())
    }
}
