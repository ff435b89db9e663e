//! Interaction events

use crate::content::item::ContentId;
use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of feedback a viewer gave on an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    View,
    Like,
    Dislike,
    Favorite,
}

impl InteractionKind {
    /// Whether the item should count as recently shown after this event
    pub fn marks_seen(&self) -> bool {
        matches!(self, InteractionKind::View | InteractionKind::Dislike)
    }

    /// Whether the caller should immediately pick another item
    pub fn requests_reshuffle(&self) -> bool {
        matches!(self, InteractionKind::Dislike)
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionKind::View => write!(f, "view"),
            InteractionKind::Like => write!(f, "like"),
            InteractionKind::Dislike => write!(f, "dislike"),
            InteractionKind::Favorite => write!(f, "favorite"),
        }
    }
}

impl FromStr for InteractionKind {
    type Err = DomainError;

    /// Accepts "save" for favourite, as labelled in the UI
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "view" => Ok(InteractionKind::View),
            "like" => Ok(InteractionKind::Like),
            "dislike" => Ok(InteractionKind::Dislike),
            "favorite" | "favourite" | "save" => Ok(InteractionKind::Favorite),
            _ => Err(DomainError::invalid_preference("interaction", s)),
        }
    }
}

/// One recorded feedback action (append-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub item_id: ContentId,
    pub kind: InteractionKind,
    pub timestamp: DateTime<Utc>,
}

impl InteractionEvent {
    /// Create an event stamped with the current time
    pub fn now(item_id: impl Into<ContentId>, kind: InteractionKind) -> Self {
        Self::at(item_id, kind, Utc::now())
    }

    pub fn at(item_id: impl Into<ContentId>, kind: InteractionKind, timestamp: DateTime<Utc>) -> Self {
        Self {
            item_id: item_id.into(),
            kind,
            timestamp,
        }
    }
}
