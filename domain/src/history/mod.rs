//! Selection history
//!
//! A bounded FIFO of the most recently shown item ids for one session,
//! used to avoid immediate repeats.

use crate::content::item::{ContentId, ContentItem};
use crate::core::error::DomainError;
use std::collections::VecDeque;

/// Number of recent picks remembered when no capacity is configured
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Bounded recency list of item ids (Entity)
///
/// # Example
///
/// ```
/// use shuffle_domain::{ContentId, SelectionHistory};
///
/// let mut history = SelectionHistory::with_capacity(2).unwrap();
/// history.push(ContentId::new("a"));
/// history.push(ContentId::new("b"));
/// history.push(ContentId::new("c"));
/// assert_eq!(history.len(), 2);
/// assert!(!history.contains(&ContentId::new("a")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionHistory {
    ids: VecDeque<ContentId>,
    capacity: usize,
}

impl SelectionHistory {
    pub fn new() -> Self {
        Self {
            ids: VecDeque::with_capacity(DEFAULT_HISTORY_CAPACITY),
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, DomainError> {
        if capacity == 0 {
            return Err(DomainError::InvalidCapacity);
        }
        Ok(Self {
            ids: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Record `id` as the most recent pick.
    ///
    /// An id already present moves to the most-recent end. The oldest id is
    /// evicted once the history is full.
    pub fn push(&mut self, id: ContentId) {
        if let Some(pos) = self.ids.iter().position(|existing| *existing == id) {
            self.ids.remove(pos);
        }
        self.ids.push_back(id);
        while self.ids.len() > self.capacity {
            self.ids.pop_front();
        }
    }

    pub fn contains(&self, id: &ContentId) -> bool {
        self.ids.contains(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &ContentId> {
        self.ids.iter()
    }

    pub fn most_recent(&self) -> Option<&ContentId> {
        self.ids.back()
    }

    /// Verify the length bound still holds.
    pub fn check_capacity(&self) -> Result<(), DomainError> {
        if self.ids.len() > self.capacity {
            return Err(DomainError::HistoryCapacityViolation {
                len: self.ids.len(),
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

impl Default for SelectionHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of removing recently shown items from a candidate set
#[derive(Debug, Clone, PartialEq)]
pub struct RecentExclusion<'a> {
    pub candidates: Vec<&'a ContentItem>,
    /// Every eligible item was recent, so the full eligible set was kept
    pub history_exhausted: bool,
}

/// Drop items shown recently, keeping the full set if that would drop all.
pub fn exclude_recent<'a>(
    eligible: &[&'a ContentItem],
    history: &SelectionHistory,
) -> RecentExclusion<'a> {
    let fresh: Vec<&'a ContentItem> = eligible
        .iter()
        .copied()
        .filter(|item| !history.contains(&item.id))
        .collect();

    if fresh.is_empty() && !eligible.is_empty() {
        return RecentExclusion {
            candidates: eligible.to_vec(),
            history_exhausted: true,
        };
    }

    RecentExclusion {
        candidates: fresh,
        history_exhausted: false,
    }
}
