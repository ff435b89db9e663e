//! Selection cycle phases and the result of a successful cycle

use crate::content::item::ContentItem;
use crate::selection::strategy::WeightFactor;
use crate::viewer::preferences::SelectionStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of one selection cycle
///
/// `Idle → Filtering → Excluding → Selecting → {Selected | Exhausted}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePhase {
    Idle,
    Filtering,
    Excluding,
    Selecting,
    Selected,
    Exhausted,
}

impl CyclePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CyclePhase::Idle => "idle",
            CyclePhase::Filtering => "filtering",
            CyclePhase::Excluding => "excluding",
            CyclePhase::Selecting => "selecting",
            CyclePhase::Selected => "selected",
            CyclePhase::Exhausted => "exhausted",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CyclePhase::Selected | CyclePhase::Exhausted)
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback for phase transitions during a cycle
pub trait CycleObserver {
    /// Called on entering `phase`; `items` is the size of the set the
    /// phase starts from
    fn on_phase(&self, phase: CyclePhase, items: usize);
}

/// No-op cycle observer
pub struct NoCycleObserver;

impl CycleObserver for NoCycleObserver {
    fn on_phase(&self, _phase: CyclePhase, _items: usize) {}
}

/// Outcome of a successful selection cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub item: ContentItem,
    pub strategy: SelectionStrategy,
    /// Probability the item had of being chosen
    pub confidence: f64,
    /// Short human-readable explanation
    pub reason: String,
    pub weights: Vec<WeightFactor>,
    /// Items visible under the viewer context
    pub eligible_count: usize,
    /// Items the pick was drawn from
    pub candidate_count: usize,
    /// Every eligible item was recent, so history was ignored for this pick
    pub history_exhausted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_phases() {
        assert!(CyclePhase::Selected.is_terminal());
        assert!(CyclePhase::Exhausted.is_terminal());
        assert!(!CyclePhase::Selecting.is_terminal());
        assert_eq!(CyclePhase::Excluding.to_string(), "excluding");
    }
}
