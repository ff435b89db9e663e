//! Interaction recorder
//!
//! Accepts feedback events for a session. Recording always succeeds: events
//! go to a pending queue for the persistence collaborator and update the
//! feedback ledger used by the weighted strategy.

use crate::content::item::ContentId;
use crate::interaction::event::{InteractionEvent, InteractionKind};
use std::collections::HashMap;

const LIKE_BONUS: f64 = 0.5;
const FAVORITE_BONUS: f64 = 1.0;

/// Per-item feedback counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackCounts {
    pub views: u32,
    pub likes: u32,
    pub dislikes: u32,
    pub favorites: u32,
}

/// Session-local feedback state
#[derive(Debug, Clone, Default)]
pub struct FeedbackLedger {
    counts: HashMap<ContentId, FeedbackCounts>,
}

impl FeedbackLedger {
    pub fn apply(&mut self, event: &InteractionEvent) {
        let counts = self.counts.entry(event.item_id.clone()).or_default();
        match event.kind {
            InteractionKind::View => counts.views += 1,
            InteractionKind::Like => counts.likes += 1,
            InteractionKind::Dislike => counts.dislikes += 1,
            InteractionKind::Favorite => counts.favorites += 1,
        }
    }

    pub fn counts(&self, id: &ContentId) -> FeedbackCounts {
        self.counts.get(id).copied().unwrap_or_default()
    }

    /// Multiplier applied to an item's weighted-strategy weight.
    ///
    /// `(1 + 0.5*likes + favorites) / (1 + dislikes)`, always positive.
    pub fn factor(&self, id: &ContentId) -> f64 {
        let c = self.counts(id);
        (1.0 + LIKE_BONUS * c.likes as f64 + FAVORITE_BONUS * c.favorites as f64)
            / (1.0 + c.dislikes as f64)
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}

/// Collects interaction events for one session
#[derive(Debug, Clone, Default)]
pub struct InteractionRecorder {
    pending: Vec<InteractionEvent>,
    ledger: FeedbackLedger,
    recorded: usize,
}

impl InteractionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event. Incognito events update the ledger but are not
    /// queued for persistence.
    pub fn record(&mut self, event: InteractionEvent, incognito: bool) {
        self.ledger.apply(&event);
        self.recorded += 1;
        if !incognito {
            self.pending.push(event);
        }
    }

    pub fn pending(&self) -> &[InteractionEvent] {
        &self.pending
    }

    /// Take all pending events, oldest first, leaving the queue empty
    pub fn drain_pending(&mut self) -> Vec<InteractionEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn ledger(&self) -> &FeedbackLedger {
        &self.ledger
    }

    /// Total events recorded, including incognito ones
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    /// Forget session feedback. Pending events are kept for persistence.
    pub fn reset_feedback(&mut self) {
        self.ledger.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, kind: InteractionKind) -> InteractionEvent {
        InteractionEvent::now(id, kind)
    }

    #[test]
    fn test_record_queues_and_drains_in_order() {
        let mut recorder = InteractionRecorder::new();
        recorder.record(event("a", InteractionKind::View), false);
        recorder.record(event("a", InteractionKind::Like), false);

        assert_eq!(recorder.pending().len(), 2);
        let drained = recorder.drain_pending();
        assert_eq!(drained[0].kind, InteractionKind::View);
        assert_eq!(drained[1].kind, InteractionKind::Like);
        assert!(recorder.pending().is_empty());
        assert_eq!(recorder.recorded(), 2);
    }

    #[test]
    fn test_incognito_queues_nothing() {
        let mut recorder = InteractionRecorder::new();
        recorder.record(event("a", InteractionKind::Like), true);
        assert!(recorder.pending().is_empty());
        assert_eq!(recorder.ledger().counts(&ContentId::new("a")).likes, 1);
    }

    #[test]
    fn test_feedback_factor() {
        let mut ledger = FeedbackLedger::default();
        let id = ContentId::new("a");
        assert_eq!(ledger.factor(&id), 1.0);

        ledger.apply(&event("a", InteractionKind::Like));
        ledger.apply(&event("a", InteractionKind::Favorite));
        assert_eq!(ledger.factor(&id), 2.5);

        ledger.apply(&event("a", InteractionKind::Dislike));
        assert_eq!(ledger.factor(&id), 1.25);

        // views do not change weight
        ledger.apply(&event("a", InteractionKind::View));
        assert_eq!(ledger.factor(&id), 1.25);
    }

    #[test]
    fn test_reset_feedback_keeps_pending() {
        let mut recorder = InteractionRecorder::new();
        recorder.record(event("a", InteractionKind::Dislike), false);
        recorder.reset_feedback();
        assert_eq!(recorder.ledger().factor(&ContentId::new("a")), 1.0);
        assert_eq!(recorder.pending().len(), 1);
    }
}
