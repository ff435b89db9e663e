//! Shuffle session
//!
//! Per-viewer state (history, feedback, random source) and the selection
//! cycle that ties filter, history and selector together.
//!
//! A session is not internally synchronized: callers must not run two
//! cycles on the same session at once.

use crate::content::catalog::CatalogSnapshot;
use crate::content::item::ContentId;
use crate::core::error::DomainError;
use crate::eligibility;
use crate::history::{DEFAULT_HISTORY_CAPACITY, SelectionHistory, exclude_recent};
use crate::interaction::event::InteractionEvent;
use crate::interaction::recorder::InteractionRecorder;
use crate::selection::selector::Selector;
use crate::selection::strategy::{
    DEFAULT_TRENDING_EPSILON, WeightContext, WeightFactor, validate_epsilon, weight_factors,
};
use crate::session::cycle::{CycleObserver, CyclePhase, NoCycleObserver, Selection};
use crate::viewer::context::ViewerContext;
use crate::viewer::preferences::SelectionStrategy;
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a viewer session (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tunables for new sessions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub history_capacity: usize,
    pub trending_epsilon: f64,
    /// Fixed seed for reproducible picks; entropy when `None`
    pub seed: Option<u64>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            trending_epsilon: DEFAULT_TRENDING_EPSILON,
            seed: None,
        }
    }
}

impl SessionSettings {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.history_capacity == 0 {
            return Err(DomainError::InvalidCapacity);
        }
        validate_epsilon(self.trending_epsilon)
    }
}

/// What recording an event did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOutcome {
    /// The event's item now counts as recently shown
    pub marked_seen: bool,
    /// The caller should pick a new item right away
    pub reshuffle_requested: bool,
}

/// One viewer's shuffle state (Aggregate)
#[derive(Debug)]
pub struct ShuffleSession<R = StdRng> {
    id: SessionId,
    history: SelectionHistory,
    recorder: InteractionRecorder,
    selector: Selector<R>,
    trending_epsilon: f64,
    current: Option<ContentId>,
}

impl ShuffleSession<StdRng> {
    pub fn new(id: SessionId, settings: SessionSettings) -> Result<Self, DomainError> {
        let selector = Selector::from_seed_option(settings.seed);
        Self::with_selector(id, settings, selector)
    }
}

impl<R: Rng> ShuffleSession<R> {
    pub fn with_selector(
        id: SessionId,
        settings: SessionSettings,
        selector: Selector<R>,
    ) -> Result<Self, DomainError> {
        settings.validate()?;
        Ok(Self {
            id,
            history: SelectionHistory::with_capacity(settings.history_capacity)?,
            recorder: InteractionRecorder::new(),
            selector,
            trending_epsilon: settings.trending_epsilon,
            current: None,
        })
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn history(&self) -> &SelectionHistory {
        &self.history
    }

    pub fn recorder(&self) -> &InteractionRecorder {
        &self.recorder
    }

    /// Item returned by the last successful cycle
    pub fn current(&self) -> Option<&ContentId> {
        self.current.as_ref()
    }

    /// Run one selection cycle
    pub fn next(
        &mut self,
        catalog: &CatalogSnapshot,
        ctx: &ViewerContext,
    ) -> Result<Selection, DomainError> {
        self.next_observed(catalog, ctx, &NoCycleObserver)
    }

    /// Run one selection cycle, reporting each phase to `observer`
    pub fn next_observed(
        &mut self,
        catalog: &CatalogSnapshot,
        ctx: &ViewerContext,
        observer: &dyn CycleObserver,
    ) -> Result<Selection, DomainError> {
        self.history.check_capacity()?;
        observer.on_phase(CyclePhase::Idle, catalog.len());

        observer.on_phase(CyclePhase::Filtering, catalog.len());
        let eligible = eligibility::filter(catalog.items(), ctx);

        observer.on_phase(CyclePhase::Excluding, eligible.len());
        let fresh = exclude_recent(&eligible, &self.history);

        observer.on_phase(CyclePhase::Selecting, fresh.candidates.len());
        let strategy = ctx.preferences.strategy;
        let weight_ctx = WeightContext {
            favorite_tags: &ctx.preferences.favorite_tags,
            feedback: Some(self.recorder.ledger()),
            trending_epsilon: self.trending_epsilon,
        };

        let pick = match self.selector.select(&fresh.candidates, strategy, &weight_ctx) {
            Ok(pick) => pick,
            Err(DomainError::NoCandidates) => {
                observer.on_phase(CyclePhase::Exhausted, 0);
                return Err(DomainError::Exhausted);
            }
            Err(e) => return Err(e),
        };

        let weights = weight_factors(strategy, pick.item, &weight_ctx);
        let selection = Selection {
            item: pick.item.clone(),
            strategy,
            confidence: pick.probability,
            reason: reason(
                strategy,
                &weights,
                fresh.candidates.len(),
                fresh.history_exhausted,
            ),
            weights,
            eligible_count: eligible.len(),
            candidate_count: fresh.candidates.len(),
            history_exhausted: fresh.history_exhausted,
        };

        self.history.push(selection.item.id.clone());
        self.current = Some(selection.item.id.clone());
        observer.on_phase(CyclePhase::Selected, 1);

        Ok(selection)
    }

    /// Record viewer feedback.
    ///
    /// Views and dislikes also count the item as recently shown.
    pub fn record(&mut self, event: InteractionEvent, ctx: &ViewerContext) -> RecordOutcome {
        let kind = event.kind;
        if kind.marks_seen() {
            self.history.push(event.item_id.clone());
        }
        self.recorder.record(event, ctx.incognito);
        RecordOutcome {
            marked_seen: kind.marks_seen(),
            reshuffle_requested: kind.requests_reshuffle(),
        }
    }

    /// Hand pending events to the caller for persistence
    pub fn drain_pending(&mut self) -> Vec<InteractionEvent> {
        self.recorder.drain_pending()
    }

    /// Forget history and session feedback
    pub fn reset(&mut self) {
        self.history.clear();
        self.recorder.reset_feedback();
        self.current = None;
    }
}

fn reason(
    strategy: SelectionStrategy,
    weights: &[WeightFactor],
    candidates: usize,
    history_exhausted: bool,
) -> String {
    let mut reason = match strategy {
        SelectionStrategy::Random => format!("Random pick from {} candidates", candidates),
        _ => {
            let factors = weights
                .iter()
                .map(|w| w.reason.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{} pick ({})", capitalize(&strategy.to_string()), factors)
        }
    };
    if history_exhausted {
        reason.push_str("; everything recent was shown, history ignored");
    }
    reason
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
