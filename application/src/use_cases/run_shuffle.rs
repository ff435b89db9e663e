//! Run Shuffle use case
//!
//! Keeps the current catalog snapshot, runs selection cycles for sessions,
//! and composes feedback with re-selection (a dislike immediately picks
//! something else).

use crate::config::EngineConfig;
use crate::ports::catalog_source::{CatalogError, CatalogSource};
use crate::ports::interaction_sink::{InteractionSink, SinkError};
use crate::ports::progress::{NoProgress, ProgressObserver, SelectionProgress};
use shuffle_domain::{
    CatalogSnapshot, DomainError, InteractionEvent, InteractionKind, Selection, ShuffleSession,
    ViewerContext,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Errors that can occur while shuffling
#[derive(Error, Debug)]
pub enum RunShuffleError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Interaction sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("Nothing has been shown yet in this session")]
    NothingSelected,
}

impl RunShuffleError {
    /// Check if this error means there is no content to show
    pub fn is_exhausted(&self) -> bool {
        matches!(self, RunShuffleError::Domain(e) if e.is_exhausted())
    }
}

/// Result of giving feedback on the current item
///
/// The feedback itself is always recorded; a failing automatic flush is
/// reported in `flush_error` and does not hide `next`.
#[derive(Debug)]
pub struct FeedbackOutcome {
    pub event: InteractionEvent,
    /// The replacement pick, when the feedback asked for one
    pub next: Option<Selection>,
    /// Events handed to the sink by an automatic flush
    pub flushed: usize,
    /// Why the automatic flush failed, if it did
    pub flush_error: Option<SinkError>,
}

/// One pick of a scripted run and the feedback given on it
#[derive(Debug)]
pub struct ScriptedPick {
    pub selection: Selection,
    pub feedback: Option<InteractionKind>,
}

/// Result of [`RunShuffleUseCase::run_script`]
#[derive(Debug, Default)]
pub struct ScriptedRun {
    pub picks: Vec<ScriptedPick>,
    /// The run stopped early because nothing was eligible
    pub exhausted: bool,
    /// Events handed to the sink by automatic flushes
    pub flushed: usize,
}

/// Use case for picking content and recording feedback
pub struct RunShuffleUseCase<C: CatalogSource + 'static, S: InteractionSink + 'static> {
    catalog_source: Arc<C>,
    sink: Arc<S>,
    snapshot: RwLock<CatalogSnapshot>,
    config: EngineConfig,
}

impl<C: CatalogSource + 'static, S: InteractionSink + 'static> RunShuffleUseCase<C, S> {
    pub fn new(catalog_source: Arc<C>, sink: Arc<S>, config: EngineConfig) -> Self {
        Self {
            catalog_source,
            sink,
            snapshot: RwLock::new(CatalogSnapshot::empty()),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the snapshot with a fresh fetch from the catalog source.
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn refresh_catalog(&self) -> Result<usize, RunShuffleError> {
        let items = self.catalog_source.fetch_active().await?;
        let snapshot = CatalogSnapshot::new(items);

        if snapshot.duplicates_dropped() > 0 {
            warn!(
                "Dropped {} duplicate catalog item(s)",
                snapshot.duplicates_dropped()
            );
        }
        info!("Catalog refreshed with {} items", snapshot.len());

        let len = snapshot.len();
        *self.snapshot.write().await = snapshot;
        Ok(len)
    }

    /// Current catalog snapshot (cheap clone)
    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Pick the next item for a session with default (no-op) progress
    pub async fn shuffle(
        &self,
        session: &mut ShuffleSession,
        ctx: &ViewerContext,
    ) -> Result<Selection, RunShuffleError> {
        self.shuffle_with_progress(session, ctx, &NoProgress).await
    }

    /// Pick the next item for a session, reporting cycle phases
    pub async fn shuffle_with_progress(
        &self,
        session: &mut ShuffleSession,
        ctx: &ViewerContext,
        progress: &dyn SelectionProgress,
    ) -> Result<Selection, RunShuffleError> {
        let snapshot = self.snapshot().await;
        let observer = ProgressObserver::new(progress);

        match session.next_observed(&snapshot, ctx, &observer) {
            Ok(selection) => {
                info!(
                    session = %session.id(),
                    item = %selection.item.id,
                    strategy = %selection.strategy,
                    confidence = selection.confidence,
                    "Selected item"
                );
                if selection.history_exhausted {
                    debug!("All eligible items were recent; history ignored for this pick");
                }
                Ok(selection)
            }
            Err(e) => {
                if e.is_exhausted() {
                    info!(session = %session.id(), "No eligible content");
                } else {
                    warn!(session = %session.id(), "Selection failed: {}", e);
                }
                Err(e.into())
            }
        }
    }

    /// Record feedback on the session's current item.
    ///
    /// A dislike immediately runs another cycle; if nothing else is
    /// eligible the feedback is still kept and `next` is `None`.
    pub async fn feedback(
        &self,
        session: &mut ShuffleSession,
        ctx: &ViewerContext,
        kind: InteractionKind,
    ) -> Result<FeedbackOutcome, RunShuffleError> {
        let item_id = session
            .current()
            .cloned()
            .ok_or(RunShuffleError::NothingSelected)?;
        let event = InteractionEvent::now(item_id, kind);
        self.record(session, ctx, event).await
    }

    /// Record an arbitrary interaction event for a session
    pub async fn record(
        &self,
        session: &mut ShuffleSession,
        ctx: &ViewerContext,
        event: InteractionEvent,
    ) -> Result<FeedbackOutcome, RunShuffleError> {
        debug!(session = %session.id(), item = %event.item_id, kind = %event.kind, "Recording interaction");
        let outcome = session.record(event.clone(), ctx);

        let next = if outcome.reshuffle_requested {
            match self.shuffle(session, ctx).await {
                Ok(selection) => Some(selection),
                Err(e) if e.is_exhausted() => None,
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        let (flushed, flush_error) =
            if self.config.should_flush(session.recorder().pending().len()) {
                match self.persist_pending(session).await {
                    Ok(count) => (count, None),
                    Err(e) => (0, Some(e)),
                }
            } else {
                (0, None)
            };

        Ok(FeedbackOutcome {
            event,
            next,
            flushed,
            flush_error,
        })
    }

    /// Make `count` picks, giving `script[i]` as feedback on the i-th.
    ///
    /// A dislike's replacement becomes the next pick. If the last pick is
    /// disliked, the replacement is appended without feedback, since the
    /// session already counts it as shown. Pending events are not flushed.
    pub async fn run_script(
        &self,
        session: &mut ShuffleSession,
        ctx: &ViewerContext,
        count: usize,
        script: &[InteractionKind],
        progress: &dyn SelectionProgress,
    ) -> Result<ScriptedRun, RunShuffleError> {
        let mut run = ScriptedRun::default();
        let mut carried: Option<Selection> = None;

        for index in 0..count {
            let selection = match carried.take() {
                Some(selection) => selection,
                None => match self.shuffle_with_progress(session, ctx, progress).await {
                    Ok(selection) => selection,
                    Err(e) if e.is_exhausted() => {
                        run.exhausted = true;
                        break;
                    }
                    Err(e) => return Err(e),
                },
            };

            let feedback = script.get(index).copied();
            run.picks.push(ScriptedPick {
                selection,
                feedback,
            });
            let Some(kind) = feedback else {
                continue;
            };

            let outcome = self.feedback(session, ctx, kind).await?;
            run.flushed += outcome.flushed;
            if kind.requests_reshuffle() {
                match outcome.next {
                    Some(next) => carried = Some(next),
                    None => {
                        run.exhausted = true;
                        break;
                    }
                }
            }
        }

        if let Some(selection) = carried {
            run.picks.push(ScriptedPick {
                selection,
                feedback: None,
            });
        }

        Ok(run)
    }

    /// Hand the session's pending interactions to the sink.
    ///
    /// Returns how many events were handed over. Events are not re-queued
    /// if the sink fails.
    pub async fn flush(&self, session: &mut ShuffleSession) -> Result<usize, RunShuffleError> {
        Ok(self.persist_pending(session).await?)
    }

    async fn persist_pending(&self, session: &mut ShuffleSession) -> Result<usize, SinkError> {
        let events = session.drain_pending();
        if events.is_empty() {
            return Ok(0);
        }

        let count = events.len();
        if let Err(e) = self.sink.persist(&events).await {
            warn!(session = %session.id(), "Interaction sink failed: {}", e);
            return Err(e);
        }

        debug!(session = %session.id(), "Flushed {} interaction(s)", count);
        Ok(count)
    }

    /// Most common tags among items visible in the given mode
    pub async fn trending_tags(&self, ctx: &ViewerContext) -> Vec<(String, usize)> {
        self.snapshot()
            .await
            .trending_tags(ctx.unrestricted_mode_enabled, self.config.trending_tag_limit)
    }
}
