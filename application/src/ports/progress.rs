//! Selection progress port
//!
//! Bridges the domain's cycle phases to whatever wants to display or log
//! them.

use shuffle_domain::{CycleObserver, CyclePhase};
use tracing::debug;

/// Callback for progress updates while a selection cycle runs
///
/// Implementations live in the presentation layer.
pub trait SelectionProgress: Send + Sync {
    /// Called when the cycle enters a new phase
    fn on_phase(&self, phase: CyclePhase, items: usize);
}

/// No-op progress for when reporting is not needed
pub struct NoProgress;

impl SelectionProgress for NoProgress {
    fn on_phase(&self, _phase: CyclePhase, _items: usize) {}
}

/// Adapter: `SelectionProgress` → domain `CycleObserver`, with a debug
/// trace of every transition.
pub(crate) struct ProgressObserver<'a> {
    inner: &'a dyn SelectionProgress,
}

impl<'a> ProgressObserver<'a> {
    pub(crate) fn new(inner: &'a dyn SelectionProgress) -> Self {
        Self { inner }
    }
}

impl CycleObserver for ProgressObserver<'_> {
    fn on_phase(&self, phase: CyclePhase, items: usize) {
        debug!(phase = %phase, items, "selection cycle");
        self.inner.on_phase(phase, items);
    }
}
