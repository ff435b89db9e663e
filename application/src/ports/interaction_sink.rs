//! Interaction sink port
//!
//! Hands recorded interaction events to durable storage (an interactions
//! table, a JSONL log). Retrying or dropping events after a failed write is
//! the sink's decision; callers never resend what they handed over.

use async_trait::async_trait;
use shuffle_domain::InteractionEvent;
use thiserror::Error;

/// Errors reported by an interaction sink
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to persist {count} interaction(s): {reason}")]
    PersistFailed { count: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable destination for interaction events
#[async_trait]
pub trait InteractionSink: Send + Sync {
    /// Persist a batch of events, oldest first
    async fn persist(&self, events: &[InteractionEvent]) -> Result<(), SinkError>;
}

/// No-op sink for tests and when persistence is disabled.
pub struct NoInteractionSink;

#[async_trait]
impl InteractionSink for NoInteractionSink {
    async fn persist(&self, _events: &[InteractionEvent]) -> Result<(), SinkError> {
        Ok(())
    }
}
