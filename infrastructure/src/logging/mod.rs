//! Logging infrastructure: structured interaction logging.
//!
//! Provides [`JsonlInteractionLog`], a JSONL file writer that implements
//! the [`InteractionSink`](shuffle_application::InteractionSink) port.

mod jsonl_interaction_log;

pub use jsonl_interaction_log::JsonlInteractionLog;
