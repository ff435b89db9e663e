//! Application layer for smart-shuffle
//!
//! This crate contains use cases, port definitions, and engine configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::EngineConfig;
pub use ports::{
    catalog_source::{CatalogError, CatalogSource},
    interaction_sink::{InteractionSink, NoInteractionSink, SinkError},
    progress::{NoProgress, SelectionProgress},
};
pub use use_cases::run_shuffle::{
    FeedbackOutcome, RunShuffleError, RunShuffleUseCase, ScriptedPick, ScriptedRun,
};
pub use use_cases::session_registry::{SessionHandle, SessionRegistry};
