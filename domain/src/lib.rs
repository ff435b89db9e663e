//! Domain layer for smart-shuffle
//!
//! This crate contains the content selection engine: entities, value
//! objects and the pure algorithms that pick the next item to show.
//! It has no dependencies on infrastructure or presentation concerns and
//! performs no I/O.
//!
//! # Core Concepts
//!
//! ## Selection cycle
//!
//! One call to [`ShuffleSession::next`] runs:
//!
//! - **Filtering**: [`eligibility::filter`] keeps items the viewer may see
//! - **Excluding**: [`history::exclude_recent`] drops recently shown items,
//!   falling back to the full eligible set when everything is recent
//! - **Selecting**: [`Selector`] picks one item by [`SelectionStrategy`]
//!
//! ## Modes
//!
//! [`ViewerContext::unrestricted_mode_enabled`] gates restricted items.
//! With it off, no restricted item is ever eligible or selected.

pub mod config;
pub mod content;
pub mod core;
pub mod eligibility;
pub mod history;
pub mod interaction;
pub mod selection;
pub mod session;
pub mod viewer;

// Re-export commonly used types
pub use config::{
    output_format::OutputFormat,
    validation::{ConfigIssue, ConfigIssueCode, Severity},
};
pub use content::{
    catalog::CatalogSnapshot,
    item::{ContentId, ContentItem, DurationBucket},
};
pub use core::error::DomainError;
pub use eligibility::Exclusion;
pub use history::{RecentExclusion, SelectionHistory};
pub use interaction::{
    event::{InteractionEvent, InteractionKind},
    recorder::{FeedbackLedger, InteractionRecorder},
};
pub use selection::{
    selector::{Pick, Selector},
    strategy::{WeightContext, WeightFactor},
};
pub use session::{
    cycle::{CycleObserver, CyclePhase, NoCycleObserver, Selection},
    shuffle_session::{RecordOutcome, SessionId, SessionSettings, ShuffleSession},
};
pub use viewer::{
    context::ViewerContext,
    preferences::{
        DurationPreference, IntensityPreference, Preferences, RawPreferences, SelectionStrategy,
        SubscriptionTier,
    },
};
