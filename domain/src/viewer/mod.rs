//! Who is asking for content and what they want.
//!
//! - [`context::ViewerContext`]: mode flags plus preferences, passed into every call
//! - [`preferences::Preferences`]: validated preference values

pub mod context;
pub mod preferences;
