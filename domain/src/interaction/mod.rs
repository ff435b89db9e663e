//! Viewer feedback: events and the per-session recorder.

pub mod event;
pub mod recorder;
