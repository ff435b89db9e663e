//! Per-viewer sessions and the selection cycle.

pub mod cycle;
pub mod shuffle_session;
