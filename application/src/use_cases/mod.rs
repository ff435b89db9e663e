//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod run_shuffle;
pub mod session_registry;
