//! Application-level configuration.
//!
//! - [`EngineConfig`]: session tunables and flush policy

pub mod engine_config;

pub use engine_config::EngineConfig;
