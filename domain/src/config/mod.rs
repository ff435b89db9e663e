//! Configuration-related domain types.

pub mod output_format;
pub mod validation;
