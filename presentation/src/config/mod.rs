//! Presentation-level configuration
//!
//! Configuration for output formatting.

use serde::{Deserialize, Serialize};
use shuffle_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "text" or "json"
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Print weight factors under each pick
    pub show_weights: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
            show_weights: false,
        }
    }
}
