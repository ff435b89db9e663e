//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod engine;
mod output;
mod sources;
mod viewer;

pub use engine::FileEngineConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use sources::{FileCatalogConfig, FileInteractionsConfig};
pub use viewer::FileViewerConfig;

use serde::{Deserialize, Serialize};
use shuffle_domain::ConfigIssue;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Session tunables and flush policy
    pub engine: FileEngineConfig,
    /// Mode flags and preferences
    pub viewer: FileViewerConfig,
    /// Where the catalog comes from
    pub catalog: FileCatalogConfig,
    /// Where interactions are persisted
    pub interactions: FileInteractionsConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks engine ranges, viewer enum values and suspicious tag
    /// combinations. Errors mean a value was replaced by its default.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.engine.to_engine_config().1);
        issues.extend(self.viewer.to_viewer_context().1);
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shuffle_domain::{OutputFormat, SelectionStrategy};
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[engine]
history_capacity = 5
seed = 42

[viewer]
unrestricted_mode = true
strategy = "trending"
favorite_tags = ["romantic"]

[catalog]
path = "scenes.json"

[interactions]
log_path = "interactions.jsonl"

[output]
format = "json"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.engine.history_capacity, 5);
        assert_eq!(config.engine.seed, Some(42));
        assert!(config.viewer.unrestricted_mode);
        assert_eq!(
            config.viewer.to_viewer_context().0.preferences.strategy,
            SelectionStrategy::Trending
        );
        assert_eq!(config.catalog.path, Some(PathBuf::from("scenes.json")));
        assert_eq!(
            config.interactions.log_path,
            Some(PathBuf::from("interactions.jsonl"))
        );
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[viewer]
duration = "long"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.viewer.preferences.preferred_duration.as_deref(),
            Some("long")
        );
        // Defaults should apply
        assert_eq!(config.engine, FileEngineConfig::default());
        assert!(config.catalog.path.is_none());
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_collects_all_sections() {
        let toml_str = r#"
[engine]
history_capacity = 0

[viewer]
strategy = "chaotic"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.is_error()));
    }
}
