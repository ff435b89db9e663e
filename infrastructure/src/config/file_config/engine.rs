//! Engine configuration from TOML (`[engine]` section)

use serde::{Deserialize, Serialize};
use shuffle_application::EngineConfig;
use shuffle_application::config::engine_config::{
    DEFAULT_FLUSH_THRESHOLD, DEFAULT_TRENDING_TAG_LIMIT,
};
use shuffle_domain::history::DEFAULT_HISTORY_CAPACITY;
use shuffle_domain::selection::strategy::DEFAULT_TRENDING_EPSILON;
use shuffle_domain::{ConfigIssue, SessionSettings};

/// Raw engine configuration from TOML
///
/// # Example
///
/// ```toml
/// [engine]
/// history_capacity = 10     # recently shown ids to avoid
/// trending_epsilon = 0.01   # weight of never-viewed items under "trending"
/// seed = 42                 # fixed seed for reproducible picks
/// flush_threshold = 20      # pending interactions before an automatic flush
/// trending_tag_limit = 8
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    pub history_capacity: usize,
    pub trending_epsilon: f64,
    pub seed: Option<u64>,
    pub flush_threshold: usize,
    pub trending_tag_limit: usize,
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            trending_epsilon: DEFAULT_TRENDING_EPSILON,
            seed: None,
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
            trending_tag_limit: DEFAULT_TRENDING_TAG_LIMIT,
        }
    }
}

impl FileEngineConfig {
    /// Convert to [`EngineConfig`], replacing out-of-range values with
    /// defaults and reporting each replacement.
    pub fn to_engine_config(&self) -> (EngineConfig, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let defaults = SessionSettings::default();

        let history_capacity = if self.history_capacity == 0 {
            issues.push(ConfigIssue::out_of_range(
                "engine.history_capacity",
                self.history_capacity,
                ">= 1",
            ));
            defaults.history_capacity
        } else {
            self.history_capacity
        };

        let trending_epsilon = if self.trending_epsilon.is_finite() && self.trending_epsilon > 0.0
        {
            self.trending_epsilon
        } else {
            issues.push(ConfigIssue::out_of_range(
                "engine.trending_epsilon",
                self.trending_epsilon,
                "> 0",
            ));
            defaults.trending_epsilon
        };

        let config = EngineConfig {
            session: SessionSettings {
                history_capacity,
                trending_epsilon,
                seed: self.seed,
            },
            flush_threshold: self.flush_threshold,
            trending_tag_limit: self.trending_tag_limit,
        };
        (config, issues)
    }
}
