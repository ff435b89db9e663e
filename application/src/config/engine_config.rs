//! Engine configuration.
//!
//! Controls how the selection use cases behave: session tunables, when
//! pending interactions are flushed, and how many trending tags to list.

use shuffle_domain::{DomainError, SessionSettings};

/// Default number of pending interactions that triggers a flush
pub const DEFAULT_FLUSH_THRESHOLD: usize = 20;
/// Default length of the trending tag list
pub const DEFAULT_TRENDING_TAG_LIMIT: usize = 8;

/// Application behavior configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Settings applied to every new session
    pub session: SessionSettings,
    /// Flush a session's pending interactions once this many have queued.
    /// `0` disables automatic flushing.
    pub flush_threshold: usize,
    pub trending_tag_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            session: SessionSettings::default(),
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
            trending_tag_limit: DEFAULT_TRENDING_TAG_LIMIT,
        }
    }
}

impl EngineConfig {
    /// Creates an EngineConfig with a fixed seed for reproducible picks.
    pub fn seeded(seed: u64) -> Self {
        let mut config = Self::default();
        config.session.seed = Some(seed);
        config
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.session.history_capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.session.validate()
    }

    /// Whether `pending` queued events should be flushed now
    pub fn should_flush(&self, pending: usize) -> bool {
        self.flush_threshold > 0 && pending >= self.flush_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.session.history_capacity, 10);
        assert_eq!(config.session.seed, None);
    }

    #[test]
    fn test_zero_capacity_is_invalid() {
        let config = EngineConfig::default().with_history_capacity(0);
        assert_eq!(config.validate(), Err(DomainError::InvalidCapacity));
    }

    #[test]
    fn test_should_flush() {
        let config = EngineConfig::default();
        assert!(!config.should_flush(DEFAULT_FLUSH_THRESHOLD - 1));
        assert!(config.should_flush(DEFAULT_FLUSH_THRESHOLD));

        let disabled = EngineConfig {
            flush_threshold: 0,
            ..Default::default()
        };
        assert!(!disabled.should_flush(1_000));
    }
}
