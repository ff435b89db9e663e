//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// No eligible candidates exist at all after filtering.
    #[error("No eligible content: adjust filters or enable more content")]
    Exhausted,

    /// The selector was handed an empty candidate set.
    #[error("No candidates to select from")]
    NoCandidates,

    #[error("Invalid preference '{field}': {value}")]
    InvalidPreference { field: String, value: String },

    #[error("History capacity must be at least 1")]
    InvalidCapacity,

    /// History grew past its capacity. Only reachable if a caller mutated
    /// history without going through `push`.
    #[error("History holds {len} ids but capacity is {capacity}")]
    HistoryCapacityViolation { len: usize, capacity: usize },
}

impl DomainError {
    pub fn invalid_preference(field: impl Into<String>, value: impl Into<String>) -> Self {
        DomainError::InvalidPreference {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Check if this error means "nothing to show" rather than a bad input
    pub fn is_exhausted(&self) -> bool {
        matches!(self, DomainError::Exhausted | DomainError::NoCandidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_error_display() {
        let error = DomainError::Exhausted;
        assert_eq!(
            error.to_string(),
            "No eligible content: adjust filters or enable more content"
        );
    }

    #[test]
    fn test_invalid_preference_display() {
        let error = DomainError::invalid_preference("preferred_duration", "epic");
        assert_eq!(
            error.to_string(),
            "Invalid preference 'preferred_duration': epic"
        );
    }

    #[test]
    fn test_is_exhausted_check() {
        assert!(DomainError::Exhausted.is_exhausted());
        assert!(DomainError::NoCandidates.is_exhausted());
        assert!(!DomainError::InvalidCapacity.is_exhausted());
        assert!(
            !DomainError::HistoryCapacityViolation {
                len: 11,
                capacity: 10
            }
            .is_exhausted()
        );
    }
}
