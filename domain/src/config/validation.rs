//! Configuration issues
//!
//! Structured problems detected while turning raw configuration into
//! engine inputs, each with a severity level.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration would be rejected by the engine.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssueCode {
    /// A string field holds a value outside its enumerated set.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A numeric field is outside its allowed range.
    OutOfRange { field: String, value: String },
    /// A tag is both blocked and a favourite; the block wins.
    BlockedFavoriteTag { tag: String },
    /// Moods and blocked tags leave nothing that could ever match.
    MoodsAllBlocked,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn invalid_enum(field: &str, value: &str, valid_values: &[&str]) -> Self {
        Self {
            severity: Severity::Error,
            code: ConfigIssueCode::InvalidEnumValue {
                field: field.to_string(),
                value: value.to_string(),
                valid_values: valid_values.iter().map(|v| v.to_string()).collect(),
            },
            message: format!(
                "{}: unknown value '{}' (expected one of: {})",
                field,
                value,
                valid_values.join(", ")
            ),
        }
    }

    pub fn out_of_range(field: &str, value: impl ToString, expected: &str) -> Self {
        let value = value.to_string();
        Self {
            severity: Severity::Error,
            message: format!("{}: {} is out of range ({})", field, value, expected),
            code: ConfigIssueCode::OutOfRange {
                field: field.to_string(),
                value,
            },
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_enum_is_error() {
        let issue = ConfigIssue::invalid_enum("viewer.intensity", "extreme", &["soft", "any"]);
        assert!(issue.is_error());
        assert_eq!(
            issue.message,
            "viewer.intensity: unknown value 'extreme' (expected one of: soft, any)"
        );
    }

    #[test]
    fn test_out_of_range_message() {
        let issue = ConfigIssue::out_of_range("engine.history_capacity", 0, ">= 1");
        assert!(issue.is_error());
        assert!(matches!(issue.code, ConfigIssueCode::OutOfRange { .. }));
        assert_eq!(issue.message, "engine.history_capacity: 0 is out of range (>= 1)");
    }
}
