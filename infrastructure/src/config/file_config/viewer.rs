//! Viewer configuration from TOML (`[viewer]` section)

use serde::{Deserialize, Serialize};
use shuffle_domain::{
    ConfigIssue, ConfigIssueCode, DomainError, DurationPreference, IntensityPreference,
    Preferences, RawPreferences, SelectionStrategy, Severity, SubscriptionTier, ViewerContext,
};

/// Raw viewer configuration from TOML
///
/// # Example
///
/// ```toml
/// [viewer]
/// unrestricted_mode = false
/// duration = "short"             # "short", "medium", "long", "any"
/// intensity = "soft"             # "soft", "medium", "intense", "any"
/// strategy = "weighted"          # "random", "weighted" (or "smart"), "trending"
/// blocked_tags = ["rough"]
/// favorite_tags = ["romantic"]
/// moods = ["sensual", "playful"]
/// min_rating = 3.5
/// subscription = "premium"       # omit to show premium-only items to everyone
/// incognito = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileViewerConfig {
    pub unrestricted_mode: bool,
    #[serde(flatten)]
    pub preferences: RawPreferences,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
    pub incognito: bool,
}

impl FileViewerConfig {
    pub fn parse_subscription(&self) -> (Option<SubscriptionTier>, Vec<ConfigIssue>) {
        match &self.subscription {
            None => (None, vec![]),
            Some(value) => match value.parse::<SubscriptionTier>() {
                Ok(tier) => (Some(tier), vec![]),
                Err(_) => (
                    None,
                    vec![ConfigIssue::invalid_enum(
                        "viewer.subscription",
                        value,
                        &SubscriptionTier::VALID_VALUES,
                    )],
                ),
            },
        }
    }

    /// Build the viewer context, falling back to defaults for every field
    /// that fails to parse.
    pub fn to_viewer_context(&self) -> (ViewerContext, Vec<ConfigIssue>) {
        let (preferences, errors) = self.preferences.parse_all();
        let mut issues: Vec<ConfigIssue> = errors.into_iter().map(preference_issue).collect();

        let (subscription, mut found) = self.parse_subscription();
        issues.append(&mut found);
        issues.extend(tag_warnings(&preferences));

        let ctx = ViewerContext {
            unrestricted_mode_enabled: self.unrestricted_mode,
            preferences,
            subscription,
            incognito: self.incognito,
        };
        (ctx, issues)
    }
}

fn preference_issue(error: DomainError) -> ConfigIssue {
    let (field, value) = match error {
        DomainError::InvalidPreference { field, value } => (field, value),
        other => return ConfigIssue::out_of_range("viewer", other, "a valid preference"),
    };

    let path = format!("viewer.{}", field);
    match field.as_str() {
        "preferred_duration" => {
            ConfigIssue::invalid_enum(&path, &value, &DurationPreference::VALID_VALUES)
        }
        "intensity" => ConfigIssue::invalid_enum(&path, &value, &IntensityPreference::VALID_VALUES),
        "strategy" => ConfigIssue::invalid_enum(&path, &value, &SelectionStrategy::VALID_VALUES),
        _ => ConfigIssue::out_of_range(&path, value, "0.0 to 5.0"),
    }
}

/// Suspicious but legal tag combinations
fn tag_warnings(preferences: &Preferences) -> Vec<ConfigIssue> {
    let mut issues: Vec<ConfigIssue> = preferences
        .favorite_tags
        .intersection(&preferences.blocked_tags)
        .map(|tag| ConfigIssue {
            severity: Severity::Warning,
            code: ConfigIssueCode::BlockedFavoriteTag { tag: tag.clone() },
            message: format!(
                "viewer: '{}' is both a favourite and blocked; it will never be shown",
                tag
            ),
        })
        .collect();

    if !preferences.moods.is_empty() && preferences.moods.is_subset(&preferences.blocked_tags) {
        issues.push(ConfigIssue {
            severity: Severity::Warning,
            code: ConfigIssueCode::MoodsAllBlocked,
            message: "viewer.moods: every mood is also blocked; nothing can match".to_string(),
        });
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(f: impl FnOnce(&mut RawPreferences)) -> RawPreferences {
        let mut raw = RawPreferences::default();
        f(&mut raw);
        raw
    }

    #[test]
    fn test_default_context() {
        let (ctx, issues) = FileViewerConfig::default().to_viewer_context();
        assert!(issues.is_empty());
        assert_eq!(ctx, ViewerContext::default());
    }

    #[test]
    fn test_full_section() {
        let config = FileViewerConfig {
            unrestricted_mode: true,
            preferences: raw(|r| {
                r.preferred_duration = Some("short".to_string());
                r.strategy = Some("smart".to_string());
                r.blocked_tags = vec![" Rough ".to_string()];
                r.min_rating = Some(3.5);
            }),
            subscription: Some("premium".to_string()),
            ..Default::default()
        };
        let (ctx, issues) = config.to_viewer_context();
        assert!(issues.is_empty());
        assert!(ctx.unrestricted_mode_enabled);
        assert_eq!(ctx.preferences.preferred_duration, DurationPreference::Short);
        assert_eq!(ctx.preferences.strategy, SelectionStrategy::Weighted);
        assert!(ctx.preferences.blocked_tags.contains("rough"));
        assert_eq!(ctx.subscription, Some(SubscriptionTier::Premium));
        assert_eq!(ctx.preferences.min_rating, Some(3.5));
    }

    #[test]
    fn test_invalid_values_fall_back_with_errors() {
        let config = FileViewerConfig {
            preferences: raw(|r| {
                r.intensity = Some("extreme".to_string());
                r.min_rating = Some(9.0);
            }),
            subscription: Some("gold".to_string()),
            ..Default::default()
        };
        let (ctx, issues) = config.to_viewer_context();
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|i| i.is_error()));
        assert!(issues.iter().any(|i| matches!(
            &i.code,
            ConfigIssueCode::InvalidEnumValue { field, .. } if field == "viewer.intensity"
        )));
        assert!(issues.iter().any(|i| matches!(
            &i.code,
            ConfigIssueCode::OutOfRange { field, .. } if field == "viewer.min_rating"
        )));
        assert_eq!(ctx.preferences.intensity, IntensityPreference::Any);
        assert_eq!(ctx.subscription, None);
        assert_eq!(ctx.preferences.min_rating, None);
    }

    #[test]
    fn test_blocked_favourite_is_warning() {
        let config = FileViewerConfig {
            preferences: raw(|r| {
                r.blocked_tags = vec!["a".to_string()];
                r.favorite_tags = vec!["A".to_string()];
                r.moods = vec!["a".to_string()];
            }),
            ..Default::default()
        };
        let (_, issues) = config.to_viewer_context();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
        assert!(
            issues
                .iter()
                .any(|i| i.code == ConfigIssueCode::MoodsAllBlocked)
        );
    }

    #[test]
    fn test_section_reads_duration_key() {
        let config: FileViewerConfig = toml::from_str(
            "unrestricted_mode = true\nduration = \"long\"\nintensity = \"soft\"",
        )
        .unwrap();
        assert!(config.unrestricted_mode);
        let (ctx, issues) = config.to_viewer_context();
        assert!(issues.is_empty());
        assert_eq!(ctx.preferences.preferred_duration, DurationPreference::Long);
        assert_eq!(ctx.preferences.intensity, IntensityPreference::Soft);
    }
}
