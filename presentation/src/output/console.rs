//! Console output formatter for shuffle results

use crate::output::report::{PickReport, ShuffleReport};
use colored::Colorize;
use shuffle_domain::{
    ConfigIssue, DurationPreference, IntensityPreference, Severity, ViewerContext,
};

/// Formats shuffle results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete run report
    pub fn format(report: &ShuffleReport, show_weights: bool) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Smart Shuffle"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Strategy:".cyan().bold(),
            report.strategy
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Mode:".cyan().bold(),
            if report.unrestricted {
                "unrestricted"
            } else {
                "restricted"
            }
        ));
        output.push_str(&format!(
            "{} {} item(s)\n",
            "Catalog:".cyan().bold(),
            report.catalog_size
        ));

        if !report.picks.is_empty() {
            output.push_str(&Self::section_header("Picks"));
            for pick in &report.picks {
                output.push_str(&Self::format_pick(pick, show_weights));
            }
        }

        if report.exhausted {
            output.push_str(&format!(
                "\n{}\n",
                "No more eligible content.".yellow().bold()
            ));
        }

        output.push_str(&format!(
            "\n{} session '{}', {} interaction(s) saved\n",
            format!("{} pick(s)", report.picks.len()).bold(),
            report.session,
            report.interactions_saved
        ));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(report: &ShuffleReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format one pick
    pub fn format_pick(pick: &PickReport, show_weights: bool) -> String {
        let selection = &pick.selection;
        let item = &selection.item;
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}  {}\n",
            format!("{:>2}.", pick.index).bold(),
            item.label().yellow().bold(),
            format!("[{}]", item.id).dimmed()
        ));

        let mut details = vec![
            Self::format_duration(item.duration_seconds),
            item.duration_bucket().as_str().to_string(),
        ];
        if let Some(rating) = item.rating {
            details.push(format!("rated {:.1}", rating));
        }
        if let Some(popularity) = item.popularity {
            details.push(format!("{} views", popularity));
        }
        let tags: Vec<&str> = item.display_tags().collect();
        if !tags.is_empty() {
            details.push(tags.join(", "));
        }
        if item.is_restricted {
            details.push("restricted".red().to_string());
        }
        output.push_str(&format!("    {}\n", details.join(" | ")));

        output.push_str(&format!(
            "    {} {}\n",
            selection.reason,
            format!("({:.0}% chance)", selection.confidence * 100.0).dimmed()
        ));

        if show_weights && !selection.weights.is_empty() {
            for weight in &selection.weights {
                output.push_str(&format!(
                    "      {} x{:.3}  {}\n",
                    format!("{:<10}", weight.factor).cyan(),
                    weight.weight,
                    weight.reason.dimmed()
                ));
            }
        }

        if let Some(kind) = pick.feedback {
            output.push_str(&format!("    {} {}\n", "feedback:".dimmed(), kind));
        }

        output
    }

    /// Explain why nothing could be picked, listing the active constraints
    pub fn format_exhausted(ctx: &ViewerContext) -> String {
        let mut output = format!(
            "{}\n",
            "No eligible content: adjust filters or enable more content."
                .yellow()
                .bold()
        );

        let prefs = &ctx.preferences;
        let mut hints = Vec::new();
        if !ctx.unrestricted_mode_enabled {
            hints.push("restricted items are hidden (use --unrestricted)".to_string());
        }
        if prefs.preferred_duration != DurationPreference::Any {
            hints.push(format!("duration is limited to {}", prefs.preferred_duration));
        }
        if prefs.intensity != IntensityPreference::Any {
            hints.push(format!("intensity is limited to {}", prefs.intensity));
        }
        if !prefs.blocked_tags.is_empty() {
            hints.push(format!(
                "blocked tags: {}",
                prefs
                    .blocked_tags
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        if !prefs.moods.is_empty() {
            hints.push(format!(
                "moods: {}",
                prefs
                    .moods
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        if let Some(min_rating) = prefs.min_rating {
            hints.push(format!("minimum rating {:.1}", min_rating));
        }
        if !ctx.premium_allowed() {
            hints.push("premium-only items need a premium subscription".to_string());
        }

        for hint in hints {
            output.push_str(&format!("  * {}\n", hint));
        }
        output
    }

    /// Format the trending tag list
    pub fn format_trending_tags(tags: &[(String, usize)]) -> String {
        let mut output = Self::section_header("Trending Tags");
        if tags.is_empty() {
            output.push_str(&format!("{}\n", "(no tags)".dimmed()));
            return output;
        }
        for (tag, count) in tags {
            output.push_str(&format!(
                "  {} {}\n",
                format!("#{}", tag).green().bold(),
                format!("({})", count).dimmed()
            ));
        }
        output
    }

    /// Format the trending tag list as JSON
    pub fn format_trending_tags_json(tags: &[(String, usize)]) -> String {
        let list: Vec<serde_json::Value> = tags
            .iter()
            .map(|(tag, count)| serde_json::json!({ "tag": tag, "count": count }))
            .collect();
        serde_json::to_string_pretty(&list).unwrap_or_else(|_| "[]".to_string())
    }

    /// Force colors on or off for everything formatted afterwards
    pub fn set_color_enabled(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// Format configuration issues, errors first
    pub fn format_config_issues(issues: &[ConfigIssue]) -> String {
        let mut sorted: Vec<&ConfigIssue> = issues.iter().collect();
        sorted.sort_by_key(|issue| !issue.is_error());

        sorted
            .into_iter()
            .map(|issue| match issue.severity {
                Severity::Error => format!("{} {}", "error:".red().bold(), issue.message),
                Severity::Warning => format!("{} {}", "warning:".yellow().bold(), issue.message),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Seconds as m:ss (or h:mm:ss)
    pub fn format_duration(seconds: u32) -> String {
        let (h, m, s) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
        if h > 0 {
            format!("{}:{:02}:{:02}", h, m, s)
        } else {
            format!("{}:{:02}", m, s)
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shuffle_domain::{
        CatalogSnapshot, ContentItem, Preferences, SelectionStrategy, SessionId,
        SessionSettings, ShuffleSession,
    };

    fn selection() -> shuffle_domain::Selection {
        let catalog = CatalogSnapshot::new(vec![
            ContentItem::new("scene-1", 754)
                .with_title("Sunset")
                .with_tags(["romantic", "intensity:soft"])
                .with_rating(4.8),
        ]);
        let mut session = ShuffleSession::new(
            SessionId::new("test"),
            SessionSettings {
                seed: Some(1),
                ..Default::default()
            },
        )
        .unwrap();
        let ctx = ViewerContext::new(
            Preferences::default().with_strategy(SelectionStrategy::Weighted),
        );
        session.next(&catalog, &ctx).unwrap()
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(ConsoleFormatter::format_duration(754), "12:34");
        assert_eq!(ConsoleFormatter::format_duration(59), "0:59");
        assert_eq!(ConsoleFormatter::format_duration(3725), "1:02:05");
    }

    #[test]
    fn test_format_pick_hides_intensity_tags() {
        colored::control::set_override(false);
        let pick = PickReport {
            index: 1,
            selection: selection(),
            feedback: None,
        };
        let text = ConsoleFormatter::format_pick(&pick, true);
        assert!(text.contains("Sunset"));
        assert!(text.contains("romantic"));
        assert!(!text.contains("intensity:soft"));
        assert!(text.contains("rated 4.8"));
    }

    #[test]
    fn test_format_json_report() {
        let mut report = ShuffleReport::new("cli", SelectionStrategy::Weighted, false, 1);
        report.push(selection());
        report.set_feedback(shuffle_domain::InteractionKind::Like);

        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&report)).unwrap();
        assert_eq!(json["session"], "cli");
        assert_eq!(json["strategy"], "weighted");
        assert_eq!(json["picks"][0]["index"], 1);
        assert_eq!(json["picks"][0]["feedback"], "like");
        assert_eq!(json["picks"][0]["selection"]["item"]["id"], "scene-1");
    }

    #[test]
    fn test_trending_tags_json() {
        let tags = vec![("romantic".to_string(), 3), ("artistic".to_string(), 1)];
        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_trending_tags_json(&tags)).unwrap();
        assert_eq!(json[0]["tag"], "romantic");
        assert_eq!(json[0]["count"], 3);
        assert_eq!(json.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_exhausted_lists_constraints() {
        colored::control::set_override(false);
        let ctx = ViewerContext::new(
            Preferences::default()
                .with_duration(DurationPreference::Short)
                .block_tags(["rough"]),
        );
        let text = ConsoleFormatter::format_exhausted(&ctx);
        assert!(text.contains("--unrestricted"));
        assert!(text.contains("duration is limited to short"));
        assert!(text.contains("blocked tags: rough"));
        assert!(!text.contains("premium"));
    }

    #[test]
    fn test_config_issues_errors_first() {
        colored::control::set_override(false);
        let issues = vec![
            ConfigIssue {
                severity: Severity::Warning,
                code: shuffle_domain::ConfigIssueCode::MoodsAllBlocked,
                message: "moods blocked".to_string(),
            },
            ConfigIssue::out_of_range("engine.history_capacity", 0, ">= 1"),
        ];
        let text = ConsoleFormatter::format_config_issues(&issues);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("error:"));
        assert!(lines[1].starts_with("warning:"));
    }
}
