//! CLI command definitions

use crate::config::OutputConfig;
use clap::{Parser, ValueEnum};
use shuffle_domain::{
    DomainError, DurationPreference, IntensityPreference, InteractionKind, SelectionStrategy,
    SubscriptionTier, ViewerContext,
};
use std::path::PathBuf;
use std::str::FromStr;

/// Output format for shuffle results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable picks
    Text,
    /// JSON report
    Json,
}

impl From<OutputFormat> for shuffle_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => shuffle_domain::OutputFormat::Text,
            OutputFormat::Json => shuffle_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for smart-shuffle
#[derive(Parser, Debug)]
#[command(name = "smart-shuffle")]
#[command(author, version, about = "Smart Shuffle - pick what to watch next")]
#[command(long_about = r#"
Smart Shuffle picks content from a catalog one item at a time.

Each pick runs one selection cycle:
1. Filter: keep items allowed by the current mode and preferences
2. Exclude: skip recently shown items (unless everything is recent)
3. Select: pick one item by strategy (random, weighted/smart, trending)

Restricted items are only ever shown with --unrestricted.

Configuration files are loaded from (in priority order):
1. SHUFFLE_<SECTION>__<KEY>   Environment variables
2. --config <path>            Explicit config file
3. ./shuffle.toml             Project-level config
4. ~/.config/smart-shuffle/config.toml   Global config

Example:
  smart-shuffle --catalog scenes.json -n 5
  smart-shuffle --catalog scenes.json -s smart --favorite romantic --duration short
  smart-shuffle --catalog scenes.json -n 3 --feedback like,dislike,view -o json
"#)]
pub struct Cli {
    /// JSON catalog file (overrides [catalog].path)
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Number of picks to make
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Selection strategy: random, weighted (smart), trending
    #[arg(short, long, value_parser = SelectionStrategy::from_str)]
    pub strategy: Option<SelectionStrategy>,

    /// Allow restricted content
    #[arg(long)]
    pub unrestricted: bool,

    /// Preferred duration: short, medium, long, any
    #[arg(long, value_parser = DurationPreference::from_str)]
    pub duration: Option<DurationPreference>,

    /// Preferred intensity: soft, medium, intense, any
    #[arg(long, value_parser = IntensityPreference::from_str)]
    pub intensity: Option<IntensityPreference>,

    /// Never show items with this tag (can be specified multiple times)
    #[arg(long = "block", value_name = "TAG")]
    pub blocked_tags: Vec<String>,

    /// Favour items with this tag (can be specified multiple times)
    #[arg(long = "favorite", value_name = "TAG")]
    pub favorite_tags: Vec<String>,

    /// Only show items carrying one of these moods (can be specified multiple times)
    #[arg(long = "mood", value_name = "TAG")]
    pub moods: Vec<String>,

    /// Skip items rated below this (0-5)
    #[arg(long, value_name = "RATING")]
    pub min_rating: Option<f64>,

    /// Subscription tier for the premium gate: free, premium, premium_unrestricted
    #[arg(long, value_parser = SubscriptionTier::from_str)]
    pub subscription: Option<SubscriptionTier>,

    /// Record feedback without queueing it for persistence
    #[arg(long)]
    pub incognito: bool,

    /// Feedback to give on each pick in turn, e.g. "like,dislike,view"
    #[arg(long, value_delimiter = ',', value_parser = InteractionKind::from_str)]
    pub feedback: Vec<InteractionKind>,

    /// Session id (history and feedback are per session)
    #[arg(long, default_value = "cli")]
    pub session: String,

    /// Fixed random seed for reproducible picks
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of recent picks to avoid repeating
    #[arg(long, value_name = "N")]
    pub history: Option<usize>,

    /// Append interactions to this JSONL file (overrides [interactions].log_path)
    #[arg(long, value_name = "PATH")]
    pub interaction_log: Option<PathBuf>,

    /// List the most common tags in the catalog and exit
    #[arg(long)]
    pub trending_tags: bool,

    /// Show the weight factors behind each pick
    #[arg(long)]
    pub show_weights: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a configured viewer context.
    ///
    /// Tag lists extend the configured ones; everything else replaces.
    pub fn apply_to_viewer(&self, mut ctx: ViewerContext) -> Result<ViewerContext, DomainError> {
        if self.unrestricted {
            ctx.unrestricted_mode_enabled = true;
        }
        if self.incognito {
            ctx.incognito = true;
        }
        if let Some(tier) = self.subscription {
            ctx.subscription = Some(tier);
        }

        let mut prefs = ctx.preferences;
        if let Some(strategy) = self.strategy {
            prefs = prefs.with_strategy(strategy);
        }
        if let Some(duration) = self.duration {
            prefs = prefs.with_duration(duration);
        }
        if let Some(intensity) = self.intensity {
            prefs = prefs.with_intensity(intensity);
        }
        prefs = prefs
            .block_tags(&self.blocked_tags)
            .favor_tags(&self.favorite_tags)
            .with_moods(&self.moods);
        if let Some(min_rating) = self.min_rating {
            prefs = prefs.with_min_rating(min_rating)?;
        }

        ctx.preferences = prefs;
        Ok(ctx)
    }

    /// Apply command-line output flags on top of the configured ones
    pub fn apply_to_output(&self, mut output: OutputConfig) -> OutputConfig {
        if let Some(format) = self.output {
            output.format = format.into();
        }
        if self.no_color {
            output.color = false;
        }
        if self.show_weights {
            output.show_weights = true;
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "smart-shuffle",
            "--catalog",
            "scenes.json",
            "-n",
            "3",
            "-s",
            "smart",
            "--duration",
            "short",
            "--block",
            "Rough",
            "--feedback",
            "like,dislike,save",
            "-o",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.catalog, Some(PathBuf::from("scenes.json")));
        assert_eq!(cli.count, 3);
        assert_eq!(cli.strategy, Some(SelectionStrategy::Weighted));
        assert_eq!(cli.duration, Some(DurationPreference::Short));
        assert_eq!(
            cli.feedback,
            vec![
                InteractionKind::Like,
                InteractionKind::Dislike,
                InteractionKind::Favorite
            ]
        );
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_rejects_unknown_strategy() {
        assert!(Cli::try_parse_from(["smart-shuffle", "-s", "chaotic"]).is_err());
    }

    #[test]
    fn test_apply_to_viewer_overrides_and_extends() {
        let cli = Cli::try_parse_from([
            "smart-shuffle",
            "--unrestricted",
            "--block",
            " Rough ",
            "--min-rating",
            "3",
        ])
        .unwrap();
        let base = ViewerContext::new(
            shuffle_domain::Preferences::default().block_tags(["dark"]),
        );

        let ctx = cli.apply_to_viewer(base).unwrap();
        assert!(ctx.unrestricted_mode_enabled);
        assert!(ctx.preferences.blocked_tags.contains("dark"));
        assert!(ctx.preferences.blocked_tags.contains("rough"));
        assert_eq!(ctx.preferences.min_rating, Some(3.0));
    }

    #[test]
    fn test_apply_to_viewer_rejects_bad_rating() {
        let cli = Cli::try_parse_from(["smart-shuffle", "--min-rating", "7"]).unwrap();
        assert!(cli.apply_to_viewer(ViewerContext::default()).is_err());
    }

    #[test]
    fn test_apply_to_output() {
        let cli = Cli::try_parse_from(["smart-shuffle", "-o", "json", "--no-color"]).unwrap();
        let output = cli.apply_to_output(OutputConfig::default());
        assert_eq!(output.format, shuffle_domain::OutputFormat::Json);
        assert!(!output.color);
        assert!(!output.show_weights);
    }
}
