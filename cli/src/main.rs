//! CLI entrypoint for Smart Shuffle
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use shuffle_application::{
    EngineConfig, InteractionSink, NoInteractionSink, NoProgress, RunShuffleUseCase,
    SelectionProgress, SessionRegistry,
};
use shuffle_domain::{OutputFormat, SessionId, ViewerContext};
use shuffle_infrastructure::{ConfigLoader, FileConfig, JsonFileCatalog, JsonlInteractionLog};
use shuffle_presentation::{Cli, ConsoleFormatter, OutputConfig, ShuffleReport, SimpleProgress};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    info!("Starting Smart Shuffle");

    // === Configuration ===
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let (mut engine, mut issues) = file_config.engine.to_engine_config();
    let (viewer, viewer_issues) = file_config.viewer.to_viewer_context();
    issues.extend(viewer_issues);
    if !issues.is_empty() {
        eprintln!("{}", ConsoleFormatter::format_config_issues(&issues));
    }
    if issues.iter().any(|issue| issue.is_error()) {
        bail!("Invalid configuration");
    }

    if let Some(seed) = cli.seed {
        engine.session.seed = Some(seed);
    }
    if let Some(capacity) = cli.history {
        engine = engine.with_history_capacity(capacity);
    }
    engine.validate()?;

    let ctx = cli.apply_to_viewer(viewer)?;
    let output = cli.apply_to_output(OutputConfig {
        format: file_config.output.format.unwrap_or_default(),
        color: file_config.output.color,
        show_weights: file_config.output.show_weights,
    });
    if !output.color {
        ConsoleFormatter::set_color_enabled(false);
    }

    // === Dependency Injection ===
    let catalog_path = cli
        .catalog
        .clone()
        .or_else(|| file_config.catalog.path.clone())
        .context("No catalog given. Use --catalog <PATH> or set [catalog].path")?;
    let catalog = Arc::new(JsonFileCatalog::new(catalog_path));

    match interaction_log(&cli, &file_config) {
        Some(path) => {
            let log = JsonlInteractionLog::new(&path)
                .with_context(|| format!("Could not open interaction log {}", path.display()))?;
            info!("Logging interactions to {}", log.path().display());
            run(&cli, catalog, Arc::new(log), engine, ctx, output).await
        }
        None => run(&cli, catalog, Arc::new(NoInteractionSink), engine, ctx, output).await,
    }
}

fn interaction_log(cli: &Cli, file_config: &FileConfig) -> Option<std::path::PathBuf> {
    cli.interaction_log
        .clone()
        .or_else(|| file_config.interactions.log_path.clone())
}

async fn run<S: InteractionSink + 'static>(
    cli: &Cli,
    catalog: Arc<JsonFileCatalog>,
    sink: Arc<S>,
    engine: EngineConfig,
    ctx: ViewerContext,
    output: OutputConfig,
) -> Result<()> {
    let use_case = RunShuffleUseCase::new(catalog, sink, engine);
    let catalog_size = use_case
        .refresh_catalog()
        .await
        .context("Failed to load catalog")?;

    if cli.trending_tags {
        let tags = use_case.trending_tags(&ctx).await;
        let text = match output.format {
            OutputFormat::Text => ConsoleFormatter::format_trending_tags(&tags),
            OutputFormat::Json => ConsoleFormatter::format_trending_tags_json(&tags),
        };
        println!("{}", text);
        return Ok(());
    }

    let registry = SessionRegistry::new(engine)?;
    let session_id = SessionId::new(cli.session.as_str());
    let handle = registry.session(&session_id)?;

    let simple = SimpleProgress::new();
    let progress: &dyn SelectionProgress = if cli.quiet { &NoProgress } else { &simple };

    let mut report = ShuffleReport::new(
        session_id.as_str(),
        ctx.preferences.strategy,
        ctx.unrestricted_mode_enabled,
        catalog_size,
    );

    {
        let mut session = handle.lock().await;
        let run = use_case
            .run_script(&mut session, &ctx, cli.count, &cli.feedback, progress)
            .await?;

        report.exhausted = run.exhausted;
        report.interactions_saved += run.flushed;
        for pick in run.picks {
            report.push(pick.selection);
            if let Some(kind) = pick.feedback {
                report.set_feedback(kind);
            }
        }

        match use_case.flush(&mut session).await {
            Ok(count) => report.interactions_saved += count,
            Err(e) => warn!("Interactions were not saved: {}", e),
        }
    }
    registry.end(&session_id);

    if report.exhausted && report.picks.is_empty() && output.format == OutputFormat::Text {
        print!("{}", ConsoleFormatter::format_exhausted(&ctx));
        return Ok(());
    }

    let text = match output.format {
        OutputFormat::Text => ConsoleFormatter::format(&report, output.show_weights),
        OutputFormat::Json => ConsoleFormatter::format_json(&report),
    };
    println!("{}", text);

    Ok(())
}
