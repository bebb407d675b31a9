//! Site-Scout main entry point
//!
//! This is the command-line interface for the Site-Scout website explorer.

use anyhow::Context;
use clap::Parser;
use site_scout::config::{load_config_with_hash, Config};
use site_scout::crawler::explore;
use site_scout::output::{generate_markdown_summary, ArtifactStore, JsonArtifactStore};
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

/// Site-Scout: an audience-focused website explorer
///
/// Site-Scout crawls one website, scores each page's relevance to a target
/// audience through an external classifier, and writes a ranked, annotated
/// record of the pages that matter.
#[derive(Parser, Debug)]
#[command(name = "site-scout")]
#[command(version)]
#[command(about = "An audience-focused website explorer", long_about = None)]
struct Cli {
    /// Site identifier naming the output directory
    #[arg(value_name = "SITE")]
    site: String,

    /// URL where exploration should begin
    #[arg(value_name = "START_URL")]
    url: String,

    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be explored without crawling
    #[arg(long, conflicts_with = "export_summary")]
    dry_run: bool,

    /// Render a markdown summary from an existing ranking document and exit
    #[arg(long, conflicts_with = "dry_run")]
    export_summary: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if cli.dry_run {
        handle_dry_run(&config, &cli.site, &cli.url);
        return Ok(());
    }

    if cli.export_summary {
        return handle_export_summary(&config, &cli.site);
    }

    // Refuse to start without the classifier credential; every page would
    // fail classification otherwise
    if std::env::var(&config.classifier.api_key_env).is_err() {
        anyhow::bail!(
            "{} is not set; the classifier cannot run",
            config.classifier.api_key_env
        );
    }

    handle_explore(&config, &cli.site, &cli.url).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_scout=info,warn"),
            1 => EnvFilter::new("site_scout=debug,info"),
            2 => EnvFilter::new("site_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &Config, site: &str, url: &str) {
    println!("=== Site-Scout Dry Run ===\n");

    println!("Exploration:");
    println!("  Site: {}", site);
    println!("  Start URL: {}", url);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Keep threshold: {}", config.crawler.keep_threshold);
    println!("  Frontier order: {:?}", config.crawler.frontier_order);
    println!("  Scope mode: {:?}", config.crawler.scope_mode);
    println!(
        "  Content budget: {} chars",
        config.crawler.content_char_budget
    );

    println!("\nClassifier:");
    println!("  Model: {}", config.classifier.model);
    println!("  API base: {}", config.classifier.api_base);
    println!("  Key env var: {}", config.classifier.api_key_env);
    println!(
        "  Token budget: {} per minute",
        config.classifier.tokens_per_minute
    );

    println!("\nOutput:");
    println!(
        "  Artifacts: {}",
        Path::new(&config.output.artifact_dir).join(site).display()
    );

    if !config.topics.core.is_empty() {
        println!("\nCore Topics ({}):", config.topics.core.len());
        for topic in &config.topics.core {
            println!("  - {}", topic);
        }
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --export-summary mode: renders markdown from the persisted
/// ranking document
fn handle_export_summary(config: &Config, site: &str) -> anyhow::Result<()> {
    let site_dir = Path::new(&config.output.artifact_dir).join(site);
    let store = JsonArtifactStore::new(&site_dir)?;

    let document = store
        .read_ranking()
        .with_context(|| format!("no ranking document under {}", site_dir.display()))?;

    let summary_path = match &config.output.summary_path {
        Some(path) => PathBuf::from(path),
        None => site_dir.join("summary.md"),
    };

    generate_markdown_summary(&document, &summary_path)?;
    println!("✓ Summary exported to: {}", summary_path.display());

    Ok(())
}

/// Handles the main exploration
async fn handle_explore(config: &Config, site: &str, url: &str) -> anyhow::Result<()> {
    tracing::info!("Starting exploration of {} from {}", site, url);

    // Ctrl-C drains the crawl after the in-flight page completes
    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, finishing the current page before draining");
            let _ = cancel_tx.send(true);
        }
    });

    let report = explore(config, site, url, cancel_rx).await?;

    tracing::info!(
        "Exploration complete: {} visited, {} kept, {} fetch failures, {} tokens",
        report.pages_visited,
        report.pages_kept,
        report.fetch_failures,
        report.tokens_spent
    );

    if report.persist_failures > 0 {
        tracing::warn!(
            "{} page artifacts failed to persist; the output set is incomplete",
            report.persist_failures
        );
    }

    Ok(())
}
