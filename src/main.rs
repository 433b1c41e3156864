//! Page-Harvest main entry point
//!
//! This is the command-line interface for the Page-Harvest feed generator.

use anyhow::Context;
use clap::Parser;
use page_harvest::config::{load_config_or_default, Config};
use page_harvest::harvester::Harvester;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Page-Harvest: turn a paginated article listing into an RSS feed
///
/// Page-Harvest follows a listing site's pagination, visits every article it
/// finds and prints an RSS 2.0 feed. Without a configuration file it
/// harvests the EurekAlert news release listing.
#[derive(Parser, Debug)]
#[command(name = "page-harvest")]
#[command(version)]
#[command(about = "Generate an RSS feed from a paginated article listing", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without fetching anything
    #[arg(long)]
    dry_run: bool,

    /// Write the feed to this file instead of standard output
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_config_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Built-in configuration is invalid".to_string(),
    })?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let harvester = Harvester::new(config).context("Failed to initialize harvester")?;
    let rss = harvester
        .run_to_rss()
        .await
        .context("Unable to build the feed")?;

    write_feed(&rss, cli.output.as_ref())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout is reserved for the feed.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_harvest=info,warn"),
            1 => EnvFilter::new("page_harvest=debug,info"),
            2 => EnvFilter::new("page_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    let show = |value: &str| {
        if value.trim().is_empty() {
            "(skipped)".to_string()
        } else {
            value.to_string()
        }
    };

    println!("=== Page-Harvest Dry Run ===\n");

    println!("Feed:");
    println!("  Title: {}", config.feed.title);
    println!("  Description: {}", config.feed.description);
    println!("  Seed URL: {}", config.feed.seed_url);

    println!("\nSelectors:");
    println!("  Links: {}", config.selectors.links);
    println!("  Next page: {}", show(&config.selectors.next_page));
    println!("  Title: {}", show(&config.selectors.title));
    println!("  Author: {}", show(&config.selectors.author));
    println!("  Date: {}", show(&config.selectors.date));
    println!("  Date format: {}", config.selectors.date_format);
    println!("  Description: {}", show(&config.selectors.description));
    println!("  Image: {}", show(&config.selectors.image));

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    match config.http.timeout_secs {
        Some(secs) => println!("  Timeout: {}s", secs),
        None => println!("  Timeout: transport default"),
    }
    println!("  Concurrency: {}", config.http.concurrency);

    println!("\n✓ Configuration is valid");
}

fn write_feed(rss: &str, output: Option<&PathBuf>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rss)
                .with_context(|| format!("Failed to write feed to {}", path.display()))?;
            tracing::info!("Feed written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", rss).context("Failed to write feed to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}
