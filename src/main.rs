//! # Sports Pages
//!
//! A static site generator for football highlights and live scores. Each run
//! pulls the latest records from public JSON APIs and renders them into plain
//! HTML files that any static file server (e.g. GitHub Pages) can host.
//!
//! ## Usage
//!
//! ```sh
//! sports_pages build -o ./docs --base-url https://me.github.io/sports -d ./data
//! sports_pages report --readme README.md
//! ```
//!
//! ## Architecture
//!
//! `build` is a sequential pipeline:
//! 1. **Setup**: Ensure the output directory exists and is writable (fatal otherwise)
//! 2. **Fetching**: Highlights feed, then live scores feed (skipped without a key)
//! 3. **Rendering**: Index page, one page per competition, sitemap
//! 4. **Snapshots**: Optionally persist the fetched records as JSON
//!
//! `report` reads those snapshots and rewrites the README. Every failure other
//! than an unusable output directory degrades to empty sections.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod models;
mod outputs;
mod utils;

use api::HttpFeedClient;
use cli::{BuildArgs, Cli, Command, ReportArgs};
use config::{BuildSettings, ConfigFile, ReportSettings};
use outputs::{json, markdown, site};
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!(version = env!("CARGO_PKG_VERSION"), "sports_pages starting up");

    let args = Cli::parse();
    debug!(config = ?args.config, "Parsed CLI arguments");

    let config_file = match &args.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };

    match args.command {
        Command::Build(build_args) => run_build(build_args, &config_file).await?,
        Command::Report(report_args) => run_report(report_args, &config_file).await?,
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

async fn run_build(args: BuildArgs, config_file: &ConfigFile) -> Result<(), Box<dyn Error>> {
    let settings = BuildSettings::resolve(args, config_file)?;

    // Early check: the only fatal failure of a build
    if let Err(e) = ensure_writable_dir(&settings.output_dir).await {
        error!(
            path = %settings.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Fetch feeds ----
    let client = HttpFeedClient::new(settings.feeds.timeout);
    let (highlights, live_scores) = api::fetch_feeds(client, settings.feeds.clone()).await;
    info!(
        highlights = highlights.len(),
        live_scores = live_scores.len(),
        "Fetched feeds"
    );

    // ---- Render site ----
    let today = Local::now().date_naive();
    let summary = site::build_site(
        &highlights,
        &live_scores,
        &settings.output_dir,
        &settings.base_url,
        today,
    )
    .await?;
    info!(
        pages = summary.pages.len(),
        leagues = summary.league_count,
        failed = summary.failed_pages.len(),
        "Created index, league pages, and sitemap"
    );

    // ---- Snapshots ----
    if let Some(data_dir) = &settings.data_dir {
        if let Err(e) = json::write_snapshots(data_dir, &highlights, &live_scores).await {
            error!(path = %data_dir.display(), error = %e, "Failed to write JSON snapshots");
        }
    }

    Ok(())
}

async fn run_report(args: ReportArgs, config_file: &ConfigFile) -> Result<(), Box<dyn Error>> {
    let settings = ReportSettings::resolve(args, config_file)?;
    info!(readme = %settings.readme.display(), "Updating README with latest stats");

    let rendered = markdown::render_report(
        &settings.highlights_file,
        &settings.live_scores_file,
        &settings.site_url,
        Local::now(),
    )
    .await;

    match rendered {
        Ok(Some(md)) => {
            if let Err(e) = markdown::write_report(&settings.readme, &md).await {
                error!(error = %e, "Failed to write README");
            }
        }
        Ok(None) => {}
        Err(e) => error!(error = %e, "Failed to render README; skipping"),
    }
    Ok(())
}
