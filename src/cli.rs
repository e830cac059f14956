//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and subcommands using the `clap` crate.
//! Every option is optional on the command line: unset options fall back to the
//! YAML config file (`--config`) and then to built-in defaults, see [`crate::config`].

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the static site generator.
///
/// # Examples
///
/// ```sh
/// # Build the site into ./docs, skipping live scores (no key)
/// sports_pages build -o ./docs --base-url https://me.github.io/sports
///
/// # Build with live scores and persist JSON snapshots for the README
/// API_FOOTBALL_KEY=... sports_pages build --data-dir ./data
///
/// # Regenerate README.md from the snapshots
/// sports_pages report --readme README.md
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the feeds and write the static pages and sitemap
    Build(BuildArgs),
    /// Render the Markdown README from persisted JSON snapshots
    Report(ReportArgs),
}

#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Output directory for the generated HTML and sitemap
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Public base URL the site is served from (used in sitemap.xml)
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Highlights feed endpoint
    #[arg(long)]
    pub highlights_url: Option<String>,

    /// Live scores feed endpoint
    #[arg(long)]
    pub live_scores_url: Option<String>,

    /// API-Football key; live scores are skipped when absent
    #[arg(long, env = "API_FOOTBALL_KEY", hide_env_values = true)]
    pub api_football_key: Option<String>,

    /// HTTP timeout in seconds for each feed request
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Directory to persist the fetched records as JSON snapshots
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Highlights JSON snapshot to read
    #[arg(long)]
    pub highlights_file: Option<PathBuf>,

    /// Live scores JSON snapshot to read
    #[arg(long)]
    pub live_scores_file: Option<PathBuf>,

    /// Markdown file to write
    #[arg(short, long)]
    pub readme: Option<PathBuf>,

    /// Link to the published site shown at the bottom of the README
    #[arg(long)]
    pub site_url: Option<String>,
}
