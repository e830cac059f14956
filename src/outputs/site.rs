//! Static site assembly.
//!
//! Groups highlights by competition and writes the whole site in one pass:
//!
//! ```text
//! output_dir/
//! ├── index.html        # live scores + every highlight
//! ├── {slug}.html       # one page per competition
//! └── sitemap.xml       # every page above
//! ```
//!
//! Pages are overwritten on every run and nothing is rolled back: a failed
//! page write is logged and left out of the sitemap, and the next run repairs
//! it. Only failing to create `output_dir` aborts the build.

use crate::models::{Highlight, LiveMatch};
use crate::outputs::{html, sitemap};
use crate::utils::slugify;
use chrono::NaiveDate;
use itertools::Itertools;
use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument, warn};

pub const INDEX_FILE: &str = "index.html";
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// What a build produced.
#[derive(Debug, Default)]
pub struct BuildSummary {
    /// Every page written successfully, index first.
    pub pages: Vec<PathBuf>,
    /// Number of distinct competitions found.
    pub league_count: usize,
    /// Absolute URLs listed in the sitemap.
    pub sitemap_urls: Vec<String>,
    /// Pages that could not be written.
    pub failed_pages: Vec<PathBuf>,
}

/// Distinct non-empty competition names, sorted.
///
/// Names are compared exactly: `"X League"` and `"x league"` are two leagues.
pub fn collect_leagues(highlights: &[Highlight]) -> Vec<String> {
    highlights
        .iter()
        .filter_map(Highlight::league)
        .unique()
        .sorted()
        .map(str::to_string)
        .collect()
}

/// The page filename for a league.
pub fn league_filename(league: &str) -> String {
    format!("{}.html", slugify(league))
}

/// Build the site into `output_dir`.
///
/// `base_url` must not end with a slash. `today` is stamped into the sitemap.
///
/// # Errors
///
/// Returns an error only if `output_dir` cannot be created or the sitemap
/// cannot be serialized.
#[instrument(
    level = "info",
    skip_all,
    fields(output_dir = %output_dir.display(), highlights = highlights.len(), live = live_scores.len())
)]
pub async fn build_site(
    highlights: &[Highlight],
    live_scores: &[LiveMatch],
    output_dir: &Path,
    base_url: &str,
    today: NaiveDate,
) -> Result<BuildSummary, Box<dyn Error>> {
    info!("Building static HTML pages");
    if let Err(e) = fs::create_dir_all(output_dir).await {
        error!(error = %e, "Cannot create output directory");
        return Err(e.into());
    }

    let leagues = collect_leagues(highlights);
    let mut summary = BuildSummary {
        league_count: leagues.len(),
        ..Default::default()
    };

    // 1. Index page
    let index = html::render_index_page(&leagues, live_scores, highlights);
    write_page(output_dir, INDEX_FILE, index, base_url, &mut summary).await;

    // 2. League pages
    let mut written_slugs: HashMap<String, &str> = HashMap::new();
    for league in &leagues {
        let filename = league_filename(league);
        if let Some(previous) = written_slugs.insert(filename.clone(), league.as_str()) {
            warn!(
                %filename,
                previous,
                league = %league,
                "League names collide on the same slug; overwriting earlier page"
            );
        }

        let league_highlights = highlights
            .iter()
            .filter(|h| h.league() == Some(league.as_str()));
        let page = html::render_league_page(league, &leagues, league_highlights);
        write_page(output_dir, &filename, page, base_url, &mut summary).await;
    }

    // 3. Sitemap
    let xml = sitemap::render_sitemap(&summary.sitemap_urls, today)?;
    let sitemap_path = output_dir.join(SITEMAP_FILE);
    if let Err(e) = fs::write(&sitemap_path, xml).await {
        error!(path = %sitemap_path.display(), error = %e, "Failed writing sitemap");
        summary.failed_pages.push(sitemap_path);
    }

    info!(
        pages = summary.pages.len(),
        leagues = summary.league_count,
        failed = summary.failed_pages.len(),
        "Build complete"
    );
    Ok(summary)
}

async fn write_page(
    output_dir: &Path,
    filename: &str,
    contents: String,
    base_url: &str,
    summary: &mut BuildSummary,
) {
    let path = output_dir.join(filename);
    match fs::write(&path, contents).await {
        Ok(()) => {
            info!(path = %path.display(), "Wrote page");
            summary.pages.push(path);
            summary.sitemap_urls.push(format!("{base_url}/{filename}"));
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed writing page");
            summary.failed_pages.push(path);
        }
    }
}
