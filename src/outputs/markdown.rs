//! README report generation from persisted snapshots.
//!
//! Produces a short Markdown status page: last update time, how many
//! highlights and live matches the last build saw, and a table of the first
//! five highlights.

use crate::models::{Highlight, LiveMatch};
use crate::utils::escape_markdown_cell;
use chrono::{DateTime, Local};
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{info, instrument, warn};

/// How many highlights the README table lists.
pub const REPORT_TABLE_ROWS: usize = 5;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Read the snapshots and render the README.
///
/// Returns `Ok(None)` when either snapshot does not exist; the README is
/// left untouched rather than rewritten with made-up counts.
#[instrument(level = "info", skip_all, fields(highlights = %highlights_path.display()))]
pub async fn render_report(
    highlights_path: &Path,
    live_scores_path: &Path,
    site_url: &str,
    generated_at: DateTime<Local>,
) -> Result<Option<String>, ReportError> {
    let Some(highlights) = read_snapshot::<Vec<Highlight>>(highlights_path).await? else {
        info!("Highlights snapshot not found; skipping README update");
        return Ok(None);
    };

    let Some(live_scores) = read_snapshot::<Vec<LiveMatch>>(live_scores_path).await? else {
        warn!(path = %live_scores_path.display(), "Live scores snapshot not found; skipping README update");
        return Ok(None);
    };

    Ok(Some(report_markdown(
        &highlights,
        live_scores.len(),
        site_url,
        generated_at,
    )))
}

/// Render the README body.
pub fn report_markdown(
    highlights: &[Highlight],
    live_count: usize,
    site_url: &str,
    generated_at: DateTime<Local>,
) -> String {
    let now = generated_at.format("%d/%m/%Y %H:%M:%S");
    let mut content = vec![
        "# 🏆 ספורט פלוס - פורטל תקצירים ותוצאות".to_string(),
        format!("\n> **עדכון אחרון:** {now} (מתעדכן אוטומטית כל 30 דקות)"),
        "\n## 📊 סטטיסטיקות המערכת".to_string(),
        format!("- 📺 **תקצירים זמינים:** {}", highlights.len()),
        format!("- ⚽ **משחקים חיים כרגע:** {live_count}"),
        format!("\n## 🎬 {REPORT_TABLE_ROWS} התקצירים האחרונים שהתווספו"),
        "| משחק | ליגה | תאריך |".to_string(),
        "| :--- | :--- | :--- |".to_string(),
    ];

    for item in highlights.iter().take(REPORT_TABLE_ROWS) {
        content.push(format!(
            "| {} | {} | {} |",
            escape_markdown_cell(item.display_title()),
            escape_markdown_cell(item.competition_label()),
            escape_markdown_cell(item.short_date()),
        ));
    }

    content.push("\n---".to_string());
    content.push("\n### 🚀 איך זה עובד?".to_string());
    content.push("הפרויקט מבוסס על **GitHub Actions** ו-**Rust**. המערכת סורקת APIs של ספורט, מעבדת את הנתונים ומגישה אותם דרך **GitHub Pages** ללא עלות שרת.".to_string());
    content.push(format!("\n[🔗 לצפייה באתר החי והמלא]({site_url})"));

    content.join("\n")
}

/// Write the rendered README to `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_report(path: &Path, markdown: &str) -> Result<(), ReportError> {
    fs::write(path, markdown)
        .await
        .map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    info!("README updated");
    Ok(())
}

/// Read and parse a JSON snapshot; `None` if the file does not exist.
async fn read_snapshot<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ReportError> {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ReportError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| ReportError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
