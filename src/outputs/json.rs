//! JSON snapshots of the fetched feeds.
//!
//! The `report` command has no network access of its own; it renders the
//! README from the snapshots a previous `build` left behind.
//!
//! ```text
//! data_dir/
//! ├── sports_highlights.json
//! └── live_scores.json
//! ```

use crate::models::{Highlight, LiveMatch};
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

pub const HIGHLIGHTS_SNAPSHOT: &str = "sports_highlights.json";
pub const LIVE_SCORES_SNAPSHOT: &str = "live_scores.json";

/// Write both snapshots into `data_dir`, creating it if needed.
///
/// # Returns
///
/// The paths written, highlights first.
#[instrument(level = "info", skip_all, fields(data_dir = %data_dir.display()))]
pub async fn write_snapshots(
    data_dir: &Path,
    highlights: &[Highlight],
    live_scores: &[LiveMatch],
) -> Result<[PathBuf; 2], Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(data_dir).await {
        error!(error = %e, "Failed to create data dir");
        return Err(e.into());
    }

    let highlights_path = data_dir.join(HIGHLIGHTS_SNAPSHOT);
    fs::write(&highlights_path, serde_json::to_string_pretty(highlights)?).await?;
    info!(path = %highlights_path.display(), count = highlights.len(), "Wrote highlights snapshot");

    let live_path = data_dir.join(LIVE_SCORES_SNAPSHOT);
    fs::write(&live_path, serde_json::to_string_pretty(live_scores)?).await?;
    info!(path = %live_path.display(), count = live_scores.len(), "Wrote live scores snapshot");

    Ok([highlights_path, live_path])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_snapshots_round_trip_counts() {
        let tmp = tempfile::tempdir().unwrap();
        let data_dir = tmp.path().join("data");
        let highlights = vec![
            Highlight {
                title: Some("A vs B".to_string()),
                competition: Some("X League".to_string()),
                ..Default::default()
            },
            Highlight::default(),
        ];

        let [h, l] = write_snapshots(&data_dir, &highlights, &[]).await.unwrap();

        let read_back: Vec<Highlight> =
            serde_json::from_str(&std::fs::read_to_string(h).unwrap()).unwrap();
        assert_eq!(read_back, highlights);

        let live: Vec<LiveMatch> =
            serde_json::from_str(&std::fs::read_to_string(l).unwrap()).unwrap();
        assert!(live.is_empty());
    }
}
