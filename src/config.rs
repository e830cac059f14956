//! Run settings resolved from the CLI, an optional YAML file and defaults.
//!
//! Precedence is command line (including environment variables bound by clap),
//! then the YAML file, then the constants below. The resolved structures are
//! passed explicitly into the fetcher and the output writers.
//!
//! ```yaml
//! # site.yaml
//! output_dir: docs
//! base_url: https://me.github.io/sports
//! timeout_secs: 10
//! data_dir: data
//! ```

use crate::cli::{BuildArgs, ReportArgs};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument};

pub const DEFAULT_OUTPUT_DIR: &str = "docs";
pub const DEFAULT_BASE_URL: &str = "https://YOUR_USERNAME.github.io/YOUR_REPO_NAME";
pub const DEFAULT_HIGHLIGHTS_URL: &str = "https://www.scorebat.com/video-api/v3/";
pub const DEFAULT_LIVE_SCORES_URL: &str = "https://v3.football.api-sports.io/fixtures?live=all";
pub const DEFAULT_LIVE_SCORES_HOST: &str = "v3.football.api-sports.io";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_HIGHLIGHTS_FILE: &str = "data/sports_highlights.json";
pub const DEFAULT_LIVE_SCORES_FILE: &str = "data/live_scores.json";
pub const DEFAULT_README: &str = "README.md";
pub const DEFAULT_SITE_URL: &str = "https://yourusername.github.io/your-repo-name/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid {field} {value:?}: {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        source: url::ParseError,
    },
}

/// Contents of the optional YAML settings file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub output_dir: Option<PathBuf>,
    pub base_url: Option<String>,
    pub highlights_url: Option<String>,
    pub live_scores_url: Option<String>,
    pub live_scores_host: Option<String>,
    pub timeout_secs: Option<u64>,
    pub data_dir: Option<PathBuf>,
    pub highlights_file: Option<PathBuf>,
    pub live_scores_file: Option<PathBuf>,
    pub readme: Option<PathBuf>,
    pub site_url: Option<String>,
}

impl ConfigFile {
    /// Load the YAML file at `path`.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file deserializes as unit, not as an empty map.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }
}

/// Endpoints and credentials for the upstream feeds.
#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub highlights_url: String,
    pub live_scores_url: String,
    pub live_scores_host: String,
    /// Live scores are skipped entirely when this is `None`.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            highlights_url: DEFAULT_HIGHLIGHTS_URL.to_string(),
            live_scores_url: DEFAULT_LIVE_SCORES_URL.to_string(),
            live_scores_host: DEFAULT_LIVE_SCORES_HOST.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Everything the `build` command needs.
#[derive(Debug, Clone)]
pub struct BuildSettings {
    pub output_dir: PathBuf,
    /// Absolute site URL without a trailing slash.
    pub base_url: String,
    pub data_dir: Option<PathBuf>,
    pub feeds: FeedSettings,
}

impl BuildSettings {
    pub fn resolve(args: BuildArgs, file: &ConfigFile) -> Result<Self, ConfigError> {
        let base_url = args
            .base_url
            .or_else(|| file.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = validate_url("base_url", &base_url)?
            .trim_end_matches('/')
            .to_string();

        let feeds = FeedSettings {
            highlights_url: args
                .highlights_url
                .or_else(|| file.highlights_url.clone())
                .unwrap_or_else(|| DEFAULT_HIGHLIGHTS_URL.to_string()),
            live_scores_url: args
                .live_scores_url
                .or_else(|| file.live_scores_url.clone())
                .unwrap_or_else(|| DEFAULT_LIVE_SCORES_URL.to_string()),
            live_scores_host: file
                .live_scores_host
                .clone()
                .unwrap_or_else(|| DEFAULT_LIVE_SCORES_HOST.to_string()),
            api_key: args
                .api_football_key
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            timeout: Duration::from_secs(
                args.timeout_secs
                    .or(file.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        };
        validate_url("highlights_url", &feeds.highlights_url)?;
        validate_url("live_scores_url", &feeds.live_scores_url)?;

        let settings = Self {
            output_dir: args
                .output_dir
                .or_else(|| file.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            base_url,
            data_dir: args.data_dir.or_else(|| file.data_dir.clone()),
            feeds,
        };
        debug!(
            output_dir = %settings.output_dir.display(),
            base_url = %settings.base_url,
            has_api_key = settings.feeds.api_key.is_some(),
            "Resolved build settings"
        );
        Ok(settings)
    }
}

/// Everything the `report` command needs.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub highlights_file: PathBuf,
    pub live_scores_file: PathBuf,
    pub readme: PathBuf,
    pub site_url: String,
}

impl ReportSettings {
    pub fn resolve(args: ReportArgs, file: &ConfigFile) -> Result<Self, ConfigError> {
        let site_url = args
            .site_url
            .or_else(|| file.site_url.clone())
            .unwrap_or_else(|| DEFAULT_SITE_URL.to_string());
        validate_url("site_url", &site_url)?;

        Ok(Self {
            highlights_file: args
                .highlights_file
                .or_else(|| file.highlights_file.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HIGHLIGHTS_FILE)),
            live_scores_file: args
                .live_scores_file
                .or_else(|| file.live_scores_file.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LIVE_SCORES_FILE)),
            readme: args
                .readme
                .or_else(|| file.readme.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_README)),
            site_url,
        })
    }
}

fn validate_url<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ConfigError> {
    url::Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        source,
    })?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_defaults() {
        let settings = BuildSettings::resolve(BuildArgs::default(), &ConfigFile::default()).unwrap();
        assert_eq!(settings.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.feeds.timeout, Duration::from_secs(15));
        assert_eq!(settings.feeds.highlights_url, DEFAULT_HIGHLIGHTS_URL);
        assert!(settings.feeds.api_key.is_none());
        assert!(settings.data_dir.is_none());
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = ConfigFile::from_yaml(
            "output_dir: from-file\nbase_url: https://file.example/\ntimeout_secs: 3\ndata_dir: snapshots\n",
        )
        .unwrap();
        let args = BuildArgs {
            output_dir: Some(PathBuf::from("from-cli")),
            ..Default::default()
        };

        let settings = BuildSettings::resolve(args, &file).unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("from-cli"));
        assert_eq!(settings.base_url, "https://file.example");
        assert_eq!(settings.feeds.timeout, Duration::from_secs(3));
        assert_eq!(settings.data_dir, Some(PathBuf::from("snapshots")));
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        let args = BuildArgs {
            api_football_key: Some("   ".to_string()),
            ..Default::default()
        };
        let settings = BuildSettings::resolve(args, &ConfigFile::default()).unwrap();
        assert!(settings.feeds.api_key.is_none());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let args = BuildArgs {
            base_url: Some("not a url".to_string()),
            ..Default::default()
        };
        let err = BuildSettings::resolve(args, &ConfigFile::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { field: "base_url", .. }));
    }

    #[test]
    fn test_unknown_yaml_key_rejected() {
        assert!(ConfigFile::from_yaml("outptu_dir: typo\n").is_err());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let file = ConfigFile::from_yaml("\n").unwrap();
        assert!(file.output_dir.is_none());
    }

    #[test]
    fn test_report_defaults() {
        let settings = ReportSettings::resolve(ReportArgs::default(), &ConfigFile::default()).unwrap();
        assert_eq!(settings.highlights_file, PathBuf::from(DEFAULT_HIGHLIGHTS_FILE));
        assert_eq!(settings.live_scores_file, PathBuf::from(DEFAULT_LIVE_SCORES_FILE));
        assert_eq!(settings.readme, PathBuf::from(DEFAULT_README));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConfigFile::load(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
