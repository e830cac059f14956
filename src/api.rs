//! Upstream feed access: highlights and live scores.
//!
//! This module wraps the two JSON APIs the site is built from. Both return a
//! `{ "response": [...] }` envelope. Every failure is contained here: callers
//! always get a (possibly empty) list of records.
//!
//! # Architecture
//!
//! - [`FeedClient`]: Transport trait, a single JSON GET
//! - [`HttpFeedClient`]: `reqwest` implementation with a fixed timeout
//! - [`Fetcher`]: Applies [`FeedSettings`] on top of a client and decodes records
//!
//! # Failure Policy
//!
//! - Transport errors, timeouts and non-2xx statuses are logged; the feed is empty
//! - A body that is not a JSON envelope is logged; the feed is empty
//! - A single record that does not decode is logged and skipped
//! - No retries and no backoff; the next scheduled run picks up fresh data

use crate::config::FeedSettings;
use crate::models::{FeedEnvelope, Highlight, LiveMatch};
use crate::utils::truncate_for_log;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

/// Header carrying the API-Football key.
pub const API_KEY_HEADER: &str = "x-apisports-key";
/// Host header API-Football expects alongside the key.
pub const API_HOST_HEADER: &str = "x-rapidapi-host";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("invalid JSON from {url}: {source} (body: {preview})")]
    Decode {
        url: String,
        source: serde_json::Error,
        preview: String,
    },
}

/// A transport able to GET a URL and parse the body as JSON.
///
/// The pipeline is generic over this trait so tests can feed canned payloads
/// without touching the network.
pub trait FeedClient {
    async fn get_json(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
    ) -> Result<serde_json::Value, FetchError>;
}

/// [`FeedClient`] backed by a `reqwest` client with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpFeedClient {
    client: reqwest::Client,
}

impl HttpFeedClient {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl FeedClient for HttpFeedClient {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn get_json(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
    ) -> Result<serde_json::Value, FetchError> {
        let t0 = Instant::now();
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, value);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Received feed body"
        );
        serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
            preview: truncate_for_log(&body, 200),
        })
    }
}

/// Fetches and decodes feed records according to [`FeedSettings`].
#[derive(Debug)]
pub struct Fetcher<C> {
    client: C,
    settings: FeedSettings,
}

impl<C: FeedClient> Fetcher<C> {
    pub fn new(client: C, settings: FeedSettings) -> Self {
        Self { client, settings }
    }

    /// Fetch the latest highlight clips. Empty on any failure.
    #[instrument(level = "info", skip_all)]
    pub async fn fetch_highlights(&self) -> Vec<Highlight> {
        info!(url = %self.settings.highlights_url, "Fetching highlights");
        self.fetch("highlights", &self.settings.highlights_url, &[])
            .await
    }

    /// Fetch in-progress fixtures.
    ///
    /// Without an API key no request is made and the result is empty.
    #[instrument(level = "info", skip_all)]
    pub async fn fetch_live_scores(&self) -> Vec<LiveMatch> {
        let Some(key) = self.settings.api_key.as_deref() else {
            info!("API_FOOTBALL_KEY not set; skipping live scores");
            return Vec::new();
        };

        info!(url = %self.settings.live_scores_url, "Fetching live scores");
        let headers = [
            (API_KEY_HEADER, key.to_string()),
            (API_HOST_HEADER, self.settings.live_scores_host.clone()),
        ];
        self.fetch("live_scores", &self.settings.live_scores_url, &headers)
            .await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        feed: &'static str,
        url: &str,
        headers: &[(&'static str, String)],
    ) -> Vec<T> {
        let body = match self.client.get_json(url, headers).await {
            Ok(body) => body,
            Err(e) => {
                error!(feed, %url, error = %e, "Feed request failed; treating as empty");
                return Vec::new();
            }
        };

        match decode_records(feed, body) {
            Ok(records) => {
                info!(feed, count = records.len(), "Fetched feed records");
                records
            }
            Err(e) => {
                error!(feed, %url, error = %e, "Feed body is not a response envelope; treating as empty");
                Vec::new()
            }
        }
    }
}

/// Fetch both feeds in order, highlights first.
///
/// A client that could not be constructed is logged and both feeds come back
/// empty, so the site still renders with its fallback sections.
#[instrument(level = "info", skip_all)]
pub async fn fetch_feeds<C: FeedClient>(
    client: Result<C, FetchError>,
    settings: FeedSettings,
) -> (Vec<Highlight>, Vec<LiveMatch>) {
    let client = match client {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client; continuing with empty feeds");
            return (Vec::new(), Vec::new());
        }
    };

    let fetcher = Fetcher::new(client, settings);
    let highlights = fetcher.fetch_highlights().await;
    let live_scores = fetcher.fetch_live_scores().await;
    (highlights, live_scores)
}

/// Decode the `response` array of a feed body into typed records.
///
/// A missing `response` key yields no records. Records that fail to decode
/// are skipped with a warning.
pub fn decode_records<T: DeserializeOwned>(
    feed: &'static str,
    body: serde_json::Value,
) -> Result<Vec<T>, serde_json::Error> {
    let envelope: FeedEnvelope = serde_json::from_value(body)?;
    let total = envelope.response.len();

    let records: Vec<T> = envelope
        .response
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| match serde_json::from_value(raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(feed, index, error = %e, "Skipping malformed record");
                None
            }
        })
        .collect();

    if records.len() < total {
        warn!(feed, kept = records.len(), total, "Some records were skipped");
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    /// Fake transport returning canned payloads and recording every call.
    #[derive(Default)]
    struct FakeClient {
        highlights: Option<serde_json::Value>,
        live: Option<serde_json::Value>,
        calls: RefCell<Vec<(String, Vec<(&'static str, String)>)>>,
    }

    impl FeedClient for FakeClient {
        async fn get_json(
            &self,
            url: &str,
            headers: &[(&'static str, String)],
        ) -> Result<serde_json::Value, FetchError> {
            self.calls
                .borrow_mut()
                .push((url.to_string(), headers.to_vec()));
            let payload = if url.contains("live") {
                self.live.clone()
            } else {
                self.highlights.clone()
            };
            payload.ok_or_else(|| FetchError::Status {
                status: 503,
                url: url.to_string(),
            })
        }
    }

    fn settings(api_key: Option<&str>) -> FeedSettings {
        FeedSettings {
            highlights_url: "https://feeds.test/highlights".to_string(),
            live_scores_url: "https://feeds.test/live".to_string(),
            api_key: api_key.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_highlights_decodes_response() {
        let client = FakeClient {
            highlights: Some(json!({
                "response": [
                    {"title": "A vs B", "competition": "X League", "date": "2024-01-01T00:00:00",
                     "videos": [{"embed": "<iframe></iframe>"}]},
                    {"title": "C vs D", "competition": "Y League", "date": "2024-01-02T00:00:00", "videos": []}
                ]
            })),
            ..Default::default()
        };
        let fetcher = Fetcher::new(client, settings(None));

        let highlights = fetcher.fetch_highlights().await;
        assert_eq!(highlights.len(), 2);
        assert_eq!(highlights[0].display_title(), "A vs B");
        assert_eq!(highlights[1].league(), Some("Y League"));
    }

    #[tokio::test]
    async fn test_fetch_live_scores_without_key_makes_no_call() {
        let client = FakeClient {
            live: Some(json!({"response": [{}]})),
            ..Default::default()
        };
        let fetcher = Fetcher::new(client, settings(None));

        let live = fetcher.fetch_live_scores().await;
        assert!(live.is_empty());
        assert!(fetcher.client.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_live_scores_sends_key_headers() {
        let client = FakeClient {
            live: Some(json!({
                "response": [{
                    "fixture": {"status": {"elapsed": 12}},
                    "teams": {"home": {"name": "A"}, "away": {"name": "B"}},
                    "goals": {"home": 0, "away": 1}
                }]
            })),
            ..Default::default()
        };
        let fetcher = Fetcher::new(client, settings(Some("secret")));

        let live = fetcher.fetch_live_scores().await;
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].score(), "0 - 1");

        let calls = fetcher.client.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "https://feeds.test/live");
        assert!(calls[0].1.contains(&(API_KEY_HEADER, "secret".to_string())));
        assert!(
            calls[0]
                .1
                .contains(&(API_HOST_HEADER, "v3.football.api-sports.io".to_string()))
        );
    }

    #[tokio::test]
    async fn test_transport_failure_yields_empty() {
        let fetcher = Fetcher::new(FakeClient::default(), settings(Some("secret")));
        assert!(fetcher.fetch_highlights().await.is_empty());
        assert!(fetcher.fetch_live_scores().await.is_empty());
        assert_eq!(fetcher.client.calls.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_feeds_client_build_failure_yields_empty() {
        let client: Result<FakeClient, FetchError> = Err(FetchError::Status {
            status: 0,
            url: "client init".to_string(),
        });
        let (highlights, live) = fetch_feeds(client, settings(Some("secret"))).await;
        assert!(highlights.is_empty());
        assert!(live.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_feeds_fetches_both() {
        let client = FakeClient {
            highlights: Some(json!({"response": [{"title": "A vs B"}]})),
            live: Some(json!({"response": [{}, {}]})),
            ..Default::default()
        };
        let (highlights, live) = fetch_feeds(Ok(client), settings(Some("secret"))).await;
        assert_eq!(highlights.len(), 1);
        assert_eq!(live.len(), 2);
    }

    #[tokio::test]
    async fn test_non_envelope_body_yields_empty() {
        let client = FakeClient {
            highlights: Some(json!(["not", "an", "envelope"])),
            ..Default::default()
        };
        let fetcher = Fetcher::new(client, settings(None));
        assert!(fetcher.fetch_highlights().await.is_empty());
    }

    #[test]
    fn test_decode_records_skips_malformed() {
        let body = json!({
            "response": [
                {"title": "ok"},
                {"title": 42},
                {"title": "also ok"}
            ]
        });
        let records: Vec<Highlight> = decode_records("highlights", body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].display_title(), "also ok");
    }

    #[test]
    fn test_decode_records_missing_response() {
        let records: Vec<Highlight> = decode_records("highlights", json!({"message": "quota"})).unwrap();
        assert!(records.is_empty());
    }
}
