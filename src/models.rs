//! Data models for feed records and their rendered representations.
//!
//! This module defines the records the site is built from:
//! - [`Highlight`]: A video highlight clip for one match, tagged with a competition
//! - [`LiveMatch`]: An in-progress fixture with the current score and elapsed time
//! - [`FeedEnvelope`]: The `{ "response": [...] }` wrapper both upstream APIs use
//!
//! Every field is optional on input. Upstream feeds are loosely maintained and a
//! missing field must render as a placeholder, never fail the build.

use serde::{Deserialize, Serialize};

/// Placeholder title for a highlight the feed sent without one.
pub const DEFAULT_TITLE: &str = "Game Highlight";

/// Label shown for a highlight with no competition.
pub const DEFAULT_COMPETITION: &str = "General";

/// Placeholder for a missing score, minute or team name.
pub const MISSING_VALUE: &str = "-";

/// The top-level JSON wrapper returned by both feeds.
///
/// Records are kept as raw JSON values so that one malformed record can be
/// skipped without discarding the rest of the payload.
#[derive(Debug, Default, Deserialize)]
pub struct FeedEnvelope {
    #[serde(default)]
    pub response: Vec<serde_json::Value>,
}

/// A single video highlight as published by the highlights feed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Highlight {
    /// Match title, e.g. `"Arsenal - Chelsea"`.
    #[serde(default)]
    pub title: Option<String>,
    /// Competition (league) display name, e.g. `"ENGLAND: Premier League"`.
    #[serde(default)]
    pub competition: Option<String>,
    /// ISO-8601 timestamp of the match.
    #[serde(default)]
    pub date: Option<String>,
    /// Video embeds; only the first one is rendered.
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(
        default,
        rename = "matchviewUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub matchview_url: Option<String>,
    #[serde(
        default,
        rename = "competitionUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub competition_url: Option<String>,
}

/// One embeddable video attached to a highlight.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Video {
    #[serde(default)]
    pub title: Option<String>,
    /// Opaque HTML embed snippet (usually an `<iframe>`).
    #[serde(default)]
    pub embed: Option<String>,
}

impl Highlight {
    /// The title to display, falling back to [`DEFAULT_TITLE`].
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// The competition name if present and non-empty.
    ///
    /// This is the grouping key for league pages; no normalization is applied.
    pub fn league(&self) -> Option<&str> {
        self.competition.as_deref().filter(|c| !c.is_empty())
    }

    /// The competition label to display, falling back to [`DEFAULT_COMPETITION`].
    pub fn competition_label(&self) -> &str {
        self.competition.as_deref().unwrap_or(DEFAULT_COMPETITION)
    }

    /// The first video's embed snippet, or an empty string.
    pub fn embed(&self) -> &str {
        self.videos
            .first()
            .and_then(|v| v.embed.as_deref())
            .unwrap_or("")
    }

    /// The date cut to its first 10 characters (`YYYY-MM-DD` for ISO input).
    pub fn short_date(&self) -> &str {
        crate::utils::truncate_chars(self.date.as_deref().unwrap_or(""), 10)
    }
}

/// A live fixture as published by the live-scores feed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LiveMatch {
    #[serde(default)]
    pub teams: Teams,
    #[serde(default)]
    pub goals: Goals,
    #[serde(default)]
    pub fixture: Fixture,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Teams {
    #[serde(default)]
    pub home: Team,
    #[serde(default)]
    pub away: Team,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Team {
    #[serde(default)]
    pub name: Option<String>,
}

/// Goal counts; `null` before kick-off.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Goals {
    #[serde(default)]
    pub home: Option<u32>,
    #[serde(default)]
    pub away: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Fixture {
    #[serde(default)]
    pub status: FixtureStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FixtureStatus {
    /// Minutes played, `null` when the feed has no clock for the fixture.
    #[serde(default)]
    pub elapsed: Option<u32>,
}

impl LiveMatch {
    pub fn home_name(&self) -> &str {
        self.teams.home.name.as_deref().unwrap_or(MISSING_VALUE)
    }

    pub fn away_name(&self) -> &str {
        self.teams.away.name.as_deref().unwrap_or(MISSING_VALUE)
    }

    /// Scoreline as `"{home} - {away}"` with placeholders for unknown goals.
    pub fn score(&self) -> String {
        format!(
            "{} - {}",
            display_or_missing(self.goals.home),
            display_or_missing(self.goals.away)
        )
    }

    pub fn elapsed_label(&self) -> String {
        display_or_missing(self.fixture.status.elapsed)
    }
}

fn display_or_missing(value: Option<u32>) -> String {
    value.map_or_else(|| MISSING_VALUE.to_string(), |v| v.to_string())
}
