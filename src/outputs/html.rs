//! HTML page rendering.
//!
//! Pure functions turning feed records into complete HTML documents. Pages are
//! right-to-left Hebrew and styled with the Bootstrap 5.3 CDN bundle.
//!
//! Text coming from the feeds (titles, competitions, team names) is escaped.
//! Video embeds are inserted verbatim: they are HTML snippets by contract.

use crate::models::{Highlight, LiveMatch};
use crate::utils::{escape_html, slugify};
use std::fmt::Write;

/// How many leagues the navigation dropdown lists.
pub const NAV_LEAGUE_LIMIT: usize = 15;

pub const INDEX_TITLE: &str = "ראשי - תקצירי ספורט";
pub const NO_HIGHLIGHTS_MESSAGE: &str = "אין תקצירים זמינים כרגע.";
pub const NO_LIVE_MATCHES_MESSAGE: &str = "אין משחקים חיים כרגע, או שמפתח ה-API חסר.";

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css";
const BOOTSTRAP_JS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/js/bootstrap.bundle.min.js";

const INLINE_CSS: &str = r#"        body { background-color: #f8f9fa; font-family: Arial, sans-serif; }
        .video-container { position: relative; padding-bottom: 56.25%; height: 0; overflow: hidden; background: #000; }
        .video-container iframe { position: absolute; top: 0; left: 0; width: 100%; height: 100%; }
        .card { margin-bottom: 20px; box-shadow: 0 4px 6px rgba(0,0,0,0.1); border: none; }
        .live-badge { color: red; font-weight: bold; animation: blink 2s infinite; }
        @keyframes blink { 0% { opacity: 1; } 50% { opacity: 0.5; } 100% { opacity: 1; } }"#;

/// Title of a league page.
pub fn league_page_title(league: &str) -> String {
    format!("תקצירים - {league}")
}

/// Document head: doctype, SEO meta tags, stylesheet, and the opening `<body>`.
pub fn render_head(title: &str) -> String {
    let title = escape_html(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="he" dir="rtl">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="description" content="{title} - חדשות ספורט, תקצירים ותוצאות בזמן אמת.">
    <title>{title}</title>
    <link href="{BOOTSTRAP_CSS}" rel="stylesheet">
    <style>
{INLINE_CSS}
    </style>
</head>
<body>
"#
    )
}

/// Navigation bar with a dropdown of the first [`NAV_LEAGUE_LIMIT`] leagues.
///
/// `leagues` is expected sorted; links point to `{slug}.html`.
pub fn render_navbar(leagues: &[String]) -> String {
    let mut nav_links = String::new();
    for league in leagues.iter().take(NAV_LEAGUE_LIMIT) {
        write!(
            nav_links,
            r#"<li><a class="dropdown-item" href="{}.html">{}</a></li>"#,
            slugify(league),
            escape_html(league)
        )
        .unwrap();
    }

    format!(
        r##"
    <nav class="navbar navbar-expand-lg navbar-dark bg-dark mb-4">
        <div class="container">
            <a class="navbar-brand" href="index.html">⚽ ספורט היילייטס</a>
            <button class="navbar-toggler" type="button" data-bs-toggle="collapse" data-bs-target="#navbarNav">
                <span class="navbar-toggler-icon"></span>
            </button>
            <div class="collapse navbar-collapse" id="navbarNav">
                <ul class="navbar-nav">
                    <li class="nav-item">
                        <a class="nav-link" href="index.html">ראשי</a>
                    </li>
                    <li class="nav-item dropdown">
                        <a class="nav-link dropdown-toggle" href="#" id="navbarDropdown" role="button" data-bs-toggle="dropdown">
                            סינון לפי ליגה
                        </a>
                        <ul class="dropdown-menu text-end" aria-labelledby="navbarDropdown">
                            {nav_links}
                        </ul>
                    </li>
                </ul>
            </div>
        </div>
    </nav>
"##
    )
}

/// Grid of highlight cards, or the fallback message when there are none.
pub fn render_highlights_grid<'a>(items: impl IntoIterator<Item = &'a Highlight>) -> String {
    let mut items = items.into_iter().peekable();
    if items.peek().is_none() {
        return format!("<p class='text-center'>{NO_HIGHLIGHTS_MESSAGE}</p>");
    }

    let mut grid = String::from(r#"<div class="row">"#);
    for item in items {
        write!(
            grid,
            r#"
        <div class="col-md-6 col-lg-4">
            <div class="card h-100">
                <div class="card-body">
                    <h5 class="card-title">{title}</h5>
                    <p class="card-text text-muted small">{competition}</p>
                    <div class="video-container mb-3">{embed}</div>
                    <small class="text-secondary">עודכן: {date}</small>
                </div>
            </div>
        </div>
        "#,
            title = escape_html(item.display_title()),
            competition = escape_html(item.competition_label()),
            embed = item.embed(),
            date = escape_html(item.short_date()),
        )
        .unwrap();
    }
    grid.push_str("</div>");
    grid
}

/// Live score cards, or the fallback message when no match is in progress.
pub fn render_live_scores(matches: &[LiveMatch]) -> String {
    if matches.is_empty() {
        return format!("<p class='text-muted'>{NO_LIVE_MATCHES_MESSAGE}</p>");
    }

    let mut html = String::from(r#"<div class="row mb-4">"#);
    for m in matches {
        write!(
            html,
            r#"
        <div class="col-md-4">
            <div class="card border-danger mb-3">
                <div class="card-body text-center">
                    <span class="live-badge">LIVE {elapsed}'</span>
                    <h5 class="mt-2">{home} {score} {away}</h5>
                </div>
            </div>
        </div>
        "#,
            elapsed = m.elapsed_label(),
            home = escape_html(m.home_name()),
            score = m.score(),
            away = escape_html(m.away_name()),
        )
        .unwrap();
    }
    html.push_str("</div>");
    html
}

fn render_footer() -> String {
    format!(r#"</div><script src="{BOOTSTRAP_JS}"></script></body></html>"#)
}

/// The home page: live scores followed by every highlight.
pub fn render_index_page(
    leagues: &[String],
    live_scores: &[LiveMatch],
    highlights: &[Highlight],
) -> String {
    let mut page = render_head(INDEX_TITLE);
    page.push_str(&render_navbar(leagues));
    page.push_str(r#"<div class="container">"#);
    page.push_str(r#"<h2 class="mb-3">🔴 משחקים חיים</h2>"#);
    page.push_str(&render_live_scores(live_scores));
    page.push_str(r#"<hr><h2 class="mb-3">📺 התקצירים האחרונים</h2>"#);
    page.push_str(&render_highlights_grid(highlights));
    page.push_str(&render_footer());
    page
}

/// A single league's page. `highlights` should already be filtered to `league`.
pub fn render_league_page<'a>(
    league: &str,
    leagues: &[String],
    highlights: impl IntoIterator<Item = &'a Highlight>,
) -> String {
    let mut page = render_head(&league_page_title(league));
    page.push_str(&render_navbar(leagues));
    page.push_str(r#"<div class="container">"#);
    write!(
        page,
        r#"<h2 class="mb-4">תקצירים: {}</h2>"#,
        escape_html(league)
    )
    .unwrap();
    page.push_str(&render_highlights_grid(highlights));
    page.push_str(&render_footer());
    page
}
