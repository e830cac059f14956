//! Utility functions for slugs, string truncation, escaping and file system checks.
//!
//! This module provides helpers used throughout the application:
//! - Slugification of league names into page filenames
//! - Character-safe truncation for display and logging
//! - Escaping of text inserted into HTML and Markdown
//! - File system validation for the output directory

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

static DISALLOWED_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s-]").expect("valid slug regex"));
static SLUG_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s-]+").expect("valid separator regex"));

/// Convert a league or category name to a URL-friendly slug.
///
/// Removes every character outside ASCII letters, digits, whitespace and
/// hyphens, trims, lowercases and collapses runs of whitespace/hyphens into a
/// single hyphen. The result only contains `[a-z0-9-]`, so applying it twice
/// yields the same slug.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify("SPAIN: La Liga!"), "spain-la-liga");
/// assert_eq!(slugify("  X   League "), "x-league");
/// ```
pub fn slugify(name: &str) -> String {
    let cleaned = DISALLOWED_SLUG_CHARS.replace_all(name, "");
    let cleaned = cleaned.trim().to_lowercase();
    SLUG_SEPARATORS.replace_all(&cleaned, "-").into_owned()
}

/// Keep at most `max` characters of `s`, never splitting a UTF-8 sequence.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and a count of
/// the dropped bytes appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let kept = truncate_chars(s, max);
    if kept.len() == s.len() {
        s.to_string()
    } else {
        format!("{}…(+{} bytes)", kept, s.len() - kept.len())
    }
}

/// Escape text for insertion into HTML element content or attribute values.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(s)
}

/// Escape text for a Markdown table cell.
///
/// Pipes would split the cell and newlines would end the row.
pub fn escape_markdown_cell(s: &str) -> String {
    s.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = path.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("SPAIN: La Liga!"), "spain-la-liga");
        assert_eq!(slugify("X League"), "x-league");
        assert_eq!(slugify("ENGLAND: Premier League"), "england-premier-league");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
        assert_eq!(slugify("a - b -- c"), "a-b-c");
        assert_eq!(slugify("tab\tand\nnewline"), "tab-and-newline");
    }

    #[test]
    fn test_slugify_drops_non_ascii_letters() {
        assert_eq!(slugify("ליגת העל Israel"), "israel");
        assert_eq!(slugify("Ligue 1 Über"), "ligue-1-ber");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        for name in [
            "SPAIN: La Liga!",
            "  -Leading hyphen",
            "UEFA Champions League - Group A",
            "ITALY: Serie A (Women)",
            "",
        ] {
            let once = slugify(name);
            assert_eq!(slugify(&once), once, "not idempotent for {name:?}");
            assert!(
                once.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            );
        }
    }

    #[test]
    fn test_slugify_case_variants_collide() {
        assert_eq!(slugify("X League"), slugify("x  league"));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("2024-01-01T00:00:00", 10), "2024-01-01");
        assert_eq!(truncate_chars("2024", 10), "2024");
        assert_eq!(truncate_chars("תאריך ארוך מאוד", 5), "תאריך");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
        assert_eq!(truncate_for_log("short", 100), "short");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("A & B <x>"), "A &amp; B &lt;x&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_escape_markdown_cell() {
        assert_eq!(escape_markdown_cell("A | B\nC"), "A \\| B C");
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("docs").join("site");
        ensure_writable_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
        assert!(!nested.join("..__probe_write__").exists());
    }
}
