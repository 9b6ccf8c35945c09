//! Full-text search helpers
//!
//! Query construction for the trigram-indexed note table and the snippet
//! bound applied on top of FTS5's `snippet()`.

use crate::note::NoteId;
use serde::{Deserialize, Serialize};

/// Maximum number of visible characters in a search snippet.
pub const SNIPPET_MAX_CHARS: usize = 200;

/// Token window passed to FTS5 `snippet()`. Trigram tokens are about one
/// character wide, so FTS5 returns slightly more than `SNIPPET_MAX_CHARS` and
/// [`clamp_snippet`] trims the rest.
pub const SNIPPET_TOKENS: i64 = 200;

/// Shortest term the trigram tokenizer can answer from its index.
pub const MIN_TRIGRAM_CHARS: usize = 3;

/// A body match with its highlighted excerpt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: NoteId,
    pub title: String,
    pub snippet: String,
}

/// Strings wrapped around matches and inserted where the excerpt is cut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub start: String,
    pub end: String,
    pub trailing: String,
}

impl Markers {
    pub fn new(start: impl Into<String>, end: impl Into<String>, trailing: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            trailing: trailing.into(),
        }
    }

    /// Remove every marker from `snippet`, leaving only note text.
    pub fn strip(&self, snippet: &str) -> String {
        let mut out = snippet.to_string();
        for marker in [&self.start, &self.end, &self.trailing] {
            if !marker.is_empty() {
                out = out.replace(marker.as_str(), "");
            }
        }
        out
    }
}

/// Quote `term` as a single FTS5 string so operators and punctuation are literal.
pub fn fts_phrase(term: &str) -> String {
    format!("\"{}\"", term.replace('"', "\"\""))
}

/// Restrict an FTS5 phrase to one column.
pub fn fts_column_query(column: &str, term: &str) -> String {
    format!("{} : {}", column, fts_phrase(term))
}

/// Whether `title` contains `term`, ignoring case.
///
/// Used where the trigram index cannot answer. Folding happens in Rust rather
/// than in SQL because SQLite's `LIKE` and `lower()` only fold ASCII letters.
pub fn title_contains(title: &str, term: &str) -> bool {
    title.to_lowercase().contains(&term.to_lowercase())
}

/// Whether the trigram index can serve `term`.
pub fn is_trigram_searchable(term: &str) -> bool {
    term.chars().count() >= MIN_TRIGRAM_CHARS
}

/// Cut `snippet` down to `max_chars` visible characters.
///
/// Marker strings are copied through and not counted. When the snippet is
/// cut inside a highlighted match the end marker is emitted before the
/// trailing marker.
pub fn clamp_snippet(snippet: &str, max_chars: usize, markers: &Markers) -> String {
    let mut out = String::with_capacity(snippet.len());
    let mut visible = 0;
    let mut in_match = false;
    let mut rest = snippet;

    while !rest.is_empty() {
        if let Some(tail) = strip_marker(rest, &markers.start) {
            out.push_str(&markers.start);
            in_match = true;
            rest = tail;
            continue;
        }
        if let Some(tail) = strip_marker(rest, &markers.end) {
            out.push_str(&markers.end);
            in_match = false;
            rest = tail;
            continue;
        }
        if let Some(tail) = strip_marker(rest, &markers.trailing) {
            out.push_str(&markers.trailing);
            rest = tail;
            continue;
        }

        let mut chars = rest.chars();
        let Some(c) = chars.next() else { break };
        if visible == max_chars {
            if in_match {
                out.push_str(&markers.end);
            }
            out.push_str(&markers.trailing);
            return out;
        }
        out.push(c);
        visible += 1;
        rest = chars.as_str();
    }

    out
}

fn strip_marker<'a>(s: &'a str, marker: &str) -> Option<&'a str> {
    if marker.is_empty() {
        None
    } else {
        s.strip_prefix(marker)
    }
}
