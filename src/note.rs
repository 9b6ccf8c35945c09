//! Note types
//!
//! A note is free-form markdown text. Its title is never stored independently
//! of the body: it is always the first body line with one leading `#` header
//! marker and surrounding whitespace removed.

use crate::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// SQLite rowid of a note.
pub type NoteId = i64;

/// A stored note with its full body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Engine-assigned rowid. `0` until the note has been inserted.
    pub id: NoteId,
    pub title: String,
    pub body: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Note {
    /// Create an unsaved note from its body text.
    pub fn new(body: impl Into<String>, now: DateTime<Utc>) -> Self {
        let body = body.into();
        Self {
            id: 0,
            title: title_from_body(&body),
            body,
            created: now,
            modified: now,
        }
    }

    /// Replace the body, re-deriving the title and bumping `modified`.
    ///
    /// Returns `false` and leaves the note untouched when `body` is identical
    /// to the current body.
    pub fn revise(&mut self, body: impl Into<String>, now: DateTime<Utc>) -> bool {
        let body = body.into();
        if body == self.body {
            return false;
        }
        self.title = title_from_body(&body);
        self.body = body;
        self.modified = now;
        true
    }
}

/// A note as shown in listings: everything but the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    pub id: NoteId,
    pub title: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Derive a title from the first line of `body`.
pub fn title_from_body(body: &str) -> String {
    let first = body.lines().next().unwrap_or("");
    first.strip_prefix('#').unwrap_or(first).trim().to_string()
}

/// Format a timestamp the way it is persisted (`2024-05-01T09:30:00Z`).
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a persisted timestamp.
pub fn parse_timestamp(s: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|ts| ts.with_timezone(&Utc))
}

/// Target of `open` and `delete`: `#<id>` or a (partial) title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteRef {
    Id(NoteId),
    Title(String),
}

impl FromStr for NoteRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.strip_prefix('#') {
            Some(id) => id
                .trim()
                .parse::<NoteId>()
                .map(NoteRef::Id)
                .map_err(|_| Error::InvalidId(s.to_string())),
            None => Ok(NoteRef::Title(s.to_string())),
        }
    }
}

impl std::fmt::Display for NoteRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteRef::Id(id) => write!(f, "#{}", id),
            NoteRef::Title(title) => write!(f, "'{}'", title),
        }
    }
}
