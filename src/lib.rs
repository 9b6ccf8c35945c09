//! # ggg - notes from the terminal
//!
//! Notes are written in `$EDITOR` and stored in a single SQLite file.
//!
//! ggg provides:
//! - An FTS5 note table indexed with the trigram tokenizer (substring search anywhere)
//! - A note repository with CRUD, title lookup and snippet search
//! - Command handlers for the `ggg` binary (init, new, list, delete, open, find)

pub mod note;
pub mod search;
pub mod storage;
pub mod config;
pub mod editor;
pub mod commands;
pub mod ui;

// Re-exports for convenient access
pub use note::{Note, NoteId, NoteRef, NoteSummary};
pub use search::{Markers, SearchResult};
pub use storage::NoteStore;

use std::path::PathBuf;

/// Result type alias for ggg operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ggg operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Database not found at {}", .0.display())]
    NotInitialized(PathBuf),

    #[error("Note not found: {0}")]
    NotFound(String),

    #[error("Ambiguous note title '{title}': {count} matching notes.")]
    AmbiguousMatch { title: String, count: usize },

    #[error("Invalid note id: {0}")]
    InvalidId(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
