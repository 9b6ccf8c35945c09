//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite file with one FTS5 table:
//! - notes(title, body, created, modified), rowid = note id
//!
//! The table uses the trigram tokenizer, so any substring of at least three
//! characters can be matched without word boundaries.

pub mod schema;
pub mod sqlite;

pub use sqlite::NoteStore;
