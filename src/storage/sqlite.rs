//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use crate::{Result, Error};
use crate::note::{self, Note, NoteId, NoteSummary};
use crate::search::{self, Markers, SearchResult};
use super::schema;

/// SQLite-backed note repository
///
/// Owns the only connection a `ggg` process opens. Every statement is
/// parameterized and runs on its own; there are no multi-statement
/// transactions.
pub struct NoteStore {
    conn: Connection,
}

impl NoteStore {
    /// Create the database file (and its directory) if needed and ensure the
    /// note table exists. Safe to call on an initialized file.
    pub fn create(path: &Path) -> Result<Self> {
        crate::config::ensure_db_dir(path)?;
        tracing::debug!("Creating database at {}", path.display());
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an existing database file for reading and writing
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::NotInitialized(path.to_path_buf()));
        }
        tracing::debug!("Using database at {}", path.display());
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Queries ==========

    /// All notes without their bodies, oldest id first
    pub fn find_all(&self) -> Result<Vec<NoteSummary>> {
        tracing::debug!("Finding all notes");
        let mut stmt = self.conn.prepare(
            "SELECT rowid, title, created, modified FROM notes ORDER BY rowid",
        )?;

        let notes = stmt
            .query_map([], row_to_summary)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notes)
    }

    /// Get a full note by id
    pub fn find_by_id(&self, id: NoteId) -> Result<Note> {
        tracing::debug!("Finding note #{}", id);
        self.conn
            .query_row(
                "SELECT rowid, title, body, created, modified FROM notes WHERE rowid = ?1",
                [id],
                row_to_note,
            )
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("#{}", id)))
    }

    /// Notes whose title contains `text`, ignoring case
    ///
    /// Terms of three or more characters go through the trigram index; shorter
    /// ones are matched against every title in Rust.
    pub fn find_by_substring(&self, text: &str) -> Result<Vec<NoteSummary>> {
        tracing::debug!("Finding notes with title matching '{}'", text);
        let notes = if search::is_trigram_searchable(text) {
            let mut stmt = self.conn.prepare(
                "SELECT rowid, title, created, modified FROM notes WHERE notes MATCH ?1 ORDER BY rowid",
            )?;
            let rows = stmt
                .query_map([search::fts_column_query("title", text)], row_to_summary)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        } else {
            self.find_all()?
                .into_iter()
                .filter(|n| search::title_contains(&n.title, text))
                .collect()
        };

        Ok(notes)
    }

    /// Full-text search over note bodies, best match first
    ///
    /// Each result carries an excerpt produced by FTS5 `snippet()` with the
    /// given markers, cut to at most `SNIPPET_MAX_CHARS` visible characters.
    pub fn find_matches(&self, term: &str, markers: &Markers) -> Result<Vec<SearchResult>> {
        tracing::debug!("Searching note bodies for '{}'", term);
        if !search::is_trigram_searchable(term) {
            tracing::debug!("Term '{}' is shorter than a trigram, nothing to match", term);
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(
            r#"
            SELECT rowid, title, snippet(notes, ?1, ?2, ?3, ?4, ?5)
            FROM notes
            WHERE notes MATCH ?6
            ORDER BY rank
            "#,
        )?;

        let matches = stmt
            .query_map(
                params![
                    schema::BODY_COLUMN,
                    markers.start,
                    markers.end,
                    markers.trailing,
                    search::SNIPPET_TOKENS,
                    search::fts_column_query("body", term),
                ],
                |row| {
                    let snippet: String = row.get(2)?;
                    Ok(SearchResult {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        snippet: search::clamp_snippet(&snippet, search::SNIPPET_MAX_CHARS, markers),
                    })
                },
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(matches)
    }

    // ========== Writes ==========

    /// Insert a new note and return the id SQLite assigned to it
    pub fn insert(&self, note: &Note) -> Result<NoteId> {
        tracing::debug!("Inserting note '{}'", note.title);
        self.conn.execute(
            "INSERT INTO notes (title, body, created, modified) VALUES (?1, ?2, ?3, ?4)",
            params![
                note.title,
                note.body,
                note::format_timestamp(&note.created),
                note::format_timestamp(&note.modified),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Write back title, body and modified time of an existing note
    pub fn update(&self, note: &Note) -> Result<()> {
        tracing::debug!("Updating note #{}", note.id);
        let changed = self.conn.execute(
            "UPDATE notes SET title = ?1, body = ?2, modified = ?3 WHERE rowid = ?4",
            params![
                note.title,
                note.body,
                note::format_timestamp(&note.modified),
                note.id,
            ],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(format!("#{}", note.id)));
        }
        Ok(())
    }

    /// Delete exactly one note by id
    pub fn delete_by_id(&self, id: NoteId) -> Result<()> {
        tracing::debug!("Deleting note #{}", id);
        let changed = self.conn.execute("DELETE FROM notes WHERE rowid = ?1", [id])?;
        if changed == 0 {
            return Err(Error::NotFound(format!("#{}", id)));
        }
        Ok(())
    }

    /// Delete every note whose title contains `text`; returns how many went
    pub fn delete_by_title(&self, text: &str) -> Result<usize> {
        tracing::debug!("Deleting notes with title matching '{}'", text);
        let changed = if search::is_trigram_searchable(text) {
            self.conn.execute(
                "DELETE FROM notes WHERE notes MATCH ?1",
                [search::fts_column_query("title", text)],
            )?
        } else {
            let mut changed = 0;
            for found in self.find_by_substring(text)? {
                changed += self.conn.execute("DELETE FROM notes WHERE rowid = ?1", [found.id])?;
            }
            changed
        };
        Ok(changed)
    }

    /// Count all notes
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn timestamp_at(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<chrono::DateTime<chrono::Utc>> {
    let raw: String = row.get(idx)?;
    note::parse_timestamp(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Helper to convert a `rowid, title, created, modified` row
fn row_to_summary(row: &rusqlite::Row) -> rusqlite::Result<NoteSummary> {
    Ok(NoteSummary {
        id: row.get(0)?,
        title: row.get(1)?,
        created: timestamp_at(row, 2)?,
        modified: timestamp_at(row, 3)?,
    })
}

/// Helper to convert a `rowid, title, body, created, modified` row
fn row_to_note(row: &rusqlite::Row) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        created: timestamp_at(row, 3)?,
        modified: timestamp_at(row, 4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn insert_note(store: &NoteStore, body: &str) -> NoteId {
        store.insert(&Note::new(body, Utc::now())).unwrap()
    }

    fn brackets() -> Markers {
        Markers::new("[", "]", "...")
    }

    #[test]
    fn test_insert_find_round_trip() {
        let store = NoteStore::open_in_memory().unwrap();

        let note = Note::new("# Shopping List\nMilk\nEggs", Utc::now());
        let id = store.insert(&note).unwrap();

        let retrieved = store.find_by_id(id).unwrap();
        assert_eq!(retrieved.id, id);
        assert_eq!(retrieved.title, "Shopping List");
        assert_eq!(retrieved.body, note.body);
        assert_eq!(note::format_timestamp(&retrieved.created), note::format_timestamp(&note.created));
    }

    #[test]
    fn test_ids_are_distinct() {
        let store = NoteStore::open_in_memory().unwrap();

        let a = insert_note(&store, "first");
        let b = insert_note(&store, "second");
        assert_ne!(a, b);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_find_by_id_missing() {
        let store = NoteStore::open_in_memory().unwrap();
        assert!(matches!(store.find_by_id(99), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_find_all_ordered_by_id() {
        let store = NoteStore::open_in_memory().unwrap();

        let a = insert_note(&store, "# Alpha\n");
        let b = insert_note(&store, "# Beta\n");
        let c = insert_note(&store, "# Gamma\n");

        let ids: Vec<_> = store.find_all().unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn test_find_by_substring_trigram() {
        let store = NoteStore::open_in_memory().unwrap();

        insert_note(&store, "# Shopping List\nMilk");
        insert_note(&store, "# Weekly Shop\nBread");
        insert_note(&store, "# Meeting notes\nshop talk in the body only");

        let titles: Vec<_> = store
            .find_by_substring("shop")
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["Shopping List", "Weekly Shop"]);
    }

    #[test]
    fn test_find_by_substring_no_match() {
        let store = NoteStore::open_in_memory().unwrap();
        insert_note(&store, "# Shopping List");

        assert!(store.find_by_substring("garden").unwrap().is_empty());
    }

    #[test]
    fn test_find_by_substring_short_term() {
        let store = NoteStore::open_in_memory().unwrap();
        insert_note(&store, "# To do");
        insert_note(&store, "# Shopping");

        let found = store.find_by_substring("do").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "To do");
    }

    #[test]
    fn test_find_by_substring_short_term_folds_unicode_case() {
        let store = NoteStore::open_in_memory().unwrap();
        insert_note(&store, "# Ää");
        insert_note(&store, "# DO list");
        insert_note(&store, "# 50% off");

        let found = store.find_by_substring("ää").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Ää");

        assert_eq!(store.find_by_substring("do").unwrap()[0].title, "DO list");
        assert_eq!(store.find_by_substring("%").unwrap()[0].title, "50% off");
        assert!(store.find_by_substring("_").unwrap().is_empty());
    }

    #[test]
    fn test_find_by_substring_punctuation() {
        let store = NoteStore::open_in_memory().unwrap();
        insert_note(&store, "# Q3 \"roadmap\" - draft");

        let found = store.find_by_substring("\"roadmap\" -").unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_update_preserves_id_and_created() {
        let store = NoteStore::open_in_memory().unwrap();

        let created = Utc::now() - Duration::days(2);
        let id = store.insert(&Note::new("# Draft\nv1", created)).unwrap();

        let mut note = store.find_by_id(id).unwrap();
        let later = created + Duration::days(1);
        assert!(note.revise("# Final\nv2", later));
        store.update(&note).unwrap();

        let stored = store.find_by_id(id).unwrap();
        assert_eq!(stored.title, "Final");
        assert_eq!(stored.body, "# Final\nv2");
        assert_eq!(note::format_timestamp(&stored.created), note::format_timestamp(&created));
        assert_eq!(note::format_timestamp(&stored.modified), note::format_timestamp(&later));
    }

    #[test]
    fn test_update_missing_note() {
        let store = NoteStore::open_in_memory().unwrap();

        let mut note = Note::new("ghost", Utc::now());
        note.id = 42;
        assert!(matches!(store.update(&note), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_delete_by_id() {
        let store = NoteStore::open_in_memory().unwrap();

        let id = insert_note(&store, "doomed");
        store.delete_by_id(id).unwrap();
        assert!(matches!(store.find_by_id(id), Err(Error::NotFound(_))));
        assert!(matches!(store.delete_by_id(id), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_delete_by_title() {
        let store = NoteStore::open_in_memory().unwrap();

        insert_note(&store, "# Shopping List");
        insert_note(&store, "# Weekly Shop");
        insert_note(&store, "# Recipes");

        assert_eq!(store.delete_by_title("garden").unwrap(), 0);
        assert_eq!(store.delete_by_title("shop").unwrap(), 2);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_delete_by_short_title() {
        let store = NoteStore::open_in_memory().unwrap();

        insert_note(&store, "# Öl");
        insert_note(&store, "# Recipes");

        assert_eq!(store.delete_by_title("öl").unwrap(), 1);
        assert_eq!(store.find_all().unwrap()[0].title, "Recipes");
    }

    #[test]
    fn test_find_matches_snippet() {
        let store = NoteStore::open_in_memory().unwrap();

        let id = insert_note(&store, "# Garden\nPlant the tomatoes before May.");
        insert_note(&store, "# Tomato soup\nNo match in this body");

        let markers = brackets();
        let matches = store.find_matches("before", &markers).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, id);
        assert_eq!(matches[0].title, "Garden");
        assert!(matches[0].snippet.contains('['));
        assert!(markers.strip(&matches[0].snippet).contains("before"));
    }

    #[test]
    fn test_find_matches_snippet_bounded() {
        let store = NoteStore::open_in_memory().unwrap();

        let filler = "lorem ipsum dolor sit amet ".repeat(40);
        let body = format!("# Long\n{}needle{}", filler, filler);
        insert_note(&store, &body);

        let markers = brackets();
        let matches = store.find_matches("needle", &markers).unwrap();
        assert_eq!(matches.len(), 1);

        let snippet = &matches[0].snippet;
        assert!(snippet.ends_with(&markers.trailing));

        let text = markers.strip(snippet);
        let visible = text.chars().count();
        assert!(visible <= search::SNIPPET_MAX_CHARS, "{} visible chars", visible);
        assert!(visible > search::SNIPPET_MAX_CHARS - 20, "{} visible chars", visible);
        assert!(text.contains("needle"));
    }

    #[test]
    fn test_find_matches_none() {
        let store = NoteStore::open_in_memory().unwrap();
        insert_note(&store, "# Garden\ntomatoes");

        assert!(store.find_matches("cucumber", &brackets()).unwrap().is_empty());
        assert!(store.find_matches("to", &brackets()).unwrap().is_empty());
    }

    #[test]
    fn test_create_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("notes.db");

        let id = {
            let store = NoteStore::create(&path).unwrap();
            insert_note(&store, "# Kept")
        };

        let store = NoteStore::create(&path).unwrap();
        assert_eq!(store.find_by_id(id).unwrap().title, "Kept");

        let reopened = NoteStore::open(&path).unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");

        assert!(matches!(NoteStore::open(&path), Err(Error::NotInitialized(_))));
        assert!(!path.exists());
    }
}
