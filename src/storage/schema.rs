//! Database schema definitions

/// SQL to create the note table
///
/// Column order matters: `snippet()` addresses the body by index.
pub const CREATE_NOTES_TABLE: &str = r#"
CREATE VIRTUAL TABLE IF NOT EXISTS notes USING fts5(
    title,
    body,
    created,
    modified,
    tokenize = 'trigram'
)
"#;

/// Index of the `body` column, as used by `snippet()`
pub const BODY_COLUMN: i64 = 1;

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_NOTES_TABLE]
}
