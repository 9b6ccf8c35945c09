pub mod icons;
pub mod output;
pub mod prompt;
pub mod table;
pub mod theme;
pub mod time;

pub use icons::Icons;
pub use output::{
    database, error, format_match_heading, match_heading, note_added, note_updated, notes_deleted, plain,
    plain_snippet_markers, snippet_markers, warn, ERROR_PREFIX,
};
pub use prompt::{Confirm, TerminalPrompt};
pub use table::{notes_table, TableBuilder};
pub use theme::{theme, Theme};
