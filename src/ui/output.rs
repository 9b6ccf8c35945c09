use crate::search::Markers;
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

/// Prefix of every user-facing failure line.
pub const ERROR_PREFIX: &str = "ERROR:";

const HIGHLIGHT_START: &str = "\x1b[93m";
const HIGHLIGHT_END: &str = "\x1b[39m";
const ELLIPSIS: &str = " (...) ";

pub fn error(label: &str) {
    eprintln!("{} {}", ERROR_PREFIX.style(theme().error.clone()), label);
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn plain(label: &str) {
    println!("{}", label);
}

pub fn note_added(title: &str) {
    println!("{} '{}' added.", Icons::NEW.style(theme().success.clone()), title);
}

pub fn note_updated(title: &str) {
    println!("{} '{}' updated!", Icons::MOD.style(theme().warn.clone()), title);
}

pub fn notes_deleted(label: &str) {
    println!("{} {}", Icons::DEL.style(theme().error.clone()), label);
}

pub fn database(label: &str) {
    println!("{} {}", Icons::DATABASE, label.style(theme().success.clone()));
}

/// Heading printed above each search hit: `#3 - 'Groceries':`
pub fn format_match_heading(id: i64, title: &str) -> String {
    format!("#{} - '{}':", id, title)
}

pub fn match_heading(id: i64, title: &str) {
    let heading = format_match_heading(id, title);
    println!("{} {}", Icons::SEARCH, heading.style(theme().info.clone()));
}

/// Markers for search snippets: ANSI highlight on a terminal, bare text otherwise.
pub fn snippet_markers() -> Markers {
    if theme().colored {
        Markers::new(
            HIGHLIGHT_START,
            HIGHLIGHT_END,
            ELLIPSIS.style(theme().muted.clone()).to_string(),
        )
    } else {
        plain_snippet_markers()
    }
}

/// Markers for machine-readable output.
pub fn plain_snippet_markers() -> Markers {
    Markers::new("", "", ELLIPSIS)
}
