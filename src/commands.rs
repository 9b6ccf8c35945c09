//! Command handlers behind the `ggg` subcommands.
//!
//! Each handler takes the store (and editor/prompt where needed) by reference,
//! prints its result and attaches the user-facing failure message as
//! `anyhow` context.

use crate::editor::NoteEditor;
use crate::note::{Note, NoteId, NoteRef, NoteSummary};
use crate::search::SearchResult;
use crate::storage::NoteStore;
use crate::ui::{self, Confirm};
use crate::Error;
use anyhow::Context;
use chrono::Utc;
use std::path::Path;

/// How `list` and `find` print their results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn run_init(db_path: &Path) -> anyhow::Result<()> {
    let store = NoteStore::create(db_path).context("Could not create DB")?;
    let existing = store.count().context("Could not create DB")?;

    ui::database(&format!("Created {}", db_path.display()));
    if existing > 0 {
        ui::plain(&format!("Database already holds {} notes.", existing));
    }
    Ok(())
}

/// Write a new note in the editor. Returns its id, or `None` if the text was blank.
pub fn run_new(store: &NoteStore, editor: &dyn NoteEditor) -> anyhow::Result<Option<NoteId>> {
    let body = editor.edit("").context("Problem editing note file")?;
    if body.trim().is_empty() {
        ui::plain("Note not created since text is empty.");
        return Ok(None);
    }

    let note = Note::new(body, Utc::now());
    let id = store.insert(&note).context("Could not save note")?;
    ui::note_added(&note.title);
    Ok(Some(id))
}

/// Print the notes whose title contains `filter` (all notes without one) and
/// return them.
pub fn run_list(
    store: &NoteStore,
    filter: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<Vec<NoteSummary>> {
    let notes = match filter {
        Some(text) => store.find_by_substring(text),
        None => store.find_all(),
    }
    .context("Could not find notes")?;

    match format {
        OutputFormat::Text => println!("{}", ui::notes_table(&notes, Utc::now())),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&notes)?),
    }
    Ok(notes)
}

/// Delete by id, or every note whose title matches. Deleting more than one
/// note needs confirmation. Returns how many notes were removed.
pub fn run_delete(store: &NoteStore, prompt: &dyn Confirm, target: &NoteRef) -> anyhow::Result<usize> {
    match target {
        NoteRef::Id(id) => {
            store.delete_by_id(*id).context("Could not delete note")?;
            ui::notes_deleted(&format!("Deleted note #{}.", id));
            Ok(1)
        }
        NoteRef::Title(title) => {
            let matching = store.find_by_substring(title).context("Could not find notes")?;
            if matching.len() > 1 {
                let question = format!("This will delete {} notes. Proceed? [yN] ", matching.len());
                if !prompt.confirm(&question).context("Could not read confirmation")? {
                    ui::plain("Delete canceled.");
                    return Ok(0);
                }
            }

            let deleted = store.delete_by_title(title).context("Could not delete note")?;
            ui::notes_deleted(&format!("Deleted {} notes.", deleted));
            Ok(deleted)
        }
    }
}

/// Edit an existing note. Returns whether anything was saved.
pub fn run_open(store: &NoteStore, editor: &dyn NoteEditor, target: &NoteRef) -> anyhow::Result<bool> {
    let mut note = resolve_note(store, target)?;

    let edited = editor.edit(&note.body).context("Could not open file")?;
    if !note.revise(edited, Utc::now()) {
        ui::plain("No changes.");
        return Ok(false);
    }

    store.update(&note).context("Could not update note")?;
    ui::note_updated(&note.title);
    Ok(true)
}

/// Print body matches for `term` and return them. JSON output carries no
/// highlight escapes.
pub fn run_find(
    store: &NoteStore,
    term: &str,
    format: OutputFormat,
) -> anyhow::Result<Vec<SearchResult>> {
    let markers = match format {
        OutputFormat::Text => ui::snippet_markers(),
        OutputFormat::Json => ui::plain_snippet_markers(),
    };
    let matches = store
        .find_matches(term, &markers)
        .context("Problem finding matches")?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(matches);
    }

    if matches.is_empty() {
        ui::plain("No matches found.");
    } else {
        for m in &matches {
            ui::match_heading(m.id, &m.title);
            println!("{}", m.snippet);
            println!();
        }
    }
    Ok(matches)
}

/// Load the note `target` refers to. A title matching several notes picks
/// the lowest id after a warning.
fn resolve_note(store: &NoteStore, target: &NoteRef) -> anyhow::Result<Note> {
    let id = match target {
        NoteRef::Id(id) => *id,
        NoteRef::Title(title) => {
            let matching = store.find_by_substring(title).context("Could not find notes")?;
            let first = matching
                .first()
                .ok_or_else(|| Error::NotFound(target.to_string()))
                .context("Could not find note")?;
            if matching.len() > 1 {
                let ambiguous = Error::AmbiguousMatch {
                    title: title.clone(),
                    count: matching.len(),
                };
                tracing::debug!("{}, using #{}", ambiguous, first.id);
                ui::warn(&ambiguous.to_string());
            }
            first.id
        }
    };

    store.find_by_id(id).context("Could not find note")
}
