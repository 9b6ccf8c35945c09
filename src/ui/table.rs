use crate::note::NoteSummary;
use crate::ui::time::relative;
use chrono::{DateTime, Utc};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct NoteRow {
    #[tabled(rename = "#")]
    pub id: i64,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Created")]
    pub created: String,
    #[tabled(rename = "Modified")]
    pub modified: String,
}

impl NoteRow {
    pub fn new(note: &NoteSummary, now: DateTime<Utc>) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            created: relative(note.created, now),
            modified: relative(note.modified, now),
        }
    }
}

pub struct TableBuilder {
    rows: Vec<NoteRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_note(&mut self, note: &NoteSummary, now: DateTime<Utc>) {
        self.rows.push(NoteRow::new(note, now));
    }

    pub fn build(&self) -> String {
        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn notes_table(notes: &[NoteSummary], now: DateTime<Utc>) -> String {
    let mut builder = TableBuilder::new();
    for note in notes {
        builder.add_note(note, now);
    }
    builder.build()
}
