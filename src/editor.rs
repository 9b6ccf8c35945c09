//! Editing note text in the user's editor
//!
//! The text is written to a temporary `ggg_note-*.md` file, the editor runs
//! attached to the terminal, and the file is read back once it exits.

use crate::{Error, Result};
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

/// Environment variable naming the editor command.
pub const EDITOR_ENV: &str = "EDITOR";

/// Something that lets the user edit note text.
pub trait NoteEditor {
    /// Edit `initial` and return the text as the user left it.
    fn edit(&self, initial: &str) -> Result<String>;
}

/// Runs an external editor program on a temporary file.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    command: Option<String>,
}

impl ExternalEditor {
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }

    /// Use the configured command if there is one, otherwise `$EDITOR`.
    pub fn from_env(configured: Option<&str>) -> Self {
        let command = configured
            .map(str::to_string)
            .or_else(|| std::env::var(EDITOR_ENV).ok())
            .filter(|c| !c.trim().is_empty());
        Self { command }
    }

    /// Split the command into the located program and its leading arguments.
    fn resolve(&self) -> Result<(PathBuf, Vec<String>)> {
        let command = self
            .command
            .as_deref()
            .ok_or_else(|| Error::Editor(format!("${} is not set", EDITOR_ENV)))?;

        let mut words = command.split_whitespace();
        let name = words
            .next()
            .ok_or_else(|| Error::Editor(format!("${} is not set", EDITOR_ENV)))?;
        let program = which::which(name)
            .map_err(|_| Error::Editor(format!("editor '{}' not found", name)))?;

        tracing::debug!("Editor is {}", program.display());
        Ok((program, words.map(str::to_string).collect()))
    }
}

impl NoteEditor for ExternalEditor {
    fn edit(&self, initial: &str) -> Result<String> {
        let (program, args) = self.resolve()?;

        let mut file = tempfile::Builder::new()
            .prefix("ggg_note-")
            .suffix(".md")
            .tempfile()?;
        if !initial.is_empty() {
            file.write_all(initial.as_bytes())?;
            file.flush()?;
        }

        let status = Command::new(&program)
            .args(&args)
            .arg(file.path())
            .status()
            .map_err(|e| Error::Editor(format!("could not start {}: {}", program.display(), e)))?;
        if !status.success() {
            return Err(Error::Editor(format!("{} exited with {}", program.display(), status)));
        }

        tracing::debug!("Successfully edited {}", file.path().display());
        Ok(std::fs::read_to_string(file.path())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_editor() {
        let editor = ExternalEditor::new(None);
        assert!(matches!(editor.edit("text"), Err(Error::Editor(_))));
    }

    #[test]
    fn test_blank_editor() {
        let editor = ExternalEditor::new(Some("   ".to_string()));
        assert!(matches!(editor.edit(""), Err(Error::Editor(_))));
    }

    #[test]
    fn test_missing_editor_program() {
        let editor = ExternalEditor::new(Some("ggg-no-such-editor-xyz".to_string()));
        assert!(matches!(editor.edit(""), Err(Error::Editor(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_program_on_path() {
        let (program, args) = ExternalEditor::new(Some("sh -c".to_string())).resolve().unwrap();
        assert!(program.is_absolute());
        assert_eq!(args, vec!["-c".to_string()]);

        let missing = ExternalEditor::new(Some("/definitely/not/here".to_string())).resolve();
        match missing {
            Err(Error::Editor(msg)) => assert_eq!(msg, "editor '/definitely/not/here' not found"),
            other => panic!("expected editor error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_editor_that_saves_nothing_returns_initial_text() {
        let editor = ExternalEditor::new(Some("true".to_string()));
        assert_eq!(editor.edit("# Kept\nas is").unwrap(), "# Kept\nas is");
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_editor() {
        let editor = ExternalEditor::new(Some("false".to_string()));
        assert!(matches!(editor.edit(""), Err(Error::Editor(_))));
    }
}
