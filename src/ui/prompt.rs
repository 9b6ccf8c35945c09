//! Yes/no questions on the terminal.

use crate::Result;

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    /// Show `question` and report whether the user agreed.
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// Reads the answer from the controlling terminal.
pub struct TerminalPrompt;

impl Confirm for TerminalPrompt {
    fn confirm(&self, question: &str) -> Result<bool> {
        let term = console::Term::stdout();
        term.write_str(question)?;
        let answer = term.read_line()?;
        Ok(is_yes(&answer))
    }
}

/// Only an explicit `y`/`yes` counts; everything else declines.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
