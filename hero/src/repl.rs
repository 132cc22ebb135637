//! The interactive read-eval-print loop.
//!
//! Line input sits behind [`LineEditor`] so the loop can be driven by a
//! real terminal or by a script in tests.

use crate::completion::Completer;
use crate::error::HeroResult;
use crate::history::HistoryStore;
use crate::shell::Shell;

/// One result of waiting for input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// Ctrl-C while reading
    Interrupted,
    /// Ctrl-D or closed input
    Eof,
}

pub trait LineEditor {
    fn read_line(&mut self, prompt: &str, completer: &Completer) -> HeroResult<Input>;

    /// Offer `line` for recall with the arrow keys.
    fn add_history(&mut self, line: &str);
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Exit,
    Interrupted,
    Eof,
    InputFailed,
}

pub const BANNER: &str = "🚀 Welcome to Command Line Hero!\n\
                          Type 'help' for available commands, 'exit' to quit.\n";

/// Run until `exit`, interrupt or end of input, then persist history.
pub fn run(
    shell: &mut Shell,
    editor: &mut dyn LineEditor,
    history: Option<&HistoryStore>,
) -> ExitReason {
    shell.say(BANNER);

    let reason = loop {
        if !shell.is_running() {
            break ExitReason::Exit;
        }

        let prompt = shell.prompt();
        let completer = shell.completer();
        match editor.read_line(&prompt, &completer) {
            Ok(Input::Line(line)) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    editor.add_history(trimmed);
                }
                shell.execute_line(trimmed);
            }
            Ok(Input::Interrupted) => {
                shell.say("\n👋 Exiting Command Line Hero. Goodbye!");
                break ExitReason::Interrupted;
            }
            Ok(Input::Eof) => {
                shell.say("");
                break ExitReason::Eof;
            }
            Err(e) => {
                tracing::error!(error = %e, "reading input failed");
                break ExitReason::InputFailed;
            }
        }
    };

    if let Some(store) = history {
        if let Err(e) = store.save(shell.session().history()) {
            tracing::warn!(error = %e, "failed to save history");
        }
    }
    tracing::debug!(?reason, "repl finished");
    reason
}
