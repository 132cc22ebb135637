use hero::completion::Completer;
use hero::repl::{Input, LineEditor};
use hero::{HeroError, HeroResult};
use rustyline::completion::{Completer as RlCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, Editor, Helper};
use std::borrow::Cow;
use std::io;

pub struct HeroHelper {
    completer: Completer,
}

impl RlCompleter for HeroHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];
        let start = find_word_start(line_to_cursor);

        let pairs = self
            .completer
            .complete(line_to_cursor)
            .into_iter()
            .map(|candidate| Pair {
                display: display_name(&candidate).to_string(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

fn find_word_start(line: &str) -> usize {
    line.char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8())
}

/// Last path component of a candidate, keeping a directory's trailing `/`.
fn display_name(candidate: &str) -> &str {
    let trimmed = candidate.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &candidate[idx + 1..],
        None => candidate,
    }
}

impl Hinter for HeroHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for HeroHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Borrowed(hint)
    }
}

impl Validator for HeroHelper {}

impl Helper for HeroHelper {}

/// Terminal line editing backed by rustyline.
pub struct RustylineEditor {
    rl: Editor<HeroHelper, DefaultHistory>,
}

impl RustylineEditor {
    pub fn new(max_history: usize) -> rustyline::Result<Self> {
        let config = Config::builder()
            .completion_type(CompletionType::List)
            .max_history_size(max_history)?
            .history_ignore_dups(true)?
            .build();

        let mut rl = Editor::with_config(config)?;
        rl.set_helper(Some(HeroHelper {
            completer: Completer::default(),
        }));
        Ok(Self { rl })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str, completer: &Completer) -> HeroResult<Input> {
        if let Some(helper) = self.rl.helper_mut() {
            helper.completer = completer.clone();
        }

        match self.rl.readline(prompt) {
            Ok(line) => Ok(Input::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(ReadlineError::Io(e)) => Err(HeroError::io("<terminal>", e)),
            Err(e) => Err(HeroError::io("<terminal>", io::Error::other(e.to_string()))),
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.rl.add_history_entry(line) {
            tracing::debug!(error = %e, "history entry rejected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_word_start() {
        assert_eq!(find_word_start("ls"), 0);
        assert_eq!(find_word_start("cat src/ma"), 4);
        assert_eq!(find_word_start("cat "), 4);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("src/main.rs"), "main.rs");
        assert_eq!(display_name("src/bin/"), "bin/");
        assert_eq!(display_name("notes"), "notes");
    }
}
