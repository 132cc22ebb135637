//! Shell state and execution engine

use crate::commands::Output;
use crate::completion::Completer;
use crate::error::{ErrorKind, HeroError};
use crate::lexer::tokenize;
use crate::prompt::{self, DEFAULT_TEMPLATE};
use crate::registry::{Outcome, Registry};
use crate::session::Session;
use crate::style::{paint, Style};

pub struct Shell {
    session: Session,
    registry: Registry,
    prompt_template: String,
    stdout: Output,
    stderr: Output,
}

impl Shell {
    /// A shell writing to the terminal.
    pub fn new(session: Session) -> Self {
        Self {
            session,
            registry: Registry::builtin(),
            prompt_template: DEFAULT_TEMPLATE.to_string(),
            stdout: Output::Stdout,
            stderr: Output::Stderr,
        }
    }

    /// A shell whose output is buffered; drain it with [`Shell::take_output`].
    pub fn captured(session: Session) -> Self {
        Self {
            stdout: Output::Buffer(Vec::new()),
            stderr: Output::Buffer(Vec::new()),
            ..Self::new(session)
        }
    }

    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_prompt(mut self, template: impl Into<String>) -> Self {
        self.prompt_template = template.into();
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    /// Buffered (stdout, stderr) since the last call. Empty for a terminal shell.
    pub fn take_output(&mut self) -> (String, String) {
        (self.stdout.take_string(), self.stderr.take_string())
    }

    pub fn prompt(&self) -> String {
        prompt::render(
            &self.prompt_template,
            &self.session.cwd,
            self.session.base_dir(),
            self.session.color,
        )
    }

    /// What tab completion may offer right now.
    pub fn completer(&self) -> Completer {
        Completer::new(
            self.registry.names().map(|n| n.as_str()),
            self.session.aliases.names(),
            self.session.cwd.clone(),
        )
    }

    /// Write a line of shell chatter (banner, farewell) to stdout.
    pub fn say(&mut self, line: &str) {
        if let Err(e) = self.stdout.writeln(line) {
            tracing::warn!(error = %e, "failed to write to stdout");
        }
    }

    /// Run one input line: record it, expand its alias, tokenize, dispatch.
    ///
    /// Blank lines are ignored and return `None`, as does a line that
    /// tokenizes to nothing.
    pub fn execute_line(&mut self, line: &str) -> Option<Outcome> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        self.session.push_history(line);

        let expanded = self.session.aliases.expand(line);
        if expanded != line {
            tracing::debug!(from = line, to = %expanded, "alias expanded");
        }

        let tokens = match tokenize(&expanded) {
            Ok(tokens) => tokens,
            Err(e) => {
                self.report(&e);
                return Some(Outcome::Failed(ErrorKind::Parse));
            }
        };
        let (name, args) = tokens.split_first()?;

        Some(self.registry.dispatch(
            name,
            args,
            &mut self.session,
            &mut self.stdout,
            &mut self.stderr,
        ))
    }

    fn report(&mut self, err: &HeroError) {
        let line = paint(self.session.color, &[Style::Red], &err.to_string());
        if let Err(e) = self.stderr.writeln(&line) {
            tracing::warn!(error = %e, "failed to write error line");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Environment;
    use tempfile::TempDir;

    fn shell(dir: &std::path::Path) -> Shell {
        let env = Environment::from_vars([("HOME", dir.display().to_string())]);
        Shell::captured(Session::new(dir).with_env(env).with_color(false))
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let tmp = TempDir::new().unwrap();
        let mut sh = shell(tmp.path());
        assert_eq!(sh.execute_line("   \t "), None);
        assert!(sh.session().history().is_empty());
    }

    #[test]
    fn test_history_records_trimmed_line() {
        let tmp = TempDir::new().unwrap();
        let mut sh = shell(tmp.path());
        sh.execute_line("  echo hi  ");
        assert_eq!(sh.session().history(), ["echo hi"]);
        assert_eq!(sh.take_output().0, "hi\n");
    }

    #[test]
    fn test_alias_is_expanded_before_dispatch() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("sub")).unwrap();
        let mut sh = shell(tmp.path());
        sh.session_mut().cwd = tmp.path().join("sub");

        assert_eq!(sh.execute_line(".."), Some(Outcome::Completed));
        assert_eq!(sh.session().cwd, std::fs::canonicalize(tmp.path()).unwrap());
        assert_eq!(sh.session().history(), [".."]);
    }

    #[test]
    fn test_parse_error_drops_line() {
        let tmp = TempDir::new().unwrap();
        let mut sh = shell(tmp.path());
        assert_eq!(
            sh.execute_line("echo 'oops"),
            Some(Outcome::Failed(ErrorKind::Parse))
        );
        let (out, err) = sh.take_output();
        assert_eq!(out, "");
        assert_eq!(err, "Parse error: No closing quotation\n");
        assert_eq!(sh.session().history().len(), 1);
    }

    #[test]
    fn test_prompt_tracks_cwd() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("docs")).unwrap();
        let mut sh = shell(tmp.path()).with_prompt("{cwd}> ");
        assert_eq!(sh.prompt(), "~> ");
        sh.session_mut().cwd = tmp.path().join("docs");
        assert_eq!(sh.prompt(), "docs> ");
    }

    #[test]
    fn test_completer_snapshot_includes_aliases() {
        let tmp = TempDir::new().unwrap();
        let sh = shell(tmp.path());
        let completer = sh.completer();
        assert_eq!(completer.complete("l"), vec!["la", "ll", "ls"]);
        assert_eq!(completer.cwd(), tmp.path());
    }
}
