//! Per-run shell state: history, aliases, environment overrides and the
//! working directory.

use crate::alias::AliasTable;
use crate::env::Environment;
use std::path::{Path, PathBuf};

pub struct Session {
    base_dir: PathBuf,
    pub cwd: PathBuf,
    running: bool,
    history: Vec<String>,
    pub aliases: AliasTable,
    pub env: Environment,
    /// Editor for `edit` when `EDITOR` is unset.
    pub editor: Option<String>,
    pub color: bool,
}

impl Session {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            cwd: base_dir.clone(),
            base_dir,
            running: true,
            history: Vec::new(),
            aliases: AliasTable::with_defaults(),
            env: Environment::from_process(),
            editor: None,
            color: true,
        }
    }

    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Only `exit`/`quit` end the session this way.
    pub(crate) fn stop(&mut self) {
        self.running = false;
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn push_history(&mut self, line: impl Into<String>) {
        self.history.push(line.into());
    }

    /// Seed history with entries persisted by an earlier run.
    pub fn extend_history<I: IntoIterator<Item = String>>(&mut self, entries: I) {
        self.history.extend(entries);
    }

    /// Resolve a user-supplied path against the session's working directory.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let candidate = match (path.strip_prefix('~'), self.home_dir()) {
            (Some(""), Some(home)) => home,
            (Some(rest), Some(home)) if rest.starts_with('/') => {
                home.join(rest.trim_start_matches('/'))
            }
            _ => PathBuf::from(path),
        };
        if candidate.is_absolute() {
            candidate
        } else {
            self.cwd.join(candidate)
        }
    }

    /// Home directory: `HOME` from the session environment, then the OS notion.
    pub fn home_dir(&self) -> Option<PathBuf> {
        self.env
            .get("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
    }
}
