//! Tab-completion policy.
//!
//! The first word completes against command and alias names; later words
//! complete against entries on disk, relative to the session directory.
//! Nothing is cached: every request reads the directory again.

use std::fs;
use std::path::{Path, PathBuf};

/// Snapshot of what completion can see, taken before each line is read.
#[derive(Debug, Clone, Default)]
pub struct Completer {
    commands: Vec<String>,
    aliases: Vec<String>,
    cwd: PathBuf,
}

impl Completer {
    pub fn new<C, A>(commands: C, aliases: A, cwd: impl Into<PathBuf>) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
            aliases: aliases.into_iter().map(Into::into).collect(),
            cwd: cwd.into(),
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// All candidates for the partial token at the end of `buffer`, in
    /// order.
    pub fn complete(&self, buffer: &str) -> Vec<String> {
        let ends_in_space = buffer.ends_with(char::is_whitespace);
        let parts: Vec<&str> = buffer.split_whitespace().collect();
        let partial = if ends_in_space {
            ""
        } else {
            parts.last().copied().unwrap_or("")
        };

        if parts.is_empty() || (parts.len() == 1 && !ends_in_space) {
            self.complete_command(partial)
        } else {
            self.complete_path(partial)
        }
    }

    /// The `index`-th candidate, or `None` once they run out.
    pub fn candidate(&self, buffer: &str, index: usize) -> Option<String> {
        self.complete(buffer).into_iter().nth(index)
    }

    fn complete_command(&self, partial: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .commands
            .iter()
            .chain(&self.aliases)
            .filter(|name| name.starts_with(partial))
            .cloned()
            .collect();
        names.sort();
        names.dedup();
        names
    }

    fn complete_path(&self, partial: &str) -> Vec<String> {
        let (dir_part, name_part) = match partial.rfind('/') {
            Some(idx) => partial.split_at(idx + 1),
            None => ("", partial),
        };
        let dir = self.cwd.join(dir_part);

        let Ok(entries) = fs::read_dir(&dir) else {
            return Vec::new();
        };

        let mut matches: Vec<String> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                if !name.starts_with(name_part) {
                    return None;
                }
                if name.starts_with('.') && !name_part.starts_with('.') {
                    return None;
                }
                let suffix = if entry.path().is_dir() { "/" } else { "" };
                Some(format!("{dir_part}{name}{suffix}"))
            })
            .collect();
        matches.sort();
        matches
    }
}
