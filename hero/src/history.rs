//! Line-oriented history file.

use crate::error::{HeroError, HeroResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub struct HistoryStore {
    path: PathBuf,
    capacity: usize,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries from an earlier run. Never fails: a missing or unreadable file
    /// yields no entries.
    pub fn load(&self) -> Vec<String> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not read history");
                return Vec::new();
            }
        };

        let entries: Vec<String> = String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();
        tracing::debug!(path = %self.path.display(), count = entries.len(), "history loaded");
        entries
    }

    /// Overwrite the file with the newest `capacity` entries.
    pub fn save(&self, entries: &[String]) -> HeroResult<()> {
        let shown = self.path.display().to_string();
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| HeroError::io(&shown, e))?;
        }

        let start = entries.len().saturating_sub(self.capacity);
        let mut content = String::new();
        for entry in &entries[start..] {
            content.push_str(entry);
            content.push('\n');
        }
        fs::write(&self.path, content).map_err(|e| HeroError::io(&shown, e))?;
        tracing::debug!(path = %shown, count = entries.len() - start, "history saved");
        Ok(())
    }
}
