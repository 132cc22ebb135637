//! Environment variables as seen by the shell: a read-only snapshot taken at
//! startup with a session-owned override layer on top.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct Environment {
    snapshot: BTreeMap<String, String>,
    overrides: BTreeMap<String, String>,
}

impl Environment {
    /// Snapshot of the process environment.
    pub fn from_process() -> Self {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            snapshot: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            overrides: BTreeMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.overrides
            .get(name)
            .or_else(|| self.snapshot.get(name))
            .map(String::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.overrides.insert(name.into(), value.into());
    }

    /// Variables set during this session, to hand to child processes.
    pub fn overrides(&self) -> impl Iterator<Item = (&str, &str)> {
        self.overrides.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Every visible variable in name order, overrides winning.
    pub fn merged(&self) -> BTreeMap<&str, &str> {
        let mut merged: BTreeMap<&str, &str> = self
            .snapshot
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        for (k, v) in &self.overrides {
            merged.insert(k.as_str(), v.as_str());
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_shadows_snapshot() {
        let mut env = Environment::from_vars([("HOME", "/home/a"), ("SHELL", "/bin/sh")]);
        env.set("HOME", "/tmp");
        assert_eq!(env.get("HOME"), Some("/tmp"));
        assert_eq!(env.get("SHELL"), Some("/bin/sh"));
        assert_eq!(env.get("MISSING"), None);
    }

    #[test]
    fn test_merged_is_sorted() {
        let mut env = Environment::from_vars([("B", "2"), ("A", "1")]);
        env.set("C", "3");
        env.set("A", "9");
        let merged: Vec<_> = env.merged().into_iter().collect();
        assert_eq!(merged, vec![("A", "9"), ("B", "2"), ("C", "3")]);
        assert_eq!(env.overrides().count(), 2);
    }
}
