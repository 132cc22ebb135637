//! Alias table and first-token expansion

use std::collections::BTreeMap;

/// Aliases every session starts with.
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("ll", "ls -l"),
    ("la", "ls -la"),
    ("..", "cd .."),
    ("...", "cd ../.."),
    ("~", "cd ~"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl AliasTable {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut table = Self::empty();
        for (name, expansion) in DEFAULT_ALIASES {
            table.set(*name, *expansion);
        }
        table
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn set(&mut self, name: impl Into<String>, expansion: impl Into<String>) {
        self.entries.insert(name.into(), expansion.into());
    }

    /// Remove an alias, returning its expansion if it existed.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(name)
    }

    /// Aliases in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Replace the leading token of `line` with its alias expansion.
    ///
    /// Expansion happens once: the result is never rescanned, so an alias
    /// whose expansion starts with another alias name runs that name as a
    /// command.
    pub fn expand(&self, line: &str) -> String {
        let trimmed = line.trim_start();
        let (head, rest) = match trimmed.find(char::is_whitespace) {
            Some(idx) => (&trimmed[..idx], trimmed[idx..].trim_start()),
            None => (trimmed, ""),
        };

        match self.get(head) {
            Some(expansion) if rest.is_empty() => expansion.to_string(),
            Some(expansion) => format!("{expansion} {rest}"),
            None => line.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_with_remainder() {
        let table = AliasTable::with_defaults();
        assert_eq!(table.expand("ll src"), "ls -l src");
        assert_eq!(table.expand("la  a b"), "ls -la a b");
    }

    #[test]
    fn test_expand_alone_has_no_trailing_space() {
        let table = AliasTable::with_defaults();
        assert_eq!(table.expand("ll"), "ls -l");
        assert_eq!(table.expand(".."), "cd ..");
    }

    #[test]
    fn test_non_alias_unchanged() {
        let table = AliasTable::with_defaults();
        assert_eq!(table.expand("ls -l"), "ls -l");
        assert_eq!(table.expand("echo ll"), "echo ll");
        assert_eq!(table.expand("llama"), "llama");
    }

    #[test]
    fn test_expansion_is_not_recursive() {
        let mut table = AliasTable::empty();
        table.set("a", "b x");
        table.set("b", "echo nested");
        assert_eq!(table.expand("a y"), "b x y");
    }

    #[test]
    fn test_alias_can_shadow_command() {
        let mut table = AliasTable::empty();
        table.set("ls", "ls -la");
        assert_eq!(table.expand("ls /tmp"), "ls -la /tmp");
    }

    #[test]
    fn test_remove() {
        let mut table = AliasTable::with_defaults();
        assert_eq!(table.remove("ll").as_deref(), Some("ls -l"));
        assert!(!table.contains("ll"));
        assert!(table.remove("ll").is_none());
    }
}
