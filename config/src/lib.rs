//! Command Line Hero configuration
//!
//! Layered YAML configuration for the `hero` shell.
//!
//! # Configuration Loading Priority
//!
//! 1. Compiled-in defaults
//! 2. `/etc/hero/hero.yaml` (system-wide)
//! 3. `~/.config/hero/hero.yaml` (user)
//! 4. `./hero.yaml` (project-local)
//! 5. `HERO_CONFIG=/path/to/config.yaml` (explicit, replaces 2-4)
//! 6. Environment variables (highest priority)
//!
//! # Example Configuration
//!
//! ```yaml
//! shell:
//!   prompt: "{cyan}{cwd}{reset} > "
//!   editor: nano
//!   aliases:
//!     gs: "git status"
//!
//! history:
//!   file: "~/.hero_history"
//!   max_entries: 1000
//!
//! logging:
//!   level: warn
//! ```

#![allow(missing_docs)]

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::*;

/// Load configuration from default locations.
///
/// Searches for config files in order and merges them.
/// Environment variables override file values.
pub fn load() -> Result<HeroConfig, ConfigError> {
    ConfigLoader::new().load()
}

/// Load configuration from a specific file.
pub fn load_from_file(path: &str) -> Result<HeroConfig, ConfigError> {
    ConfigLoader::new().with_file(path).load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = HeroConfig::default();
        assert_eq!(config.history.max_entries, 1000);
        assert_eq!(config.history.file, "~/.hero_history");
        assert!(config.shell.prompt.contains("{cwd}"));
        assert_eq!(config.logging.directive(), "warn");
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = r#"
history:
  max_entries: 50
"#;
        let config: HeroConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.history.max_entries, 50);
        assert!(config.history.enabled); // default
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
shell:
  prompt: "> "
  color: false
  editor: nano
  aliases:
    gs: "git status"
    k: "ls -la"

history:
  enabled: false
  file: "/tmp/hero_history"
  max_entries: 20

logging:
  level: debug
  filter: "hero=trace"
"#;
        let config: HeroConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.shell.prompt, "> ");
        assert!(!config.shell.color);
        assert_eq!(config.shell.editor.as_deref(), Some("nano"));
        assert_eq!(config.shell.aliases.get("gs").map(String::as_str), Some("git status"));
        assert!(!config.history.enabled);
        assert_eq!(config.history.path(), std::path::PathBuf::from("/tmp/hero_history"));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.directive(), "hero=trace");
    }

    #[test]
    fn history_path_expands_home() {
        let config = HistoryConfig::default();
        let path = config.path();
        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.ends_with(".hero_history"));
    }
}
