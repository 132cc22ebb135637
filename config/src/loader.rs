use crate::{ConfigError, HeroConfig};
use regex::Regex;
use std::path::PathBuf;

pub struct ConfigLoader {
    explicit_file: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        if let Some(home) = dirs::home_dir() {
            search_paths.push(home.join(".config/hero/hero.yaml"));
        }
        search_paths.push(PathBuf::from("./hero.yaml"));

        #[cfg(unix)]
        search_paths.insert(0, PathBuf::from("/etc/hero/hero.yaml"));

        Self {
            explicit_file: None,
            search_paths,
        }
    }

    pub fn with_file(mut self, path: &str) -> Self {
        self.explicit_file = Some(PathBuf::from(path));
        self
    }

    pub fn with_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.search_paths = paths;
        self
    }

    pub fn load(&self) -> Result<HeroConfig, ConfigError> {
        let mut config = HeroConfig::default();

        if let Ok(env_path) = std::env::var("HERO_CONFIG") {
            config = self.read_file(&PathBuf::from(env_path))?;
        } else if let Some(ref explicit) = self.explicit_file {
            config = self.read_file(explicit)?;
        } else {
            for path in &self.search_paths {
                if path.exists() {
                    match std::fs::read_to_string(path) {
                        Ok(content) => {
                            tracing::debug!(path = %path.display(), "Merging config file");
                            config = self.merge_yaml(&config, &content)?;
                        }
                        Err(e) => {
                            tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable config file");
                        }
                    }
                }
            }
        }

        self.apply_env_overrides(&mut config)?;
        Ok(config)
    }

    fn read_file(&self, path: &PathBuf) -> Result<HeroConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.clone(),
            source: e,
        })?;
        self.parse_yaml(&content)
    }

    fn parse_yaml(&self, content: &str) -> Result<HeroConfig, ConfigError> {
        let expanded = self.expand_env_vars(content);
        Ok(serde_yaml::from_str(&expanded)?)
    }

    fn merge_yaml(&self, base: &HeroConfig, content: &str) -> Result<HeroConfig, ConfigError> {
        let overlay = self.parse_yaml(content)?;
        Ok(self.merge_configs(base, &overlay))
    }

    fn merge_configs(&self, base: &HeroConfig, overlay: &HeroConfig) -> HeroConfig {
        let defaults = HeroConfig::default();
        let mut result = base.clone();

        if overlay.shell.prompt != defaults.shell.prompt {
            result.shell.prompt = overlay.shell.prompt.clone();
        }
        if overlay.shell.color != defaults.shell.color {
            result.shell.color = overlay.shell.color;
        }
        if overlay.shell.editor.is_some() {
            result.shell.editor = overlay.shell.editor.clone();
        }
        for (name, expansion) in &overlay.shell.aliases {
            result
                .shell
                .aliases
                .insert(name.clone(), expansion.clone());
        }
        if overlay.history != defaults.history {
            result.history = overlay.history.clone();
        }
        if overlay.logging != defaults.logging {
            result.logging = overlay.logging.clone();
        }

        result
    }

    fn expand_env_vars(&self, content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").expect("static regex");
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_default()
        })
        .to_string()
    }

    fn apply_env_overrides(&self, config: &mut HeroConfig) -> Result<(), ConfigError> {
        apply_overrides(config, |name| std::env::var(name).ok())
    }
}

fn apply_overrides<F>(config: &mut HeroConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(prompt) = lookup("HERO_PROMPT") {
        config.shell.prompt = prompt;
    }
    if let Some(editor) = lookup("HERO_EDITOR") {
        if !editor.is_empty() {
            config.shell.editor = Some(editor);
        }
    }
    if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        config.shell.color = false;
    }
    if let Some(file) = lookup("HERO_HISTORY_FILE") {
        config.history.file = file;
    }
    if let Some(size) = lookup("HERO_HISTORY_SIZE") {
        config.history.max_entries = size.parse().map_err(|_| {
            ConfigError::InvalidValue(format!("HERO_HISTORY_SIZE must be a number, got '{size}'"))
        })?;
    }
    if let Some(level) = lookup("HERO_LOG_LEVEL") {
        if let Ok(l) = serde_yaml::from_str(&level) {
            config.logging.level = l;
        }
    }
    Ok(())
}
