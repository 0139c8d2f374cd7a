//! Configuration management for Lingo.
//!
//! Parses `lingo.toml` with serde and discovers it in the current directory
//! or any parent. CLI settings are applied on top via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `content.dir`
//! - `highlight.theme`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content directory.
    pub content_dir: Option<PathBuf>,
    /// Override search result cap.
    pub max_results: Option<usize>,
    /// Override progress tracking flag.
    pub progress_enabled: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "lingo.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Search configuration.
    pub search: SearchConfig,
    /// Syntax highlighting configuration.
    pub highlight: HighlightConfig,
    /// Scroll tracking configuration.
    pub scroll: ScrollConfig,
    /// Progress tracking configuration.
    pub progress: ProgressConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    dir: Option<String>,
    languages: Vec<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Directory holding one corpus file per language.
    pub dir: PathBuf,
    /// Project directory for Lingo data (.lingo/).
    pub project_dir: PathBuf,
    /// Explicit language order; empty means file name order.
    pub languages: Vec<String>,
}

impl ContentConfig {
    /// Progress file path (.lingo/progress.json).
    #[must_use]
    pub fn progress_path(&self) -> PathBuf {
        self.project_dir.join("progress.json")
    }
}

/// Search configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of results per query.
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_results: 30 }
    }
}

/// Syntax highlighting configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Name of a bundled highlighting theme.
    pub theme: String,
    /// Language used for code samples in corpora without a language id.
    pub default_language: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_owned(),
            default_language: "txt".to_owned(),
        }
    }
}

/// Scroll tracking configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Fraction of the viewport height ignored at the top.
    pub top_margin: f64,
    /// Fraction of the viewport height ignored at the bottom.
    pub bottom_margin: f64,
    /// Delay before scrolling a newly selected entry to the top.
    pub scroll_delay_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            top_margin: 0.1,
            bottom_margin: 0.7,
            scroll_delay_ms: 50,
        }
    }
}

impl ScrollConfig {
    /// Scroll delay as a [`Duration`].
    #[must_use]
    pub fn scroll_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }
}

/// Progress tracking configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Whether reader progress is persisted.
    pub enabled: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.dir`").
        field: String,
        /// Error message (e.g., "${`LINGO_CONTENT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a fraction in `[0, 1)`.
fn require_fraction(value: f64, field: &str) -> Result<(), ConfigError> {
    if !(0.0..1.0).contains(&value) {
        return Err(ConfigError::Validation(format!(
            "{field} must be within [0, 1)"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `lingo.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(content_dir) = &settings.content_dir {
            self.content_resolved.dir.clone_from(content_dir);
        }
        if let Some(max_results) = settings.max_results {
            self.search.max_results = max_results;
        }
        if let Some(progress_enabled) = settings.progress_enabled {
            self.progress.enabled = progress_enabled;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            content: ContentConfigRaw::default(),
            search: SearchConfig::default(),
            highlight: HighlightConfig::default(),
            scroll: ScrollConfig::default(),
            progress: ProgressConfig::default(),
            content_resolved: ContentConfig {
                dir: base.join("content"),
                project_dir: base.join(".lingo"),
                languages: Vec::new(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.max_results == 0 {
            return Err(ConfigError::Validation(
                "search.max_results must be greater than 0".to_owned(),
            ));
        }

        require_non_empty(&self.highlight.theme, "highlight.theme")?;
        require_non_empty(&self.highlight.default_language, "highlight.default_language")?;

        require_fraction(self.scroll.top_margin, "scroll.top_margin")?;
        require_fraction(self.scroll.bottom_margin, "scroll.bottom_margin")?;
        if self.scroll.top_margin + self.scroll.bottom_margin >= 1.0 {
            return Err(ConfigError::Validation(
                "scroll.top_margin and scroll.bottom_margin must sum below 1".to_owned(),
            ));
        }

        for (i, language) in self.content_resolved.languages.iter().enumerate() {
            require_non_empty(language, "content.languages")?;
            if self.content_resolved.languages[..i].contains(language) {
                return Err(ConfigError::Validation(format!(
                    "content.languages lists {language} twice"
                )));
            }
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.content.dir {
            self.content.dir = Some(expand::expand_env(dir, "content.dir")?);
        }
        self.highlight.theme = expand::expand_env(&self.highlight.theme, "highlight.theme")?;
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.content_resolved = ContentConfig {
            dir: config_dir.join(self.content.dir.as_deref().unwrap_or("content")),
            project_dir: config_dir.join(".lingo"),
            languages: self.content.languages.clone(),
        };
    }
}
