//! Configuration management for ytthumb.
//!
//! Parses `ytthumb.toml` files with serde and provides auto-discovery of the
//! config file in parent directories. Keys use the same names as the
//! static-site settings they mirror:
//!
//! ```toml
//! OUTPUT_PATH = "output"
//! SITEURL = "https://example.org"
//! YOUTUBE_ADD_OVERLAY = true
//! YOUTUBE_FETCH_TIMEOUT = 30
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `OUTPUT_PATH` and `SITEURL` support `${VAR}` and `${VAR:-default}`.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "ytthumb.toml";

/// Output directory used when none is configured.
const DEFAULT_OUTPUT_PATH: &str = "output";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the site output directory.
    pub output_path: Option<PathBuf>,
    /// Override the site base URL.
    pub site_url: Option<String>,
    /// Override the overlay toggle.
    pub add_overlay: Option<bool>,
}

/// Settings as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    #[serde(rename = "OUTPUT_PATH")]
    output_path: Option<String>,
    #[serde(rename = "SITEURL")]
    site_url: Option<String>,
    #[serde(rename = "YOUTUBE_ADD_OVERLAY")]
    add_overlay: Option<bool>,
    #[serde(rename = "YOUTUBE_FETCH_TIMEOUT")]
    fetch_timeout: Option<u64>,
}

/// Resolved application configuration.
#[derive(Debug)]
pub struct Config {
    /// Site output directory (absolute when loaded from a file).
    pub output_path: PathBuf,
    /// Base URL prepended to generated image paths.
    pub site_url: String,
    /// Whether to composite the play-button logo onto thumbnails.
    pub add_overlay: bool,
    /// Global timeout for thumbnail downloads. `None` waits indefinitely.
    pub fetch_timeout: Option<Duration>,
    /// Path to the config file (set after loading).
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
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
    #[error("Environment variable error in {key}: {message}")]
    EnvVar {
        /// Setting name (e.g., "`SITEURL`").
        key: String,
        /// Error message (e.g., "${`SITE_HOST`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `ytthumb.toml` in current directory and parents.
    /// CLI settings are applied last and the result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
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
        }

        config.validate()?;
        Ok(config)
    }

    /// Directory where cached thumbnails are written.
    #[must_use]
    pub fn thumbnail_dir(&self) -> PathBuf {
        self.output_path.join("images").join("youtube")
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "OUTPUT_PATH cannot be empty".to_owned(),
            ));
        }

        if !self.site_url.is_empty()
            && !self.site_url.starts_with("http://")
            && !self.site_url.starts_with("https://")
            && !self.site_url.starts_with('/')
        {
            return Err(ConfigError::Validation(
                "SITEURL must start with http://, https:// or /".to_owned(),
            ));
        }

        if self.fetch_timeout == Some(Duration::ZERO) {
            return Err(ConfigError::Validation(
                "YOUTUBE_FETCH_TIMEOUT must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output_path) = &settings.output_path {
            self.output_path.clone_from(output_path);
        }
        if let Some(site_url) = &settings.site_url {
            self.site_url.clone_from(site_url);
        }
        if let Some(add_overlay) = settings.add_overlay {
            self.add_overlay = add_overlay;
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
            output_path: base.join(DEFAULT_OUTPUT_PATH),
            site_url: String::new(),
            add_overlay: true,
            fetch_timeout: None,
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let raw: RawSettings = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::resolve(raw, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Expand environment variables and resolve relative paths against the
    /// config directory.
    fn resolve(raw: RawSettings, config_dir: &Path) -> Result<Self, ConfigError> {
        let output_path = match raw.output_path {
            Some(path) => expand::expand_env(&path, "OUTPUT_PATH")?,
            None => DEFAULT_OUTPUT_PATH.to_owned(),
        };
        // An empty value stays empty so validation can reject it.
        let output_path = if output_path.is_empty() {
            PathBuf::new()
        } else {
            config_dir.join(output_path)
        };

        let site_url = match raw.site_url {
            Some(url) => expand::expand_env(&url, "SITEURL")?,
            None => String::new(),
        };

        Ok(Self {
            output_path,
            site_url,
            add_overlay: raw.add_overlay.unwrap_or(true),
            fetch_timeout: raw.fetch_timeout.map(Duration::from_secs),
            config_path: None,
        })
    }
}
