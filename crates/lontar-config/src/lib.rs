//! Configuration management for Lontar.
//!
//! Parses `lontar.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String values in the `[cdn]` section support environment variable
//! expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `cdn.base_url`
//! - `cdn.project_id`
//! - `cdn.dataset`

mod expand;

use std::path::{Path, PathBuf};

use lontar_resolver::Language;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override display language.
    pub language: Option<Language>,
    /// Override CDN base URL for image assets.
    pub cdn_base_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "lontar.toml";

/// Image CDN that `project_id`/`dataset` pairs are composed against.
const ASSET_CDN: &str = "https://cdn.sanity.io/images";

/// Dataset used when only `project_id` is given.
const DEFAULT_DATASET: &str = "production";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content configuration (language as a raw string from TOML).
    content: ContentConfigRaw,
    /// CDN configuration.
    pub cdn: CdnConfig,
    /// Rendering options.
    pub render: RenderConfig,

    /// Resolved display language (set after loading).
    #[serde(skip)]
    pub language: Language,
    /// Resolved CDN base URL, empty for site-relative URLs (set after loading).
    #[serde(skip)]
    pub cdn_base: String,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw content configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContentConfigRaw {
    language: Option<String>,
}

/// CDN configuration for image assets.
///
/// Either an explicit `base_url`, or a `project_id` (plus optional `dataset`)
/// from which the base URL is composed. An explicit `base_url` wins.
/// `dataset` is rejected unless `project_id` is set.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CdnConfig {
    /// Base URL that asset identifiers are decoded against.
    pub base_url: Option<String>,
    /// Content project identifier.
    pub project_id: Option<String>,
    /// Content dataset name.
    pub dataset: Option<String>,
}

impl CdnConfig {
    /// Base URL for asset identifiers, or an empty string if none is
    /// configured.
    #[must_use]
    pub fn base(&self) -> String {
        if let Some(base_url) = &self.base_url {
            return base_url.trim_end_matches('/').to_owned();
        }
        match &self.project_id {
            Some(project_id) => {
                let dataset = self.dataset.as_deref().unwrap_or(DEFAULT_DATASET);
                format!("{ASSET_CDN}/{project_id}/{dataset}")
            }
            None => String::new(),
        }
    }
}

/// Rendering options.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Use random gallery ids instead of `gallery-1`, `gallery-2`, ...
    pub random_gallery_ids: bool,
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
        /// Config field path (e.g., "`cdn.base_url`").
        field: String,
        /// Error message (e.g., "${`CDN_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `lontar.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings)?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) -> Result<(), ConfigError> {
        if let Some(language) = settings.language {
            self.language = language;
        }
        if let Some(cdn_base_url) = &settings.cdn_base_url {
            require_http_url(cdn_base_url, "--cdn-base")?;
            cdn_base_url
                .trim_end_matches('/')
                .clone_into(&mut self.cdn_base);
        }
        Ok(())
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse, expand, validate and resolve configuration from TOML text.
    fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;

        // Expand environment variables before validation
        config.expand_env_vars()?;
        config.validate()?;
        config.resolve()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_content()?;
        self.validate_cdn()?;
        Ok(())
    }

    fn validate_content(&self) -> Result<(), ConfigError> {
        if let Some(language) = &self.content.language
            && language.parse::<Language>().is_err()
        {
            return Err(ConfigError::Validation(format!(
                "content.language must be \"id\" or \"en\", got {language:?}"
            )));
        }
        Ok(())
    }

    fn validate_cdn(&self) -> Result<(), ConfigError> {
        let cdn = &self.cdn;
        if let Some(base_url) = &cdn.base_url {
            require_non_empty(base_url, "cdn.base_url")?;
            require_http_url(base_url, "cdn.base_url")?;
        }
        if let Some(project_id) = &cdn.project_id {
            require_non_empty(project_id, "cdn.project_id")?;
        }
        if let Some(dataset) = &cdn.dataset {
            require_non_empty(dataset, "cdn.dataset")?;
            if cdn.project_id.is_none() {
                return Err(ConfigError::Validation(
                    "cdn.dataset requires cdn.project_id to be set".to_owned(),
                ));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_opt(&mut self.cdn.base_url, "cdn.base_url")?;
        expand::expand_opt(&mut self.cdn.project_id, "cdn.project_id")?;
        expand::expand_opt(&mut self.cdn.dataset, "cdn.dataset")?;
        Ok(())
    }

    /// Fill the resolved fields from the raw sections.
    fn resolve(&mut self) -> Result<(), ConfigError> {
        self.language = match &self.content.language {
            Some(language) => language
                .parse()
                .map_err(|e| ConfigError::Validation(format!("content.language: {e}")))?,
            None => Language::default(),
        };
        self.cdn_base = self.cdn.base();
        Ok(())
    }
}

/// Search for `lontar.toml` in `start` and its parents.
fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
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
