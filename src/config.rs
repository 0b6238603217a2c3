use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{FolioError, FolioResult};
use crate::logger::LogLevel;

/// Environment variable naming a JSON config file for the CLI
pub const CONFIG_ENV_VAR: &str = "FOLIO_CONFIG";

/// Publishing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishingConfig {
    /// Style guide the format stage applies and the review stage requires
    pub format_type: String,

    /// Year suffix of generated ISBNs
    pub isbn_year: u16,

    /// Title given to fetched manuscripts
    pub default_title: String,

    /// Author given to fetched manuscripts
    pub default_author: String,

    /// Body text given to fetched manuscripts
    pub initial_content: String,

    /// Minimum level kept by the in-memory logger
    pub log_level: LogLevel,
}

impl Default for PublishingConfig {
    fn default() -> Self {
        Self {
            format_type: "IEEE".to_string(),
            isbn_year: 2023,
            default_title: "The Art of Programming".to_string(),
            default_author: "John Doe".to_string(),
            initial_content: "Initial content...".to_string(),
            log_level: LogLevel::Info,
        }
    }
}

impl PublishingConfig {
    /// Load and validate a config from a JSON file; missing fields take
    /// their defaults.
    pub fn load(path: impl AsRef<Path>) -> FolioResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            FolioError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: PublishingConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `FOLIO_CONFIG` if set, else defaults
    pub fn from_env() -> FolioResult<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> FolioResult<()> {
        if self.format_type.trim().is_empty() {
            return Err(FolioError::ConfigError(
                "format_type must not be empty".to_string(),
            ));
        }
        if self.isbn_year == 0 {
            return Err(FolioError::ConfigError(
                "isbn_year must be a calendar year".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for constructing PublishingConfig instances with a fluent API
///
/// # Example
/// ```
/// use folio_lib::config::PublishingConfigBuilder;
///
/// let config = PublishingConfigBuilder::new()
///     .format_type("APA")
///     .isbn_year(2024)
///     .build()
///     .unwrap();
/// assert_eq!(config.isbn_year, 2024);
/// ```
#[derive(Debug, Default)]
pub struct PublishingConfigBuilder {
    format_type: Option<String>,
    isbn_year: Option<u16>,
    default_title: Option<String>,
    default_author: Option<String>,
    initial_content: Option<String>,
    log_level: Option<LogLevel>,
}

impl PublishingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format_type(mut self, format_type: impl Into<String>) -> Self {
        self.format_type = Some(format_type.into());
        self
    }

    pub fn isbn_year(mut self, year: u16) -> Self {
        self.isbn_year = Some(year);
        self
    }

    pub fn default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = Some(title.into());
        self
    }

    pub fn default_author(mut self, author: impl Into<String>) -> Self {
        self.default_author = Some(author.into());
        self
    }

    pub fn initial_content(mut self, content: impl Into<String>) -> Self {
        self.initial_content = Some(content.into());
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Build the PublishingConfig instance
    ///
    /// # Errors
    /// Returns `FolioError::BuilderError` if a field is invalid
    pub fn build(self) -> FolioResult<PublishingConfig> {
        let defaults = PublishingConfig::default();
        let config = PublishingConfig {
            format_type: self.format_type.unwrap_or(defaults.format_type),
            isbn_year: self.isbn_year.unwrap_or(defaults.isbn_year),
            default_title: self.default_title.unwrap_or(defaults.default_title),
            default_author: self.default_author.unwrap_or(defaults.default_author),
            initial_content: self.initial_content.unwrap_or(defaults.initial_content),
            log_level: self.log_level.unwrap_or(defaults.log_level),
        };

        config
            .validate()
            .map_err(|e| FolioError::BuilderError(e.to_string()))?;
        Ok(config)
    }
}
