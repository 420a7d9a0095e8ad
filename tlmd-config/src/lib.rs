//! Shared configuration loader for the tlmd toolchain.
//!
//! `defaults/tlmd.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`TlmdConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use tlmd_babel::{Delimiters, FormatError, MarkdownFormat, Style, UrlPattern};

const DEFAULT_TOML: &str = include_str!("../defaults/tlmd.default.toml");

/// Top-level configuration consumed by tlmd applications.
#[derive(Debug, Clone, Deserialize)]
pub struct TlmdConfig {
    pub markdown: MarkdownConfig,
    pub output: OutputConfig,
}

/// Knobs of the markdown format.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    /// `false` installs an empty delimiter table, disabling markup handling.
    pub delimiters_enabled: bool,
    pub url_pattern: String,
    /// Replaces the built-in delimiter table when present.
    ///
    /// Markers are values rather than table keys: the config crate lowercases
    /// keys, and markers are case-sensitive.
    #[serde(default)]
    pub delimiters: Option<Vec<DelimiterEntry>>,
}

/// One `[[markdown.delimiters]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DelimiterEntry {
    pub marker: String,
    pub style: Style,
}

impl TryFrom<&MarkdownConfig> for MarkdownFormat {
    type Error = FormatError;

    fn try_from(config: &MarkdownConfig) -> Result<Self, Self::Error> {
        let format =
            MarkdownFormat::new().with_url_pattern(UrlPattern::new(&config.url_pattern)?);
        if !config.delimiters_enabled {
            return Ok(format.without_delimiters());
        }
        match &config.delimiters {
            Some(entries) => {
                let delimiters = Delimiters::new(
                    entries
                        .iter()
                        .map(|entry| (entry.marker.clone(), entry.style)),
                )?;
                Ok(format.with_delimiters(delimiters))
            }
            None => Ok(format),
        }
    }
}

/// Controls how CLI output is written.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub pretty: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<TlmdConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TlmdConfig, ConfigError> {
    Loader::new().build()
}
