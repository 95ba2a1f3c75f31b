//! Configuration
//!
//! The built-in settings (English, the usual install directories, a 30 second timeout,
//! bracketed output) live in `defaults/treetagger.default.toml`, compiled into the crate.
//! The CLI layers its `--config` file and flag overrides on top through [`Loader`].

use crate::chunking::OutputFormat;
use crate::tagger::Language;
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_TOML: &str = include_str!("../defaults/treetagger.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeTaggerConfig {
    pub tagger: TaggerConfig,
    pub output: OutputConfig,
}

/// Where to find the TreeTagger scripts and how to run them.
#[derive(Debug, Clone, Deserialize)]
pub struct TaggerConfig {
    pub language: Language,
    #[serde(default)]
    pub home: Option<PathBuf>,
    #[serde(default)]
    pub abbreviation_list: Option<PathBuf>,
    pub env_vars: Vec<String>,
    pub search_paths: Vec<String>,
    pub timeout_secs: u64,
}

impl TaggerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Layers sources over the built-in TreeTagger settings; later sources win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Add a TOML file, failing at [`Loader::build`] if it does not exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Add a TOML file that may be absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override one dotted key, e.g. `tagger.language`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<TreeTaggerConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in settings alone.
pub fn load_defaults() -> Result<TreeTaggerConfig, ConfigError> {
    Loader::new().build()
}
