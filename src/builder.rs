//! Configuration Builder
//!
//! The builder seam used by the JSON-from-files extension, plus a recording wrapper around
//! `config::ConfigBuilder` that tracks registered JSON sources and builds a reloadable root.

use crate::error::ConfigFilesError;
use crate::root::ConfigurationRoot;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Source, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

mod source;

pub use source::JsonFileSource;

/// A configuration builder that can expose what it has loaded so far and accept JSON files
pub trait JsonSourceBuilder: Sized {
    /// Readable snapshot of all sources registered so far
    fn snapshot(&self) -> Result<Config, ConfigError>;

    /// Append a JSON file source
    fn add_json_file(self, source: JsonFileSource) -> Self;
}

impl JsonSourceBuilder for ConfigBuilder<DefaultState> {
    fn snapshot(&self) -> Result<Config, ConfigError> {
        self.build_cloned()
    }

    fn add_json_file(self, source: JsonFileSource) -> Self {
        if source.reload_on_change {
            debug!(
                path = %source.path.display(),
                "reload_on_change has no effect on a plain ConfigBuilder"
            );
        }
        debug!(
            path = %source.path.display(),
            optional = source.optional,
            "Registered JSON configuration source"
        );
        self.add_source(source.to_file())
    }
}

/// Builder that records its JSON sources and supports reload on change
#[derive(Debug, Clone, Default)]
pub struct ConfigurationBuilder {
    inner: ConfigBuilder<DefaultState>,
    base_path: Option<PathBuf>,
    json_sources: Vec<JsonFileSource>,
}

impl ConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing `config` builder and the sources already on it
    pub fn from_builder(inner: ConfigBuilder<DefaultState>) -> Self {
        Self {
            inner,
            base_path: None,
            json_sources: Vec::new(),
        }
    }

    /// Resolve relative JSON paths registered from now on against `base_path`
    pub fn set_base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    pub fn add_source<T>(mut self, source: T) -> Self
    where
        T: Source + Send + Sync + 'static,
    {
        self.inner = self.inner.add_source(source);
        self
    }

    pub fn set_default<S, V>(mut self, key: S, value: V) -> Result<Self, ConfigError>
    where
        S: AsRef<str>,
        V: Into<Value>,
    {
        self.inner = self.inner.set_default(key, value)?;
        Ok(self)
    }

    pub fn set_override<S, V>(mut self, key: S, value: V) -> Result<Self, ConfigError>
    where
        S: AsRef<str>,
        V: Into<Value>,
    {
        self.inner = self.inner.set_override(key, value)?;
        Ok(self)
    }

    /// Register a single JSON file
    pub fn add_json(self, path: impl Into<PathBuf>, optional: bool, reload_on_change: bool) -> Self {
        self.add_json_file(
            JsonFileSource::new(path)
                .optional(optional)
                .reload_on_change(reload_on_change),
        )
    }

    /// JSON sources registered so far, in registration order
    pub fn json_sources(&self) -> &[JsonFileSource] {
        &self.json_sources
    }

    /// Load every source and produce the configuration root.
    ///
    /// Missing required files and malformed JSON surface here.
    pub fn build(self) -> Result<ConfigurationRoot, ConfigFilesError> {
        ConfigurationRoot::build(self.inner, &self.json_sources)
    }
}

impl JsonSourceBuilder for ConfigurationBuilder {
    fn snapshot(&self) -> Result<Config, ConfigError> {
        self.inner.build_cloned()
    }

    fn add_json_file(mut self, source: JsonFileSource) -> Self {
        let source = match &self.base_path {
            Some(base) => source.resolved_against(base),
            None => source,
        };
        debug!(
            path = %source.path.display(),
            optional = source.optional,
            reload_on_change = source.reload_on_change,
            "Registered JSON configuration source"
        );
        self.inner = self.inner.add_source(source.to_file());
        self.json_sources.push(source);
        self
    }
}
