//! JSON file source registration record.

use config::{File, FileFormat, Source};
use std::path::{Path, PathBuf};

/// A JSON file registered as a configuration source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileSource {
    /// File path, after base path resolution
    pub path: PathBuf,

    /// Missing file is tolerated when true; otherwise building fails
    pub optional: bool,

    /// Rebuild configuration when the file changes
    pub reload_on_change: bool,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            optional: false,
            reload_on_change: false,
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn reload_on_change(mut self, reload_on_change: bool) -> Self {
        self.reload_on_change = reload_on_change;
        self
    }

    /// Resolve a relative path against `base`. Absolute paths are kept.
    pub fn resolved_against(mut self, base: &Path) -> Self {
        if self.path.is_relative() {
            self.path = base.join(&self.path);
        }
        self
    }

    /// Convert into a `config` file source in JSON format
    pub fn to_file(&self) -> impl Source + Send + Sync + 'static {
        File::from(self.path.as_path())
            .format(FileFormat::Json)
            .required(!self.optional)
    }
}
