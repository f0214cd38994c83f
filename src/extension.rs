//! JSON From Files
//!
//! Extends configuration builders so that a list of JSON files declared inside configuration
//! already loaded into the builder gets registered on the same builder:
//!
//! ```json
//! {
//!   "ConfigurationFiles": {
//!     "Json": ["file1.json", "file2.json", "file3.json"]
//!   }
//! }
//! ```
//!
//! The call must come after the sources that declare the list. Files are registered in
//! declared order, so later files override keys from earlier ones.

use crate::builder::{JsonFileSource, JsonSourceBuilder};
use crate::error::ConfigFilesError;
use crate::files::ConfigurationFiles;
use tracing::debug;

/// Section read when no other section is given
pub const DEFAULT_SECTION: &str = "ConfigurationFiles";

/// Options for [`AddJsonFromFiles::add_json_from_files_with`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFilesOptions {
    /// Section holding the file list. Must name a section: an empty path is rejected
    /// with `InvalidFileList` rather than reading the configuration root.
    pub section: String,

    /// Tolerate a missing file list, and forwarded to every registered file
    pub optional: bool,

    /// Forwarded to every registered file
    pub reload_on_change: bool,
}

impl Default for JsonFilesOptions {
    fn default() -> Self {
        Self {
            section: DEFAULT_SECTION.to_string(),
            optional: true,
            reload_on_change: false,
        }
    }
}

impl JsonFilesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn reload_on_change(mut self, reload_on_change: bool) -> Self {
        self.reload_on_change = reload_on_change;
        self
    }
}

/// Register JSON files listed in configuration already loaded into a builder
pub trait AddJsonFromFiles: JsonSourceBuilder {
    /// Read the default section with default options
    fn add_json_from_files(self) -> Result<Self, ConfigFilesError> {
        self.add_json_from_files_with(&JsonFilesOptions::default())
    }

    /// Read `options.section` and register each declared file.
    ///
    /// Fails with `ConfigurationUnavailable` when the builder cannot produce a snapshot, and
    /// with `MissingRequiredFiles` when no list is declared and `options.optional` is false.
    /// A declared but empty list registers nothing and is never an error.
    fn add_json_from_files_with(self, options: &JsonFilesOptions) -> Result<Self, ConfigFilesError> {
        let snapshot = self
            .snapshot()
            .map_err(ConfigFilesError::ConfigurationUnavailable)?;
        let files = ConfigurationFiles::bind(&snapshot, &options.section)?;

        match files.json {
            Some(paths) => {
                debug!(
                    section = %options.section,
                    count = paths.len(),
                    "Adding JSON files declared in configuration"
                );
                Ok(paths.into_iter().fold(self, |builder, path| {
                    builder.add_json_file(
                        JsonFileSource::new(path)
                            .optional(options.optional)
                            .reload_on_change(options.reload_on_change),
                    )
                }))
            }
            None if options.optional => {
                debug!(section = %options.section, "No JSON files declared");
                Ok(self)
            }
            None => Err(ConfigFilesError::MissingRequiredFiles {
                section: options.section.clone(),
            }),
        }
    }
}

impl<B: JsonSourceBuilder> AddJsonFromFiles for B {}
