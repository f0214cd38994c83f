//! Config Files: JSON configuration files declared inside configuration
//!
//! Reads a section of configuration already loaded into a builder, interprets it as a list of
//! JSON file paths, and registers each of them on the same builder.

pub mod builder;
pub mod error;
pub mod extension;
pub mod files;
pub mod logging;
pub mod root;

pub use builder::{ConfigurationBuilder, JsonFileSource, JsonSourceBuilder};
pub use error::ConfigFilesError;
pub use extension::{AddJsonFromFiles, JsonFilesOptions, DEFAULT_SECTION};
pub use files::ConfigurationFiles;
pub use root::ConfigurationRoot;
