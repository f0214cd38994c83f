//! AddJsonFromFiles on a plain `config::ConfigBuilder`

use config::{Config, File, FileFormat};
use config_files::{AddJsonFromFiles, ConfigFilesError, JsonFilesOptions};

use super::test_utils::ConfigDir;

#[test]
fn test_plain_builder_loads_declared_files() {
    let dir = ConfigDir::new();
    let overlay = dir.write("overlay.json", r#"{ "mode": "overlay" }"#);
    let base = dir.write(
        "base.json",
        &format!(
            r#"{{ "ConfigurationFiles": {{ "Json": [{}] }}, "mode": "base" }}"#,
            serde_json::to_string(&overlay).unwrap()
        ),
    );

    let config = Config::builder()
        .add_source(File::from(base.as_path()).format(FileFormat::Json))
        .add_json_from_files()
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.get::<String>("mode").unwrap(), "overlay");
}

#[test]
fn test_plain_builder_without_snapshot_fails() {
    let dir = ConfigDir::new();
    let missing = dir.path().join("missing.json");

    let err = Config::builder()
        .add_source(File::from(missing.as_path()).format(FileFormat::Json).required(true))
        .add_json_from_files_with(&JsonFilesOptions::new())
        .unwrap_err();

    assert!(matches!(err, ConfigFilesError::ConfigurationUnavailable(_)));
}
