//! Reload of watched configuration files

use config_files::{AddJsonFromFiles, ConfigurationBuilder, JsonFilesOptions};
use std::time::{Duration, Instant};

use super::test_utils::ConfigDir;

fn wait_for<F: Fn() -> bool>(condition: F) -> bool {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    condition()
}

#[test]
fn test_watched_file_change_reloads_configuration() {
    let dir = ConfigDir::new();
    let base = dir.write(
        "appsettings.json",
        r#"{ "ConfigurationFiles": { "Json": ["live.json"] } }"#,
    );
    let live = dir.write("live.json", r#"{ "name": "before" }"#);

    let options = JsonFilesOptions::new().reload_on_change(true);
    let root = ConfigurationBuilder::new()
        .add_json(&base, false, false)
        .set_base_path(dir.path())
        .add_json_from_files_with(&options)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(root.watched_paths().len(), 1);
    assert_eq!(root.get::<String>("name").unwrap(), "before");

    std::fs::write(&live, r#"{ "name": "after" }"#).unwrap();

    assert!(wait_for(|| root.get::<String>("name").ok().as_deref() == Some("after")));
    assert!(root.generation() >= 1);
}

#[test]
fn test_sources_without_reload_are_not_watched() {
    let dir = ConfigDir::new();
    let base = dir.write(
        "appsettings.json",
        r#"{ "ConfigurationFiles": { "Json": ["static.json"] } }"#,
    );
    dir.write("static.json", r#"{ "name": "static" }"#);

    let root = ConfigurationBuilder::new()
        .add_json(&base, false, false)
        .set_base_path(dir.path())
        .add_json_from_files()
        .unwrap()
        .build()
        .unwrap();

    assert!(root.watched_paths().is_empty());
    assert_eq!(root.get::<String>("name").unwrap(), "static");
}
