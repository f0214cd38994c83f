//! Registration follows declaration order, and repeated calls append again

use config_files::{AddJsonFromFiles, ConfigurationBuilder, ConfigurationFiles, JsonFilesOptions};
use proptest::prelude::*;
use config::Config;

fn file_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9_]{0,7}\\.json", 0..6)
}

fn declaring(files: &[String]) -> ConfigurationBuilder {
    ConfigurationBuilder::new()
        .set_default("ConfigurationFiles.Json", files.to_vec())
        .unwrap()
}

fn registered(builder: &ConfigurationBuilder) -> Vec<String> {
    builder
        .json_sources()
        .iter()
        .map(|s| s.path.to_string_lossy().into_owned())
        .collect()
}

proptest! {
    #[test]
    fn registration_matches_declared_order(
        files in file_names(),
        optional in any::<bool>(),
        reload_on_change in any::<bool>(),
    ) {
        let options = JsonFilesOptions::new()
            .optional(optional)
            .reload_on_change(reload_on_change);
        let builder = declaring(&files).add_json_from_files_with(&options).unwrap();

        prop_assert_eq!(registered(&builder), files);
        for source in builder.json_sources() {
            prop_assert_eq!(source.optional, optional);
            prop_assert_eq!(source.reload_on_change, reload_on_change);
        }
    }

    #[test]
    fn repeated_calls_register_twice(files in file_names()) {
        let builder = declaring(&files)
            .add_json_from_files()
            .unwrap()
            .add_json_from_files()
            .unwrap();

        let expected: Vec<String> = files.iter().chain(files.iter()).cloned().collect();
        prop_assert_eq!(registered(&builder), expected);
    }

    #[test]
    fn has_json_tracks_presence_not_length(files in file_names()) {
        let declared = Config::builder()
            .set_default("ConfigurationFiles.Json", files.clone())
            .unwrap()
            .build()
            .unwrap();
        let bound = ConfigurationFiles::bind(&declared, "ConfigurationFiles").unwrap();
        prop_assert!(bound.has_json());
        prop_assert_eq!(bound.json, Some(files));

        let undeclared = Config::builder()
            .set_default("ConfigurationFiles.Other", "value")
            .unwrap()
            .build()
            .unwrap();
        let bound = ConfigurationFiles::bind(&undeclared, "ConfigurationFiles").unwrap();
        prop_assert!(!bound.has_json());
    }
}
