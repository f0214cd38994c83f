//! Configuration Files
//!
//! The list of additional configuration files declared inside configuration, and the typed
//! decode that binds it from a configuration section.

use crate::error::ConfigFilesError;
use config::{Config, Value, ValueKind};
use tracing::debug;

/// Key holding the JSON file list within a section
const JSON_KEY: &str = "Json";

/// Files declared in a configuration section
///
/// `json` distinguishes "not declared" (`None`) from "declared but empty" (`Some(vec![])`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationFiles {
    pub json: Option<Vec<String>>,
}

impl ConfigurationFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a value with the JSON file list set
    pub fn with_json<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            json: Some(files.into_iter().map(Into::into).collect()),
        }
    }

    /// Whether a JSON file list was declared. An empty list counts as declared.
    pub fn has_json(&self) -> bool {
        self.json.is_some()
    }

    pub fn json(&self) -> Option<&[String]> {
        self.json.as_deref()
    }

    /// Bind the named section of a configuration snapshot.
    ///
    /// A missing section or key yields an empty `ConfigurationFiles`, not an error. Only the
    /// named section is decoded; the rest of the snapshot is never inspected.
    pub fn bind(snapshot: &Config, section: &str) -> Result<Self, ConfigFilesError> {
        Self::from_value(&snapshot.cache, section)
    }

    /// Bind the named section of a configuration tree.
    ///
    /// `section` is a non-empty hierarchical key path separated by `.` or `:`; keys match
    /// case-insensitively.
    pub fn from_value(root: &Value, section: &str) -> Result<Self, ConfigFilesError> {
        let segments: Vec<&str> = section
            .split(['.', ':'])
            .filter(|segment| !segment.is_empty())
            .collect();
        if segments.is_empty() {
            return Err(ConfigFilesError::invalid_list(
                section,
                "section name must not be empty",
            ));
        }

        let json = match segments
            .into_iter()
            .try_fold(root, lookup)
            .and_then(|node| lookup(node, JSON_KEY))
        {
            Some(value) => decode_file_list(value, section)?,
            None => None,
        };

        debug!(
            section = section,
            declared = json.is_some(),
            files = json.as_ref().map_or(0, Vec::len),
            "Bound configuration files section"
        );

        Ok(Self { json })
    }
}

fn lookup<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    match &node.kind {
        ValueKind::Table(map) => map
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value),
        ValueKind::Array(items) => key.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    }
}

fn decode_file_list(value: &Value, section: &str) -> Result<Option<Vec<String>>, ConfigFilesError> {
    match &value.kind {
        ValueKind::Nil => Ok(None),
        ValueKind::Array(items) => items
            .iter()
            .map(|item| decode_path(item, section))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        // Flat sources express lists as index-keyed tables: Json.0, Json.1, ...
        ValueKind::Table(map) => {
            let mut indexed = map
                .iter()
                .map(|(key, item)| {
                    key.parse::<usize>().map(|index| (index, item)).map_err(|_| {
                        ConfigFilesError::invalid_list(
                            section,
                            format!("expected a list, found table key '{}'", key),
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            indexed.sort_by_key(|(index, _)| *index);
            indexed
                .into_iter()
                .map(|(_, item)| decode_path(item, section))
                .collect::<Result<Vec<_>, _>>()
                .map(Some)
        }
        other => Err(ConfigFilesError::invalid_list(
            section,
            format!("expected a list of file paths, found {}", kind_of(other)),
        )),
    }
}

fn decode_path(item: &Value, section: &str) -> Result<String, ConfigFilesError> {
    let path = match &item.kind {
        ValueKind::String(s) => s.clone(),
        ValueKind::Boolean(b) => b.to_string(),
        ValueKind::I64(n) => n.to_string(),
        ValueKind::I128(n) => n.to_string(),
        ValueKind::U64(n) => n.to_string(),
        ValueKind::U128(n) => n.to_string(),
        ValueKind::Float(n) => n.to_string(),
        other => {
            return Err(ConfigFilesError::invalid_list(
                section,
                format!("expected a file path, found {}", kind_of(other)),
            ))
        }
    };

    if path.is_empty() {
        return Err(ConfigFilesError::invalid_list(
            section,
            "file path must be a non-empty string",
        ));
    }

    Ok(path)
}

fn kind_of(kind: &ValueKind) -> &'static str {
    match kind {
        ValueKind::Nil => "null",
        ValueKind::Boolean(_) => "a boolean",
        ValueKind::I64(_)
        | ValueKind::I128(_)
        | ValueKind::U64(_)
        | ValueKind::U128(_)
        | ValueKind::Float(_) => "a number",
        ValueKind::String(_) => "a string",
        ValueKind::Array(_) => "a list",
        ValueKind::Table(_) => "a table",
    }
}
