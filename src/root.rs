//! Configuration Root
//!
//! Built configuration with reload support. JSON sources registered with `reload_on_change`
//! are watched; a change to any of them rebuilds the whole configuration from its sources.

use crate::builder::JsonFileSource;
use crate::error::ConfigFilesError;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::RwLock;
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

struct ReloadState {
    builder: ConfigBuilder<DefaultState>,
    config: RwLock<Config>,
    generation: AtomicU64,
}

impl ReloadState {
    /// Rebuild and swap under the write lock so concurrent reloads apply in order.
    fn reload(&self) -> Result<u64, ConfigError> {
        let mut current = self.config.write();
        *current = self.builder.build_cloned()?;
        Ok(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Finalized configuration, kept current for watched files
pub struct ConfigurationRoot {
    state: Arc<ReloadState>,
    watched: Vec<PathBuf>,
    _watcher: Option<RecommendedWatcher>,
}

impl ConfigurationRoot {
    pub(crate) fn build(
        builder: ConfigBuilder<DefaultState>,
        json_sources: &[JsonFileSource],
    ) -> Result<Self, ConfigFilesError> {
        let config = builder.build_cloned()?;
        let state = Arc::new(ReloadState {
            builder,
            config: RwLock::new(config),
            generation: AtomicU64::new(0),
        });

        let watched = watch_targets(json_sources);
        let watcher = if watched.is_empty() {
            None
        } else {
            Some(start_watcher(Arc::clone(&state), &watched)?)
        };

        info!(
            json_sources = json_sources.len(),
            watched = watched.len(),
            "Configuration built"
        );

        Ok(Self {
            state,
            watched,
            _watcher: watcher,
        })
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> Config {
        self.state.config.read().clone()
    }

    pub fn get<'de, T: Deserialize<'de>>(&self, key: &str) -> Result<T, ConfigError> {
        self.state.config.read().get(key)
    }

    /// Number of successful reloads since build
    pub fn generation(&self) -> u64 {
        self.state.generation.load(Ordering::SeqCst)
    }

    /// Files watched for changes
    pub fn watched_paths(&self) -> &[PathBuf] {
        &self.watched
    }

    /// Rebuild from all sources. On failure the current configuration is kept.
    pub fn reload(&self) -> Result<(), ConfigFilesError> {
        let generation = self.state.reload()?;
        info!(generation, "Configuration reloaded");
        Ok(())
    }
}

impl std::fmt::Debug for ConfigurationRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationRoot")
            .field("generation", &self.generation())
            .field("watched", &self.watched)
            .finish()
    }
}

/// Absolute paths of reloadable sources whose directory exists
fn watch_targets(json_sources: &[JsonFileSource]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut targets = Vec::new();

    for source in json_sources.iter().filter(|s| s.reload_on_change) {
        match absolute_target(&source.path) {
            Some(target) => {
                if seen.insert(target.clone()) {
                    targets.push(target);
                }
            }
            None => warn!(
                path = %source.path.display(),
                "Directory of reloadable configuration file not found; not watching"
            ),
        }
    }

    targets
}

fn absolute_target(path: &Path) -> Option<PathBuf> {
    let file_name = path.file_name()?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let dir = parent.canonicalize().ok()?;
    Some(dir.join(file_name))
}

fn start_watcher(
    state: Arc<ReloadState>,
    targets: &[PathBuf],
) -> Result<RecommendedWatcher, ConfigFilesError> {
    let files: HashSet<PathBuf> = targets.iter().cloned().collect();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) if is_relevant(&event, &files) => {
            debug!(paths = ?event.paths, "Watched configuration file changed");
            match state.reload() {
                Ok(generation) => info!(generation, "Configuration reloaded"),
                Err(e) => warn!(error = %e, "Configuration reload failed; keeping previous"),
            }
        }
        Ok(_) => {}
        Err(e) => warn!(error = %e, "Configuration watch error"),
    })?;

    let dirs: BTreeSet<&Path> = targets.iter().filter_map(|t| t.parent()).collect();
    for dir in dirs {
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        debug!(dir = %dir.display(), "Watching configuration directory");
    }

    Ok(watcher)
}

fn is_relevant(event: &Event, files: &HashSet<PathBuf>) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| files.contains(p))
}
