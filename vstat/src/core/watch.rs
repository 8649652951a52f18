// src/core/watch.rs
use crate::core::service::CollectorHandle;
use crate::core::store::PathFilter;
use crate::models::{DocumentId, LifecycleEvent};
use anyhow::{Context as _, Result};
use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as _};
use tracing::{debug, error};

/// Forwards filesystem changes below a vault root to a collector.
///
/// Watching stops when the value is dropped.
#[derive(Debug)]
pub struct VaultWatcher {
    _watcher: RecommendedWatcher,
}

impl VaultWatcher {
    /// Starts watching `filter.root()` recursively.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform watcher cannot be created or the
    /// root cannot be watched.
    pub fn start(filter: PathFilter, collector: CollectorHandle) -> Result<Self> {
        let root = filter.root().to_path_buf();
        let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            match result {
                Ok(event) => {
                    for lifecycle in translate(&filter, &event) {
                        if collector.notify(lifecycle).is_err() {
                            debug!("collector stopped, dropping filesystem event");
                            return;
                        }
                    }
                }
                Err(err) => error!(error = %err, "filesystem watcher error"),
            }
        })
        .context("Failed to create filesystem watcher")?;

        watcher
            .watch(&root, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch {}", root.display()))?;

        debug!(root = %root.display(), "watching vault");
        Ok(Self { _watcher: watcher })
    }
}

/// Lifecycle events for one filesystem event.
///
/// Paths outside the vault or rejected by `filter` produce nothing. A rename
/// whose source or target is filtered out becomes a creation or deletion.
#[must_use]
pub fn translate(filter: &PathFilter, event: &Event) -> Vec<LifecycleEvent> {
    let ids = || identify_all(filter, event);

    match event.kind {
        EventKind::Create(_) => ids().map(LifecycleEvent::Created).collect(),
        EventKind::Remove(_) => ids().map(LifecycleEvent::Deleted).collect(),
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) if event.paths.len() == 2 => {
            let from = filter.identify(&event.paths[0]);
            let to = filter.identify(&event.paths[1]);
            match (from, to) {
                (Some(from), Some(to)) => vec![LifecycleEvent::Renamed { from, to }],
                (Some(from), None) => vec![LifecycleEvent::Deleted(from)],
                (None, Some(to)) => vec![LifecycleEvent::Created(to)],
                (None, None) => Vec::new(),
            }
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
            ids().map(LifecycleEvent::Deleted).collect()
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
            ids().map(LifecycleEvent::Created).collect()
        }
        EventKind::Modify(ModifyKind::Metadata(_)) => {
            ids().map(LifecycleEvent::MetadataChanged).collect()
        }
        EventKind::Modify(_) | EventKind::Any | EventKind::Other => {
            ids().map(LifecycleEvent::Modified).collect()
        }
        EventKind::Access(_) => Vec::new(),
    }
}

fn identify_all<'a>(
    filter: &'a PathFilter,
    event: &'a Event,
) -> impl Iterator<Item = DocumentId> + 'a {
    event.paths.iter().filter_map(|path| filter.identify(path))
}
