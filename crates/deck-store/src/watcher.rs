//! Slot change notifications from other processes.

use crate::Result;
use crate::paths::slot_file_name;
use log::{debug, error, info};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

/// Watches one slot file. Dropping it stops the watch.
pub struct SlotWatcher {
    _watcher: RecommendedWatcher,
    key: String,
}

impl SlotWatcher {
    /// Watch `<dir>/<key>.json` and call `on_change` whenever it is
    /// created, rewritten or removed. The callback runs on the watcher's
    /// own thread.
    pub fn start<F>(dir: &Path, key: &str, on_change: F) -> Result<Self>
    where
        F: Fn() + Send + 'static,
    {
        fs::create_dir_all(dir)?;

        let file_name = slot_file_name(key);
        let slot_key = key.to_string();

        let mut watcher = notify::recommended_watcher(
            move |res: std::result::Result<Event, notify::Error>| match res {
                Ok(event) => {
                    if is_slot_change(&event, &file_name) {
                        debug!("Slot {} changed: {:?}", slot_key, event.kind);
                        on_change();
                    }
                }
                Err(e) => error!("Slot watch error: {:?}", e),
            },
        )?;

        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        info!("Watching slot {} in {}", key, dir.display());

        Ok(Self {
            _watcher: watcher,
            key: key.to_string(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for SlotWatcher {
    fn drop(&mut self) {
        info!("Stopped watching slot {}", self.key);
    }
}

fn is_slot_change(event: &Event, file_name: &str) -> bool {
    let relevant = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );
    relevant
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(OsStr::new(file_name)))
}
