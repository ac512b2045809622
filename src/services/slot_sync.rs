//! Cross-window slot sync.
//!
//! Turns filesystem changes on the kitchen slot into `SlotChanged` events
//! on the feed bus. The watcher thread only signals; the panel does the
//! re-read on its own loop.

use crate::panels::live_feed::events::FeedEvent;
use deck_store::{SlotStore, SlotWatcher};
use log::{info, warn};
use tokio::sync::broadcast::Sender;

/// Start watching `key` in the store's directory.
///
/// Returns None for stores with no backing directory, or if the watch
/// could not be set up; the panel then runs without cross-window sync.
pub fn start_watcher(
    store: &dyn SlotStore,
    key: &str,
    bus: Sender<FeedEvent>,
) -> Option<SlotWatcher> {
    let Some(dir) = store.watch_dir() else {
        info!("Slot store has no directory, cross-window sync disabled");
        return None;
    };

    match SlotWatcher::start(dir, key, move || {
        let _ = bus.send(FeedEvent::SlotChanged);
    }) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            warn!("Failed to watch slot {}: {}. Cross-window sync disabled.", key, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_bus::CHANNEL_CAPACITY;
    use deck_store::{FileSlotStore, MemorySlotStore};
    use std::time::{Duration, Instant};
    use tokio::sync::broadcast;

    #[test]
    fn test_memory_store_has_no_watcher() {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        assert!(start_watcher(&MemorySlotStore::new(), "kitchenOrders", tx).is_none());
    }

    #[test]
    fn test_external_write_signals_bus() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSlotStore::new(dir.path());
        let (tx, mut rx) = broadcast::channel(CHANNEL_CAPACITY);

        let watcher = start_watcher(&store, "kitchenOrders", tx);
        assert!(watcher.is_some());

        FileSlotStore::new(dir.path())
            .write_slot("kitchenOrders", "[]")
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Ok(FeedEvent::SlotChanged) = rx.try_recv() {
                break;
            }
            assert!(Instant::now() < deadline, "no SlotChanged within 5s");
            std::thread::sleep(Duration::from_millis(20));
        }
    }
}
