//! Named slots holding one string blob each.

use crate::paths::{slot_file_path, slot_temp_path};
use crate::{Result, StoreError};
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// A key/value store shared by every window. No versioning, no locking:
/// the last write wins.
pub trait SlotStore: Send + Sync {
    /// Read a slot. `Ok(None)` if it was never written.
    fn read_slot(&self, key: &str) -> Result<Option<String>>;

    /// Replace a slot's contents.
    fn write_slot(&self, key: &str, value: &str) -> Result<()>;

    /// Directory backing the slots, if any. Watchers need it.
    fn watch_dir(&self) -> Option<&Path> {
        None
    }
}

/// One JSON file per slot under a directory.
#[derive(Clone, Debug)]
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SlotStore for FileSlotStore {
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(slot_file_path(&self.dir, key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes to a temp file and renames it over the slot, so readers in
    /// other processes see either the old blob or the new one.
    fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let tmp = slot_temp_path(&self.dir, key);
        fs::write(&tmp, value)?;
        fs::rename(&tmp, slot_file_path(&self.dir, key))?;
        debug!("Wrote slot {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn watch_dir(&self) -> Option<&Path> {
        Some(&self.dir)
    }
}

/// In-process slots.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStore for MemorySlotStore {
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        let guard = self.slots.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self.slots.write().map_err(|_| StoreError::Poisoned)?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_slot_absent_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSlotStore::new(dir.path());
        assert!(store.read_slot("kitchenOrders").unwrap().is_none());
    }

    #[test]
    fn test_file_slot_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSlotStore::new(dir.path().join("nested"));

        store.write_slot("kitchenOrders", "[1,2]").unwrap();
        store.write_slot("kitchenOrders", "[3]").unwrap();

        assert_eq!(store.read_slot("kitchenOrders").unwrap().as_deref(), Some("[3]"));
        assert!(!slot_temp_path(store.dir(), "kitchenOrders").exists());
    }

    #[test]
    fn test_memory_slot_last_write_wins() {
        let store = MemorySlotStore::new();
        assert!(store.read_slot("a").unwrap().is_none());
        store.write_slot("a", "one").unwrap();
        store.write_slot("a", "two").unwrap();
        assert_eq!(store.read_slot("a").unwrap().as_deref(), Some("two"));
        assert!(store.watch_dir().is_none());
    }
}
