//! Path helpers for slot files.

use std::path::{Path, PathBuf};

/// Default slot directory, usually ~/.local/share/order-deck/slots
pub fn default_store_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_default();
            PathBuf::from(home).join(".local/share")
        })
        .join("order-deck")
        .join("slots")
}

/// "kitchenOrders" -> "kitchenOrders.json"
pub fn slot_file_name(key: &str) -> String {
    format!("{}.json", key)
}

pub fn slot_file_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(slot_file_name(key))
}

/// Sibling temp file used for atomic replacement. Its name never matches
/// a slot file, so watchers ignore it.
pub(crate) fn slot_temp_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!(".{}.tmp", slot_file_name(key)))
}
