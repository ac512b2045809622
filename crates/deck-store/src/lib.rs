//! deck-store: persisted slots shared by every dashboard window.
//!
//! Provides:
//! - A slot store abstraction (file-backed, in-memory for tests)
//! - Tolerant reading of the kitchen order slot
//! - Read-modify-write helpers for order producers (last writer wins)
//! - A filesystem watcher that signals when another process rewrites a slot

mod error;
mod kitchen;
mod paths;
mod slot;
mod watcher;

pub use error::StoreError;
pub use kitchen::{KITCHEN_ORDERS_KEY, KitchenSlot, SLOT_RETENTION, read_kitchen_orders};
pub use paths::{default_store_dir, slot_file_name, slot_file_path};
pub use slot::{FileSlotStore, MemorySlotStore, SlotStore};
pub use watcher::SlotWatcher;

pub type Result<T> = std::result::Result<T, StoreError>;
