//! The kitchen order slot: a JSON array of producer order records,
//! newest first.

use crate::Result;
use crate::slot::SlotStore;
use deck_feed::RawKitchenOrder;
use log::{debug, warn};
use serde_json::Value;
use std::sync::Arc;

/// Slot written by the order-entry and kitchen-display surfaces.
pub const KITCHEN_ORDERS_KEY: &str = "kitchenOrders";

/// Most records a producer keeps in the slot; older ones are dropped on
/// the next append.
pub const SLOT_RETENTION: usize = 50;

/// Read and decode a kitchen order slot.
///
/// Never fails: an absent slot, an unreadable slot, or a blob that is not
/// a JSON array all read as empty. Array elements that are not objects
/// are skipped.
pub fn read_kitchen_orders(store: &dyn SlotStore, key: &str) -> Vec<RawKitchenOrder> {
    let blob = match store.read_slot(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            debug!("Slot {} is empty", key);
            return Vec::new();
        }
        Err(e) => {
            warn!("Failed to read slot {}: {}", key, e);
            return Vec::new();
        }
    };

    decode_orders(key, &blob)
}

fn decode_orders(key: &str, blob: &str) -> Vec<RawKitchenOrder> {
    if blob.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Value>(blob) {
        Ok(Value::Array(values)) => {
            let mut orders = Vec::with_capacity(values.len());
            let mut non_objects = 0;
            for (index, value) in values.into_iter().enumerate() {
                if !value.is_object() {
                    non_objects += 1;
                    continue;
                }
                match serde_json::from_value::<RawKitchenOrder>(value) {
                    Ok(order) => orders.push(order),
                    Err(e) => warn!("Slot {}: undecodable order at index {}: {}", key, index, e),
                }
            }
            if non_objects > 0 {
                warn!("Slot {}: skipped {} non-object entries", key, non_objects);
            }
            orders
        }
        Ok(other) => {
            warn!("Slot {} is not a JSON array (found {}), ignoring", key, kind(&other));
            Vec::new()
        }
        Err(e) => {
            warn!("Slot {} holds malformed JSON, ignoring: {}", key, e);
            Vec::new()
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Producer-side handle on a kitchen order slot.
///
/// Every write is a read-modify-write of the whole array with no lock;
/// concurrent writers overwrite each other.
#[derive(Clone)]
pub struct KitchenSlot {
    store: Arc<dyn SlotStore>,
    key: String,
}

impl KitchenSlot {
    pub fn new(store: Arc<dyn SlotStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn read(&self) -> Vec<RawKitchenOrder> {
        read_kitchen_orders(self.store.as_ref(), &self.key)
    }

    pub fn write(&self, orders: &[RawKitchenOrder]) -> Result<()> {
        let blob = serde_json::to_string(orders)?;
        self.store.write_slot(&self.key, &blob)
    }

    /// Put a new order at the front of the slot. An order already present
    /// under the same number is replaced. The slot keeps at most
    /// [`SLOT_RETENTION`] records.
    pub fn append_order(&self, order: RawKitchenOrder) -> Result<()> {
        let mut orders = self.read();
        if let Some(number) = order.order_number.as_deref() {
            orders.retain(|o| o.order_number.as_deref() != Some(number));
        }
        orders.insert(0, order);
        orders.truncate(SLOT_RETENTION);
        self.write(&orders)
    }

    /// Set the status of an order to "ready". Returns false if the slot
    /// has no order with this number.
    pub fn mark_ready(&self, order_number: &str) -> Result<bool> {
        let mut orders = self.read();
        let Some(order) = orders
            .iter_mut()
            .find(|o| o.order_number.as_deref() == Some(order_number))
        else {
            return Ok(false);
        };

        order.status = Some("ready".to_string());
        self.write(&orders)?;
        Ok(true)
    }
}
