//! The single boundary where producer records become `LiveOrder`s.
//!
//! Nothing past this module ever sees an optional field.

use crate::raw::RawKitchenOrder;
use crate::types::{DEFAULT_CUSTOMER_LABEL, EMPTY_ITEMS_SUMMARY, LiveOrder, OrderStatus};
use rand::Rng;
use sha2::{Digest, Sha256};

/// How the record was observed. Decides the resulting status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observation {
    /// Order-created notification: status forced to `Preparing`.
    Created,
    /// Order-ready notification: status forced to `Ready`.
    Ready,
    /// Read back from the persisted slot: status mapped from the record.
    Persisted,
}

/// Normalize a producer record.
///
/// Deterministic for a given input, except for two documented defaults:
/// a missing order number becomes a `#NNNN` placeholder and a missing
/// timestamp becomes `now_ms`. The placeholder is random for bus events and
/// derived from the record's content for persisted records, so re-reading
/// the same slot yields the same ids.
pub fn normalize(raw: &RawKitchenOrder, observation: Observation, now_ms: i64) -> LiveOrder {
    let id = raw.order_number.clone().unwrap_or_else(|| match observation {
        Observation::Persisted => content_order_id(raw),
        Observation::Created | Observation::Ready => placeholder_order_id(),
    });

    let customer_label = raw
        .customer_name
        .as_ref()
        .or(raw.waiter_name.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_CUSTOMER_LABEL.to_string());

    let status = match observation {
        Observation::Created => OrderStatus::Preparing,
        Observation::Ready => OrderStatus::Ready,
        Observation::Persisted => raw
            .status
            .as_deref()
            .map(OrderStatus::from_producer)
            .unwrap_or_default(),
    };

    LiveOrder {
        id,
        customer_label,
        items_summary: items_summary(raw),
        status,
        total: raw.grand_total.unwrap_or(0.0),
        created_at_ms: raw.timestamp.unwrap_or(now_ms),
    }
}

/// "2x Burger, 1x Fries, Deal: Lunch Combo"
pub fn items_summary(raw: &RawKitchenOrder) -> String {
    let items = raw.items.iter().map(|item| {
        format!(
            "{}x {}",
            item.quantity.unwrap_or(1),
            item.name.as_deref().unwrap_or("Item")
        )
    });
    let deals = raw
        .deals
        .iter()
        .filter_map(|deal| deal.name.as_deref())
        .map(|name| format!("Deal: {}", name));

    let summary = items.chain(deals).collect::<Vec<_>>().join(", ");
    if summary.is_empty() {
        EMPTY_ITEMS_SUMMARY.to_string()
    } else {
        summary
    }
}

/// Random `#NNNN` id for records that arrive without an order number.
fn placeholder_order_id() -> String {
    let n: u16 = rand::rng().random_range(1000..=9999);
    format!("#{}", n)
}

/// `#NNNN` id hashed from the record's JSON encoding.
fn content_order_id(raw: &RawKitchenOrder) -> String {
    let encoded = serde_json::to_vec(raw).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(&encoded);
    let digest = hasher.finalize();

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let n = u64::from_be_bytes(prefix) % 9000 + 1000;
    format!("#{}", n)
}
