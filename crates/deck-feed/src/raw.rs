//! Producer-side order records as they arrive on the bus or in the
//! persisted slot.
//!
//! Producers are loosely typed: any field may be missing, numbers may be
//! strings, lists may be absent, and the same value may appear under two
//! names (`total` next to `grandTotal`). Decoding never fails on a field; a
//! value that cannot be read is treated as absent and resolved later by the
//! normalizer.
//!
//! Alternate key names are separate wire fields rather than serde aliases,
//! so a record carrying both names still decodes. The canonical name wins.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A line item on a kitchen order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ItemWire")]
pub struct RawItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

#[derive(Deserialize)]
struct ItemWire {
    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    quantity: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    qty: Option<u32>,
}

impl From<ItemWire> for RawItem {
    fn from(wire: ItemWire) -> Self {
        Self {
            name: wire.name,
            quantity: wire.quantity.or(wire.qty),
        }
    }
}

/// A bundled deal attached to a kitchen order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDeal {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Kitchen order exactly as a producer wrote it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "OrderWire")]
pub struct RawKitchenOrder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiter_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<RawItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deals: Vec<RawDeal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grand_total: Option<f64>,
    /// Creation time (unix millis)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Fields this crate does not read (alternate key names included), kept
    /// so a read-modify-write of the slot does not strip them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderWire {
    #[serde(default, deserialize_with = "lenient_string")]
    order_number: Option<String>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    customer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    waiter_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    items: Vec<RawItem>,
    #[serde(default, deserialize_with = "lenient_list")]
    deals: Vec<RawDeal>,
    #[serde(default, deserialize_with = "lenient_string")]
    status: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    grand_total: Option<f64>,
    #[serde(default)]
    total: Option<Value>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    timestamp: Option<i64>,
    #[serde(default)]
    created_at: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<OrderWire> for RawKitchenOrder {
    fn from(wire: OrderWire) -> Self {
        let mut extra = wire.extra;

        let order_number = wire
            .order_number
            .or_else(|| wire.id.as_ref().and_then(string_from_value));
        let grand_total = wire
            .grand_total
            .or_else(|| wire.total.as_ref().and_then(number_from_value));
        let timestamp = wire
            .timestamp
            .or_else(|| wire.created_at.as_ref().and_then(timestamp_from_value));

        for (key, value) in [("id", wire.id), ("total", wire.total), ("createdAt", wire.created_at)] {
            if let Some(value) = value {
                extra.insert(key.to_string(), value);
            }
        }

        Self {
            order_number,
            customer_name: wire.customer_name,
            waiter_name: wire.waiter_name,
            items: wire.items,
            deals: wire.deals,
            status: wire.status,
            grand_total,
            timestamp,
            extra,
        }
    }
}

impl RawKitchenOrder {
    /// Record carrying only an order number, as the kitchen display sends
    /// when marking an order ready.
    pub fn with_order_number(order_number: impl Into<String>) -> Self {
        Self {
            order_number: Some(order_number.into()),
            ..Default::default()
        }
    }

    /// Decode one element of a persisted array. Non-objects yield `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }
}

fn string_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite())
}

fn timestamp_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                chrono::DateTime::parse_from_rfc3339(s)
                    .ok()
                    .map(|dt| dt.timestamp_millis())
            })
        }
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(string_from_value))
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_from_value)
        .filter(|q| *q >= 0.0 && *q <= u32::MAX as f64)
        .map(|q| q.round() as u32))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(timestamp_from_value))
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(values)) => values
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect(),
        _ => Vec::new(),
    })
}
