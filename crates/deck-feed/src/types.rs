//! Core types for deck-feed

use std::fmt;

/// Maximum number of entries the feed ever holds.
pub const FEED_CAPACITY: usize = 5;

/// Label used when an order carries neither a customer nor a waiter name.
pub const DEFAULT_CUSTOMER_LABEL: &str = "Guest";

/// Summary used when an order has no items and no deals.
pub const EMPTY_ITEMS_SUMMARY: &str = "No items";

/// Coarse lifecycle stage of an order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
}

impl OrderStatus {
    /// Map a producer status string onto the three-way enum.
    /// Unknown or empty strings fall back to `Pending`.
    pub fn from_producer(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "ready" | "completed" | "served" => OrderStatus::Ready,
            "preparing" | "in-progress" | "in_progress" | "cooking" => OrderStatus::Preparing,
            _ => OrderStatus::Pending,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, OrderStatus::Ready)
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Authoritative feed record. Every field is resolved; absent producer
/// fields were replaced with defaults by the normalizer.
#[derive(Clone, Debug, PartialEq)]
pub struct LiveOrder {
    /// External order number, unique within the feed.
    pub id: String,
    pub customer_label: String,
    pub items_summary: String,
    pub status: OrderStatus,
    pub total: f64,
    /// Creation time (unix millis)
    pub created_at_ms: i64,
}

/// Derived relative-age label ("Just now", "12m ago").
/// Kept apart from `LiveOrder` so refreshing it never touches order data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayAge(String);

impl DisplayAge {
    pub const JUST_NOW: &'static str = "Just now";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn just_now() -> Self {
        Self(Self::JUST_NOW.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the feed: the order plus its presentation-only age.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedEntry {
    pub order: LiveOrder,
    pub(crate) age: DisplayAge,
}

impl FeedEntry {
    pub fn new(order: LiveOrder, age: DisplayAge) -> Self {
        Self { order, age }
    }

    /// Entry whose age label is derived from `now_ms`.
    pub fn aged(order: LiveOrder, now_ms: i64) -> Self {
        let age = DisplayAge::new(crate::age::age_label(order.created_at_ms, now_ms));
        Self { order, age }
    }

    pub fn id(&self) -> &str {
        &self.order.id
    }

    pub fn age(&self) -> &DisplayAge {
        &self.age
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_producer() {
        assert_eq!(OrderStatus::from_producer("Ready"), OrderStatus::Ready);
        assert_eq!(OrderStatus::from_producer(" preparing "), OrderStatus::Preparing);
        assert_eq!(OrderStatus::from_producer("pending"), OrderStatus::Pending);
        assert_eq!(OrderStatus::from_producer(""), OrderStatus::Pending);
        assert_eq!(OrderStatus::from_producer("whatever"), OrderStatus::Pending);
    }

    #[test]
    fn test_aged_entry_uses_created_at() {
        let order = LiveOrder {
            id: "#1001".into(),
            customer_label: "Ana".into(),
            items_summary: "1x Soup".into(),
            status: OrderStatus::Pending,
            total: 9.5,
            created_at_ms: 0,
        };
        let entry = FeedEntry::aged(order, 12 * 60_000);
        assert_eq!(entry.age().as_str(), "12m ago");
    }
}
