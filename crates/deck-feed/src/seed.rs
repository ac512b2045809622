//! Built-in rows shown when the persisted slot has nothing to offer.

use crate::types::{FEED_CAPACITY, FeedEntry, LiveOrder, OrderStatus};

const MINUTE_MS: i64 = 60_000;

/// (id, customer, items, status, total, minutes old)
const SEED_ROWS: [(&str, &str, &str, OrderStatus, f64, i64); FEED_CAPACITY] = [
    ("#1024", "Maria Lopez", "2x Margherita Pizza, 1x Caesar Salad", OrderStatus::Preparing, 38.5, 2),
    ("#1023", "Table 7", "1x Ribeye Steak, Deal: Wine Pairing", OrderStatus::Pending, 64.0, 5),
    ("#1022", "James Chen", "3x Chicken Tacos", OrderStatus::Ready, 21.75, 12),
    ("#1021", "Guest", "1x Mushroom Risotto, 2x Lemonade", OrderStatus::Ready, 27.0, 25),
    ("#1020", "Sofia Rossi", "Deal: Family Feast", OrderStatus::Ready, 89.99, 48),
];

/// Seed rows, newest first, with ages relative to `now_ms`.
pub fn seed_entries(now_ms: i64) -> Vec<FeedEntry> {
    SEED_ROWS
        .iter()
        .map(|(id, customer, items, status, total, minutes)| {
            let order = LiveOrder {
                id: id.to_string(),
                customer_label: customer.to_string(),
                items_summary: items.to_string(),
                status: *status,
                total: *total,
                created_at_ms: now_ms - minutes * MINUTE_MS,
            };
            FeedEntry::aged(order, now_ms)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_fits_feed_and_has_unique_ids() {
        let seed = seed_entries(1_700_000_000_000);
        assert_eq!(seed.len(), FEED_CAPACITY);

        let mut ids: Vec<&str> = seed.iter().map(FeedEntry::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), FEED_CAPACITY);
    }

    #[test]
    fn test_seed_ages_are_relative() {
        let seed = seed_entries(1_700_000_000_000);
        assert_eq!(seed[0].age().as_str(), "2m ago");
        assert_eq!(seed[4].age().as_str(), "48m ago");
    }
}
