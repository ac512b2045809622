//! Read-only presentation of the feed.

use crate::functions::formatting::{format_total, truncate_summary};
use deck_feed::{FeedEntry, OrderStatus};

const ITEMS_WIDTH: usize = 40;

/// One rendered row. Built from the feed, never written back.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedRow {
    pub id: String,
    pub customer: String,
    pub items: String,
    pub status: OrderStatus,
    pub total: String,
    pub age: String,
}

impl From<&FeedEntry> for FeedRow {
    fn from(entry: &FeedEntry) -> Self {
        let order = &entry.order;
        Self {
            id: order.id.clone(),
            customer: order.customer_label.clone(),
            items: order.items_summary.clone(),
            status: order.status,
            total: format_total(order.total),
            age: entry.age().to_string(),
        }
    }
}

pub fn rows(entries: &[FeedEntry]) -> Vec<FeedRow> {
    entries.iter().map(FeedRow::from).collect()
}

/// Fixed-width text lines for the log/terminal view.
pub fn render_lines(rows: &[FeedRow]) -> Vec<String> {
    if rows.is_empty() {
        return vec!["(no recent orders)".to_string()];
    }

    rows.iter()
        .map(|row| {
            format!(
                "{:<7} {:<14} {:<40} {:<9} {:>9} {}",
                row.id,
                truncate_summary(&row.customer, 14),
                truncate_summary(&row.items, ITEMS_WIDTH),
                row.status.label(),
                row.total,
                row.age
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_feed::{DisplayAge, LiveOrder};

    fn entry() -> FeedEntry {
        FeedEntry::new(
            LiveOrder {
                id: "#1042".into(),
                customer_label: "Dana".into(),
                items_summary: "2x Burger".into(),
                status: OrderStatus::Ready,
                total: 24.5,
                created_at_ms: 0,
            },
            DisplayAge::new("3m ago"),
        )
    }

    #[test]
    fn test_row_from_entry() {
        let row = FeedRow::from(&entry());
        assert_eq!(row.id, "#1042");
        assert_eq!(row.total, "$24.50");
        assert_eq!(row.age, "3m ago");
        assert_eq!(row.status, OrderStatus::Ready);
    }

    #[test]
    fn test_render_lines() {
        let lines = render_lines(&rows(&[entry()]));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("#1042"));
        assert!(lines[0].contains("Ready"));
        assert!(lines[0].ends_with("3m ago"));

        assert_eq!(render_lines(&[]), vec!["(no recent orders)".to_string()]);
    }
}
