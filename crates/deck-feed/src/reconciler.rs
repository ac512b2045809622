//! Feed store: the only owner of the live order list.
//!
//! Holds at most `FEED_CAPACITY` entries, unique by id, newest first.
//! Seed entries only ever pad the tail behind real entries.

use crate::age::age_label;
use crate::types::{DisplayAge, FEED_CAPACITY, FeedEntry, OrderStatus};
use log::debug;

#[derive(Clone, Debug, Default)]
pub struct FeedStore {
    entries: Vec<FeedEntry>,
    /// Fallback rows used to pad a short real list on merge.
    seed: Vec<FeedEntry>,
}

impl FeedStore {
    /// Create an empty feed that pads with `seed` on every merge.
    pub fn new(seed: Vec<FeedEntry>) -> Self {
        Self {
            entries: Vec::with_capacity(FEED_CAPACITY),
            seed,
        }
    }

    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(FeedEntry::id).collect()
    }

    pub fn get(&self, id: &str) -> Option<&FeedEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id() == id)
    }

    /// Insert or update by id.
    ///
    /// An existing entry is replaced where it stands. A new entry goes to
    /// the front and the tail is evicted past capacity.
    /// Returns true if the feed changed.
    pub fn upsert(&mut self, entry: FeedEntry) -> bool {
        match self.position(entry.id()) {
            Some(idx) => {
                if self.entries[idx] == entry {
                    return false;
                }
                debug!("Feed update in place: {} at {}", entry.id(), idx);
                self.entries[idx] = entry;
            }
            None => {
                debug!("Feed insert: {}", entry.id());
                self.entries.insert(0, entry);
                self.entries.truncate(FEED_CAPACITY);
            }
        }
        true
    }

    /// Flip an existing entry to `Ready`, leaving every other field alone.
    /// Returns false if no entry has this id or it is already ready.
    pub fn mark_ready(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(idx) if self.entries[idx].order.status.is_ready() => false,
            Some(idx) => {
                debug!("Feed mark ready: {}", id);
                self.entries[idx].order.status = OrderStatus::Ready;
                true
            }
            None => false,
        }
    }

    /// Replace the feed with a freshly read real list, then pad from seed.
    ///
    /// Real entries keep their order. Entries that are only in memory are
    /// dropped: the persisted list is the last write and wins.
    /// Returns true if the feed changed.
    pub fn merge(&mut self, real: Vec<FeedEntry>) -> bool {
        let before = self.entries.clone();

        self.entries.clear();
        for entry in real {
            if self.entries.len() == FEED_CAPACITY {
                break;
            }
            if !self.contains(entry.id()) {
                self.entries.push(entry);
            }
        }

        let seed = std::mem::take(&mut self.seed);
        self.pad_from(&seed);
        self.seed = seed;

        self.entries != before
    }

    /// Pad the tail with seed rows whose ids are not already present.
    /// Never removes or reorders. Returns true if anything was appended.
    pub fn backfill(&mut self, seed: &[FeedEntry]) -> bool {
        self.pad_from(seed) > 0
    }

    fn pad_from(&mut self, seed: &[FeedEntry]) -> usize {
        let mut added = 0;
        for entry in seed {
            if self.entries.len() >= FEED_CAPACITY {
                break;
            }
            if !self.contains(entry.id()) {
                self.entries.push(entry.clone());
                added += 1;
            }
        }
        added
    }

    /// Recompute every age label. Touches nothing but the labels.
    /// Returns true if any label changed.
    pub fn refresh_ages(&mut self, now_ms: i64) -> bool {
        let mut changed = false;
        for entry in &mut self.entries {
            let label = age_label(entry.order.created_at_ms, now_ms);
            if entry.age.as_str() != label {
                entry.age = DisplayAge::new(label);
                changed = true;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LiveOrder;

    const NOW: i64 = 1_700_000_000_000;

    fn order(id: &str) -> LiveOrder {
        LiveOrder {
            id: id.to_string(),
            customer_label: "Guest".into(),
            items_summary: "1x Soup".into(),
            status: OrderStatus::Preparing,
            total: 10.0,
            created_at_ms: NOW,
        }
    }

    fn entry(id: &str) -> FeedEntry {
        FeedEntry::new(order(id), DisplayAge::just_now())
    }

    fn entries(ids: &[&str]) -> Vec<FeedEntry> {
        ids.iter().map(|id| entry(id)).collect()
    }

    #[test]
    fn test_upsert_new_goes_to_front() {
        let mut feed = FeedStore::default();
        feed.upsert(entry("#1"));
        feed.upsert(entry("#2"));
        feed.upsert(entry("#3"));
        assert_eq!(feed.ids(), vec!["#3", "#2", "#1"]);
    }

    #[test]
    fn test_upsert_existing_keeps_position() {
        let mut feed = FeedStore::default();
        for id in ["#1", "#2", "#3"] {
            feed.upsert(entry(id));
        }

        let mut updated = order("#2");
        updated.total = 99.0;
        updated.status = OrderStatus::Ready;
        assert!(feed.upsert(FeedEntry::new(updated, DisplayAge::just_now())));

        assert_eq!(feed.ids(), vec!["#3", "#2", "#1"]);
        let row = feed.get("#2").unwrap();
        assert_eq!(row.order.total, 99.0);
        assert_eq!(row.order.status, OrderStatus::Ready);
    }

    #[test]
    fn test_upsert_identical_reports_no_change() {
        let mut feed = FeedStore::default();
        assert!(feed.upsert(entry("#1")));
        assert!(!feed.upsert(entry("#1")));
        assert_eq!(feed.len(), 1);
    }

    #[test]
    fn test_upsert_bounded_and_unique() {
        let mut feed = FeedStore::default();
        // Pseudo-random id sequence with many repeats.
        let mut x: u32 = 7;
        for _ in 0..200 {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let id = format!("#{}", x % 9);
            feed.upsert(entry(&id));

            assert!(feed.len() <= FEED_CAPACITY);
            let mut ids = feed.ids();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), feed.len());
        }
    }

    #[test]
    fn test_upsert_evicts_oldest_by_position() {
        let mut feed = FeedStore::default();
        for i in 1..=6 {
            feed.upsert(entry(&format!("#{}", i)));
        }
        assert_eq!(feed.ids(), vec!["#6", "#5", "#4", "#3", "#2"]);
    }

    #[test]
    fn test_mark_ready_only_touches_status() {
        let mut feed = FeedStore::default();
        feed.upsert(entry("#1"));
        feed.upsert(entry("#2"));

        let before = feed.get("#1").unwrap().clone();
        assert!(feed.mark_ready("#1"));
        let after = feed.get("#1").unwrap();

        assert_eq!(after.order.status, OrderStatus::Ready);
        assert_eq!(after.order.total, before.order.total);
        assert_eq!(after.order.items_summary, before.order.items_summary);
        assert_eq!(after.age(), before.age());
        assert_eq!(feed.ids(), vec!["#2", "#1"]);

        assert!(!feed.mark_ready("#404"));
    }

    #[test]
    fn test_mark_ready_twice_reports_no_change() {
        let mut feed = FeedStore::default();
        feed.upsert(entry("#1"));

        assert!(feed.mark_ready("#1"));
        let once = feed.clone();
        assert!(!feed.mark_ready("#1"));
        assert_eq!(feed.entries(), once.entries());
    }

    #[test]
    fn test_merge_empty_then_backfill_yields_seed_in_order() {
        let seed = entries(&["#s1", "#s2", "#s3"]);
        let mut feed = FeedStore::new(seed.clone());

        feed.merge(Vec::new());
        feed.backfill(&seed);

        assert_eq!(feed.ids(), vec!["#s1", "#s2", "#s3"]);
    }

    #[test]
    fn test_backfill_on_empty_feed() {
        let seed = entries(&["#s1", "#s2", "#s3"]);
        let mut feed = FeedStore::default();
        assert!(feed.backfill(&seed));
        assert!(!feed.backfill(&seed));
        assert_eq!(feed.ids(), vec!["#s1", "#s2", "#s3"]);
    }

    #[test]
    fn test_merge_pads_with_non_colliding_seed() {
        let seed = entries(&["#s1", "#r2", "#s3", "#s4", "#s5"]);
        let mut feed = FeedStore::new(seed);

        feed.merge(entries(&["#r1", "#r2"]));

        assert_eq!(feed.ids(), vec!["#r1", "#r2", "#s1", "#s3", "#s4"]);
    }

    #[test]
    fn test_merge_truncates_real_list() {
        let mut feed = FeedStore::new(entries(&["#s1"]));
        feed.merge(entries(&["#1", "#2", "#3", "#4", "#5", "#6"]));
        assert_eq!(feed.ids(), vec!["#1", "#2", "#3", "#4", "#5"]);
    }

    #[test]
    fn test_merge_drops_duplicate_ids_in_real_list() {
        let mut feed = FeedStore::default();
        feed.merge(entries(&["#1", "#1", "#2"]));
        assert_eq!(feed.ids(), vec!["#1", "#2"]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut feed = FeedStore::new(entries(&["#s1", "#s2"]));
        assert!(feed.merge(entries(&["#1"])));
        assert!(!feed.merge(entries(&["#1"])));
        assert_eq!(feed.ids(), vec!["#1", "#s1", "#s2"]);
    }

    #[test]
    fn test_refresh_ages_never_reorders() {
        let mut feed = FeedStore::default();
        let mut old = order("#old");
        old.created_at_ms = NOW - 2 * 3_600_000;
        feed.upsert(FeedEntry::new(old, DisplayAge::just_now()));
        feed.upsert(entry("#new"));

        let ids_before: Vec<String> = feed.ids().into_iter().map(String::from).collect();
        assert!(feed.refresh_ages(NOW + 5 * 60_000));

        assert_eq!(feed.ids(), ids_before);
        assert_eq!(feed.get("#new").unwrap().age().as_str(), "5m ago");
        assert_eq!(feed.get("#old").unwrap().age().as_str(), "2h ago");
        assert!(!feed.refresh_ages(NOW + 5 * 60_000));
    }
}
