//! The live order feed widget.
//!
//! Owns the feed store and wires its three triggers into it: order-created
//! and order-ready events from the bus, and re-reads of the persisted
//! kitchen slot when another window rewrites it. A separate ticker
//! refreshes age labels only.

use super::events::{self, FeedEvent};
use super::view::{self, FeedRow};
use crate::config::DeckConfig;
use crate::services::slot_sync;
use deck_feed::{
    DisplayAge, FEED_CAPACITY, FeedEntry, FeedStore, Observation, RawKitchenOrder, normalize,
    now_ms,
};
use deck_store::{SlotStore, SlotWatcher, read_kitchen_orders};
use log::{debug, info};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::{Receiver, Sender};
use tokio::time::{MissedTickBehavior, interval};

pub struct LiveFeedPanel {
    feed: FeedStore,
    seed: Vec<FeedEntry>,
    store: Arc<dyn SlotStore>,
    slot_key: String,
    events: Receiver<FeedEvent>,
    watcher: Option<SlotWatcher>,
    poll_interval: Duration,
    refresh_interval: Duration,
}

impl LiveFeedPanel {
    /// Mount the panel: seed the feed from the persisted slot, subscribe to
    /// `bus`, and start watching the slot for writes from other windows.
    pub fn mount(
        config: &DeckConfig,
        store: Arc<dyn SlotStore>,
        seed: Vec<FeedEntry>,
        bus: &Sender<FeedEvent>,
    ) -> Self {
        let events = bus.subscribe();
        let watcher = slot_sync::start_watcher(store.as_ref(), &config.slot_key, bus.clone());

        let mut panel = Self {
            feed: FeedStore::new(seed.clone()),
            seed,
            store,
            slot_key: config.slot_key.clone(),
            events,
            watcher,
            poll_interval: config.poll_interval(),
            refresh_interval: config.refresh_interval(),
        };

        panel.reload(now_ms());
        info!(
            "Live feed mounted with {} orders (slot {}, sync {})",
            panel.feed.len(),
            panel.slot_key,
            if panel.watcher.is_some() { "on" } else { "off" }
        );
        panel
    }

    pub fn feed(&self) -> &FeedStore {
        &self.feed
    }

    pub fn view(&self) -> Vec<FeedRow> {
        view::rows(self.feed.entries())
    }

    /// Re-read the persisted slot and merge it into the feed.
    /// An empty slot on an empty feed only backfills seed rows.
    ///
    /// A record without a timestamp keeps the creation time it got on the
    /// first read, so repeated reads of an unchanged slot change nothing.
    pub fn reload(&mut self, now_ms: i64) -> bool {
        let real: Vec<FeedEntry> = read_kitchen_orders(self.store.as_ref(), &self.slot_key)
            .iter()
            .take(FEED_CAPACITY)
            .map(|raw| {
                let mut order = normalize(raw, Observation::Persisted, now_ms);
                if raw.timestamp.is_none() {
                    if let Some(known) = self.feed.get(&order.id) {
                        order.created_at_ms = known.order.created_at_ms;
                    }
                }
                FeedEntry::aged(order, now_ms)
            })
            .collect();

        debug!("Slot {} read: {} orders", self.slot_key, real.len());

        if real.is_empty() && self.feed.is_empty() {
            self.feed.backfill(&self.seed)
        } else {
            self.feed.merge(real)
        }
    }

    /// Apply one bus event. Returns true if the feed changed.
    pub fn handle_event(&mut self, event: FeedEvent, now_ms: i64) -> bool {
        match event {
            FeedEvent::OrderCreated(raw) => self.on_order_created(&raw, now_ms),
            FeedEvent::OrderReady(raw) => self.on_order_ready(&raw, now_ms),
            FeedEvent::SlotChanged => self.reload(now_ms),
        }
    }

    fn on_order_created(&mut self, raw: &RawKitchenOrder, now_ms: i64) -> bool {
        let order = normalize(raw, Observation::Created, now_ms);
        debug!("Order created: {}", order.id);
        self.feed.upsert(FeedEntry::new(order, DisplayAge::just_now()))
    }

    fn on_order_ready(&mut self, raw: &RawKitchenOrder, now_ms: i64) -> bool {
        if let Some(id) = raw.order_number.as_deref() {
            if self.feed.contains(id) {
                debug!("Order ready: {}", id);
                return self.feed.mark_ready(id);
            }
        }

        // Unknown order: show it rather than drop the notification.
        let order = normalize(raw, Observation::Ready, now_ms);
        debug!("Order ready for unseen order: {}", order.id);
        self.feed.upsert(FeedEntry::aged(order, now_ms))
    }

    /// Drain the bus and apply everything pending.
    pub fn poll(&mut self, now_ms: i64) -> bool {
        let mut changed = false;
        for event in events::drain_all(&mut self.events) {
            changed |= self.handle_event(event, now_ms);
        }
        changed
    }

    /// Refresh ticker body: recompute age labels, nothing else.
    pub fn tick(&mut self, now_ms: i64) -> bool {
        self.feed.refresh_ages(now_ms)
    }

    /// Run the panel until `shutdown` resolves.
    ///
    /// Polls the bus every `poll_interval` and refreshes ages every
    /// `refresh_interval`, calling `on_change` with the new rows whenever
    /// the feed changed. Both timers stop when this returns.
    pub async fn run<S, F>(&mut self, shutdown: S, mut on_change: F)
    where
        S: Future<Output = ()>,
        F: FnMut(&[FeedRow]),
    {
        let mut poll = interval(self.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut refresh = interval(self.refresh_interval);
        refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a tokio interval fires immediately.
        refresh.tick().await;

        tokio::pin!(shutdown);

        loop {
            let changed = tokio::select! {
                _ = &mut shutdown => break,
                _ = poll.tick() => self.poll(now_ms()),
                _ = refresh.tick() => self.tick(now_ms()),
            };

            if changed {
                on_change(&self.view());
            }
        }

        debug!("Live feed loop stopped");
    }

    /// Tear down: unsubscribe from the bus and stop the slot watcher.
    pub fn unmount(self) {
        let Self {
            events, watcher, ..
        } = self;
        drop(events);
        drop(watcher);
        info!("Live feed unmounted");
    }
}
