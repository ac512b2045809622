//! Live feed event definitions and broadcast event bus.
//!
//! Uses tokio::sync::broadcast so every mounted feed panel receives every
//! event. Producers (order entry, kitchen display, slot watcher) only ever
//! send; the panel is the only consumer.

use crate::event_bus::CHANNEL_CAPACITY;
use deck_feed::RawKitchenOrder;
use log::warn;
use std::sync::OnceLock;
use tokio::sync::broadcast::{self, Receiver, Sender};

/// Everything that can change the live feed.
#[derive(Clone, Debug)]
pub enum FeedEvent {
    /// Order entry placed a new order.
    OrderCreated(Box<RawKitchenOrder>),
    /// Kitchen display marked an order ready. May carry only the number.
    OrderReady(Box<RawKitchenOrder>),
    /// The persisted kitchen slot was rewritten, possibly by another window.
    SlotChanged,
}

// Static broadcast sender - panels get their own receiver via subscribe()
static FEED_SENDER: OnceLock<Sender<FeedEvent>> = OnceLock::new();

/// The process-wide sender.
pub fn sender() -> &'static Sender<FeedEvent> {
    FEED_SENDER.get_or_init(|| {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        tx
    })
}

/// Send an event to all panels. Non-blocking.
/// If no panel is mounted, the event is dropped. There is no replay.
#[inline]
pub fn send(event: FeedEvent) {
    let _ = sender().send(event);
}

#[inline]
pub fn send_order_created(order: RawKitchenOrder) {
    send(FeedEvent::OrderCreated(Box::new(order)));
}

#[inline]
pub fn send_order_ready(order: RawKitchenOrder) {
    send(FeedEvent::OrderReady(Box::new(order)));
}

/// Drain all pending events in delivery order.
///
/// Order events are all kept, since each one can insert a row. Repeated
/// `SlotChanged` signals collapse into one, placed where the last of them
/// arrived: a single re-read after that point sees every write.
/// Handles RecvError::Lagged by continuing to drain.
pub fn drain_all(rx: &mut Receiver<FeedEvent>) -> Vec<FeedEvent> {
    let mut events = Vec::new();

    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(broadcast::error::TryRecvError::Empty) => break,
            Err(broadcast::error::TryRecvError::Lagged(n)) => {
                warn!("Feed receiver lagged, {} events lost", n);
                continue;
            }
            Err(broadcast::error::TryRecvError::Closed) => break,
        }
    }

    let last_slot_change = events
        .iter()
        .rposition(|e| matches!(e, FeedEvent::SlotChanged));

    match last_slot_change {
        Some(last) => events
            .into_iter()
            .enumerate()
            .filter(|(i, e)| *i == last || !matches!(e, FeedEvent::SlotChanged))
            .map(|(_, e)| e)
            .collect(),
        None => events,
    }
}
