//! Demo order producer.
//!
//! Plays the order-entry and kitchen-display surfaces so the dashboard has
//! something to show: writes orders into the shared slot and announces
//! them on the feed bus, then marks them ready a little later.

use crate::panels::live_feed::events;
use deck_feed::{RawDeal, RawItem, RawKitchenOrder, now_ms};
use deck_store::KitchenSlot;
use log::{error, info, warn};
use rand::Rng;
use std::collections::VecDeque;
use std::thread;

const ORDER_INTERVAL_SECS: u64 = 4;
/// Orders waiting in the kitchen before the oldest is marked ready.
const KITCHEN_BACKLOG: usize = 2;

const MENU: [(&str, f64); 8] = [
    ("Margherita Pizza", 12.0),
    ("Caesar Salad", 8.5),
    ("Chicken Tacos", 7.25),
    ("Ribeye Steak", 29.0),
    ("Mushroom Risotto", 15.0),
    ("Lemonade", 3.5),
    ("Espresso", 2.75),
    ("Tiramisu", 6.5),
];
const DEALS: [(&str, f64); 2] = [("Lunch Combo", 11.0), ("Family Feast", 45.0)];
const CUSTOMERS: [&str; 5] = ["Ava", "Noah", "Liam", "Mia", "Table 4"];
const WAITERS: [&str; 3] = ["Sam", "Priya", "Jordan"];

/// Start the producer thread.
pub fn start(slot: KitchenSlot) {
    info!("Starting demo order producer on slot {}...", slot.key());

    let spawned = thread::Builder::new()
        .name("demo-producer".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Failed to create tokio runtime for demo producer: {}", e);
                    return;
                }
            };
            rt.block_on(produce_loop(slot));
        });

    if let Err(e) = spawned {
        error!("Failed to spawn demo producer thread: {}", e);
    }
}

async fn produce_loop(slot: KitchenSlot) {
    use tokio::time::{Duration, sleep};

    let mut next_number: u32 = 2000;
    let mut in_kitchen: VecDeque<String> = VecDeque::new();

    loop {
        sleep(Duration::from_secs(ORDER_INTERVAL_SECS)).await;

        let order = random_order(next_number);
        next_number += 1;
        let number = order.order_number.clone().unwrap_or_default();

        if let Err(e) = slot.append_order(order.clone()) {
            warn!("Demo producer failed to write order {}: {}", number, e);
        }
        events::send_order_created(order);
        in_kitchen.push_back(number);

        if in_kitchen.len() > KITCHEN_BACKLOG {
            if let Some(done) = in_kitchen.pop_front() {
                match slot.mark_ready(&done) {
                    Ok(true) => {}
                    Ok(false) => warn!("Order {} vanished from the slot", done),
                    Err(e) => warn!("Demo producer failed to mark {} ready: {}", done, e),
                }
                events::send_order_ready(RawKitchenOrder::with_order_number(done));
            }
        }
    }
}

fn random_order(number: u32) -> RawKitchenOrder {
    let mut rng = rand::rng();

    let mut total = 0.0;
    let items: Vec<RawItem> = (0..rng.random_range(1..=3))
        .map(|_| {
            let (name, price) = MENU[rng.random_range(0..MENU.len())];
            let quantity = rng.random_range(1..=3);
            total += price * quantity as f64;
            RawItem {
                name: Some(name.to_string()),
                quantity: Some(quantity),
            }
        })
        .collect();

    let deals = if rng.random_bool(0.25) {
        let (name, price) = DEALS[rng.random_range(0..DEALS.len())];
        total += price;
        vec![RawDeal {
            name: Some(name.to_string()),
        }]
    } else {
        Vec::new()
    };

    // Walk-ins have no customer name; the feed shows the waiter instead.
    let customer_name = rng
        .random_bool(0.7)
        .then(|| CUSTOMERS[rng.random_range(0..CUSTOMERS.len())].to_string());

    RawKitchenOrder {
        order_number: Some(format!("#{}", number)),
        customer_name,
        waiter_name: Some(WAITERS[rng.random_range(0..WAITERS.len())].to_string()),
        items,
        deals,
        status: Some("pending".to_string()),
        grand_total: Some((total * 100.0f64).round() / 100.0),
        timestamp: Some(now_ms()),
        ..Default::default()
    }
}
