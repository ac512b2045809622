//! OrderDeck - Restaurant operations dashboard
//!
//! Hosts the live order feed: a bounded "recent orders" list kept in sync
//! with order-entry and kitchen-display events, including those written by
//! other dashboard windows through the shared kitchen slot.

mod config;
mod event_bus;
mod functions;
mod panels;
mod services;

use config::DeckConfig;
use deck_feed::{now_ms, seed_entries};
use deck_store::{FileSlotStore, SlotStore};
use log::{error, info};
use panels::live_feed::view::{FeedRow, render_lines};
use panels::live_feed::{LiveFeedPanel, events};
use std::error::Error;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting OrderDeck...");

    let config = DeckConfig::load_default();
    info!("Kitchen slot: {}", config.store_dir.display());

    let store: Arc<dyn SlotStore> = Arc::new(FileSlotStore::new(&config.store_dir));

    // Start shared background services ONCE
    let status = services::start_all(&config, store.clone());
    if status.demo_producer {
        info!("Demo producer running");
    }

    // Single-threaded loop, like a UI thread: every handler runs to completion.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        let mut panel =
            LiveFeedPanel::mount(&config, store, seed_entries(now_ms()), events::sender());
        draw(&panel.view());

        panel.run(shutdown_signal(), draw).await;

        info!("Feed held {} orders at shutdown", panel.feed().len());
        panel.unmount();
    });

    info!("OrderDeck stopped.");
    Ok(())
}

fn draw(rows: &[FeedRow]) {
    let now = chrono::Local::now();
    info!("Recent orders ({}):", now.format("%H:%M:%S"));
    for line in render_lines(rows) {
        info!("  {}", line);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down...");
}
