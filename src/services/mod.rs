//! Background services for OrderDeck.
//!
//! Services watch or produce order data and broadcast events to the
//! mounted panels. Each service owns a single background thread.
//!
//! - `slot_sync` - Filesystem watch on the shared kitchen slot
//! - `demo_producer` - Simulated order entry and kitchen display

pub mod demo_producer;
pub mod slot_sync;

use crate::config::DeckConfig;
use deck_store::{KitchenSlot, SlotStore};
use log::info;
use std::sync::Arc;

/// Start all shared background services.
/// Call this once from main before mounting any panels.
pub fn start_all(config: &DeckConfig, store: Arc<dyn SlotStore>) -> ServiceStatus {
    info!("Starting shared services...");

    if config.demo_producer {
        demo_producer::start(KitchenSlot::new(store, config.slot_key.clone()));
    }

    ServiceStatus {
        demo_producer: config.demo_producer,
    }
}

/// Status of started services.
pub struct ServiceStatus {
    pub demo_producer: bool,
}
