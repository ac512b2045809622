//! deck-feed - Live order feed core
//!
//! Features:
//! - Tolerant decoding of producer order records
//! - Single normalization boundary into `LiveOrder`
//! - Bounded, deduplicated, most-recent-first feed store
//! - Presentation-only relative age labels

pub mod age;
pub mod normalizer;
pub mod raw;
pub mod reconciler;
pub mod seed;
pub mod types;

pub use age::{age_label, now_ms};
pub use normalizer::{Observation, normalize};
pub use raw::{RawDeal, RawItem, RawKitchenOrder};
pub use reconciler::FeedStore;
pub use seed::seed_entries;
pub use types::{DisplayAge, FEED_CAPACITY, FeedEntry, LiveOrder, OrderStatus};
