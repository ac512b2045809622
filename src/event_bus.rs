//! Event bus for cross-thread communication.
//!
//! Design principles:
//! - Broadcast channel (tokio) - every mounted panel receives every event
//! - Single polling timer per panel
//! - Batch processing (drain all events per tick)
//! - Type-safe event enums
//!
//! This module provides shared utilities. Each panel defines its own
//! event types in its events.rs module.

/// Broadcast channel capacity.
/// 64 covers a rush of orders between two polls.
/// Lagging receivers skip old events; the next slot re-read catches up.
pub const CHANNEL_CAPACITY: usize = 64;
