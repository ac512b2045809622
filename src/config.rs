//! Dashboard configuration.
//!
//! Loaded from ~/.config/order-deck/config.json. Every field has a
//! default, so a missing or partial file is fine.

use deck_store::{KITCHEN_ORDERS_KEY, default_store_dir};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_DIR: &str = "order-deck";
const CONFIG_FILE: &str = "config.json";

/// Seconds between age label refreshes.
pub const REFRESH_INTERVAL_SECS: u64 = 30;
/// Milliseconds between event bus polls.
pub const EVENT_POLL_INTERVAL_MS: u64 = 50;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Directory holding the shared slot files.
    pub store_dir: PathBuf,
    /// Slot the order producers write.
    pub slot_key: String,
    pub refresh_interval_secs: u64,
    pub poll_interval_ms: u64,
    /// Run the built-in order-entry/kitchen simulator.
    pub demo_producer: bool,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            slot_key: KITCHEN_ORDERS_KEY.to_string(),
            refresh_interval_secs: REFRESH_INTERVAL_SECS,
            poll_interval_ms: EVENT_POLL_INTERVAL_MS,
            demo_producer: false,
        }
    }
}

impl DeckConfig {
    /// Load from the default location, then apply environment overrides.
    /// A first run writes the defaults out so there is a file to edit.
    pub fn load_default() -> Self {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::load(&path),
            Some(path) => {
                let config = Self::default();
                if let Err(e) = config.save(&path) {
                    warn!("Failed to write default config {}: {}", path.display(), e);
                }
                config
            }
            None => Self::default(),
        };
        config.apply_env();
        config
    }

    /// Load from a config file, or return defaults if not found or invalid.
    pub fn load(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => {
                info!("No config at {}, using defaults", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("Invalid config {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save to a config file
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }

    fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var("ORDER_DECK_STORE_DIR") {
            if !dir.is_empty() {
                self.store_dir = PathBuf::from(dir);
            }
        }
        if let Ok(demo) = std::env::var("ORDER_DECK_DEMO") {
            self.demo_producer = matches!(demo.as_str(), "1" | "true" | "yes");
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

/// ~/.config/order-deck/config.json
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DeckConfig::load(&dir.path().join("nope.json"));
        assert_eq!(config, DeckConfig::default());
        assert_eq!(config.slot_key, "kitchenOrders");
        assert_eq!(config.refresh_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "slot_key": "orders", "demo_producer": true }"#).unwrap();

        let config = DeckConfig::load(&path);
        assert_eq!(config.slot_key, "orders");
        assert!(config.demo_producer);
        assert_eq!(config.poll_interval_ms, EVENT_POLL_INTERVAL_MS);
    }

    #[test]
    fn test_load_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(DeckConfig::load(&path), DeckConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.json");
        let config = DeckConfig {
            store_dir: dir.path().join("slots"),
            refresh_interval_secs: 10,
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(DeckConfig::load(&path), config);
    }

    #[test]
    fn test_zero_intervals_are_clamped() {
        let config = DeckConfig {
            refresh_interval_secs: 0,
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.refresh_interval(), Duration::from_secs(1));
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
    }
}
