//! Lock/overlay store (Redis) configuration.

use serde::{Deserialize, Serialize};

/// Redis settings for the per-seat lock store and the seat-status overlay.
///
/// Lock keys and overlay hashes must live in the same logical database;
/// the database index is part of `url` and shared by every component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Redis connection URL (including the logical database index).
    #[serde(default = "default_url")]
    pub url: String,
    /// Overlay hash TTL in seconds, refreshed on every write.
    #[serde(default = "default_overlay_ttl")]
    pub overlay_ttl_seconds: u64,
    /// Keyspace notification pattern for expired keys.
    #[serde(default = "default_keyevent_pattern")]
    pub keyevent_pattern: String,
    /// Delay before re-subscribing after a dropped notification connection,
    /// in seconds.
    #[serde(default = "default_resubscribe_delay")]
    pub resubscribe_delay_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            overlay_ttl_seconds: default_overlay_ttl(),
            keyevent_pattern: default_keyevent_pattern(),
            resubscribe_delay_seconds: default_resubscribe_delay(),
        }
    }
}

fn default_url() -> String {
    "redis://localhost:6379/0".to_string()
}

fn default_overlay_ttl() -> u64 {
    600
}

fn default_keyevent_pattern() -> String {
    "__keyevent@0__:expired".to_string()
}

fn default_resubscribe_delay() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_wire_contract() {
        let config = CacheConfig::default();
        assert_eq!(config.overlay_ttl_seconds, 600);
        assert_eq!(config.keyevent_pattern, "__keyevent@0__:expired");
    }
}
