//! Seat-hold and reconciler configuration.

use serde::{Deserialize, Serialize};

/// Seat-hold protocol settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// How long a hold keeps seats reserved, in minutes.
    #[serde(default = "default_hold_duration")]
    pub hold_duration_minutes: u64,
    /// Maximum number of seats a single hold may cover.
    #[serde(default = "default_max_seats")]
    pub max_seats_per_hold: usize,
    /// Safety-net reconciler settings.
    #[serde(default)]
    pub reconciler: ReconcilerConfig,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            hold_duration_minutes: default_hold_duration(),
            max_seats_per_hold: default_max_seats(),
            reconciler: ReconcilerConfig::default(),
        }
    }
}

impl BookingConfig {
    /// Hold duration as a `std::time::Duration`.
    pub fn hold_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.hold_duration_minutes * 60)
    }
}

/// Safety-net reconciler settings.
///
/// The reconciler is the documented recovery path when TTL expiry
/// notifications are lost, so it defaults to enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    /// Whether the periodic reconciler runs.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Delay between reconciliation ticks, in seconds.
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: default_interval(),
        }
    }
}

fn default_hold_duration() -> u64 {
    10
}

fn default_max_seats() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_interval() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconciler_is_on_by_default() {
        let config = BookingConfig::default();
        assert!(config.reconciler.enabled);
        assert_eq!(config.reconciler.interval_seconds, 60);
    }

    #[test]
    fn hold_duration_converts_to_seconds() {
        let config = BookingConfig::default();
        assert_eq!(config.hold_duration().as_secs(), 600);
    }
}
