//! Event publish status.

use serde::{Deserialize, Serialize};

/// Publish status of an event.
///
/// Only `PUBLISHED` events are bookable; the seat-hold subsystem treats
/// every other status as non-bookable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "event_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum EventStatus {
    /// Not yet visible to buyers.
    Draft,
    /// On sale.
    Published,
    /// Cancelled by the organizer.
    Cancelled,
}

impl EventStatus {
    /// Return the status as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
