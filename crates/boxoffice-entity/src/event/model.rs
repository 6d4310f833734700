//! Event entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::EventStatus;

/// A scheduled event whose seats can be held and booked.
///
/// The seat-hold subsystem treats events as immutable; catalog operations
/// (create, publish, reprice) belong to the organizer-facing service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    /// Unique event identifier.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Venue name.
    pub venue: String,
    /// Total seat capacity.
    pub total_capacity: i32,
    /// Publish status.
    pub status: EventStatus,
    /// When the event row was created.
    pub created_at: DateTime<Utc>,
    /// When the event row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Whether buyers may hold and book seats for this event.
    pub fn is_bookable(&self) -> bool {
        self.status == EventStatus::Published
    }
}
