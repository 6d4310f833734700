//! Read-path DTOs.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use boxoffice_entity::event::Event;

/// Event summary without seat detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    /// Event id.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Venue name.
    pub venue: String,
    /// Total seat capacity.
    pub total_capacity: i32,
    /// Publish status.
    pub status: String,
    /// Seats currently available (record-store view).
    pub available_seats: i64,
}

impl EventSummary {
    /// Build a summary from an event row and an availability count.
    pub fn from_event(event: &Event, available_seats: i64) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            venue: event.venue.clone(),
            total_capacity: event.total_capacity,
            status: event.status.to_string(),
            available_seats,
        }
    }
}

/// One seat in the merged view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    /// Seat id.
    pub seat_id: i64,
    /// Section name.
    pub section: String,
    /// Row letter.
    pub row_letter: String,
    /// Seat number within the row.
    pub seat_number: i32,
    /// Human-readable label, e.g. `VIP-A12`.
    pub label: String,
    /// Seat price.
    pub price: Decimal,
    /// Status after overlay merge.
    pub status: String,
}

/// Event with its overlay-merged seat map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSeatsView {
    /// The event summary.
    #[serde(flatten)]
    pub event: EventSummary,
    /// Seats with overlay-merged statuses.
    pub seats: Vec<SeatView>,
    /// Seat count per merged status.
    pub status_counts: HashMap<String, usize>,
    /// Whether the overlay was unreachable and the view is DB-only.
    pub overlay_degraded: bool,
}
