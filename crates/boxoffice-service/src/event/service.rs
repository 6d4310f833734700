//! The read assembler.
//!
//! Merges record-store seat rows with the overlay to produce
//! near-real-time seat views. Read paths never mutate the record store,
//! and an unreachable overlay degrades gracefully to DB-only state.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use boxoffice_cache::overlay::SeatOverlayStore;
use boxoffice_core::error::AppError;
use boxoffice_core::result::AppResult;
use boxoffice_database::repositories::{EventRepository, SeatRepository};
use boxoffice_entity::seat::{Seat, SeatStatus};

use super::dto::{EventSeatsView, EventSummary, SeatView};

/// Assembles overlay-merged event views.
#[derive(Debug, Clone)]
pub struct EventReadService {
    event_repo: EventRepository,
    seat_repo: SeatRepository,
    overlay: Arc<dyn SeatOverlayStore>,
}

impl EventReadService {
    /// Create a new read assembler.
    pub fn new(
        event_repo: EventRepository,
        seat_repo: SeatRepository,
        overlay: Arc<dyn SeatOverlayStore>,
    ) -> Self {
        Self {
            event_repo,
            seat_repo,
            overlay,
        }
    }

    /// Fetch a published event's summary.
    pub async fn get_event(&self, event_id: i64) -> AppResult<EventSummary> {
        let event = self
            .event_repo
            .find_by_id(event_id)
            .await?
            .filter(|e| e.is_bookable())
            .ok_or_else(|| AppError::not_found(format!("Event not found: {event_id}")))?;

        let available = self.seat_repo.count_available_by_event(event_id).await?;
        Ok(EventSummary::from_event(&event, available))
    }

    /// Fetch a published event's currently-available seats.
    ///
    /// Starts from the record store's `AVAILABLE` rows and drops any seat
    /// the overlay already reports as held or booked, so a buyer browsing
    /// for free seats does not see ones a concurrent hold just took.
    pub async fn get_available_seats(&self, event_id: i64) -> AppResult<Vec<SeatView>> {
        self.event_repo
            .find_by_id(event_id)
            .await?
            .filter(|e| e.is_bookable())
            .ok_or_else(|| AppError::not_found(format!("Event not found: {event_id}")))?;

        let seats = self.seat_repo.find_available_by_event(event_id).await?;

        let overlay = match self.overlay.event_overlay(event_id).await {
            Ok(overlay) => overlay,
            Err(e) => {
                warn!(event_id, error = %e, "Overlay unavailable, serving DB-only availability");
                HashMap::new()
            }
        };

        Ok(available_views(&seats, &overlay))
    }

    /// Fetch a published event with its overlay-merged seat map.
    pub async fn get_event_with_seats(&self, event_id: i64) -> AppResult<EventSeatsView> {
        let event = self
            .event_repo
            .find_by_id(event_id)
            .await?
            .filter(|e| e.is_bookable())
            .ok_or_else(|| AppError::not_found(format!("Event not found: {event_id}")))?;

        let seats = self.seat_repo.find_by_event(event_id).await?;

        let (overlay, overlay_degraded) = match self.overlay.event_overlay(event_id).await {
            Ok(overlay) => {
                debug!(event_id, entries = overlay.len(), "Overlay fetched");
                (overlay, false)
            }
            Err(e) => {
                warn!(event_id, error = %e, "Overlay unavailable, serving DB-only seat view");
                (HashMap::new(), true)
            }
        };

        let merged = merge_overlay(&seats, &overlay);
        let status_counts = count_statuses(&merged);
        let available = merged
            .iter()
            .filter(|s| s.status == SeatStatus::Available.as_str())
            .count() as i64;

        Ok(EventSeatsView {
            event: EventSummary::from_event(&event, available),
            seats: merged,
            status_counts,
            overlay_degraded,
        })
    }
}

/// Merge seat rows with the overlay: a seat present in the overlay takes
/// the overlay's status, everything else keeps the record-store status.
fn merge_overlay(seats: &[Seat], overlay: &HashMap<i64, SeatStatus>) -> Vec<SeatView> {
    seats
        .iter()
        .map(|seat| {
            let status = overlay.get(&seat.id).copied().unwrap_or(seat.status);
            SeatView {
                seat_id: seat.id,
                section: seat.section.clone(),
                row_letter: seat.row_letter.clone(),
                seat_number: seat.seat_number,
                label: seat.label(),
                price: seat.price,
                status: status.to_string(),
            }
        })
        .collect()
}

/// Merge available seat rows with the overlay and keep only the seats
/// that are still available after the merge.
fn available_views(seats: &[Seat], overlay: &HashMap<i64, SeatStatus>) -> Vec<SeatView> {
    let mut views = merge_overlay(seats, overlay);
    views.retain(|view| view.status == SeatStatus::Available.as_str());
    views
}

/// Count seats per merged status.
fn count_statuses(seats: &[SeatView]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for seat in seats {
        *counts.entry(seat.status.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn seat(id: i64, status: SeatStatus) -> Seat {
        Seat {
            id,
            event_id: 1,
            section: "VIP".to_string(),
            row_letter: "A".to_string(),
            seat_number: id as i32,
            price: Decimal::new(5000, 2),
            status,
            version: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn overlay_value_wins_over_db_status() {
        let seats = vec![seat(10, SeatStatus::Available), seat(11, SeatStatus::Available)];
        let mut overlay = HashMap::new();
        overlay.insert(10, SeatStatus::Held);

        let merged = merge_overlay(&seats, &overlay);
        assert_eq!(merged[0].status, "HELD");
        assert_eq!(merged[1].status, "AVAILABLE");
    }

    #[test]
    fn empty_overlay_returns_db_state() {
        let seats = vec![seat(10, SeatStatus::Booked)];
        let merged = merge_overlay(&seats, &HashMap::new());
        assert_eq!(merged[0].status, "BOOKED");
    }

    #[test]
    fn overlay_entries_for_unknown_seats_are_ignored() {
        let seats = vec![seat(10, SeatStatus::Available)];
        let mut overlay = HashMap::new();
        overlay.insert(99, SeatStatus::Held);

        let merged = merge_overlay(&seats, &overlay);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].status, "AVAILABLE");
    }

    #[test]
    fn available_views_drop_overlay_contradictions() {
        let seats = vec![
            seat(10, SeatStatus::Available),
            seat(11, SeatStatus::Available),
            seat(12, SeatStatus::Available),
        ];
        let mut overlay = HashMap::new();
        overlay.insert(10, SeatStatus::Held);
        overlay.insert(12, SeatStatus::Booked);

        let available = available_views(&seats, &overlay);
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].seat_id, 11);
        assert_eq!(available[0].status, "AVAILABLE");
    }

    #[test]
    fn available_views_keep_everything_without_overlay() {
        let seats = vec![seat(10, SeatStatus::Available), seat(11, SeatStatus::Available)];
        let available = available_views(&seats, &HashMap::new());
        assert_eq!(available.len(), 2);
    }

    #[test]
    fn status_counts_cover_all_merged_seats() {
        let seats = vec![
            seat(10, SeatStatus::Available),
            seat(11, SeatStatus::Available),
            seat(12, SeatStatus::Booked),
        ];
        let mut overlay = HashMap::new();
        overlay.insert(11, SeatStatus::Held);

        let merged = merge_overlay(&seats, &overlay);
        let counts = count_statuses(&merged);
        assert_eq!(counts.get("AVAILABLE"), Some(&1));
        assert_eq!(counts.get("HELD"), Some(&1));
        assert_eq!(counts.get("BOOKED"), Some(&1));
    }
}
