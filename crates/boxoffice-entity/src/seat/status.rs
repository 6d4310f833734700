//! Seat status state machine.

use serde::{Deserialize, Serialize};

use boxoffice_core::AppError;

/// Status of a single seat.
///
/// Transitions are driven exclusively by the hold protocol:
/// `AVAILABLE → HELD` (place), `HELD → BOOKED` (confirm),
/// `HELD → AVAILABLE` (cancel, expiry, reconcile). `BOOKED` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "seat_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum SeatStatus {
    /// Free to be held.
    Available,
    /// Reserved by an active hold.
    Held,
    /// Permanently sold.
    Booked,
}

impl SeatStatus {
    /// Return the status as an uppercase string (the overlay wire value).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Held => "HELD",
            Self::Booked => "BOOKED",
        }
    }
}

impl std::fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SeatStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(Self::Available),
            "HELD" => Ok(Self::Held),
            "BOOKED" => Ok(Self::Booked),
            _ => Err(AppError::validation(format!("Invalid seat status: '{s}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_wire_values() {
        for status in [SeatStatus::Available, SeatStatus::Held, SeatStatus::Booked] {
            assert_eq!(status.as_str().parse::<SeatStatus>().unwrap(), status);
        }
    }

    #[test]
    fn rejects_unknown_values() {
        assert!("SOLD".parse::<SeatStatus>().is_err());
        assert!("held".parse::<SeatStatus>().is_err());
    }
}
