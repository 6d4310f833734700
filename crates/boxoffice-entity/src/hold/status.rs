//! Seat-hold status.

use serde::{Deserialize, Serialize};

/// Status of a seat hold.
///
/// A hold starts `ACTIVE` and makes exactly one terminal transition to
/// `EXPIRED`, `CONFIRMED`, or `CANCELLED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "hold_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum HoldStatus {
    /// The hold currently reserves its seats.
    Active,
    /// The payment window elapsed.
    Expired,
    /// Converted into a booking.
    Confirmed,
    /// Cancelled by the customer.
    Cancelled,
}

impl HoldStatus {
    /// Return the status as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Expired => "EXPIRED",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Whether the status is terminal.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }
}

impl std::fmt::Display for HoldStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
