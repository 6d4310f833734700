//! Result values for the hold hot path.
//!
//! Business outcomes of `PlaceHold` are values, not errors: contention and
//! bad input are expected under bursty demand and must not unwind the
//! stack. Only infrastructure failures travel as `AppError`.

use super::dto::HoldResponse;

/// Outcome of a `PlaceHold` call.
#[derive(Debug, Clone)]
pub enum PlaceHoldOutcome {
    /// Hold placed through the normal locked path.
    Placed(HoldResponse),
    /// Hold placed through the DB-only fallback while the lock store was
    /// unreachable. Correctness is preserved by the record-store predicate;
    /// throughput is reduced.
    Degraded(HoldResponse),
    /// At least one seat lock could not be acquired, or the record-store
    /// predicate rejected the seat set.
    Unavailable(String),
    /// The request itself was invalid.
    Invalid(String),
}

impl PlaceHoldOutcome {
    /// The response payload, when the hold was placed.
    pub fn response(&self) -> Option<&HoldResponse> {
        match self {
            Self::Placed(resp) | Self::Degraded(resp) => Some(resp),
            _ => None,
        }
    }
}
