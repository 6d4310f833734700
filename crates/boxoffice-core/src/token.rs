//! Identifier mint for hold tokens, booking references, and idempotency keys.
//!
//! All identifiers come from a cryptographic RNG. Booking references are
//! short and human-friendly; collisions are handled by the unique constraint
//! on `bookings.booking_reference` (callers retry on violation).

use rand::Rng;
use rand::rngs::OsRng;
use uuid::Uuid;

/// Alphabet for booking references: uppercase alphanumerics.
const REFERENCE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a booking reference.
const REFERENCE_LEN: usize = 8;

/// Generate an opaque hold token.
///
/// Format: `HOLD_` followed by 32 uppercase hex characters (128 bits).
pub fn hold_token() -> String {
    format!("HOLD_{}", Uuid::new_v4().simple().to_string().to_uppercase())
}

/// Generate a human-friendly booking reference (8 uppercase alphanumerics).
pub fn booking_reference() -> String {
    let mut rng = OsRng;
    (0..REFERENCE_LEN)
        .map(|_| REFERENCE_ALPHABET[rng.gen_range(0..REFERENCE_ALPHABET.len())] as char)
        .collect()
}

/// Generate an idempotency key (UUID v4).
pub fn idempotency_key() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_token_format() {
        let token = hold_token();
        assert_eq!(token.len(), 37);
        assert!(token.starts_with("HOLD_"));
        assert!(
            token[5..]
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn hold_tokens_are_unique() {
        let a = hold_token();
        let b = hold_token();
        assert_ne!(a, b);
    }

    #[test]
    fn booking_reference_format() {
        let reference = booking_reference();
        assert_eq!(reference.len(), 8);
        assert!(
            reference
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn idempotency_key_is_uuid() {
        let key = idempotency_key();
        assert!(Uuid::parse_str(&key).is_ok());
    }
}
