//! Unified application error types for BoxOffice.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::types::response::ApiErrorResponse;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Input validation failed.
    Validation,
    /// At least one requested seat is locked or no longer holdable.
    SeatsUnavailable,
    /// The hold is in a terminal state or past its expiry.
    HoldExpired,
    /// The caller is not the owner of the hold.
    CustomerMismatch,
    /// A conflict occurred (duplicate entry, already confirmed, etc.).
    Conflict,
    /// A database error occurred.
    Database,
    /// A cache/lock-store error occurred.
    Cache,
    /// The cache/lock store is unreachable (connection-level failure).
    CacheUnavailable,
    /// An event-log (Kafka) error occurred.
    Messaging,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// A configuration error occurred.
    Configuration,
    /// An internal server error occurred.
    Internal,
    /// The service is temporarily unavailable (transient errors exhausted).
    ServiceUnavailable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::SeatsUnavailable => write!(f, "SEATS_UNAVAILABLE"),
            Self::HoldExpired => write!(f, "HOLD_EXPIRED"),
            Self::CustomerMismatch => write!(f, "CUSTOMER_MISMATCH"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Database => write!(f, "DATABASE"),
            Self::Cache => write!(f, "CACHE"),
            Self::CacheUnavailable => write!(f, "CACHE_UNAVAILABLE"),
            Self::Messaging => write!(f, "MESSAGING"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::ServiceUnavailable => write!(f, "SERVICE_UNAVAILABLE"),
        }
    }
}

/// The unified application error used throughout BoxOffice.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a seats-unavailable error.
    pub fn seats_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SeatsUnavailable, message)
    }

    /// Create a hold-expired error.
    pub fn hold_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::HoldExpired, message)
    }

    /// Create a customer-mismatch error.
    pub fn customer_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CustomerMismatch, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a cache error.
    pub fn cache(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cache, message)
    }

    /// Create a cache-unavailable error.
    pub fn cache_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CacheUnavailable, message)
    }

    /// Create a messaging error.
    pub fn messaging(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Messaging, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a service-unavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    /// Whether this error indicates the lock/overlay store cannot be reached.
    ///
    /// The hold orchestrator uses this to decide between propagating the
    /// error and falling back to DB-only guarding.
    pub fn is_cache_unavailable(&self) -> bool {
        self.kind == ErrorKind::CacheUnavailable
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.kind {
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::SeatsUnavailable => (StatusCode::CONFLICT, "SEATS_UNAVAILABLE"),
            ErrorKind::HoldExpired => (StatusCode::GONE, "HOLD_EXPIRED"),
            ErrorKind::CustomerMismatch => (StatusCode::BAD_REQUEST, "CUSTOMER_MISMATCH"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::Database => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            ErrorKind::Cache => (StatusCode::INTERNAL_SERVER_ERROR, "CACHE_ERROR"),
            ErrorKind::CacheUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "CACHE_UNAVAILABLE")
            }
            ErrorKind::Messaging => (StatusCode::INTERNAL_SERVER_ERROR, "MESSAGING_ERROR"),
            ErrorKind::Serialization => {
                (StatusCode::INTERNAL_SERVER_ERROR, "SERIALIZATION_ERROR")
            }
            ErrorKind::Configuration => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR")
            }
            ErrorKind::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            ErrorKind::Internal => {
                tracing::error!(error = %self.message, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: self.message.clone(),
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_kinds_map_to_specific_statuses() {
        let cases = [
            (AppError::validation("x"), StatusCode::BAD_REQUEST),
            (AppError::seats_unavailable("x"), StatusCode::CONFLICT),
            (AppError::not_found("x"), StatusCode::NOT_FOUND),
            (AppError::hold_expired("x"), StatusCode::GONE),
            (AppError::customer_mismatch("x"), StatusCode::BAD_REQUEST),
            (AppError::conflict("x"), StatusCode::CONFLICT),
            (AppError::service_unavailable("x"), StatusCode::SERVICE_UNAVAILABLE),
        ];

        for (err, expected) in cases {
            let resp = err.into_response();
            assert_eq!(resp.status(), expected);
        }
    }

    #[test]
    fn cache_unavailable_is_distinguished_from_cache() {
        assert!(AppError::cache_unavailable("down").is_cache_unavailable());
        assert!(!AppError::cache("bad reply").is_cache_unavailable());
    }
}
