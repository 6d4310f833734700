//! Request context carrying the trace id and deadline.
//!
//! Built by the HTTP layer (or a worker loop) and passed explicitly into
//! every service method, so there is no ambient request state.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use boxoffice_core::error::AppError;
use boxoffice_core::result::AppResult;

/// Context for the current request or background unit of work.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Correlation id threaded through logs and audit events.
    pub trace_id: String,
    /// When the request was received.
    pub received_at: DateTime<Utc>,
    /// Absolute deadline; operations refuse to start new I/O past it.
    pub deadline: Option<DateTime<Utc>>,
}

impl RequestContext {
    /// Create a context with a fresh trace id and no deadline.
    pub fn new() -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string(),
            received_at: Utc::now(),
            deadline: None,
        }
    }

    /// Create a context for a background task, tagged with the task name.
    pub fn background(task: &str) -> Self {
        Self {
            trace_id: format!("{task}-{}", Uuid::new_v4().simple()),
            received_at: Utc::now(),
            deadline: None,
        }
    }

    /// Set the deadline relative to the receive time.
    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.deadline = Some(
            self.received_at
                + Duration::from_std(timeout).unwrap_or_else(|_| Duration::seconds(30)),
        );
        self
    }

    /// Error out if the deadline has passed.
    ///
    /// Called before starting a new external operation; in-flight I/O is
    /// bounded by the stores' own timeouts.
    pub fn check_deadline(&self) -> AppResult<()> {
        match self.deadline {
            Some(deadline) if Utc::now() > deadline => Err(AppError::service_unavailable(
                "Request deadline exceeded",
            )),
            _ => Ok(()),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_context_has_no_deadline() {
        let ctx = RequestContext::new();
        assert!(ctx.deadline.is_none());
        assert!(ctx.check_deadline().is_ok());
    }

    #[test]
    fn expired_deadline_is_rejected() {
        let mut ctx = RequestContext::new();
        ctx.deadline = Some(Utc::now() - Duration::seconds(1));
        assert!(ctx.check_deadline().is_err());
    }

    #[test]
    fn future_deadline_passes() {
        let ctx = RequestContext::new().with_timeout(std::time::Duration::from_secs(30));
        assert!(ctx.check_deadline().is_ok());
    }
}
