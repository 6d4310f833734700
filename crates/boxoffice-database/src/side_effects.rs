//! Transaction side-effect registry.
//!
//! Overlay writes and event-log publishes must happen strictly after the
//! database transaction settles: a committed hold flips the overlay to the
//! new status, a rolled-back one re-affirms the prior status. Callers
//! register those actions here while the transaction is open, then invoke
//! exactly one of [`SideEffects::committed`] or [`SideEffects::rolled_back`]
//! at the transaction boundary.

use std::future::Future;
use std::pin::Pin;

/// A deferred side effect. Effects are infallible at this level: each one
/// handles and logs its own errors, since a failed overlay write or audit
/// publish must never affect the settled transaction.
pub type SideEffect = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Registry of after-commit and after-rollback actions for one transaction.
#[derive(Default)]
pub struct SideEffects {
    after_commit: Vec<SideEffect>,
    after_rollback: Vec<SideEffect>,
}

impl SideEffects {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action to run after the transaction commits.
    pub fn after_commit<F>(&mut self, effect: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.after_commit.push(Box::pin(effect));
    }

    /// Register an action to run after the transaction rolls back.
    pub fn after_rollback<F>(&mut self, effect: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.after_rollback.push(Box::pin(effect));
    }

    /// Run the after-commit actions in registration order.
    pub async fn committed(self) {
        for effect in self.after_commit {
            effect.await;
        }
    }

    /// Run the after-rollback actions in registration order.
    pub async fn rolled_back(self) {
        for effect in self.after_rollback {
            effect.await;
        }
    }
}

impl std::fmt::Debug for SideEffects {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SideEffects")
            .field("after_commit", &self.after_commit.len())
            .field("after_rollback", &self.after_rollback.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn committed_runs_only_commit_effects() {
        let commits = Arc::new(AtomicU32::new(0));
        let rollbacks = Arc::new(AtomicU32::new(0));

        let mut effects = SideEffects::new();
        let c = Arc::clone(&commits);
        effects.after_commit(async move {
            c.fetch_add(1, Ordering::SeqCst);
        });
        let r = Arc::clone(&rollbacks);
        effects.after_rollback(async move {
            r.fetch_add(1, Ordering::SeqCst);
        });

        effects.committed().await;
        assert_eq!(commits.load(Ordering::SeqCst), 1);
        assert_eq!(rollbacks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rolled_back_runs_only_rollback_effects() {
        let commits = Arc::new(AtomicU32::new(0));
        let rollbacks = Arc::new(AtomicU32::new(0));

        let mut effects = SideEffects::new();
        let c = Arc::clone(&commits);
        effects.after_commit(async move {
            c.fetch_add(1, Ordering::SeqCst);
        });
        let r = Arc::clone(&rollbacks);
        effects.after_rollback(async move {
            r.fetch_add(1, Ordering::SeqCst);
        });

        effects.rolled_back().await;
        assert_eq!(commits.load(Ordering::SeqCst), 0);
        assert_eq!(rollbacks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn effects_run_in_registration_order() {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));

        let mut effects = SideEffects::new();
        for i in 0..3 {
            let o = Arc::clone(&order);
            effects.after_commit(async move {
                o.lock().unwrap().push(i);
            });
        }

        effects.committed().await;
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }
}
