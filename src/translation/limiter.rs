//! Admission control for completion calls.

use std::future::Future;

use tokio::sync::Semaphore;

use crate::error::{Result, TranslateError};

/// Completion calls allowed in flight per provider instance.
pub const MAX_IN_FLIGHT: usize = 1;

/// Bounds how many scheduled tasks run at once.
///
/// Waiting tasks are admitted in arrival order (the underlying semaphore
/// is fair), across every caller sharing the limiter.
#[derive(Debug)]
pub struct Limiter {
    permits: Semaphore,
    max_in_flight: usize,
}

impl Limiter {
    pub fn new(max_in_flight: usize) -> Self {
        let max_in_flight = max_in_flight.max(1);
        Self {
            permits: Semaphore::new(max_in_flight),
            max_in_flight,
        }
    }

    pub const fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Runs `task` once a slot is free. The task is not polled before then.
    pub async fn schedule<F, T>(&self, task: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| TranslateError::Unknown(format!("limiter closed: {e}")))?;
        tracing::trace!(
            available = self.permits.available_permits(),
            "limiter admitted task"
        );
        task.await
    }
}

impl Default for Limiter {
    fn default() -> Self {
        Self::new(MAX_IN_FLIGHT)
    }
}
