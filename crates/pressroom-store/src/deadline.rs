//! Caller-supplied time bound for backend I/O
//!
//! One `Deadline` covers a whole store operation (including its list and
//! read steps). Running past it surfaces as `StoreUnavailable`.

use crate::errors::Result;
use pressroom_core::errors::{ExError, ExErrorKind};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    timeout: Duration,
    expires_at: Instant,
}

impl Deadline {
    /// Deadline `timeout` from now
    pub fn after(timeout: Duration) -> Self {
        Self {
            timeout,
            expires_at: Instant::now() + timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Time left, or `None` once expired
    pub fn remaining(&self) -> Option<Duration> {
        self.expires_at
            .checked_duration_since(Instant::now())
            .filter(|d| !d.is_zero())
    }

    /// Time left for the next I/O step of `operation`.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::StoreUnavailable` once the deadline has passed.
    pub fn check(&self, operation: &str) -> Result<Duration> {
        self.remaining().ok_or_else(|| {
            ExError::new(ExErrorKind::StoreUnavailable)
                .with_op(operation.to_string())
                .with_message(format!(
                    "timed out after {} ms",
                    self.timeout.as_millis()
                ))
        })
    }
}
