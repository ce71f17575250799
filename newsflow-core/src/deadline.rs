//! Deadline propagation for the per-article pipeline.
//!
//! Every external call (embedder, vector index, database) sits behind a
//! suspension point; the deadline is checked before each one and converted
//! into a per-request timeout where the transport supports it. Monotonic
//! (`Instant`-based) so wall-clock skew cannot fire it early.

use std::time::{Duration, Instant};

use crate::errors::{NewsflowError, NewsflowResult};
use crate::model::PipelineStage;

/// Cancellation budget carried by one article through the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// No deadline — the pipeline runs to completion.
    pub fn none() -> Self {
        Self { at: None }
    }

    /// Deadline `budget` from now.
    pub fn from_now(budget: Duration) -> Self {
        Self {
            at: Some(Instant::now() + budget),
        }
    }

    /// Time left, if a deadline is set. `Some(Duration::ZERO)` once expired.
    pub fn remaining(&self) -> Option<Duration> {
        self.at.map(|at| at.saturating_duration_since(Instant::now()))
    }

    pub fn expired(&self) -> bool {
        matches!(self.remaining(), Some(rem) if rem.is_zero())
    }

    /// Abort with `DeadlineExceeded` if the budget is spent. `stage` is the
    /// stage the pipeline was about to enter.
    pub fn check(&self, stage: PipelineStage) -> NewsflowResult<()> {
        if self.expired() {
            return Err(NewsflowError::DeadlineExceeded { stage });
        }
        Ok(())
    }

    /// Cap a configured timeout by the remaining budget.
    pub fn cap(&self, timeout: Duration) -> Duration {
        match self.remaining() {
            Some(rem) => timeout.min(rem),
            None => timeout,
        }
    }
}
