//! Per-run step accounting.

/// Counters accumulated by the time-step controller over a run.
///
/// Cheap plain data; read it between steps to drive logging or to
/// decide when a run is thrashing (high rollback-to-attempt ratio).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepMetrics {
    /// Kernel-tree advances attempted, including retried ones.
    pub attempts: u64,
    /// Attempts discarded because a kernel reported a step failure.
    pub rollbacks: u64,
    /// Steps accepted and committed to the canonical registry.
    pub accepted: u64,
    /// Step size of the most recently accepted step, 0.0 before any.
    pub last_dt: f64,
}

impl StepMetrics {
    /// Fraction of attempts that were rolled back, 0.0 when nothing
    /// has been attempted yet.
    pub fn rollback_ratio(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.rollbacks as f64 / self.attempts as f64
        }
    }

    pub(crate) fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    pub(crate) fn record_rollback(&mut self) {
        self.rollbacks += 1;
    }

    pub(crate) fn record_accepted(&mut self, dt: f64) {
        self.accepted += 1;
        self.last_dt = dt;
    }
}
