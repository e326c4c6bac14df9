//! Adaptive time stepping over registry snapshots.

use std::error::Error;
use std::fmt;

use vadose_core::ControlError;
use vadose_pk::ProcessKernel;
use vadose_state::State;

use crate::metrics::StepMetrics;

// ── configuration ────────────────────────────────────────────────────

/// Step-size policy for the [`TimeStepController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    /// Step size attempted first.
    pub initial_dt: f64,
    /// Floor below which the run aborts instead of retrying.
    pub min_dt: f64,
    /// Ceiling applied when growing the step after successes.
    pub max_dt: f64,
    /// Multiplier applied to dt after a rejected attempt, in (0, 1).
    pub reduction_factor: f64,
    /// Multiplier applied to dt after an accepted step, at least 1.
    pub growth_factor: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            initial_dt: 1.0,
            min_dt: 1e-8,
            max_dt: 1e6,
            reduction_factor: 0.5,
            growth_factor: 1.25,
        }
    }
}

impl ControllerConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("initial_dt", self.initial_dt),
            ("min_dt", self.min_dt),
            ("max_dt", self.max_dt),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositiveDt { name, value });
            }
        }
        if !(self.min_dt <= self.initial_dt && self.initial_dt <= self.max_dt) {
            return Err(ConfigError::DtOutOfOrder {
                min_dt: self.min_dt,
                initial_dt: self.initial_dt,
                max_dt: self.max_dt,
            });
        }
        if !self.reduction_factor.is_finite()
            || self.reduction_factor <= 0.0
            || self.reduction_factor >= 1.0
        {
            return Err(ConfigError::BadReductionFactor {
                value: self.reduction_factor,
            });
        }
        if !self.growth_factor.is_finite() || self.growth_factor < 1.0 {
            return Err(ConfigError::BadGrowthFactor {
                value: self.growth_factor,
            });
        }
        Ok(())
    }
}

/// A [`ControllerConfig`] that fails its structural invariants.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A step size is non-finite, zero, or negative.
    NonPositiveDt {
        /// Which config field.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
    /// The ordering `min_dt <= initial_dt <= max_dt` does not hold.
    DtOutOfOrder {
        /// Configured floor.
        min_dt: f64,
        /// Configured first step.
        initial_dt: f64,
        /// Configured ceiling.
        max_dt: f64,
    },
    /// Reduction factor outside the open interval (0, 1).
    BadReductionFactor {
        /// The offending value.
        value: f64,
    },
    /// Growth factor non-finite or below 1.
    BadGrowthFactor {
        /// The offending value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDt { name, value } => {
                write!(f, "{name} must be finite and positive, got {value}")
            }
            Self::DtOutOfOrder {
                min_dt,
                initial_dt,
                max_dt,
            } => write!(
                f,
                "need min_dt <= initial_dt <= max_dt, got {min_dt} / {initial_dt} / {max_dt}"
            ),
            Self::BadReductionFactor { value } => {
                write!(f, "reduction_factor must lie in (0, 1), got {value}")
            }
            Self::BadGrowthFactor { value } => {
                write!(f, "growth_factor must be finite and >= 1, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

// ── controller ───────────────────────────────────────────────────────

/// Outcome of one accepted step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// The step size that was finally accepted.
    pub dt: f64,
    /// Attempts rejected before this step was accepted.
    pub rollbacks: u64,
    /// Simulation time after the step.
    pub time: f64,
    /// Cycle count after the step.
    pub cycle: u64,
}

/// Drives a kernel tree through snapshot, advance, and commit or
/// rollback.
///
/// The controller owns the canonical registry. Each step it clones the
/// registry, lets the root kernel advance the clone, and either copies
/// the clone back over the canonical registry (acceptance) or drops it
/// and retries at a reduced dt (rejection). Kernels therefore never see
/// a registry holding a half-advanced step.
#[derive(Debug)]
pub struct TimeStepController {
    config: ControllerConfig,
    state: State,
    dt: f64,
    metrics: StepMetrics,
}

impl TimeStepController {
    /// Take ownership of a fully-initialized canonical registry.
    ///
    /// Fails if `config` is structurally invalid or any field in
    /// `state` has not been latched initialized.
    pub fn new(config: ControllerConfig, state: State) -> Result<Self, ControlError> {
        if let Err(e) = config.validate() {
            return Err(ControlError::InvalidConfig(e.to_string()));
        }
        state.verify_initialized()?;
        Ok(Self {
            dt: config.initial_dt,
            config,
            state,
            metrics: StepMetrics::default(),
        })
    }

    /// The canonical registry, reflecting only accepted steps.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// The step size the next attempt will use.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Counters accumulated since construction.
    pub fn metrics(&self) -> &StepMetrics {
        &self.metrics
    }

    /// Advance the kernel tree by one accepted step.
    ///
    /// Retries at geometrically reduced dt until the tree advances
    /// cleanly or dt would fall below the configured floor. On
    /// acceptance the working copy is committed to the canonical
    /// registry, the clock and cycle advance, and dt grows toward
    /// `max_dt` for the next step.
    pub fn advance(&mut self, pk: &mut dyn ProcessKernel) -> Result<StepReport, ControlError> {
        let mut rollbacks_this_step = 0;
        loop {
            self.metrics.record_attempt();
            let mut working = self.state.clone();
            match pk.advance(self.dt, &mut working) {
                Ok(()) => {
                    let dt = self.dt;
                    pk.commit(dt, &mut working);
                    working.advance_time(dt);
                    working.advance_cycle();
                    self.state.assign_from(&working)?;
                    self.metrics.record_accepted(dt);
                    self.dt = (self.dt * self.config.growth_factor).min(self.config.max_dt);
                    return Ok(StepReport {
                        dt,
                        rollbacks: rollbacks_this_step,
                        time: self.state.time(),
                        cycle: self.state.cycle(),
                    });
                }
                Err(failure) => {
                    // Working copy is dropped; the canonical registry
                    // never saw the failed attempt.
                    self.metrics.record_rollback();
                    rollbacks_this_step += 1;
                    let reduced = self.dt * self.config.reduction_factor;
                    if reduced < self.config.min_dt {
                        return Err(ControlError::StepLimit {
                            dt_floor: self.config.min_dt,
                            last: failure,
                        });
                    }
                    self.dt = reduced;
                }
            }
        }
    }
}
