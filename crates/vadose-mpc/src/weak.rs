//! Weak coupling: sequential advancement of sub-kernels.

use vadose_core::{StateError, StepFailure};
use vadose_pk::ProcessKernel;
use vadose_state::State;

/// A weakly-coupled composite of process kernels.
///
/// Holds an ordered sequence of sub-kernels, fixed at construction, and
/// advances them one after another within a step. Ordering is
/// significant and deterministic: later kernels read fields written by
/// earlier kernels in the same step, which is the one-way data
/// dependency that defines weak coupling. A strong variant would
/// instead assemble a single coupled nonlinear system; the uniform
/// [`ProcessKernel`] surface is the extension point for that.
///
/// `WeakMpc` is itself a `ProcessKernel`, so couplers nest into trees
/// and the time-step controller only ever sees one root kernel.
pub struct WeakMpc {
    name: String,
    sub_pks: Vec<Box<dyn ProcessKernel>>,
}

impl WeakMpc {
    /// Compose sub-kernels in the order they will be advanced.
    pub fn new(name: impl Into<String>, sub_pks: Vec<Box<dyn ProcessKernel>>) -> Self {
        Self {
            name: name.into(),
            sub_pks,
        }
    }

    /// Number of direct sub-kernels.
    pub fn len(&self) -> usize {
        self.sub_pks.len()
    }

    /// Whether the coupler has no sub-kernels.
    pub fn is_empty(&self) -> bool {
        self.sub_pks.is_empty()
    }
}

impl ProcessKernel for WeakMpc {
    fn name(&self) -> &str {
        &self.name
    }

    fn setup(&mut self, state: &mut State) -> Result<(), StateError> {
        for pk in &mut self.sub_pks {
            pk.setup(state)?;
        }
        Ok(())
    }

    fn initialize(&mut self, state: &mut State) -> Result<(), StateError> {
        for pk in &mut self.sub_pks {
            pk.initialize(state)?;
        }
        Ok(())
    }

    /// Advance each sub-kernel in declared order.
    ///
    /// Stops at the first failure: later kernels are not attempted, and
    /// no rollback of earlier successes happens here — the controller
    /// discards the whole working registry copy instead. The failure is
    /// wrapped with the failing kernel's name so nested couplers yield
    /// the full path to the failing leaf.
    fn advance(&mut self, dt: f64, state: &mut State) -> Result<(), StepFailure> {
        for pk in &mut self.sub_pks {
            pk.advance(dt, state).map_err(|reason| StepFailure::Kernel {
                name: pk.name().to_string(),
                reason: Box::new(reason),
            })?;
        }
        Ok(())
    }

    fn commit(&mut self, dt: f64, state: &mut State) {
        for pk in &mut self.sub_pks {
            pk.commit(dt, state);
        }
    }

    fn update_preconditioner(&mut self, t: f64, state: &State, h: f64) {
        for pk in &mut self.sub_pks {
            pk.update_preconditioner(t, state, h);
        }
    }
}
