//! The [`ProcessKernel`] trait.

use vadose_core::{StateError, StepFailure};
use vadose_state::State;

/// One physical process, advanced over discrete time steps.
///
/// # Contract
///
/// - The registry is passed by reference into every call — kernels hold
///   no registry handle of their own, so multiple simulations coexist.
/// - [`setup`](Self::setup) declares the kernel's fields through
///   `State::require_field`; ownership conflicts surface here, at
///   wiring time, not mid-run.
/// - [`advance`](Self::advance) may mutate only the fields the kernel
///   owns (the registry's owner-checked accessors enforce this) and
///   reports physical non-convergence as a recoverable
///   [`StepFailure`], never a panic: the controller retries the whole
///   step at a smaller dt from a registry snapshot.
/// - [`commit`](Self::commit) runs once per *accepted* step, after
///   every kernel in the tree advanced; internal kernel state (e.g. a
///   saved previous solution) is synchronized here.
///
/// # Object safety
///
/// The trait is object-safe; couplers store kernels as
/// `Vec<Box<dyn ProcessKernel>>`.
///
/// # Examples
///
/// A kernel that relaxes its field toward a target value:
///
/// ```
/// use std::sync::Arc;
/// use vadose_core::{FieldLocation, Ownership, Requester, StateError, StepFailure};
/// use vadose_mesh::BlockMesh;
/// use vadose_pk::ProcessKernel;
/// use vadose_state::State;
///
/// struct Relax {
///     target: f64,
/// }
///
/// impl ProcessKernel for Relax {
///     fn name(&self) -> &str { "relax" }
///
///     fn setup(&mut self, state: &mut State) -> Result<(), StateError> {
///         state.require_field(
///             "temperature",
///             FieldLocation::Cell,
///             Ownership::owned("relax"),
///             1,
///         )
///     }
///
///     fn initialize(&mut self, state: &mut State) -> Result<(), StateError> {
///         state.set_field("temperature", Requester::Pk("relax"), &[self.target], None)?;
///         state.field_mut("temperature")?.set_initialized();
///         Ok(())
///     }
///
///     fn advance(&mut self, dt: f64, state: &mut State) -> Result<(), StepFailure> {
///         let data = state
///             .get_field_mut("temperature", Requester::Pk("relax"))
///             .map_err(|_| StepFailure::AdmissibleRange {
///                 reason: "temperature not writable".to_string(),
///             })?;
///         for value in data.iter_mut() {
///             *value += dt * (self.target - *value);
///         }
///         Ok(())
///     }
/// }
///
/// let mesh = Arc::new(BlockMesh::new(4, 0).unwrap());
/// let mut state = State::new(mesh);
/// let mut pk = Relax { target: 273.15 };
/// pk.setup(&mut state).unwrap();
/// pk.initialize(&mut state).unwrap();
/// assert!(pk.advance(0.1, &mut state).is_ok());
/// ```
pub trait ProcessKernel {
    /// Kernel name: used for ownership claims and failure reporting.
    fn name(&self) -> &str;

    /// Declare field requirements against the registry.
    ///
    /// Called once at wiring time, before initialization. Default: the
    /// kernel requires nothing.
    fn setup(&mut self, state: &mut State) -> Result<(), StateError> {
        let _ = state;
        Ok(())
    }

    /// Assign initial conditions for owned fields not covered by
    /// configuration, and latch them.
    ///
    /// Runs after `State::initialize`; the driver then gates on
    /// `State::verify_initialized`. Default: nothing to initialize.
    fn initialize(&mut self, state: &mut State) -> Result<(), StateError> {
        let _ = state;
        Ok(())
    }

    /// Advance owned fields from `t` to `t + dt`.
    ///
    /// A `StepFailure` is an expected, recoverable outcome — the
    /// controller discards the working registry copy and retries.
    fn advance(&mut self, dt: f64, state: &mut State) -> Result<(), StepFailure>;

    /// Accept the step: synchronize internal kernel state with the
    /// registry after every kernel in the tree advanced successfully.
    fn commit(&mut self, dt: f64, state: &mut State) {
        let _ = (dt, state);
    }

    /// Rebuild the kernel's preconditioner around the solution at time
    /// `t` with step size `h`.
    ///
    /// Physics-specific; the default does nothing.
    fn update_preconditioner(&mut self, t: f64, state: &State, h: f64) {
        let _ = (t, state, h);
    }
}
