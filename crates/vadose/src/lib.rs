//! Vadose: a coupled subsurface flow and thermal simulation framework.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Vadose sub-crates. For most users, adding `vadose` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use vadose::prelude::*;
//!
//! // A minimal kernel that cools its temperature field toward zero.
//! struct Cooling;
//! impl ProcessKernel for Cooling {
//!     fn name(&self) -> &str { "cooling" }
//!
//!     fn setup(&mut self, state: &mut State) -> Result<(), StateError> {
//!         state.require_field(
//!             "temperature",
//!             FieldLocation::Cell,
//!             Ownership::owned("cooling"),
//!             1,
//!         )
//!     }
//!
//!     fn initialize(&mut self, state: &mut State) -> Result<(), StateError> {
//!         state.set_field("temperature", Requester::Pk("cooling"), &[300.0], None)?;
//!         state.field_mut("temperature")?.set_initialized();
//!         Ok(())
//!     }
//!
//!     fn advance(&mut self, dt: f64, state: &mut State) -> Result<(), StepFailure> {
//!         let data = state
//!             .get_field_mut("temperature", Requester::Pk("cooling"))
//!             .map_err(|e| StepFailure::AdmissibleRange { reason: e.to_string() })?;
//!         for value in data.iter_mut() {
//!             *value *= 1.0 - 0.1 * dt;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! // An 8-cell mesh, a registry, and one kernel under the controller.
//! let mesh = Arc::new(BlockMesh::new(8, 0).unwrap());
//! let mut state = State::new(mesh);
//! let mut pk = Cooling;
//! pk.setup(&mut state).unwrap();
//! pk.initialize(&mut state).unwrap();
//!
//! let mut controller =
//!     TimeStepController::new(ControllerConfig::default(), state).unwrap();
//! let report = controller.advance(&mut pk).unwrap();
//! assert_eq!(report.cycle, 1);
//! assert!(controller.state().get_field("temperature").unwrap()[0] < 300.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `vadose-core` | Configuration, errors, ownership arbitration |
//! | [`mesh`] | `vadose-mesh` | The `Mesh` trait and the block mesh backend |
//! | [`state`] | `vadose-state` | The field registry, fields, and vis output |
//! | [`pk`] | `vadose-pk` | The `ProcessKernel` trait |
//! | [`mpc`] | `vadose-mpc` | Weak coupling and time-step control |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Configuration, errors, and ownership arbitration (`vadose-core`).
///
/// Contains [`types::ParameterList`], the error taxonomy
/// ([`types::StateError`], [`types::StepFailure`],
/// [`types::ControlError`]), and the pure [`types::arbitrate`]
/// transition function.
pub use vadose_core as types;

/// Mesh topology (`vadose-mesh`).
///
/// Provides the [`mesh::Mesh`] trait and the concrete
/// [`mesh::BlockMesh`] backend with named blocks and face normals.
pub use vadose_mesh as mesh;

/// The field registry (`vadose-state`).
///
/// [`state::State`] owns every simulation field, arbitrates write
/// ownership, runs configuration-driven initialization, and supports
/// whole-registry snapshot and copy-back.
pub use vadose_state as state;

/// Process kernel contract (`vadose-pk`).
///
/// The [`pk::ProcessKernel`] trait is the main extension point for
/// user-defined physics.
pub use vadose_pk as pk;

/// Multiphysics coupling and time-step control (`vadose-mpc`).
///
/// [`mpc::WeakMpc`] composes kernels into trees;
/// [`mpc::TimeStepController`] drives a tree with snapshot-based retry.
pub use vadose_mpc as mpc;

/// Common imports for typical Vadose usage.
///
/// ```rust
/// use vadose::prelude::*;
/// ```
///
/// This imports the most frequently used types: the registry, the
/// kernel trait, the coupler, the controller, and the core value types.
pub mod prelude {
    // Core types
    pub use vadose_core::{
        FieldLocation, Ownership, ParameterList, ParameterValue, Requester,
    };

    // Errors
    pub use vadose_core::{ControlError, StateError, StepFailure};

    // Mesh
    pub use vadose_mesh::{BlockMesh, Mesh};

    // Registry
    pub use vadose_state::{Field, State, Vis};

    // Kernels
    pub use vadose_pk::ProcessKernel;

    // Coupling and control
    pub use vadose_mpc::{
        ControllerConfig, StepMetrics, StepReport, TimeStepController, WeakMpc,
    };
}
