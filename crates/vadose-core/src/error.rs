//! Error taxonomy for the Vadose framework.
//!
//! Two channels, deliberately distinct types so call sites cannot
//! confuse them:
//!
//! - [`StateError`] — fatal, structural. Ownership conflicts, unknown
//!   fields, schema mismatches. These indicate a wiring or configuration
//!   bug; any value computed after ignoring one would be silently wrong.
//! - [`StepFailure`] — recoverable. A kernel's nonlinear solve failed to
//!   converge or left the admissible range. Physical non-convergence is
//!   an expected, frequent condition; the time-step controller retries
//!   with a smaller dt.

use std::error::Error;
use std::fmt;

use crate::location::FieldLocation;

/// Fatal structural errors from the field registry.
///
/// None of these are recoverable at run time: they abort the simulation
/// rather than risk advancing with a corrupt object graph.
#[derive(Clone, Debug, PartialEq)]
pub enum StateError {
    /// A field was re-required by a second, distinct kernel.
    OwnershipConflict {
        /// The contested field.
        field: String,
        /// Name of the kernel that already owns it.
        held_by: String,
        /// Name of the kernel attempting to claim it.
        requested_by: String,
    },
    /// A field was re-required on a different mesh location.
    LocationConflict {
        /// The field in question.
        field: String,
        /// Location the field was created on.
        existing: FieldLocation,
        /// Location the new request asked for.
        requested: FieldLocation,
    },
    /// A field was re-required with a different dof count.
    DofConflict {
        /// The field in question.
        field: String,
        /// Dof count the field was created with.
        existing: usize,
        /// Dof count the new request asked for.
        requested: usize,
    },
    /// A field was required with zero degrees of freedom.
    ZeroDofs {
        /// The field in question.
        field: String,
    },
    /// An accessor named a field that was never required.
    UnknownField {
        /// The unrecognized name.
        name: String,
    },
    /// A writer other than the recorded owner touched a field.
    NotOwner {
        /// The field in question.
        field: String,
        /// Recorded owner, as displayed.
        owner: String,
        /// The requester that was refused, as displayed.
        requester: String,
    },
    /// Registry assignment between incompatible schemas.
    SchemaMismatch {
        /// What differed (field count, name, layout).
        reason: String,
    },
    /// A mandatory configuration key was absent.
    MissingParameter {
        /// The missing key.
        key: String,
    },
    /// Subfield names were declared with the wrong length.
    SubfieldCountMismatch {
        /// The field in question.
        field: String,
        /// The field's dof count.
        expected: usize,
        /// Number of names supplied.
        got: usize,
    },
    /// A supplied value slice does not match the expected length.
    LengthMismatch {
        /// The field in question.
        field: String,
        /// Expected number of values.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },
    /// A mesh block id is not known to the mesh.
    UnknownBlock {
        /// The unrecognized block id.
        block_id: u32,
    },
    /// Time-stepping was started before every field received its IC.
    Uninitialized {
        /// Names of the fields still missing initial values.
        fields: Vec<String>,
    },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OwnershipConflict {
                field,
                held_by,
                requested_by,
            } => write!(
                f,
                "field '{field}' already owned by '{held_by}', requested by '{requested_by}'"
            ),
            Self::LocationConflict {
                field,
                existing,
                requested,
            } => write!(
                f,
                "field '{field}' exists on {existing} entities, requested on {requested}"
            ),
            Self::DofConflict {
                field,
                existing,
                requested,
            } => write!(
                f,
                "field '{field}' exists with {existing} dofs, requested with {requested}"
            ),
            Self::ZeroDofs { field } => {
                write!(f, "field '{field}' must have at least one dof")
            }
            Self::UnknownField { name } => write!(f, "unknown field '{name}'"),
            Self::NotOwner {
                field,
                owner,
                requester,
            } => write!(
                f,
                "field '{field}' is owned by {owner}; write refused for {requester}"
            ),
            Self::SchemaMismatch { reason } => {
                write!(f, "attempted copy of non-compatible states: {reason}")
            }
            Self::MissingParameter { key } => {
                write!(f, "missing mandatory parameter '{key}'")
            }
            Self::SubfieldCountMismatch {
                field,
                expected,
                got,
            } => write!(
                f,
                "field '{field}' has {expected} dofs but {got} subfield names"
            ),
            Self::LengthMismatch {
                field,
                expected,
                got,
            } => write!(
                f,
                "field '{field}' expects {expected} values, got {got}"
            ),
            Self::UnknownBlock { block_id } => write!(f, "unknown mesh block {block_id}"),
            Self::Uninitialized { fields } => {
                write!(f, "fields missing initial conditions: ")?;
                for (i, name) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{name}'")?;
                }
                Ok(())
            }
        }
    }
}

impl Error for StateError {}

/// Recoverable failure of one time-step attempt.
///
/// Returned by `ProcessKernel::advance`. Propagated up through couplers
/// to the time-step controller, which discards the working registry copy
/// and retries with a smaller dt.
#[derive(Clone, Debug, PartialEq)]
pub enum StepFailure {
    /// The kernel's nonlinear solve did not converge within its budget.
    NonConvergence {
        /// Iterations performed before giving up.
        iterations: u32,
    },
    /// The candidate solution left the physically admissible range
    /// (e.g. negative saturation, pressure below vapor limit).
    AdmissibleRange {
        /// Description of the violated bound.
        reason: String,
    },
    /// The requested dt is outside the kernel's stable range.
    DtRejected {
        /// The dt that was refused.
        dt: f64,
    },
    /// A sub-kernel of a coupler failed; nesting records the path from
    /// the coupler down to the failing leaf.
    Kernel {
        /// Name of the failing sub-kernel.
        name: String,
        /// The underlying failure.
        reason: Box<StepFailure>,
    },
}

impl StepFailure {
    /// Name path from the outermost coupler to the failing leaf kernel.
    pub fn kernel_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut cur = self;
        while let Self::Kernel { name, reason } = cur {
            path.push(name.as_str());
            cur = reason;
        }
        path
    }
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonConvergence { iterations } => {
                write!(f, "nonlinear solve failed to converge after {iterations} iterations")
            }
            Self::AdmissibleRange { reason } => {
                write!(f, "solution left admissible range: {reason}")
            }
            Self::DtRejected { dt } => write!(f, "dt {dt} rejected by kernel"),
            Self::Kernel { name, reason } => write!(f, "kernel '{name}' failed: {reason}"),
        }
    }
}

impl Error for StepFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Kernel { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Errors surfaced by the time-step controller.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlError {
    /// A structural error escaped from the registry or a kernel's setup.
    Fatal(StateError),
    /// Repeated step failures drove dt below the configured floor.
    StepLimit {
        /// The floor that was reached.
        dt_floor: f64,
        /// The failure reported at the smallest attempted dt.
        last: StepFailure,
    },
    /// The controller was constructed with an invalid step policy.
    InvalidConfig(String),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fatal(e) => write!(f, "fatal: {e}"),
            Self::StepLimit { dt_floor, last } => {
                write!(f, "dt fell below floor {dt_floor}; last failure: {last}")
            }
            Self::InvalidConfig(reason) => write!(f, "invalid controller config: {reason}"),
        }
    }
}

impl Error for ControlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Fatal(e) => Some(e),
            Self::StepLimit { last, .. } => Some(last),
            Self::InvalidConfig(_) => None,
        }
    }
}

impl From<StateError> for ControlError {
    fn from(e: StateError) -> Self {
        Self::Fatal(e)
    }
}
