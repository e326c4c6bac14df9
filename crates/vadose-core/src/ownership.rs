//! Field write-ownership and the arbitration state machine.
//!
//! Every field has exactly one writer. [`Ownership::Unowned`] marks an
//! independent variable held by the registry itself; the first process
//! kernel to claim a field becomes its owner, and a second distinct
//! claimant is a wiring bug that must fail loudly. [`arbitrate`] encodes
//! the full transition table as pure logic so the registry's storage
//! never has to reason about it.

use std::fmt;

use crate::error::StateError;
use crate::location::FieldLocation;

/// Who holds the authoritative, writable copy of a field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// Held by the registry: an independent variable no kernel computes.
    Unowned,
    /// Claimed by the named process kernel.
    Owned(String),
}

impl Ownership {
    /// Convenience constructor for a kernel claim.
    pub fn owned(pk: impl Into<String>) -> Self {
        Self::Owned(pk.into())
    }

    /// Whether `requester` is allowed to write a field with this ownership.
    ///
    /// The registry ([`Requester::Registry`]) may always write; this is
    /// the path configuration-driven initialization uses. A kernel may
    /// write only the fields recorded as owned by it.
    pub fn permits(&self, requester: &Requester<'_>) -> bool {
        match requester {
            Requester::Registry => true,
            Requester::Pk(name) => matches!(self, Self::Owned(owner) if owner == name),
        }
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unowned => write!(f, "unowned"),
            Self::Owned(pk) => write!(f, "'{pk}'"),
        }
    }
}

/// Identity presented when writing through a field accessor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requester<'a> {
    /// The registry itself. Always permitted (initialization path).
    Registry,
    /// A process kernel, identified by name.
    Pk(&'a str),
}

impl fmt::Display for Requester<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry => write!(f, "registry"),
            Self::Pk(name) => write!(f, "'{name}'"),
        }
    }
}

/// Outcome of a successful re-require of an existing field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Arbitration {
    /// The current owner is retained unchanged.
    Keep,
    /// Ownership transfers to the requester.
    Transfer(Ownership),
}

/// Arbitrate a repeated `require_field` call against an existing field.
///
/// The transition table:
///
/// | current | requested | location/dofs match | result |
/// |---|---|---|---|
/// | `Unowned` | `Owned(X)` | yes | transfer to X |
/// | `Unowned` | `Unowned` | yes | keep |
/// | `Owned(Y)` | `Unowned` | yes | keep (the registry yields) |
/// | `Owned(Y)` | `Owned(Y)` | yes | keep (idempotent re-require) |
/// | `Owned(Y)` | `Owned(X ≠ Y)` | any | fatal ownership conflict |
/// | any | any | no | fatal location or dof conflict |
///
/// Location and dof count are baked into the buffer at creation, so any
/// mismatch is fatal regardless of the ownership outcome. First-time
/// creation is not arbitrated; the registry creates the field with the
/// requested ownership directly.
pub fn arbitrate(
    field: &str,
    current: &Ownership,
    requested: &Ownership,
    existing: (FieldLocation, usize),
    wanted: (FieldLocation, usize),
) -> Result<Arbitration, StateError> {
    if existing.0 != wanted.0 {
        return Err(StateError::LocationConflict {
            field: field.to_string(),
            existing: existing.0,
            requested: wanted.0,
        });
    }
    if existing.1 != wanted.1 {
        return Err(StateError::DofConflict {
            field: field.to_string(),
            existing: existing.1,
            requested: wanted.1,
        });
    }

    match (current, requested) {
        (Ownership::Unowned, Ownership::Owned(_)) => {
            Ok(Arbitration::Transfer(requested.clone()))
        }
        (_, Ownership::Unowned) => Ok(Arbitration::Keep),
        (Ownership::Owned(held), Ownership::Owned(claim)) if held == claim => {
            Ok(Arbitration::Keep)
        }
        (Ownership::Owned(held), Ownership::Owned(claim)) => {
            Err(StateError::OwnershipConflict {
                field: field.to_string(),
                held_by: held.clone(),
                requested_by: claim.clone(),
            })
        }
    }
}
