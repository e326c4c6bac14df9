//! Core types and contracts for the Vadose multiphysics framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! field locations, the ownership-arbitration state machine, the error
//! taxonomy (fatal structural errors vs recoverable step failures), and
//! the hierarchical [`ParameterList`] configuration collaborator.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod location;
pub mod ownership;

pub use config::{ParameterList, ParameterValue};
pub use error::{ControlError, StateError, StepFailure};
pub use location::FieldLocation;
pub use ownership::{arbitrate, Arbitration, Ownership, Requester};
