//! Field registry and simulation state for Vadose.
//!
//! [`State`] is the single shared-mutable-state arena of a time step: a
//! catalog of named [`Field`]s with run-time write-ownership
//! arbitration, global scalars, the simulation clock, and
//! configuration-driven initialization. Working copies are produced by
//! `Clone` and committed back with the schema-checked
//! [`State::assign_from`], which is what makes step retry cheap and safe.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod field;
pub mod state;
pub mod vis;

pub use field::Field;
pub use state::State;
pub use vis::Vis;
