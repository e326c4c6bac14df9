//! Process kernel contract for Vadose simulations.
//!
//! A process kernel is one self-contained physical model — Richards
//! flow, the energy equation, a reactive transport step — advancing the
//! fields it owns over one time step. The coupling layer treats every
//! kernel uniformly through the [`ProcessKernel`] trait and never
//! depends on concrete physics.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod kernel;

pub use kernel::ProcessKernel;
