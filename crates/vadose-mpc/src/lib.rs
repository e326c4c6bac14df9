//! Multiphysics coupling and time-step orchestration for Vadose.
//!
//! [`WeakMpc`] composes independently-implemented process kernels into
//! a tree and advances them sequentially each step;
//! [`TimeStepController`] drives the root of the tree through the
//! snapshot/advance/commit-or-rollback protocol with adaptive dt.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod controller;
pub mod metrics;
pub mod weak;

pub use controller::{ConfigError, ControllerConfig, StepReport, TimeStepController};
pub use metrics::StepMetrics;
pub use weak::WeakMpc;
