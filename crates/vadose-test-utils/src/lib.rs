//! Test fixtures and mock kernels for Vadose development.
//!
//! Provides small meshes, canned parameter lists, and mock
//! [`ProcessKernel`](vadose_pk::ProcessKernel) implementations for
//! exercising the registry and coupling layers without real physics.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    base_plist, two_block_mesh, unit_mesh, ConstantKernel, FailingKernel, RecordingKernel,
};
