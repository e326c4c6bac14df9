//! Mesh collaborator interface for Vadose simulations.
//!
//! The registry never owns or mutates the mesh; it only queries entity
//! counts, block membership, and face orientation through the [`Mesh`]
//! trait. [`BlockMesh`] is a concrete in-memory implementation used by
//! drivers and tests.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block_mesh;
pub mod error;
pub mod mesh;

pub use block_mesh::BlockMesh;
pub use error::MeshError;
pub use mesh::Mesh;
