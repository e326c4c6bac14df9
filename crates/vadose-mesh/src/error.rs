//! Error types for mesh construction.

use std::fmt;

/// Errors arising from building a [`BlockMesh`](crate::BlockMesh).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Attempted to construct a mesh with zero cells.
    EmptyMesh,
    /// A block assignment referenced an entity index out of range.
    EntityOutOfRange {
        /// The block being assigned.
        block_id: u32,
        /// The offending entity index.
        index: usize,
        /// Number of entities of that kind.
        count: usize,
    },
    /// A face normal was supplied with zero length.
    DegenerateNormal {
        /// The face with the zero-length normal.
        face: usize,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMesh => write!(f, "mesh must have at least one cell"),
            Self::EntityOutOfRange {
                block_id,
                index,
                count,
            } => write!(
                f,
                "block {block_id} references entity {index}, but only {count} exist"
            ),
            Self::DegenerateNormal { face } => {
                write!(f, "face {face} has a zero-length normal")
            }
        }
    }
}

impl std::error::Error for MeshError {}
