//! Mesh entity kinds that a field can live on.

use std::fmt;

/// The kind of mesh entity a field's degrees of freedom are attached to.
///
/// A field's location is fixed at creation: the buffer layout is sized
/// from the mesh's entity count for that location, so re-requiring a
/// field on a different location is a fatal wiring error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldLocation {
    /// One set of dofs per mesh cell (e.g. pressure, temperature).
    Cell,
    /// One set of dofs per mesh face (e.g. Darcy flux).
    Face,
    /// One set of dofs per mesh node.
    Node,
}

impl fmt::Display for FieldLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell => write!(f, "cell"),
            Self::Face => write!(f, "face"),
            Self::Node => write!(f, "node"),
        }
    }
}
