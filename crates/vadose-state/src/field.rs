//! A single named field: one physical quantity over mesh entities.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use vadose_core::{FieldLocation, Ownership, Requester, StateError};
use vadose_mesh::Mesh;

/// A named container for one physical quantity over the mesh.
///
/// The buffer holds `entity_count(location) × num_dofs` values in
/// entity-major layout (all dofs of entity 0, then entity 1, ...).
/// Location and dof count are fixed at creation; ownership changes only
/// through the registry's arbitration. The `initialized` latch is
/// one-way: it marks that every value has been assigned, either from
/// configuration or by the owning kernel.
#[derive(Clone)]
pub struct Field {
    name: String,
    location: FieldLocation,
    ownership: Ownership,
    num_dofs: usize,
    subfield_names: SmallVec<[String; 4]>,
    initialized: bool,
    vis_enabled: bool,
    mesh: Arc<dyn Mesh>,
    data: Vec<f64>,
}

impl Field {
    /// Create a zero-filled field. Only the registry creates fields.
    pub(crate) fn new(
        name: String,
        location: FieldLocation,
        ownership: Ownership,
        num_dofs: usize,
        mesh: Arc<dyn Mesh>,
    ) -> Self {
        let len = mesh.entity_count(location) * num_dofs;
        Self {
            name,
            location,
            ownership,
            num_dofs,
            subfield_names: SmallVec::new(),
            initialized: false,
            vis_enabled: true,
            mesh,
            data: vec![0.0; len],
        }
    }

    /// Field name (the registry key).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mesh entity kind the field lives on.
    pub fn location(&self) -> FieldLocation {
        self.location
    }

    /// Who holds the writable copy.
    pub fn ownership(&self) -> &Ownership {
        &self.ownership
    }

    pub(crate) fn set_ownership(&mut self, ownership: Ownership) {
        self.ownership = ownership;
    }

    /// Degrees of freedom per mesh entity.
    pub fn num_dofs(&self) -> usize {
        self.num_dofs
    }

    /// Human-readable names for each dof; empty until declared.
    pub fn subfield_names(&self) -> &[String] {
        &self.subfield_names
    }

    /// Declare one name per dof.
    ///
    /// Required before constant-value initialization can match
    /// configuration keys; the count must equal the dof count.
    pub fn set_subfield_names(&mut self, names: Vec<String>) -> Result<(), StateError> {
        if names.len() != self.num_dofs {
            return Err(StateError::SubfieldCountMismatch {
                field: self.name.clone(),
                expected: self.num_dofs,
                got: names.len(),
            });
        }
        self.subfield_names = names.into();
        Ok(())
    }

    /// Whether every value has been assigned.
    pub fn initialized(&self) -> bool {
        self.initialized
    }

    /// Latch the field as fully initialized. One-way.
    pub fn set_initialized(&mut self) {
        self.initialized = true;
    }

    pub(crate) fn copy_values_from(&mut self, other: &Field) {
        self.data.copy_from_slice(&other.data);
        self.initialized = other.initialized;
    }

    /// Whether this field is pushed to the visualization collaborator.
    pub fn vis_enabled(&self) -> bool {
        self.vis_enabled
    }

    /// Include or exclude this field from visualization output.
    pub fn set_vis_enabled(&mut self, enabled: bool) {
        self.vis_enabled = enabled;
    }

    /// Read-only view of the buffer.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Writable view of the buffer, checked against the recorded owner.
    ///
    /// The buffer address is not stable across time steps; callers must
    /// re-acquire it each step.
    pub fn data_mut(&mut self, requester: Requester<'_>) -> Result<&mut [f64], StateError> {
        self.check_write(&requester)?;
        Ok(&mut self.data)
    }

    /// Assign one constant per dof across all entities, or across the
    /// entities of one mesh block.
    pub fn set_constants(
        &mut self,
        requester: Requester<'_>,
        per_dof: &[f64],
        block_id: Option<u32>,
    ) -> Result<(), StateError> {
        self.check_write(&requester)?;
        if per_dof.len() != self.num_dofs {
            return Err(StateError::LengthMismatch {
                field: self.name.clone(),
                expected: self.num_dofs,
                got: per_dof.len(),
            });
        }
        match block_id {
            None => {
                for chunk in self.data.chunks_exact_mut(self.num_dofs) {
                    chunk.copy_from_slice(per_dof);
                }
            }
            Some(block_id) => {
                let mesh = Arc::clone(&self.mesh);
                let entities = mesh
                    .block_entities(self.location, block_id)
                    .ok_or(StateError::UnknownBlock { block_id })?;
                for &e in entities {
                    let start = e * self.num_dofs;
                    self.data[start..start + self.num_dofs].copy_from_slice(per_dof);
                }
            }
        }
        Ok(())
    }

    /// Assign a spatial 3-vector to a single-dof face field by
    /// projecting it onto each face's outward unit normal.
    pub fn set_vector_constants(
        &mut self,
        requester: Requester<'_>,
        v: [f64; 3],
        block_id: Option<u32>,
    ) -> Result<(), StateError> {
        self.check_write(&requester)?;
        if self.num_dofs != 1 {
            return Err(StateError::LengthMismatch {
                field: self.name.clone(),
                expected: 1,
                got: self.num_dofs,
            });
        }
        if self.location != FieldLocation::Face {
            return Err(StateError::LocationConflict {
                field: self.name.clone(),
                existing: self.location,
                requested: FieldLocation::Face,
            });
        }
        let mesh = Arc::clone(&self.mesh);
        let assign = |data: &mut [f64], face: usize| {
            if let Some(n) = mesh.face_normal(face) {
                data[face] = v[0] * n[0] + v[1] * n[1] + v[2] * n[2];
            }
        };
        match block_id {
            None => {
                for face in 0..self.data.len() {
                    assign(&mut self.data, face);
                }
            }
            Some(block_id) => {
                let faces = mesh
                    .block_entities(FieldLocation::Face, block_id)
                    .ok_or(StateError::UnknownBlock { block_id })?;
                for &face in faces {
                    assign(&mut self.data, face);
                }
            }
        }
        Ok(())
    }

    /// Overwrite the whole buffer from a slice of matching length.
    pub fn set_values(
        &mut self,
        requester: Requester<'_>,
        values: &[f64],
    ) -> Result<(), StateError> {
        self.check_write(&requester)?;
        if values.len() != self.data.len() {
            return Err(StateError::LengthMismatch {
                field: self.name.clone(),
                expected: self.data.len(),
                got: values.len(),
            });
        }
        self.data.copy_from_slice(values);
        Ok(())
    }

    /// Replace the buffer wholesale, avoiding a copy when the caller
    /// already owns a vector of the right length.
    pub fn replace_buffer(
        &mut self,
        requester: Requester<'_>,
        values: Vec<f64>,
    ) -> Result<(), StateError> {
        self.check_write(&requester)?;
        if values.len() != self.data.len() {
            return Err(StateError::LengthMismatch {
                field: self.name.clone(),
                expected: self.data.len(),
                got: values.len(),
            });
        }
        self.data = values;
        Ok(())
    }

    fn check_write(&self, requester: &Requester<'_>) -> Result<(), StateError> {
        if self.ownership.permits(requester) {
            Ok(())
        } else {
            Err(StateError::NotOwner {
                field: self.name.clone(),
                owner: self.ownership.to_string(),
                requester: requester.to_string(),
            })
        }
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("location", &self.location)
            .field("ownership", &self.ownership)
            .field("num_dofs", &self.num_dofs)
            .field("initialized", &self.initialized)
            .field("vis_enabled", &self.vis_enabled)
            .field("len", &self.data.len())
            .finish()
    }
}
