//! In-memory mesh with named blocks.

use indexmap::IndexMap;

use vadose_core::FieldLocation;

use crate::error::MeshError;
use crate::mesh::Mesh;

#[derive(Clone, Debug, Default)]
struct BlockEntities {
    cells: Vec<usize>,
    faces: Vec<usize>,
}

/// A flat mesh of counted entities partitioned into named blocks.
///
/// `BlockMesh` carries no geometry beyond face normals: it answers the
/// sizing and membership queries the field registry needs and nothing
/// more. Drivers and tests build one directly; production meshes sit
/// behind the same [`Mesh`] trait.
///
/// Faces default to a vertical (`+z`) unit normal, the common case for
/// column models; override per face with [`set_face_normal`](Self::set_face_normal).
///
/// # Examples
///
/// ```
/// use vadose_mesh::{BlockMesh, Mesh};
/// use vadose_core::FieldLocation;
///
/// let mut mesh = BlockMesh::new(4, 5).unwrap();
/// mesh.assign_block_cells(1, vec![0, 1]).unwrap();
/// mesh.assign_block_cells(2, vec![2, 3]).unwrap();
/// assert_eq!(mesh.entity_count(FieldLocation::Cell), 4);
/// assert_eq!(mesh.block_entities(FieldLocation::Cell, 2), Some(&[2, 3][..]));
/// ```
#[derive(Clone, Debug)]
pub struct BlockMesh {
    cell_count: usize,
    face_count: usize,
    node_count: usize,
    blocks: IndexMap<u32, BlockEntities>,
    normals: Vec<[f64; 3]>,
}

impl BlockMesh {
    /// Create a mesh with the given cell and face counts and no blocks.
    ///
    /// Returns `Err(MeshError::EmptyMesh)` if `cell_count == 0`.
    pub fn new(cell_count: usize, face_count: usize) -> Result<Self, MeshError> {
        if cell_count == 0 {
            return Err(MeshError::EmptyMesh);
        }
        Ok(Self {
            cell_count,
            face_count,
            node_count: 0,
            blocks: IndexMap::new(),
            normals: vec![[0.0, 0.0, 1.0]; face_count],
        })
    }

    /// Set the node count (zero unless a driver needs node fields).
    pub fn set_node_count(&mut self, node_count: usize) {
        self.node_count = node_count;
    }

    /// Assign cells to a block, creating the block if needed.
    pub fn assign_block_cells(
        &mut self,
        block_id: u32,
        cells: Vec<usize>,
    ) -> Result<(), MeshError> {
        if let Some(&index) = cells.iter().find(|&&c| c >= self.cell_count) {
            return Err(MeshError::EntityOutOfRange {
                block_id,
                index,
                count: self.cell_count,
            });
        }
        self.blocks.entry(block_id).or_default().cells = cells;
        Ok(())
    }

    /// Assign faces to a block, creating the block if needed.
    pub fn assign_block_faces(
        &mut self,
        block_id: u32,
        faces: Vec<usize>,
    ) -> Result<(), MeshError> {
        if let Some(&index) = faces.iter().find(|&&f| f >= self.face_count) {
            return Err(MeshError::EntityOutOfRange {
                block_id,
                index,
                count: self.face_count,
            });
        }
        self.blocks.entry(block_id).or_default().faces = faces;
        Ok(())
    }

    /// Override the outward unit normal of one face.
    ///
    /// The supplied vector is normalized; a zero-length vector is
    /// rejected as [`MeshError::DegenerateNormal`].
    pub fn set_face_normal(&mut self, face: usize, normal: [f64; 3]) -> Result<(), MeshError> {
        if face >= self.face_count {
            return Err(MeshError::EntityOutOfRange {
                block_id: 0,
                index: face,
                count: self.face_count,
            });
        }
        let mag = (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
        if mag == 0.0 || !mag.is_finite() {
            return Err(MeshError::DegenerateNormal { face });
        }
        self.normals[face] = [normal[0] / mag, normal[1] / mag, normal[2] / mag];
        Ok(())
    }
}

impl Mesh for BlockMesh {
    fn entity_count(&self, location: FieldLocation) -> usize {
        match location {
            FieldLocation::Cell => self.cell_count,
            FieldLocation::Face => self.face_count,
            FieldLocation::Node => self.node_count,
        }
    }

    fn block_ids(&self) -> Vec<u32> {
        self.blocks.keys().copied().collect()
    }

    fn block_entities(&self, location: FieldLocation, block_id: u32) -> Option<&[usize]> {
        let block = self.blocks.get(&block_id)?;
        match location {
            FieldLocation::Cell => Some(&block.cells),
            FieldLocation::Face => Some(&block.faces),
            FieldLocation::Node => Some(&[]),
        }
    }

    fn face_normal(&self, face: usize) -> Option<[f64; 3]> {
        self.normals.get(face).copied()
    }
}
