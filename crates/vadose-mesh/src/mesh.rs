//! The [`Mesh`] trait: the registry's opaque spatial collaborator.

use vadose_core::FieldLocation;

/// Read-only spatial queries the field registry depends on.
///
/// A mesh is shared (behind `Arc<dyn Mesh>`) between the registry, its
/// working copies, and the process kernels; nothing in this crate
/// mutates it. Geometry, connectivity, and discretization live behind
/// richer interfaces elsewhere — the registry only needs sizing, block
/// membership, and face orientation.
///
/// # Object safety
///
/// Designed for use as `dyn Mesh`. `Send + Sync` so registries can be
/// handed to test harnesses freely; the framework itself is
/// single-threaded.
pub trait Mesh: Send + Sync + 'static {
    /// Number of mesh entities of the given kind.
    fn entity_count(&self, location: FieldLocation) -> usize;

    /// All declared mesh block ids, in a deterministic order.
    fn block_ids(&self) -> Vec<u32>;

    /// Indices of the entities of `location` belonging to `block_id`.
    ///
    /// Returns `None` if the block id is unknown. An empty slice is a
    /// valid answer: a block may contain cells but no faces.
    fn block_entities(&self, location: FieldLocation, block_id: u32) -> Option<&[usize]>;

    /// Outward unit normal of a face, for projecting vector-valued
    /// initial conditions onto face-located scalar fields.
    ///
    /// Returns `None` if `face` is out of range.
    fn face_normal(&self, face: usize) -> Option<[f64; 3]>;
}
