//! The field registry: ownership arbitration, accessors, clock, and
//! configuration-driven initialization.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use vadose_core::{
    arbitrate, Arbitration, FieldLocation, Ownership, ParameterList, Requester, StateError,
};
use vadose_mesh::Mesh;

use crate::field::Field;
use crate::vis::Vis;

/// The catalog of simulation fields and global scalars for one run.
///
/// One canonical `State` is constructed and populated at start-up:
/// kernels declare their fields through [`require_field`](Self::require_field),
/// then [`initialize`](Self::initialize) applies configuration-supplied
/// initial conditions. Per-step working copies are produced with
/// `Clone`; a failed step is discarded, a successful one is committed
/// back through [`assign_from`](Self::assign_from), which overwrites
/// values but never structure.
///
/// The name map and field list are kept consistent by construction:
/// fields are only ever appended, never removed.
#[derive(Clone)]
pub struct State {
    mesh: Arc<dyn Mesh>,
    fields: Vec<Field>,
    name_map: IndexMap<String, usize>,
    density: f64,
    viscosity: f64,
    gravity: [f64; 3],
    time: f64,
    cycle: u64,
}

impl State {
    /// Create an empty registry over a shared mesh.
    pub fn new(mesh: Arc<dyn Mesh>) -> Self {
        Self {
            mesh,
            fields: Vec::new(),
            name_map: IndexMap::new(),
            density: 0.0,
            viscosity: 0.0,
            gravity: [0.0; 3],
            time: 0.0,
            cycle: 0,
        }
    }

    /// The shared mesh handle.
    pub fn mesh(&self) -> &Arc<dyn Mesh> {
        &self.mesh
    }

    // ── Field requirement and arbitration ──────────────────────────

    /// Declare intent to use a field.
    ///
    /// The single entry point through which any component — a kernel,
    /// or the framework itself via [`Ownership::Unowned`] — registers a
    /// field. On first mention the field is created zero-filled with
    /// the requested ownership; on re-mention the request is arbitrated
    /// against the existing record (see [`arbitrate`]). Ownership
    /// conflicts and layout mismatches are fatal: they are wiring bugs,
    /// not run-time conditions.
    ///
    /// `num_dofs` must be at least 1; every registered field therefore
    /// has a non-empty per-entity layout.
    pub fn require_field(
        &mut self,
        name: &str,
        location: FieldLocation,
        ownership: Ownership,
        num_dofs: usize,
    ) -> Result<(), StateError> {
        if num_dofs == 0 {
            return Err(StateError::ZeroDofs {
                field: name.to_string(),
            });
        }
        match self.name_map.get(name).copied() {
            None => {
                let index = self.fields.len();
                self.fields.push(Field::new(
                    name.to_string(),
                    location,
                    ownership,
                    num_dofs,
                    Arc::clone(&self.mesh),
                ));
                self.name_map.insert(name.to_string(), index);
                Ok(())
            }
            Some(index) => {
                let field = &self.fields[index];
                let outcome = arbitrate(
                    name,
                    field.ownership(),
                    &ownership,
                    (field.location(), field.num_dofs()),
                    (location, num_dofs),
                )?;
                if let Arbitration::Transfer(next) = outcome {
                    self.fields[index].set_ownership(next);
                }
                Ok(())
            }
        }
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// Number of registered fields.
    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    /// Iterate over all fields in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// The full record for a named field.
    pub fn field(&self, name: &str) -> Result<&Field, StateError> {
        let index = self.index_of(name)?;
        Ok(&self.fields[index])
    }

    /// Mutable record access for metadata (subfield names, vis flag).
    ///
    /// Value writes through the record still go through the
    /// requester-checked setters on [`Field`].
    pub fn field_mut(&mut self, name: &str) -> Result<&mut Field, StateError> {
        let index = self.index_of(name)?;
        Ok(&mut self.fields[index])
    }

    /// Read-only view of a field's buffer.
    pub fn get_field(&self, name: &str) -> Result<&[f64], StateError> {
        Ok(self.field(name)?.data())
    }

    /// Writable view of a field's buffer, checked against the owner.
    pub fn get_field_mut(
        &mut self,
        name: &str,
        requester: Requester<'_>,
    ) -> Result<&mut [f64], StateError> {
        self.field_mut(name)?.data_mut(requester)
    }

    // ── Delegating setters ─────────────────────────────────────────

    /// Assign one constant per dof, everywhere or within one block.
    pub fn set_field(
        &mut self,
        name: &str,
        requester: Requester<'_>,
        per_dof: &[f64],
        block_id: Option<u32>,
    ) -> Result<(), StateError> {
        self.field_mut(name)?.set_constants(requester, per_dof, block_id)
    }

    /// Project a 3-vector onto a single-dof face field.
    pub fn set_vector_field(
        &mut self,
        name: &str,
        requester: Requester<'_>,
        v: [f64; 3],
        block_id: Option<u32>,
    ) -> Result<(), StateError> {
        self.field_mut(name)?.set_vector_constants(requester, v, block_id)
    }

    /// Replace a field's buffer wholesale.
    pub fn set_field_buffer(
        &mut self,
        name: &str,
        requester: Requester<'_>,
        values: Vec<f64>,
    ) -> Result<(), StateError> {
        self.field_mut(name)?.replace_buffer(requester, values)
    }

    /// Declare per-dof names for a field.
    pub fn set_subfield_names(
        &mut self,
        name: &str,
        subfield_names: Vec<String>,
    ) -> Result<(), StateError> {
        self.field_mut(name)?.set_subfield_names(subfield_names)
    }

    // ── Global scalars and clock ───────────────────────────────────

    /// Water density.
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Set the water density. Single canonical value, no arbitration.
    pub fn set_density(&mut self, density: f64) {
        self.density = density;
    }

    /// Dynamic viscosity.
    pub fn viscosity(&self) -> f64 {
        self.viscosity
    }

    /// Set the dynamic viscosity.
    pub fn set_viscosity(&mut self, viscosity: f64) {
        self.viscosity = viscosity;
    }

    /// Gravity vector.
    pub fn gravity(&self) -> [f64; 3] {
        self.gravity
    }

    /// Set the gravity vector.
    pub fn set_gravity(&mut self, gravity: [f64; 3]) {
        self.gravity = gravity;
    }

    /// Simulation time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Set the simulation time.
    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    /// Advance the simulation time by `dt`.
    pub fn advance_time(&mut self, dt: f64) {
        self.time += dt;
    }

    /// Step (cycle) counter.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Set the cycle counter.
    pub fn set_cycle(&mut self, cycle: u64) {
        self.cycle = cycle;
    }

    /// Increment the cycle counter.
    pub fn advance_cycle(&mut self) {
        self.cycle += 1;
    }

    // ── Initialization ─────────────────────────────────────────────

    /// Apply configuration-supplied initial conditions.
    ///
    /// Reads the mandatory gravity components and optional density and
    /// viscosity, then assigns constant values to fields in two passes:
    ///
    /// 1. **Global pass**: every cell-located field whose declared
    ///    subfield-name count equals its dof count is matched against
    ///    `"Constant <subfield name>"` keys. Only if *all* subfields
    ///    are present is the field assigned and latched — all-or-nothing
    ///    per field, never a partial assignment.
    /// 2. **Block pass**: `"Number of mesh blocks"` (mandatory, may be
    ///    zero) declares how many `"Mesh block <n>"` sublists follow,
    ///    each carrying a `"Mesh block ID"`;
    ///    the same matching runs against the block's sublist, assigning
    ///    only the block's entities — block overrides layer over the
    ///    global pass. Within a block, single-dof face fields are also
    ///    matched by the `"Constant <name> x/y/z"` convention and
    ///    assigned by normal projection.
    ///
    /// Fields the configuration does not cover stay unlatched; their
    /// owning kernels are expected to initialize them before
    /// [`verify_initialized`](Self::verify_initialized) is consulted.
    pub fn initialize(&mut self, plist: &ParameterList) -> Result<(), StateError> {
        let gravity = [
            plist.require_scalar("Gravity x")?,
            plist.require_scalar("Gravity y")?,
            plist.require_scalar("Gravity z")?,
        ];
        self.set_gravity(gravity);

        if let Some(density) = plist.scalar("Constant water density") {
            self.set_density(density);
        }
        if let Some(viscosity) = plist.scalar("Constant viscosity") {
            self.set_viscosity(viscosity);
        }

        // Global pass over cell fields.
        self.assign_cell_constants(plist, None)?;

        // Block-scoped overrides. The count is mandatory; a run with no
        // block overrides declares zero explicitly.
        let num_blocks = plist.require_integer("Number of mesh blocks")?;
        for nb in 1..=num_blocks {
            let key = format!("Mesh block {nb}");
            let sublist = plist
                .sublist(&key)
                .ok_or(StateError::MissingParameter { key })?;
            let block_id = sublist.require_integer("Mesh block ID")? as u32;

            self.assign_cell_constants(sublist, Some(block_id))?;
            self.assign_face_vectors(sublist, block_id)?;
        }
        Ok(())
    }

    /// One constant-matching pass over cell fields, global or block-scoped.
    fn assign_cell_constants(
        &mut self,
        plist: &ParameterList,
        block_id: Option<u32>,
    ) -> Result<(), StateError> {
        for index in 0..self.fields.len() {
            let field = &self.fields[index];
            if field.location() != FieldLocation::Cell {
                continue;
            }
            let names = field.subfield_names();
            if names.is_empty() || names.len() != field.num_dofs() {
                continue;
            }
            let names: Vec<String> = names.to_vec();

            let mut per_dof = Vec::with_capacity(names.len());
            let mut got_them_all = true;
            for subfield in &names {
                match plist.scalar(&format!("Constant {subfield}")) {
                    Some(value) => per_dof.push(value),
                    None => {
                        got_them_all = false;
                        break;
                    }
                }
            }
            if got_them_all {
                let field = &mut self.fields[index];
                field.set_constants(Requester::Registry, &per_dof, block_id)?;
                field.set_initialized();
            }
        }
        Ok(())
    }

    /// Vector-by-suffix matching for single-dof face fields in a block.
    fn assign_face_vectors(
        &mut self,
        sublist: &ParameterList,
        block_id: u32,
    ) -> Result<(), StateError> {
        for index in 0..self.fields.len() {
            let field = &self.fields[index];
            if field.location() != FieldLocation::Face || field.num_dofs() != 1 {
                continue;
            }
            let name = field.name().to_string();
            if !sublist.has(&format!("Constant {name} x")) {
                continue;
            }
            // Once the x component is present the rest are mandatory.
            let v = [
                sublist.require_scalar(&format!("Constant {name} x"))?,
                sublist.require_scalar(&format!("Constant {name} y"))?,
                sublist.require_scalar(&format!("Constant {name} z"))?,
            ];
            let field = &mut self.fields[index];
            field.set_vector_constants(Requester::Registry, v, Some(block_id))?;
            field.set_initialized();
        }
        Ok(())
    }

    /// Whether every field's initialized latch is set.
    pub fn check_all_initialized(&self) -> bool {
        self.fields.iter().all(Field::initialized)
    }

    /// Names of the fields still missing initial values.
    pub fn uninitialized_fields(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| !f.initialized())
            .map(|f| f.name().to_string())
            .collect()
    }

    /// Fail-fast gate consulted before time-stepping begins.
    pub fn verify_initialized(&self) -> Result<(), StateError> {
        let missing = self.uninitialized_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(StateError::Uninitialized { fields: missing })
        }
    }

    // ── Snapshot protocol ──────────────────────────────────────────

    /// Overwrite this registry's values from a schema-identical other.
    ///
    /// Values only — buffers, latches, scalars, and the clock — never
    /// structure. Both registries must hold the same fields in the same
    /// order with the same layout; this is guaranteed when one is a
    /// `Clone` of the other, which is the only supported way to produce
    /// working copies. A mismatch is a driver bug in the snapshot/retry
    /// protocol and leaves `self` untouched.
    pub fn assign_from(&mut self, other: &State) -> Result<(), StateError> {
        if self.fields.len() != other.fields.len() {
            return Err(StateError::SchemaMismatch {
                reason: format!(
                    "field count {} vs {}",
                    self.fields.len(),
                    other.fields.len()
                ),
            });
        }
        for (mine, theirs) in self.fields.iter().zip(&other.fields) {
            if mine.name() != theirs.name()
                || mine.location() != theirs.location()
                || mine.num_dofs() != theirs.num_dofs()
                || mine.data().len() != theirs.data().len()
            {
                return Err(StateError::SchemaMismatch {
                    reason: format!(
                        "field '{}' does not match '{}'",
                        mine.name(),
                        theirs.name()
                    ),
                });
            }
        }

        for (mine, theirs) in self.fields.iter_mut().zip(&other.fields) {
            mine.copy_values_from(theirs);
        }
        self.density = other.density;
        self.viscosity = other.viscosity;
        self.gravity = other.gravity;
        self.time = other.time;
        self.cycle = other.cycle;
        Ok(())
    }

    // ── Visualization ──────────────────────────────────────────────

    /// Push vis-enabled fields to the visualization collaborator,
    /// conditioned on its own output-cadence decision.
    pub fn write_vis(&self, vis: &mut dyn Vis) {
        if vis.dump_requested(self.cycle) && !vis.is_disabled() {
            vis.create_timestep(self.time, self.cycle);
            for field in &self.fields {
                if field.vis_enabled() {
                    vis.write_vector(field.name(), field.data(), field.subfield_names());
                }
            }
        }
    }

    fn index_of(&self, name: &str) -> Result<usize, StateError> {
        self.name_map
            .get(name)
            .copied()
            .ok_or_else(|| StateError::UnknownField {
                name: name.to_string(),
            })
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("fields", &self.fields.len())
            .field("density", &self.density)
            .field("viscosity", &self.viscosity)
            .field("gravity", &self.gravity)
            .field("time", &self.time)
            .field("cycle", &self.cycle)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vadose_mesh::BlockMesh;

    fn mesh() -> Arc<dyn Mesh> {
        Arc::new(BlockMesh::new(4, 5).unwrap())
    }

    fn state_with_pressure() -> State {
        let mut state = State::new(mesh());
        state
            .require_field("pressure", FieldLocation::Cell, Ownership::Unowned, 1)
            .unwrap();
        state
    }

    #[test]
    fn first_mention_creates_field() {
        let state = state_with_pressure();
        assert_eq!(state.num_fields(), 1);
        let field = state.field("pressure").unwrap();
        assert_eq!(field.ownership(), &Ownership::Unowned);
        assert_eq!(field.data().len(), 4);
    }

    #[test]
    fn first_kernel_claim_transfers_ownership() {
        let mut state = state_with_pressure();
        state
            .require_field("pressure", FieldLocation::Cell, Ownership::owned("flow"), 1)
            .unwrap();
        assert_eq!(
            state.field("pressure").unwrap().ownership(),
            &Ownership::owned("flow")
        );
    }

    #[test]
    fn second_claimant_is_fatal() {
        let mut state = state_with_pressure();
        state
            .require_field("pressure", FieldLocation::Cell, Ownership::owned("flow"), 1)
            .unwrap();
        let err = state
            .require_field("pressure", FieldLocation::Cell, Ownership::owned("energy"), 1)
            .unwrap_err();
        assert!(matches!(err, StateError::OwnershipConflict { .. }));
        // Owner unchanged after the failed claim.
        assert_eq!(
            state.field("pressure").unwrap().ownership(),
            &Ownership::owned("flow")
        );
    }

    #[test]
    fn registry_re_require_keeps_owner() {
        let mut state = state_with_pressure();
        state
            .require_field("pressure", FieldLocation::Cell, Ownership::owned("flow"), 1)
            .unwrap();
        state
            .require_field("pressure", FieldLocation::Cell, Ownership::Unowned, 1)
            .unwrap();
        assert_eq!(
            state.field("pressure").unwrap().ownership(),
            &Ownership::owned("flow")
        );
    }

    #[test]
    fn zero_dof_field_is_rejected() {
        let mut state = State::new(mesh());
        let err = state
            .require_field("pressure", FieldLocation::Cell, Ownership::Unowned, 0)
            .unwrap_err();
        assert!(matches!(err, StateError::ZeroDofs { .. }));
        // Nothing was registered, so the write path cannot be reached.
        assert_eq!(state.num_fields(), 0);
    }

    #[test]
    fn location_mismatch_is_fatal() {
        let mut state = state_with_pressure();
        let err = state
            .require_field("pressure", FieldLocation::Face, Ownership::Unowned, 1)
            .unwrap_err();
        assert!(matches!(err, StateError::LocationConflict { .. }));
    }

    #[test]
    fn unknown_field_access_is_fatal() {
        let mut state = state_with_pressure();
        assert!(matches!(
            state.get_field("temperature").unwrap_err(),
            StateError::UnknownField { .. }
        ));
        assert!(matches!(
            state
                .set_field("temperature", Requester::Registry, &[0.0], None)
                .unwrap_err(),
            StateError::UnknownField { .. }
        ));
    }

    #[test]
    fn mutable_access_enforces_ownership() {
        let mut state = state_with_pressure();
        state
            .require_field("pressure", FieldLocation::Cell, Ownership::owned("flow"), 1)
            .unwrap();
        assert!(state.get_field_mut("pressure", Requester::Pk("flow")).is_ok());
        let err = state
            .get_field_mut("pressure", Requester::Pk("energy"))
            .unwrap_err();
        assert!(matches!(err, StateError::NotOwner { .. }));
    }

    #[test]
    fn clone_is_value_independent() {
        let mut a = state_with_pressure();
        a.set_field("pressure", Requester::Registry, &[1.0], None)
            .unwrap();
        let b = a.clone();
        a.set_field("pressure", Requester::Registry, &[9.0], None)
            .unwrap();
        assert_eq!(b.get_field("pressure").unwrap(), &[1.0; 4]);
        assert_eq!(a.get_field("pressure").unwrap(), &[9.0; 4]);
    }

    #[test]
    fn assign_from_copies_values_and_clock() {
        let mut a = state_with_pressure();
        let mut b = a.clone();
        b.set_field("pressure", Requester::Registry, &[5.0], None)
            .unwrap();
        b.field_mut("pressure").unwrap().set_initialized();
        b.set_density(998.2);
        b.advance_time(0.5);
        b.advance_cycle();

        a.assign_from(&b).unwrap();
        assert_eq!(a.get_field("pressure").unwrap(), &[5.0; 4]);
        assert!(a.field("pressure").unwrap().initialized());
        assert_eq!(a.density(), 998.2);
        assert_eq!(a.time(), 0.5);
        assert_eq!(a.cycle(), 1);
    }

    #[test]
    fn assign_from_mismatched_schema_leaves_target_unchanged() {
        let mut a = state_with_pressure();
        a.set_field("pressure", Requester::Registry, &[3.0], None)
            .unwrap();

        let mut b = State::new(mesh());
        b.require_field("pressure", FieldLocation::Cell, Ownership::Unowned, 1)
            .unwrap();
        b.require_field("temperature", FieldLocation::Cell, Ownership::Unowned, 1)
            .unwrap();

        let err = a.assign_from(&b).unwrap_err();
        assert!(matches!(err, StateError::SchemaMismatch { .. }));
        assert_eq!(a.get_field("pressure").unwrap(), &[3.0; 4]);
        assert_eq!(a.num_fields(), 1);
    }

    #[test]
    fn verify_initialized_names_the_stragglers() {
        let mut state = state_with_pressure();
        state
            .require_field("temperature", FieldLocation::Cell, Ownership::Unowned, 1)
            .unwrap();
        state.field_mut("pressure").unwrap().set_initialized();
        assert!(!state.check_all_initialized());
        match state.verify_initialized() {
            Err(StateError::Uninitialized { fields }) => {
                assert_eq!(fields, vec!["temperature".to_string()]);
            }
            other => panic!("expected Uninitialized, got {other:?}"),
        }
    }

    #[test]
    fn initialize_requires_gravity() {
        let mut state = state_with_pressure();
        let plist = ParameterList::new();
        match state.initialize(&plist) {
            Err(StateError::MissingParameter { key }) => assert_eq!(key, "Gravity x"),
            other => panic!("expected MissingParameter, got {other:?}"),
        }
    }

    // ── Snapshot invariants over random schemas ────────────────────

    use proptest::prelude::*;

    fn arb_layouts() -> impl Strategy<Value = Vec<(FieldLocation, usize)>> {
        prop::collection::vec(
            (
                prop_oneof![Just(FieldLocation::Cell), Just(FieldLocation::Face)],
                1usize..4,
            ),
            1..5,
        )
    }

    /// Registry over `mesh()` with fields `f0..fN` per `layouts`, each
    /// buffer filled with `fill + index`.
    fn build_registry(layouts: &[(FieldLocation, usize)], fill: f64) -> State {
        let mut state = State::new(mesh());
        for (i, &(location, dofs)) in layouts.iter().enumerate() {
            let name = format!("f{i}");
            state
                .require_field(&name, location, Ownership::Unowned, dofs)
                .unwrap();
            let len = state.field(&name).unwrap().data().len();
            state
                .set_field_buffer(&name, Requester::Registry, vec![fill + i as f64; len])
                .unwrap();
        }
        state
    }

    proptest! {
        /// A clone shares no buffers with its source: rewriting every
        /// field of the original leaves the copy at its old values.
        #[test]
        fn clone_is_independent_of_later_writes(
            layouts in arb_layouts(),
            before in -1.0e6..1.0e6f64,
            after in -1.0e6..1.0e6f64,
        ) {
            prop_assume!(before != after);
            let mut a = build_registry(&layouts, before);
            let b = a.clone();
            for i in 0..layouts.len() {
                let name = format!("f{i}");
                let len = a.field(&name).unwrap().data().len();
                a.set_field_buffer(&name, Requester::Registry, vec![after; len])
                    .unwrap();
            }
            for i in 0..layouts.len() {
                let name = format!("f{i}");
                let expected = before + i as f64;
                prop_assert!(b.get_field(&name).unwrap().iter().all(|&v| v == expected));
            }
        }

        /// Committing a working copy mirrors every buffer and the clock
        /// into the canonical registry.
        #[test]
        fn assign_from_mirrors_buffers_and_clock(
            layouts in arb_layouts(),
            canonical_fill in -1.0e6..1.0e6f64,
            working_fill in -1.0e6..1.0e6f64,
        ) {
            let mut a = build_registry(&layouts, canonical_fill);
            let mut b = a.clone();
            for i in 0..layouts.len() {
                let name = format!("f{i}");
                let len = b.field(&name).unwrap().data().len();
                b.set_field_buffer(&name, Requester::Registry, vec![working_fill; len])
                    .unwrap();
            }
            b.advance_time(0.25);
            b.advance_cycle();

            a.assign_from(&b).unwrap();
            for i in 0..layouts.len() {
                let name = format!("f{i}");
                prop_assert_eq!(a.get_field(&name).unwrap(), b.get_field(&name).unwrap());
            }
            prop_assert_eq!(a.time(), b.time());
            prop_assert_eq!(a.cycle(), b.cycle());
        }

        /// Any schema divergence (extra field, changed dof count) makes
        /// `assign_from` fail without touching the target's values.
        #[test]
        fn mismatched_schema_never_alters_the_target(
            layouts in arb_layouts(),
            fill in -1.0e6..1.0e6f64,
        ) {
            let mut a = build_registry(&layouts, fill);

            let mut extra = build_registry(&layouts, fill + 1.0);
            extra
                .require_field("extra", FieldLocation::Cell, Ownership::Unowned, 1)
                .unwrap();
            prop_assert!(a.assign_from(&extra).is_err());

            let mut altered = layouts.clone();
            altered[0].1 = if altered[0].1 == 1 { 2 } else { 1 };
            let resized = build_registry(&altered, fill + 2.0);
            prop_assert!(a.assign_from(&resized).is_err());

            for i in 0..layouts.len() {
                let name = format!("f{i}");
                let expected = fill + i as f64;
                prop_assert!(a.get_field(&name).unwrap().iter().all(|&v| v == expected));
            }
        }
    }
}
