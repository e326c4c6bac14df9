//! Meshes, parameter lists, and mock kernels shared across test suites.

use std::sync::Arc;

use vadose_core::{FieldLocation, Ownership, ParameterList, Requester, StateError, StepFailure};
use vadose_mesh::{BlockMesh, Mesh};
use vadose_pk::ProcessKernel;
use vadose_state::State;

/// Single-cell mesh with no faces, for tests that only need a registry.
pub fn unit_mesh() -> Arc<dyn Mesh> {
    // A one-cell mesh cannot fail to construct.
    Arc::new(BlockMesh::new(1, 0).unwrap())
}

/// Ten cells: block 1 holds cells 0..6, block 2 holds cells 6..10.
/// Four faces, two of them in block 2, with mixed normals.
pub fn two_block_mesh() -> Arc<dyn Mesh> {
    let mut mesh = BlockMesh::new(10, 4).unwrap();
    mesh.assign_block_cells(1, (0..6).collect()).unwrap();
    mesh.assign_block_cells(2, (6..10).collect()).unwrap();
    mesh.assign_block_faces(2, vec![1, 3]).unwrap();
    mesh.set_face_normal(1, [1.0, 0.0, 0.0]).unwrap();
    Arc::new(mesh)
}

/// A parameter list carrying the mandatory keys: the gravity vector
/// and a zero mesh-block count.
pub fn base_plist() -> ParameterList {
    let mut plist = ParameterList::new();
    plist.set_scalar("Gravity x", 0.0);
    plist.set_scalar("Gravity y", 0.0);
    plist.set_scalar("Gravity z", -9.80665);
    plist.set_integer("Number of mesh blocks", 0);
    plist
}

/// Owns one cell field and writes a constant into it every advance.
pub struct ConstantKernel {
    name: String,
    field: String,
    value: f64,
}

impl ConstantKernel {
    pub fn new(name: impl Into<String>, field: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            value,
        }
    }
}

impl ProcessKernel for ConstantKernel {
    fn name(&self) -> &str {
        &self.name
    }

    fn setup(&mut self, state: &mut State) -> Result<(), StateError> {
        state.require_field(
            &self.field,
            FieldLocation::Cell,
            Ownership::owned(&self.name),
            1,
        )
    }

    fn initialize(&mut self, state: &mut State) -> Result<(), StateError> {
        state.set_field(&self.field, Requester::Pk(&self.name), &[0.0], None)?;
        state.field_mut(&self.field)?.set_initialized();
        Ok(())
    }

    fn advance(&mut self, _dt: f64, state: &mut State) -> Result<(), StepFailure> {
        state
            .set_field(&self.field, Requester::Pk(&self.name), &[self.value], None)
            .map_err(|e| StepFailure::AdmissibleRange {
                reason: e.to_string(),
            })
    }
}

/// Fails its first `failures` advances, then succeeds and stamps its
/// field with the dt that finally worked.
pub struct FailingKernel {
    name: String,
    field: String,
    failures: u32,
    pub advances: u32,
    pub commits: u32,
}

impl FailingKernel {
    pub fn new(name: impl Into<String>, field: impl Into<String>, failures: u32) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            failures,
            advances: 0,
            commits: 0,
        }
    }
}

impl ProcessKernel for FailingKernel {
    fn name(&self) -> &str {
        &self.name
    }

    fn setup(&mut self, state: &mut State) -> Result<(), StateError> {
        state.require_field(
            &self.field,
            FieldLocation::Cell,
            Ownership::owned(&self.name),
            1,
        )
    }

    fn initialize(&mut self, state: &mut State) -> Result<(), StateError> {
        state.set_field(&self.field, Requester::Pk(&self.name), &[0.0], None)?;
        state.field_mut(&self.field)?.set_initialized();
        Ok(())
    }

    fn advance(&mut self, dt: f64, state: &mut State) -> Result<(), StepFailure> {
        self.advances += 1;
        if self.advances <= self.failures {
            return Err(StepFailure::NonConvergence {
                iterations: self.advances,
            });
        }
        state
            .set_field(&self.field, Requester::Pk(&self.name), &[dt], None)
            .map_err(|e| StepFailure::AdmissibleRange {
                reason: e.to_string(),
            })
    }

    fn commit(&mut self, _dt: f64, _state: &mut State) {
        self.commits += 1;
    }
}

/// Requires nothing; records the dt of every advance and commit.
#[derive(Default)]
pub struct RecordingKernel {
    name: String,
    pub advanced: Vec<f64>,
    pub committed: Vec<f64>,
}

impl RecordingKernel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            advanced: Vec::new(),
            committed: Vec::new(),
        }
    }
}

impl ProcessKernel for RecordingKernel {
    fn name(&self) -> &str {
        &self.name
    }

    fn advance(&mut self, dt: f64, _state: &mut State) -> Result<(), StepFailure> {
        self.advanced.push(dt);
        Ok(())
    }

    fn commit(&mut self, dt: f64, _state: &mut State) {
        self.committed.push(dt);
    }
}
