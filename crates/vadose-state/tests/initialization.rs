//! Configuration-driven initialization: global constants, block-scoped
//! overrides, and the face-vector convention.

use std::sync::Arc;

use vadose_core::{FieldLocation, Ownership, ParameterList, Requester, StateError};
use vadose_mesh::{BlockMesh, Mesh};
use vadose_state::State;

/// Ten cells: block 1 holds cells 0..6, block 2 holds cells 6..10.
/// Four faces, two of them in block 2, with mixed normals.
fn two_block_mesh() -> Arc<dyn Mesh> {
    let mut mesh = BlockMesh::new(10, 4).unwrap();
    mesh.assign_block_cells(1, (0..6).collect()).unwrap();
    mesh.assign_block_cells(2, (6..10).collect()).unwrap();
    mesh.assign_block_faces(2, vec![1, 3]).unwrap();
    mesh.set_face_normal(1, [1.0, 0.0, 0.0]).unwrap();
    // Face 3 keeps the default +z normal.
    Arc::new(mesh)
}

fn base_plist() -> ParameterList {
    let mut plist = ParameterList::new();
    plist.set_scalar("Gravity x", 0.0);
    plist.set_scalar("Gravity y", 0.0);
    plist.set_scalar("Gravity z", -9.80665);
    plist.set_integer("Number of mesh blocks", 0);
    plist
}

#[test]
fn gravity_is_mandatory_density_optional() {
    let mut state = State::new(two_block_mesh());
    let mut plist = base_plist();
    plist.set_scalar("Constant water density", 998.2);
    state.initialize(&plist).unwrap();
    assert_eq!(state.gravity(), [0.0, 0.0, -9.80665]);
    assert_eq!(state.density(), 998.2);
    // Viscosity was not supplied and keeps its default.
    assert_eq!(state.viscosity(), 0.0);
}

#[test]
fn block_count_is_mandatory() {
    let mut state = State::new(two_block_mesh());
    let mut plist = ParameterList::new();
    plist.set_scalar("Gravity x", 0.0);
    plist.set_scalar("Gravity y", 0.0);
    plist.set_scalar("Gravity z", -9.80665);
    match state.initialize(&plist) {
        Err(StateError::MissingParameter { key }) => {
            assert_eq!(key, "Number of mesh blocks");
        }
        other => panic!("expected MissingParameter, got {other:?}"),
    }
}

#[test]
fn constant_assigns_every_cell_and_latches() {
    let mut state = State::new(two_block_mesh());
    state
        .require_field("temperature", FieldLocation::Cell, Ownership::Unowned, 1)
        .unwrap();
    state
        .set_subfield_names("temperature", vec!["Temperature".to_string()])
        .unwrap();

    let mut plist = base_plist();
    plist.set_scalar("Constant Temperature", 273.15);
    state.initialize(&plist).unwrap();

    assert_eq!(state.get_field("temperature").unwrap(), &[273.15; 10]);
    assert!(state.field("temperature").unwrap().initialized());
    assert!(state.check_all_initialized());
}

#[test]
fn block_override_layers_over_global_pass() {
    let mut state = State::new(two_block_mesh());
    state
        .require_field("pressure", FieldLocation::Cell, Ownership::Unowned, 1)
        .unwrap();
    state
        .set_subfield_names("pressure", vec!["Pressure".to_string()])
        .unwrap();

    let mut plist = base_plist();
    plist.set_scalar("Constant Pressure", 1.0e5);
    plist.set_integer("Number of mesh blocks", 1);
    plist
        .sublist_mut("Mesh block 1")
        .set_integer("Mesh block ID", 2)
        .set_scalar("Constant Pressure", 2.0e5);
    state.initialize(&plist).unwrap();

    let data = state.get_field("pressure").unwrap();
    for cell in 0..6 {
        assert_eq!(data[cell], 1.0e5, "cell {cell} outside block 2");
    }
    for cell in 6..10 {
        assert_eq!(data[cell], 2.0e5, "cell {cell} inside block 2");
    }
}

#[test]
fn partial_subfields_leave_field_untouched() {
    let mut state = State::new(two_block_mesh());
    state
        .require_field("saturation", FieldLocation::Cell, Ownership::Unowned, 2)
        .unwrap();
    state
        .set_subfield_names(
            "saturation",
            vec!["Liquid Saturation".to_string(), "Ice Saturation".to_string()],
        )
        .unwrap();

    let mut plist = base_plist();
    // Only one of the two subfields is configured: all-or-nothing.
    plist.set_scalar("Constant Liquid Saturation", 1.0);
    state.initialize(&plist).unwrap();

    assert_eq!(state.get_field("saturation").unwrap(), &[0.0; 20]);
    assert!(!state.field("saturation").unwrap().initialized());
    assert!(!state.check_all_initialized());
}

#[test]
fn field_without_subfield_names_is_skipped() {
    let mut state = State::new(two_block_mesh());
    state
        .require_field("porosity", FieldLocation::Cell, Ownership::Unowned, 1)
        .unwrap();

    let mut plist = base_plist();
    plist.set_scalar("Constant porosity", 0.4);
    state.initialize(&plist).unwrap();

    // No declared subfield names, so the key cannot match.
    assert!(!state.field("porosity").unwrap().initialized());
}

#[test]
fn face_vector_projects_onto_block_faces() {
    let mut state = State::new(two_block_mesh());
    state
        .require_field("darcy_flux", FieldLocation::Face, Ownership::Unowned, 1)
        .unwrap();

    let mut plist = base_plist();
    plist.set_integer("Number of mesh blocks", 1);
    plist
        .sublist_mut("Mesh block 1")
        .set_integer("Mesh block ID", 2)
        .set_scalar("Constant darcy_flux x", 2.0)
        .set_scalar("Constant darcy_flux y", 0.0)
        .set_scalar("Constant darcy_flux z", -4.0);
    state.initialize(&plist).unwrap();

    let data = state.get_field("darcy_flux").unwrap();
    assert_eq!(data[0], 0.0, "face 0 is outside block 2");
    assert_eq!(data[1], 2.0, "face 1 has normal +x");
    assert_eq!(data[2], 0.0, "face 2 is outside block 2");
    assert_eq!(data[3], -4.0, "face 3 has normal +z");
    assert!(state.field("darcy_flux").unwrap().initialized());
}

#[test]
fn face_vector_with_missing_component_fails() {
    let mut state = State::new(two_block_mesh());
    state
        .require_field("darcy_flux", FieldLocation::Face, Ownership::Unowned, 1)
        .unwrap();

    let mut plist = base_plist();
    plist.set_integer("Number of mesh blocks", 1);
    plist
        .sublist_mut("Mesh block 1")
        .set_integer("Mesh block ID", 2)
        .set_scalar("Constant darcy_flux x", 2.0);
    match state.initialize(&plist) {
        Err(StateError::MissingParameter { key }) => {
            assert_eq!(key, "Constant darcy_flux y");
        }
        other => panic!("expected MissingParameter, got {other:?}"),
    }
}

#[test]
fn declared_block_sublist_must_exist() {
    let mut state = State::new(two_block_mesh());
    let mut plist = base_plist();
    plist.set_integer("Number of mesh blocks", 2);
    plist
        .sublist_mut("Mesh block 1")
        .set_integer("Mesh block ID", 1);
    match state.initialize(&plist) {
        Err(StateError::MissingParameter { key }) => assert_eq!(key, "Mesh block 2"),
        other => panic!("expected MissingParameter, got {other:?}"),
    }
}

#[test]
fn kernel_owned_field_still_initialized_by_registry() {
    let mut state = State::new(two_block_mesh());
    state
        .require_field("pressure", FieldLocation::Cell, Ownership::owned("flow"), 1)
        .unwrap();
    state
        .set_subfield_names("pressure", vec!["Pressure".to_string()])
        .unwrap();

    let mut plist = base_plist();
    plist.set_scalar("Constant Pressure", 101325.0);
    state.initialize(&plist).unwrap();

    assert_eq!(state.get_field("pressure").unwrap(), &[101325.0; 10]);
    // The kernel remains the owner; the registry wrote via its own path.
    assert!(state
        .get_field_mut("pressure", Requester::Pk("flow"))
        .is_ok());
}
