//! Criterion micro-benchmarks for the registry snapshot/commit path.
//!
//! The time-step controller clones the canonical registry every attempt
//! and assigns back on success, so these two operations sit on the
//! per-step hot path.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vadose_core::{FieldLocation, Ownership, Requester};
use vadose_mesh::BlockMesh;
use vadose_state::State;

/// A registry with a typical subsurface field complement over `cells` cells.
fn make_state(cells: usize) -> State {
    let mesh = Arc::new(BlockMesh::new(cells, cells + 1).unwrap());
    let mut state = State::new(mesh);
    for (name, dofs) in [
        ("pressure", 1),
        ("temperature", 1),
        ("saturation", 3),
        ("porosity", 1),
    ] {
        state
            .require_field(name, FieldLocation::Cell, Ownership::Unowned, dofs)
            .unwrap();
    }
    state
        .require_field("darcy_flux", FieldLocation::Face, Ownership::Unowned, 1)
        .unwrap();
    state
        .set_field("pressure", Requester::Registry, &[1.0e5], None)
        .unwrap();
    state
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");
    for cells in [1_000usize, 100_000] {
        let state = make_state(cells);
        group.bench_function(format!("clone/{cells}"), |b| {
            b.iter(|| black_box(state.clone()))
        });

        let mut canonical = make_state(cells);
        let working = canonical.clone();
        group.bench_function(format!("assign_from/{cells}"), |b| {
            b.iter(|| {
                canonical.assign_from(black_box(&working)).unwrap();
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_snapshot);
criterion_main!(benches);
