use criterion::{black_box, criterion_group, criterion_main, Criterion};

use meshsplit_core::generators::GridDesc;
use meshsplit_core::synth::{self, TangentInputs};
use meshsplit_core::topology::{plan_splits, weld_corners, WeldAttributes, WeldTables};
use meshsplit_core::{
    CornerLookup, MeshConfig, NormalsMode, Sample, TangentsMode, Topology, VertexBufferSet,
    VertexChannels,
};

fn large_grid() -> GridDesc {
    GridDesc::new(256, 256).with_uv_seam(true)
}

// ---------------------------------------------------------------------------
// Topology
// ---------------------------------------------------------------------------

fn bench_plan_splits(c: &mut Criterion) {
    let faces = large_grid().with_triangulate(true).topology();
    let mut splits = Vec::new();
    let mut face_split_indices = Vec::new();
    c.bench_function("plan_splits_131k_triangles", |b| {
        b.iter(|| {
            plan_splits(
                black_box(&faces.face_counts),
                65_000,
                &mut splits,
                &mut face_split_indices,
            );
        });
    });
}

fn bench_weld(c: &mut Criterion) {
    let grid = large_grid();
    let faces = grid.topology();
    let uvs = grid.uvs(&faces);
    let attributes = WeldAttributes {
        normals: None,
        uvs: Some(uvs.lookup()),
    };
    let mut tables = WeldTables::default();
    c.bench_function("weld_256x256_quads", |b| {
        b.iter(|| {
            weld_corners(
                black_box(&faces.corner_indices),
                |slot| slot,
                grid.position_count(),
                &attributes,
                &mut tables,
            );
        });
    });
}

// ---------------------------------------------------------------------------
// Attribute synthesis
// ---------------------------------------------------------------------------

fn bench_smooth_normals(c: &mut Criterion) {
    let grid = large_grid();
    let faces = grid.topology();
    let topology = Topology::new(
        &faces.face_counts,
        &faces.corner_indices,
        MeshConfig::default().topology_settings(),
    )
    .unwrap();
    let positions = grid.positions(0.3);
    let mut normals = Vec::new();
    c.bench_function("smooth_normals_256x256_quads", |b| {
        b.iter(|| synth::compute_smooth_normals(&topology, black_box(&positions), false, &mut normals));
    });
}

fn bench_tangents(c: &mut Criterion) {
    let grid = large_grid();
    let faces = grid.topology();
    let topology = Topology::new(
        &faces.face_counts,
        &faces.corner_indices,
        MeshConfig::default().topology_settings(),
    )
    .unwrap();
    let positions = grid.positions(0.3);
    let uvs = grid.uvs(&faces);
    let mut normals = Vec::new();
    synth::compute_smooth_normals(&topology, &positions, false, &mut normals);

    let inputs = TangentInputs {
        positions: &positions,
        normals: CornerLookup::PerPosition(&normals),
        uvs: uvs.lookup(),
    };
    let mut indices = Vec::new();
    c.bench_function("tangent_indices_per_corner_256x256_quads", |b| {
        b.iter(|| {
            synth::build_tangent_indices(&topology, TangentsMode::PerCorner, &inputs, &mut indices)
        });
    });

    // Tangents need the topology's tangent slots, which a sample builds.
    let config = MeshConfig::default()
        .with_normals_mode(NormalsMode::AlwaysCompute)
        .with_tangents_mode(TangentsMode::PerCorner);
    let sample = Sample::from_frame(config, grid.frame(0.3)).unwrap();
    let inputs = TangentInputs {
        positions: sample.positions(),
        normals: CornerLookup::PerPosition(sample.smooth_normals()),
        uvs: uvs.lookup(),
    };
    let mut tangents = Vec::new();
    c.bench_function("tangents_256x256_quads", |b| {
        b.iter(|| synth::compute_tangents(sample.topology(), &inputs, false, false, &mut tangents));
    });
}

// ---------------------------------------------------------------------------
// Buffer fill
// ---------------------------------------------------------------------------

fn bench_fill(c: &mut Criterion) {
    let grid = large_grid().with_normals(true);
    let mut group = c.benchmark_group("fill_split");
    for share in [false, true] {
        let config = MeshConfig::default().with_share_vertices(share);
        let mut sample = Sample::from_frame(config, grid.frame(0.3)).unwrap();
        let summary = sample.summary(false);
        let channels = VertexChannels {
            normals: summary.has_normals,
            uvs: summary.has_uvs,
            ..Default::default()
        };
        let mut buffers = VertexBufferSet::new(sample.vertex_buffer_length(0), channels);
        let name = if share { "welded" } else { "corners" };
        group.bench_function(name, |b| {
            b.iter(|| sample.fill_vertex_buffer(black_box(0), &mut buffers));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_plan_splits,
    bench_weld,
    bench_smooth_normals,
    bench_tangents,
    bench_fill,
);
criterion_main!(benches);
