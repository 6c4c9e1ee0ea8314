//! End-to-end tests: frames in, vertex and index buffers out.
//!
//! Every test drives the public API the way a host would: read a sample,
//! size buffers from its summary, fill every split and every submesh.

use meshsplit_core::generators::{growing_strip_source, GridDesc};
use meshsplit_core::topology::WeldAttributes;
use meshsplit_core::{
    AttributeSource, FaceTopology, FrameData, IndexBufferData, IndexFormat, MeshConfig,
    MeshStream, NormalsMode, Sample, SampleTime, TangentsMode, Topology, TopologyVariance,
    Vec2, Vec3, VertexBufferSet, VertexChannels,
};
use rstest::rstest;

fn init_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .is_test(true)
        .try_init();
}

/// Filled output of one sample.
struct FilledSample {
    vertices: Vec<VertexBufferSet>,
    /// `(split_index, indices)` per submesh.
    submeshes: Vec<(usize, Vec<u32>)>,
}

fn fill_all(sample: &mut Sample) -> FilledSample {
    let summary = sample.summary(false);
    let channels = VertexChannels {
        normals: summary.has_normals,
        uvs: summary.has_uvs,
        tangents: summary.has_tangents,
        velocities: summary.has_velocities,
    };

    let mut vertices = Vec::with_capacity(summary.split_count);
    for split in 0..summary.split_count {
        let mut buffers = VertexBufferSet::new(sample.vertex_buffer_length(split), channels);
        let report = sample.fill_vertex_buffer(split, &mut buffers);
        assert_eq!(report.positions, sample.vertex_buffer_length(split));
        vertices.push(buffers);
    }

    let format = sample.config().index_format;
    let mut submeshes = Vec::new();
    sample.prepare_submeshes();
    while let Some(submesh) = sample.next_submesh() {
        let mut indices = IndexBufferData::new(format, submesh.triangle_count * 3);
        let written = sample.fill_submesh_indices(&submesh, &mut indices);
        assert_eq!(written, submesh.triangle_count * 3);
        submeshes.push((submesh.split_index, indices.to_u32()));
    }

    FilledSample {
        vertices,
        submeshes,
    }
}

fn triangle_total(filled: &FilledSample) -> usize {
    filled.submeshes.iter().map(|(_, indices)| indices.len() / 3).sum()
}

// ---------------------------------------------------------------------------
// Attribute matrix
// ---------------------------------------------------------------------------

#[rstest]
fn attribute_matrix(
    #[values(
        NormalsMode::ReadFromFile,
        NormalsMode::ComputeIfMissing,
        NormalsMode::AlwaysCompute,
        NormalsMode::Ignore
    )]
    normals_mode: NormalsMode,
    #[values(false, true)] file_normals: bool,
    #[values(false, true)] uv_seam: bool,
    #[values(TangentsMode::None, TangentsMode::Smooth, TangentsMode::PerCorner)]
    tangents_mode: TangentsMode,
    #[values(false, true)] welded: bool,
) {
    let grid = GridDesc::new(6, 4)
        .with_normals(file_normals)
        .with_uv_seam(uv_seam)
        .with_material_groups(2);
    let config = MeshConfig::default()
        .with_normals_mode(normals_mode)
        .with_tangents_mode(tangents_mode)
        .with_share_vertices(welded);
    let mut stream = MeshStream::new(grid.animated_source(TopologyVariance::Homogeneous, 2), config);
    let mut sample = stream.read_sample(0, SampleTime::default()).unwrap();
    let filled = fill_all(&mut sample);

    // Every face survives triangulation exactly once.
    assert_eq!(triangle_total(&filled), grid.face_count() * 2);
    assert_eq!(sample.topology().is_welded(), welded);

    let expect_normals = match normals_mode {
        NormalsMode::ReadFromFile => file_normals,
        NormalsMode::Ignore => false,
        NormalsMode::ComputeIfMissing | NormalsMode::AlwaysCompute => true,
    };
    assert_eq!(sample.has_normals(), expect_normals);

    for (split, indices) in &filled.submeshes {
        let vertex_count = filled.vertices[*split].positions.len();
        assert!(indices.iter().all(|&i| (i as usize) < vertex_count));
    }

    for buffers in &filled.vertices {
        for normal in &buffers.normals {
            let length = normal.norm();
            assert!((length - 1.0).abs() < 1e-4, "normal length {}", length);
        }
        for tangent in &buffers.tangents {
            assert!(tangent.w == 1.0 || tangent.w == -1.0);
        }
    }
}

// ---------------------------------------------------------------------------
// Triangulation
// ---------------------------------------------------------------------------

fn single_quad() -> FrameData {
    FrameData::new(
        FaceTopology::new(vec![4], vec![0, 1, 2, 3]),
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ],
    )
}

#[rstest]
#[case::default_winding(false, vec![0, 1, 2, 0, 2, 3])]
#[case::swapped_winding(true, vec![0, 2, 1, 0, 3, 2])]
fn quad_fan(#[case] swap_winding: bool, #[case] expected: Vec<u32>) {
    let config = MeshConfig::default().with_swap_face_winding(swap_winding);
    let mut sample = Sample::from_frame(config, single_quad()).unwrap();
    let filled = fill_all(&mut sample);
    assert_eq!(filled.submeshes.len(), 1);
    assert_eq!(filled.submeshes[0].1, expected);
}

#[test]
fn turned_quad_rotates_corners() {
    let frame = single_quad();
    let positions = frame.positions.clone();
    let config = MeshConfig::default().with_turn_quad_edges(true);
    let mut sample = Sample::from_frame(config, frame).unwrap();
    let filled = fill_all(&mut sample);

    let buffer = &filled.vertices[0].positions;
    assert_eq!(buffer[0], positions[3]);
    assert_eq!(buffer[1], positions[0]);
    assert_eq!(buffer[2], positions[1]);
    assert_eq!(buffer[3], positions[2]);
    // The first triangle now spans the 3-0-1 corners, i.e. the other diagonal.
    assert_eq!(&filled.submeshes[0].1[..3], &[0, 1, 2]);
}

// ---------------------------------------------------------------------------
// Splitting
// ---------------------------------------------------------------------------

#[test]
fn large_mesh_splits_under_16_bit_limit() {
    init_logging();
    // 400 x 250 quads as triangles: 200k faces, 600k corners.
    let grid = GridDesc::new(400, 250).with_triangulate(true);
    let config = MeshConfig::default().with_index_format(IndexFormat::Uint16);
    let mut sample = Sample::from_frame(config, grid.frame(0.0)).unwrap();
    let summary = sample.summary(false);

    assert!(summary.split_count >= 3);
    let splits = sample.topology().splits();
    assert!(splits.iter().all(|s| s.vertex_count <= 65_000));
    assert_eq!(
        splits.iter().map(|s| s.vertex_count).sum::<usize>(),
        sample.topology().corner_count()
    );
    assert_eq!(
        splits.iter().map(|s| s.face_count()).sum::<usize>(),
        grid.face_count()
    );

    // Splits tile the faces without gaps.
    for pair in splits.windows(2) {
        assert_eq!(pair[0].last_face + 1, pair[1].first_face);
        assert_eq!(pair[0].index_offset + pair[0].vertex_count, pair[1].index_offset);
    }

    let filled = fill_all(&mut sample);
    assert_eq!(triangle_total(&filled), 200_000);
    for (split, indices) in &filled.submeshes {
        let max = indices.iter().copied().max().unwrap_or(0) as usize;
        assert!(max < filled.vertices[*split].positions.len());
    }
}

#[test]
fn large_mesh_fits_one_split_with_32_bit_indices() {
    let grid = GridDesc::new(400, 250).with_triangulate(true);
    let config = MeshConfig::default().with_index_format(IndexFormat::Uint32);
    let mut sample = Sample::from_frame(config, grid.frame(0.0)).unwrap();
    assert_eq!(sample.summary(false).split_count, 1);
}

// ---------------------------------------------------------------------------
// Welding
// ---------------------------------------------------------------------------

#[rstest]
#[case::no_seam(false, 10)]
#[case::seam(true, 12)]
fn uv_seam_is_not_merged(#[case] uv_seam: bool, #[case] expected_vertices: usize) {
    let grid = GridDesc::new(4, 1).with_uv_seam(uv_seam);
    let config = MeshConfig::default().with_share_vertices(true);
    let mut sample = Sample::from_frame(config, grid.frame(0.0)).unwrap();
    assert_eq!(sample.summary(false).split_count, 1);
    assert_eq!(sample.vertex_buffer_length(0), expected_vertices);
}

#[test]
fn weld_is_idempotent() {
    let grid = GridDesc::new(5, 3).with_uv_seam(true);
    let faces = grid.topology();
    let uvs = grid.uvs(&faces);
    let settings = MeshConfig::default().with_share_vertices(true).topology_settings();
    let mut topology = Topology::new(&faces.face_counts, &faces.corner_indices, settings).unwrap();

    let attributes = WeldAttributes {
        normals: None,
        uvs: Some(uvs.lookup()),
    };
    assert!(topology.weld(&attributes, grid.position_count()));
    let first = topology.weld_tables().clone();
    assert!(topology.weld(&attributes, grid.position_count()));
    assert_eq!(topology.weld_tables(), &first);
}

#[test]
fn welded_and_unwelded_emit_the_same_triangles() {
    let grid = GridDesc::new(6, 5).with_uv_seam(true).with_material_groups(3);
    let frame = grid.frame(0.25);

    let mut plain = Sample::from_frame(MeshConfig::default(), frame.clone()).unwrap();
    let mut shared = Sample::from_frame(MeshConfig::default().with_share_vertices(true), frame).unwrap();
    let plain_out = fill_all(&mut plain);
    let shared_out = fill_all(&mut shared);

    assert!(shared.vertex_buffer_length(0) < plain.vertex_buffer_length(0));
    assert_eq!(plain_out.submeshes.len(), shared_out.submeshes.len());

    let corners = |filled: &FilledSample| -> Vec<(Vec3, Vec2, Vec3)> {
        filled
            .submeshes
            .iter()
            .flat_map(|(split, indices)| {
                let buffers = &filled.vertices[*split];
                indices.iter().map(move |&i| {
                    let i = i as usize;
                    (buffers.positions[i], buffers.uvs[i], buffers.normals[i])
                })
            })
            .collect()
    };
    assert_eq!(corners(&plain_out), corners(&shared_out));
}

/// Two triangles over a unit square; each face carries its own normal.
fn two_faced_square(second_normal: Vec3) -> FrameData {
    let first_normal = Vec3::new(0.0, 0.0, 1.0);
    let positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    let uvs = positions.iter().map(|p| Vec2::new(p.x, p.y)).collect();
    FrameData::new(FaceTopology::new(vec![3, 3], vec![0, 1, 2, 0, 2, 3]), positions)
        .with_uvs(AttributeSource::vertex(uvs))
        .with_normals(AttributeSource::face_varying(vec![
            first_normal,
            first_normal,
            first_normal,
            second_normal,
            second_normal,
            second_normal,
        ]))
}

#[rstest]
#[case::split_tangents_keep_corners_apart(TangentsMode::PerCorner, Vec3::new(0.0, 0.6, 0.8), 6)]
#[case::matching_normals_merge(TangentsMode::PerCorner, Vec3::new(0.0, 0.0, 1.0), 4)]
#[case::smooth_tangents_ignore_normals(TangentsMode::Smooth, Vec3::new(0.0, 0.6, 0.8), 4)]
fn hidden_normals_weld_by_tangent_slot(
    #[case] tangents_mode: TangentsMode,
    #[case] second_normal: Vec3,
    #[case] expected_vertices: usize,
) {
    let config = MeshConfig::default()
        .with_normals_mode(NormalsMode::Ignore)
        .with_tangents_mode(tangents_mode)
        .with_share_vertices(true);
    let mut sample = Sample::from_frame(config, two_faced_square(second_normal)).unwrap();
    assert!(!sample.has_normals());
    assert!(sample.has_tangents());
    assert_eq!(sample.vertex_buffer_length(0), expected_vertices);

    // Every welded vertex carries the tangent of each corner it stands for.
    let mut unwelded = Sample::from_frame(
        config.with_share_vertices(false),
        two_faced_square(second_normal),
    )
    .unwrap();
    let welded_fill = fill_all(&mut sample);
    let corner_fill = fill_all(&mut unwelded);
    let corner_tangent = |filled: &FilledSample, triangle_corner: usize| {
        let (split, indices) = &filled.submeshes[0];
        filled.vertices[*split].tangents[indices[triangle_corner] as usize]
    };
    for corner in 0..6 {
        assert_eq!(
            corner_tangent(&welded_fill, corner),
            corner_tangent(&corner_fill, corner)
        );
    }
}

#[test]
fn static_extra_data_is_written_once_per_weld() {
    let grid = GridDesc::new(3, 3);
    let config = MeshConfig::default()
        .with_share_vertices(true)
        .with_treat_vertex_extra_data_as_static(true);
    let mut stream = MeshStream::new(grid.animated_source(TopologyVariance::Homogeneous, 3), config);

    let first = stream.read_sample(0, SampleTime::default()).unwrap();
    let channels = VertexChannels {
        normals: true,
        uvs: true,
        ..Default::default()
    };
    let mut buffers = VertexBufferSet::new(first.vertex_buffer_length(0), channels);
    let report = first.fill_vertex_buffer(0, &mut buffers);
    assert_eq!(report.normals, buffers.positions.len());
    assert_eq!(report.uvs, buffers.positions.len());

    let second = stream.read_sample(1, SampleTime::default()).unwrap();
    let report = second.fill_vertex_buffer(0, &mut buffers);
    assert_eq!(report.positions, buffers.positions.len());
    assert_eq!(report.normals, 0);
    assert_eq!(report.uvs, 0);
}

// ---------------------------------------------------------------------------
// Synthesized attributes
// ---------------------------------------------------------------------------

#[test]
fn smooth_normals_are_unit_length() {
    let grid = GridDesc::new(8, 8);
    let config = MeshConfig::default().with_normals_mode(NormalsMode::AlwaysCompute);
    let mut stream = MeshStream::new(grid.animated_source(TopologyVariance::Homogeneous, 4), config);
    let sample = stream.read_sample(2, SampleTime::default()).unwrap();

    assert_eq!(sample.smooth_normals().len(), grid.position_count());
    for normal in sample.smooth_normals() {
        assert!((normal.norm() - 1.0).abs() < 1e-4);
    }
}

#[rstest]
fn tangent_handedness_sign(
    #[values(false, true)] swap_handedness: bool,
    #[values(TangentsMode::Smooth, TangentsMode::PerCorner)] mode: TangentsMode,
) {
    let grid = GridDesc::new(3, 3);
    let config = MeshConfig::default()
        .with_normals_mode(NormalsMode::AlwaysCompute)
        .with_tangents_mode(mode)
        .with_swap_handedness(swap_handedness);
    let mut sample = Sample::from_frame(config, grid.frame(0.0)).unwrap();
    assert!(sample.has_tangents());

    let filled = fill_all(&mut sample);
    let signs: Vec<f32> = filled.vertices[0].tangents.iter().map(|t| t.w).collect();
    assert!(signs.iter().all(|&w| w == signs[0]));
    assert!(signs[0] == 1.0 || signs[0] == -1.0);

    let mut flipped = sample.clone();
    let change = flipped.update_config(config.with_swap_handedness(!swap_handedness));
    assert!(change.data_changed);
    let flipped_out = fill_all(&mut flipped);
    assert_eq!(flipped_out.vertices[0].tangents[0].w, -signs[0]);
}

#[test]
fn normals_mode_change_drops_smooth_normals() {
    let grid = GridDesc::new(2, 2).with_normals(true);
    let config = MeshConfig::default().with_normals_mode(NormalsMode::AlwaysCompute);
    let mut sample = Sample::from_frame(config, grid.frame(0.0)).unwrap();
    assert!(!sample.smooth_normals().is_empty());

    let change = sample.update_config(config.with_normals_mode(NormalsMode::ReadFromFile));
    assert!(change.data_changed);
    assert!(sample.smooth_normals().is_empty());
    assert!(sample.has_normals());
}

// ---------------------------------------------------------------------------
// Streams
// ---------------------------------------------------------------------------

#[test]
fn interpolated_positions_and_velocities() {
    let grid = GridDesc::new(2, 2);
    let source = grid.animated_source(TopologyVariance::Homogeneous, 2);
    let current = grid.positions(0.0);
    let next = grid.positions(0.5);
    let config = MeshConfig::default().with_interpolate_samples(true);
    let mut stream = MeshStream::new(source, config);

    let mut sample = stream.read_sample(0, SampleTime::new(0.5, 2.0)).unwrap();
    let filled = fill_all(&mut sample);
    let buffers = &filled.vertices[0];
    assert_eq!(buffers.velocities_xy.len(), buffers.positions.len());

    let position = sample.topology().slot_position(0) as usize;
    let expected = current[position] + (next[position] - current[position]) * 0.5;
    assert!((buffers.positions[0] - expected).norm() < 1e-5);
    let velocity_z = (next[position].z - current[position].z) / 2.0;
    assert!((buffers.velocities_z[0].x - velocity_z).abs() < 1e-5);
}

#[test]
fn varying_topology_recycles_and_reports_peaks() {
    init_logging();
    let mut stream = MeshStream::new(growing_strip_source(4), MeshConfig::default());
    let summary = stream.summary().unwrap();
    assert_eq!(summary.peak_index_count, 16);
    assert_eq!(summary.peak_position_count, 10);
    assert_eq!(summary.peak_triangulated_index_count, 24);
    assert_eq!(summary.peak_submesh_count, 1);

    for index in 0..4 {
        let mut sample = stream.read_sample(index, SampleTime::default()).unwrap();
        assert!(sample.owns_topology());
        assert!(!sample.has_velocities());
        let filled = fill_all(&mut sample);
        assert_eq!(triangle_total(&filled), (index + 1) * 2);
        stream.recycle(sample);
    }
}

#[test]
fn raw_copy_respects_destination_sizes() {
    init_logging();
    let grid = GridDesc::new(2, 2).with_uv_seam(true);
    let sample = Sample::from_frame(MeshConfig::default(), grid.frame(0.0)).unwrap();

    let mut raw = meshsplit_core::RawMeshBuffers::with_capacity(4, 16, 9);
    sample.copy_raw_data(&mut raw);
    assert_eq!(raw.face_count, 4);
    assert_eq!(raw.corner_index_count, 16);
    assert_eq!(raw.position_count, 9);
    assert_eq!(raw.uv_index_count, 16);
    assert_eq!(raw.velocity_count, 0);
    assert_eq!(raw.bounds, sample.bounds());

    let mut small = meshsplit_core::RawMeshBuffers::with_capacity(4, 16, 4);
    sample.copy_raw_data(&mut small);
    assert_eq!(small.position_count, 0);
    assert_eq!(small.face_count, 4);
}

#[test]
fn file_normals_are_mirrored_with_handedness() {
    let frame = single_quad().with_normals(AttributeSource::vertex(vec![
        Vec3::new(1.0, 0.0, 0.0);
        4
    ]));
    let config = MeshConfig::default()
        .with_normals_mode(NormalsMode::ReadFromFile)
        .with_swap_handedness(true);
    let mut sample = Sample::from_frame(config, frame).unwrap();
    let filled = fill_all(&mut sample);
    assert!(filled.vertices[0]
        .normals
        .iter()
        .all(|n| *n == Vec3::new(-1.0, 0.0, 0.0)));
    assert!(filled.vertices[0].positions.iter().all(|p| p.x <= 0.0));
}
