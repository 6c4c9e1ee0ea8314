//! Vertex and index buffer fill.
//!
//! This module provides:
//! - [`VertexBufferSet`] / [`IndexBufferData`] - Host-sized destination buffers
//! - [`FillSources`] - Everything a sample contributes to a fill
//! - [`fill_split`] - Copy one split's vertices through a list of [`CopyStep`]s
//! - [`write_submesh_indices`] - Fan-triangulated indices for one submesh

pub mod buffers;
pub mod steps;

pub use buffers::{Channel, IndexBufferData, VertexBufferSet, VertexChannels};
pub use steps::{
    CopyStep, Motion, NormalStep, PositionStep, TangentStep, UvStep, VertexOrder, VertexWalk,
    ZeroFillStep,
};

use crate::attributes::CornerLookup;
use crate::math::{Bounds, Vec2, Vec3, Vec4};
use crate::topology::Topology;

/// Outcome of a vertex buffer fill.
///
/// Each count is the number of vertices written to that channel; 0 means
/// the channel was absent, lacked source data, or was too small.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FillReport {
    /// Vertices in the split.
    pub vertex_count: usize,
    /// Bounds of the written positions.
    pub bounds: Bounds,
    /// Positions written.
    pub positions: usize,
    /// Normals written.
    pub normals: usize,
    /// UVs written.
    pub uvs: usize,
    /// Tangents written.
    pub tangents: usize,
    /// Motion vectors written.
    pub velocities: usize,
}

/// Source data for a fill, resolved by the sample from its configuration.
#[derive(Debug, Clone, Copy)]
pub struct FillSources<'a> {
    /// Current positions.
    pub positions: &'a [Vec3],
    /// Interpolation towards the next sample.
    pub motion: Option<Motion<'a>>,
    /// Normals to emit.
    pub normals: Option<CornerLookup<'a, Vec3>>,
    /// UVs to emit.
    pub uvs: Option<CornerLookup<'a, Vec2>>,
    /// Tangents to emit, one per tangent slot.
    pub tangents: Option<&'a [Vec4]>,
    /// Sign applied to X.
    pub x_scale: f32,
}

/// Choose the copy steps for one split.
///
/// With `extra_data` false only positions and motion are written; the
/// remaining channels keep what the previous fill put there.
fn select_steps<'a>(
    topology: &'a Topology,
    sources: &FillSources<'a>,
    extra_data: bool,
) -> Vec<Box<dyn CopyStep + 'a>> {
    let mut steps: Vec<Box<dyn CopyStep + 'a>> = Vec::with_capacity(5);
    steps.push(Box::new(PositionStep {
        positions: sources.positions,
        motion: sources.motion,
        x_scale: sources.x_scale,
    }));
    if sources.motion.is_none() {
        steps.push(Box::new(ZeroFillStep(Channel::Velocities)));
    }
    if !extra_data {
        return steps;
    }

    match sources.normals {
        Some(normals) => steps.push(Box::new(NormalStep {
            normals,
            x_scale: sources.x_scale,
        })),
        None => steps.push(Box::new(ZeroFillStep(Channel::Normals))),
    }
    match sources.uvs {
        Some(uvs) => steps.push(Box::new(UvStep { uvs })),
        None => steps.push(Box::new(ZeroFillStep(Channel::Uvs))),
    }
    match sources.tangents {
        Some(tangents) if topology.tangent_indices().len() == topology.corner_count() => {
            steps.push(Box::new(TangentStep {
                tangents,
                tangent_indices: topology.tangent_indices(),
                x_scale: sources.x_scale,
            }))
        }
        _ => steps.push(Box::new(ZeroFillStep(Channel::Tangents))),
    }
    steps
}

/// Copy the vertices of split `split_index` into `buffers`.
///
/// Vertices come out in corner order, or in shared-vertex order when the
/// topology is welded. An unknown split leaves the buffers untouched.
pub fn fill_split(
    topology: &Topology,
    split_index: usize,
    sources: &FillSources<'_>,
    buffers: &mut VertexBufferSet,
) -> FillReport {
    crate::profiling::profile_function!();

    let mut report = FillReport::default();
    let Some(split) = topology.split(split_index) else {
        log::warn!(
            "Split {} requested, topology has {}",
            split_index,
            topology.split_count()
        );
        return report;
    };
    if split.vertex_count == 0 {
        return report;
    }

    let order = if topology.is_welded() {
        VertexOrder::Welded(topology.weld_tables().representatives())
    } else {
        VertexOrder::Corners {
            offset: split.index_offset,
        }
    };
    let walk = VertexWalk::new(topology, order, split.vertex_count);
    report.vertex_count = split.vertex_count;

    let extra_data = topology.take_extra_data_pending();
    for step in select_steps(topology, sources, extra_data) {
        crate::profiling::profile_scope!("copy_step");
        step.run(&walk, buffers, &mut report);
    }

    crate::profiling::profile_plot!("split_vertices", report.vertex_count);
    log::trace!(
        "Filled split {}: {} vertices, normals {}, uvs {}, tangents {}, velocities {}",
        split_index,
        report.vertex_count,
        report.normals,
        report.uvs,
        report.tangents,
        report.velocities
    );
    report
}

/// Write the fan-triangulated indices of submesh `submesh_index`.
///
/// Returns the number of indices written; 0 if the submesh is unknown,
/// `indices` is too small, or its index width cannot address the split.
pub fn write_submesh_indices(
    topology: &Topology,
    submesh_index: usize,
    swap_winding: bool,
    indices: &mut IndexBufferData,
) -> usize {
    let Some(submesh) = topology.submesh(submesh_index) else {
        return 0;
    };
    let required = submesh.triangle_index_count();
    if indices.len() < required {
        log::warn!(
            "Skipping submesh {}: index buffer holds {} indices, {} required",
            submesh_index,
            indices.len(),
            required
        );
        return 0;
    }
    let vertex_count = topology.vertex_buffer_length(submesh.split_index);
    if !indices.can_address(vertex_count) {
        log::warn!(
            "Skipping submesh {}: split {} has {} vertices, too many for {:?} indices",
            submesh_index,
            submesh.split_index,
            vertex_count,
            indices.format()
        );
        return 0;
    }

    let mut cursor = 0usize;
    topology.for_each_triangle(submesh_index, swap_winding, |triangle| {
        for index in triangle {
            indices.set(cursor, index);
            cursor += 1;
        }
    });
    cursor
}
