//! Unprocessed copies of a sample's arrays.

use crate::math::{Bounds, Vec2, Vec3};

/// Host-sized destinations for [`Sample::copy_raw_data`](crate::sample::Sample::copy_raw_data).
///
/// Size each array from the mesh summary's peak counts. After a copy, every
/// `*_count` field holds the number of elements written; an array smaller
/// than its source gets 0 and is left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMeshBuffers {
    /// Corner count of every face.
    pub face_counts: Vec<u32>,
    /// Faces written.
    pub face_count: usize,
    /// Position index of every corner.
    pub corner_indices: Vec<u32>,
    /// Corners written.
    pub corner_index_count: usize,
    /// Positions.
    pub positions: Vec<Vec3>,
    /// Positions written.
    pub position_count: usize,
    /// Velocities.
    pub velocities: Vec<Vec3>,
    /// Velocities written.
    pub velocity_count: usize,
    /// Normal values.
    pub normals: Vec<Vec3>,
    /// Normal values written.
    pub normal_count: usize,
    /// Normal indices.
    pub normal_indices: Vec<u32>,
    /// Normal indices written.
    pub normal_index_count: usize,
    /// UV values.
    pub uvs: Vec<Vec2>,
    /// UV values written.
    pub uv_count: usize,
    /// UV indices.
    pub uv_indices: Vec<u32>,
    /// UV indices written.
    pub uv_index_count: usize,
    /// Bounds of the sample.
    pub bounds: Bounds,
}

impl RawMeshBuffers {
    /// Zeroed destinations with room for the given element counts.
    pub fn with_capacity(face_count: usize, corner_count: usize, position_count: usize) -> Self {
        Self {
            face_counts: vec![0; face_count],
            corner_indices: vec![0; corner_count],
            positions: vec![Vec3::zeros(); position_count],
            velocities: vec![Vec3::zeros(); position_count],
            normals: vec![Vec3::zeros(); corner_count.max(position_count)],
            normal_indices: vec![0; corner_count],
            uvs: vec![Vec2::zeros(); corner_count.max(position_count)],
            uv_indices: vec![0; corner_count],
            ..Default::default()
        }
    }
}

/// Copy `src` into the front of `dst` if it fits. Returns the count written.
pub(crate) fn copy_checked<T: Copy>(name: &str, src: Option<&[T]>, dst: &mut [T]) -> usize {
    let Some(src) = src else {
        return 0;
    };
    if dst.len() < src.len() {
        if !dst.is_empty() {
            log::warn!(
                "Skipping raw {}: destination holds {}, source has {}",
                name,
                dst.len(),
                src.len()
            );
        }
        return 0;
    }
    dst[..src.len()].copy_from_slice(src);
    src.len()
}
