//! Split planning.
//!
//! Faces are packed greedily, in order, into index-buffer-sized chunks. A
//! face is never divided between splits.

use std::ops::RangeInclusive;

/// A face-contiguous range of the mesh drawn from one vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Split {
    /// First face in the split.
    pub first_face: usize,
    /// Last face in the split (inclusive).
    pub last_face: usize,
    /// Corner offset of `first_face`.
    pub index_offset: usize,
    /// Number of vertices in the split's vertex buffer.
    pub vertex_count: usize,
    /// Number of submeshes in the split.
    pub submesh_count: usize,
}

impl Split {
    fn starting_at(first_face: usize, index_offset: usize) -> Self {
        Self {
            first_face,
            last_face: first_face,
            index_offset,
            vertex_count: 0,
            submesh_count: 0,
        }
    }

    /// Faces covered by this split.
    pub fn face_range(&self) -> RangeInclusive<usize> {
        self.first_face..=self.last_face
    }

    /// Number of faces covered by this split.
    pub fn face_count(&self) -> usize {
        self.last_face + 1 - self.first_face
    }
}

/// Partition faces into splits of at most `max_vertices` corners.
///
/// `splits` and `face_split_indices` are cleared and refilled so their
/// allocations carry over between frames. A single face with more corners
/// than `max_vertices` gets a split of its own; it is not subdivided.
pub fn plan_splits(
    face_counts: &[u32],
    max_vertices: usize,
    splits: &mut Vec<Split>,
    face_split_indices: &mut Vec<u32>,
) {
    crate::profiling::profile_function!();

    splits.clear();
    face_split_indices.clear();
    if face_counts.is_empty() {
        return;
    }

    face_split_indices.reserve(face_counts.len());
    let mut current = Split::starting_at(0, 0);
    let mut index_offset = 0usize;

    for (face, &count) in face_counts.iter().enumerate() {
        let count = count as usize;

        if current.vertex_count > 0 && current.vertex_count + count > max_vertices {
            splits.push(current);
            current = Split::starting_at(face, index_offset);
        }
        if count > max_vertices {
            log::warn!(
                "Face {} has {} corners, more than the {} allowed per split",
                face,
                count,
                max_vertices
            );
        }

        face_split_indices.push(splits.len() as u32);
        current.last_face = face;
        current.vertex_count += count;
        index_offset += count;
    }
    splits.push(current);

    log::debug!(
        "Planned {} split(s) for {} faces, {} corners",
        splits.len(),
        face_counts.len(),
        index_offset
    );
}

/// The single split used when vertices are shared across the whole mesh.
pub fn welded_split(face_count: usize, vertex_count: usize) -> Split {
    Split {
        first_face: 0,
        last_face: face_count.saturating_sub(1),
        index_offset: 0,
        vertex_count,
        submesh_count: 0,
    }
}
