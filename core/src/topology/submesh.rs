//! Submesh partitioning and fan triangulation.
//!
//! Each split is divided into one submesh per material group. With a single
//! group the submesh stores only counts and its indices are derived from
//! face order at fill time; with several groups it keeps explicit face and
//! vertex-index lists.

use super::{face_triangle_count, fan_corners, Topology};

/// A (split, material group) cell mapped to one draw call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submesh {
    /// Split the submesh belongs to.
    pub split_index: usize,
    /// Material group within the split.
    pub submesh_index: usize,
    /// Triangles after fan triangulation.
    pub triangle_count: usize,
    /// Corners of the submesh's non-degenerate faces.
    pub index_count: usize,
    /// Non-degenerate faces in the submesh.
    pub face_count: usize,
    faces: Vec<u32>,
    vertex_indices: Vec<u32>,
}

impl Submesh {
    /// Number of indices written by fan triangulation.
    pub fn triangle_index_count(&self) -> usize {
        self.triangle_count * 3
    }

    /// Faces of the submesh; empty with a single material group.
    pub fn faces(&self) -> &[u32] {
        &self.faces
    }

    /// Split-local vertex index of each corner of [`faces`](Self::faces).
    pub fn vertex_indices(&self) -> &[u32] {
        &self.vertex_indices
    }
}

/// Per-submesh record handed to the host while iterating submeshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmeshSummary {
    /// Position in the topology's submesh table.
    pub index: usize,
    /// Split the submesh belongs to.
    pub split_index: usize,
    /// Material group within the split.
    pub submesh_index: usize,
    /// Triangles in the submesh.
    pub triangle_count: usize,
}

impl SubmeshSummary {
    pub(crate) fn new(index: usize, submesh: &Submesh) -> Self {
        Self {
            index,
            split_index: submesh.split_index,
            submesh_index: submesh.submesh_index,
            triangle_count: submesh.triangle_count,
        }
    }
}

impl Topology {
    /// Assign faces to material groups and rebuild the submesh table.
    ///
    /// `face_sets[g]` lists the faces of group `g`. Faces in no set fall into
    /// group 0; a face listed twice keeps the last assignment. Faces that do
    /// not exist are skipped with a warning.
    pub fn set_face_sets(&mut self, face_sets: &[Vec<u32>]) {
        self.face_groups.clear();
        self.group_count = face_sets.len().max(1);

        if face_sets.len() > 1 {
            let face_count = self.face_count();
            self.face_groups.resize(face_count, 0);
            for (group, faces) in face_sets.iter().enumerate() {
                for &face in faces {
                    match self.face_groups.get_mut(face as usize) {
                        Some(slot) => *slot = group as u32,
                        None => log::warn!(
                            "Face set {} references face {}, but only {} faces exist",
                            group,
                            face,
                            face_count
                        ),
                    }
                }
            }
        }

        self.partition_submeshes();
    }

    /// Number of material groups.
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Rebuild submeshes for the current splits and material groups.
    pub(super) fn partition_submeshes(&mut self) {
        crate::profiling::profile_function!();

        let explicit = !self.face_groups.is_empty();
        let groups = self.group_count.max(1);
        let welded = self.is_welded();
        let reindex = self.weld.reindex();

        let mut submeshes = std::mem::take(&mut self.submeshes);
        submeshes.clear();

        for (split_index, split) in self.splits.iter_mut().enumerate() {
            split.submesh_count = groups;
            let base = submeshes.len();
            submeshes.extend((0..groups).map(|submesh_index| Submesh {
                split_index,
                submesh_index,
                ..Default::default()
            }));

            for face in split.face_range() {
                let count = self.face_counts[face];
                if count < 3 {
                    continue;
                }
                let group = if explicit {
                    self.face_groups[face] as usize
                } else {
                    0
                };
                let submesh = &mut submeshes[base + group];
                submesh.triangle_count += face_triangle_count(count);
                submesh.index_count += count as usize;
                submesh.face_count += 1;

                if explicit {
                    submesh.faces.push(face as u32);
                    let start = self.face_offsets[face] as usize;
                    for slot in start..start + count as usize {
                        let local = if welded {
                            reindex[slot]
                        } else {
                            (slot - split.index_offset) as u32
                        };
                        submesh.vertex_indices.push(local);
                    }
                }
            }
        }

        log::trace!(
            "Partitioned {} split(s) into {} submesh(es)",
            self.splits.len(),
            submeshes.len()
        );
        self.submeshes = submeshes;
    }

    /// All submeshes, ordered by split then material group.
    pub fn submeshes(&self) -> &[Submesh] {
        &self.submeshes
    }

    /// Submesh by table index.
    pub fn submesh(&self, index: usize) -> Option<&Submesh> {
        self.submeshes.get(index)
    }

    /// Number of submeshes in a split, 0 for an unknown index.
    pub fn split_submesh_count(&self, split_index: usize) -> usize {
        self.splits
            .get(split_index)
            .map_or(0, |split| split.submesh_count)
    }

    /// Split-local vertex index of a corner slot.
    #[inline]
    fn local_index(&self, slot: usize, index_offset: usize) -> u32 {
        if self.is_welded() {
            self.weld.reindex()[slot]
        } else {
            (slot - index_offset) as u32
        }
    }

    /// Walk the fan triangles of a submesh in split-local vertex indices.
    ///
    /// Each face is fanned from its first corner; `swap_winding` exchanges
    /// the two non-anchor corners of every triangle.
    pub fn for_each_triangle(
        &self,
        submesh_index: usize,
        swap_winding: bool,
        mut emit: impl FnMut([u32; 3]),
    ) {
        let Some(submesh) = self.submeshes.get(submesh_index) else {
            return;
        };
        let (i1, i2) = fan_corners(swap_winding);

        if self.face_groups.is_empty() {
            let Some(split) = self.splits.get(submesh.split_index) else {
                return;
            };
            for face in split.face_range() {
                let count = self.face_counts[face] as usize;
                if count < 3 {
                    continue;
                }
                let first = self.face_offsets[face] as usize;
                let local = |corner: usize| self.local_index(first + corner, split.index_offset);
                for t in 0..count - 2 {
                    emit([local(0), local(t + i1), local(t + i2)]);
                }
            }
        } else {
            let mut cursor = 0usize;
            for &face in &submesh.faces {
                let count = self.face_counts[face as usize] as usize;
                let corners = &submesh.vertex_indices[cursor..cursor + count];
                for t in 0..count - 2 {
                    emit([corners[0], corners[t + i1], corners[t + i2]]);
                }
                cursor += count;
            }
        }
    }
}
