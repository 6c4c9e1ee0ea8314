//! Vertex welding.
//!
//! Corners that reference the same position and resolve to bit-identical
//! normal and UV values collapse into one shared vertex. The comparison is
//! exact: a UV seam or a hard edge keeps its corners apart.

use crate::attributes::CornerLookup;
use crate::math::{vec2_bits, vec3_bits, Vec2, Vec3};

/// Per-corner attributes considered when welding.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeldAttributes<'a> {
    /// Normals, if the vertex buffer will carry them.
    pub normals: Option<CornerLookup<'a, Vec3>>,
    /// UVs, if the vertex buffer will carry them.
    pub uvs: Option<CornerLookup<'a, Vec2>>,
}

impl WeldAttributes<'_> {
    /// True if corners `a` and `b`, both referencing `position`, carry
    /// identical attribute values.
    fn same_values(&self, a: usize, b: usize, position: u32) -> bool {
        let normals_match = self.normals.map_or(true, |n| {
            vec3_bits(&n.get(a, position)) == vec3_bits(&n.get(b, position))
        });
        let uvs_match = self.uvs.map_or(true, |uv| {
            vec2_bits(&uv.get(a, position)) == vec2_bits(&uv.get(b, position))
        });
        normals_match && uvs_match
    }
}

/// Lookup tables produced by welding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeldTables {
    /// Corner slot -> shared vertex id.
    reindex: Vec<u32>,
    /// Shared vertex id -> source position index.
    shared_positions: Vec<u32>,
    /// Shared vertex id -> corner slot whose attributes it carries.
    representatives: Vec<u32>,
}

impl WeldTables {
    /// Shared vertex id of every corner slot.
    pub fn reindex(&self) -> &[u32] {
        &self.reindex
    }

    /// Source position of every shared vertex.
    pub fn shared_positions(&self) -> &[u32] {
        &self.shared_positions
    }

    /// Corner slot of every shared vertex.
    pub fn representatives(&self) -> &[u32] {
        &self.representatives
    }

    /// Number of shared vertices.
    pub fn vertex_count(&self) -> usize {
        self.shared_positions.len()
    }

    /// True if nothing has been welded.
    pub fn is_empty(&self) -> bool {
        self.reindex.is_empty()
    }

    /// Drop the tables, keeping their allocations.
    pub fn clear(&mut self) {
        self.reindex.clear();
        self.shared_positions.clear();
        self.representatives.clear();
    }

    fn push_vertex(&mut self, position: u32, slot: u32) -> u32 {
        let id = self.shared_positions.len() as u32;
        self.shared_positions.push(position);
        self.representatives.push(slot);
        id
    }
}

/// Weld corners into shared vertices.
///
/// `source_corner` maps a corner slot to the corner whose position and
/// attributes it carries (identity unless quad edges are turned). Positions
/// are visited in ascending order and their occurrences in slot order, so
/// the result is deterministic. A position whose occurrences all agree
/// becomes one shared vertex; otherwise every occurrence gets its own.
pub fn weld_corners(
    corner_indices: &[u32],
    source_corner: impl Fn(usize) -> usize,
    position_count: usize,
    attributes: &WeldAttributes<'_>,
    tables: &mut WeldTables,
) {
    crate::profiling::profile_function!();

    tables.clear();
    let slot_count = corner_indices.len();
    if slot_count == 0 {
        return;
    }

    // Inverse map position -> slots, as offsets into a flat occurrence list.
    let mut offsets = vec![0u32; position_count + 1];
    for slot in 0..slot_count {
        let position = corner_indices[source_corner(slot)] as usize;
        offsets[position + 1] += 1;
    }
    for p in 0..position_count {
        offsets[p + 1] += offsets[p];
    }
    let mut cursor: Vec<u32> = offsets[..position_count].to_vec();
    let mut occurrences = vec![0u32; slot_count];
    for slot in 0..slot_count {
        let position = corner_indices[source_corner(slot)] as usize;
        occurrences[cursor[position] as usize] = slot as u32;
        cursor[position] += 1;
    }

    tables.reindex.resize(slot_count, 0);
    for p in 0..position_count {
        let slots = &occurrences[offsets[p] as usize..offsets[p + 1] as usize];
        let Some(&first) = slots.first() else {
            continue;
        };
        let first_corner = source_corner(first as usize);
        let shareable = slots[1..].iter().all(|&slot| {
            attributes.same_values(first_corner, source_corner(slot as usize), p as u32)
        });

        if shareable {
            let id = tables.push_vertex(p as u32, first);
            for &slot in slots {
                tables.reindex[slot as usize] = id;
            }
        } else {
            for &slot in slots {
                let id = tables.push_vertex(p as u32, slot);
                tables.reindex[slot as usize] = id;
            }
        }
    }

    log::debug!(
        "Welded {} corners over {} positions into {} vertices",
        slot_count,
        position_count,
        tables.vertex_count()
    );
}
