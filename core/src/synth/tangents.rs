//! Tangent space synthesis.
//!
//! Tangents are computed in two passes:
//! 1. [`build_tangent_indices`] assigns every corner slot a tangent slot,
//!    one per position (smooth) or one per distinct (normal, uv) pair.
//! 2. [`compute_tangents`] accumulates per-face UV-gradient tangents and
//!    bitangents into those slots, then orthogonalizes against the normal.

use std::collections::HashMap;

use crate::attributes::CornerLookup;
use crate::config::TangentsMode;
use crate::math::{normalize_or_zero, vec2_bits, vec3_bits, Vec2, Vec3, Vec4};
use crate::topology::{fan_corners, Topology};

/// Exact (normal, uv) identity of a corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TangentKey {
    normal: [u32; 3],
    uv: [u32; 2],
}

impl TangentKey {
    fn new(normal: &Vec3, uv: &Vec2) -> Self {
        Self {
            normal: vec3_bits(normal),
            uv: vec2_bits(uv),
        }
    }
}

/// Per-corner inputs for tangent synthesis.
#[derive(Debug, Clone, Copy)]
pub struct TangentInputs<'a> {
    /// Current positions.
    pub positions: &'a [Vec3],
    /// Normals the tangents are orthogonalized against.
    pub normals: CornerLookup<'a, Vec3>,
    /// Texture coordinates.
    pub uvs: CornerLookup<'a, Vec2>,
}

/// Assign a tangent slot to every corner slot. Returns the slot count.
pub fn build_tangent_indices(
    topology: &Topology,
    mode: TangentsMode,
    inputs: &TangentInputs<'_>,
    indices: &mut Vec<u32>,
) -> usize {
    crate::profiling::profile_function!();

    indices.clear();
    let slot_count = topology.corner_count();
    let count = match mode {
        TangentsMode::None => 0,
        TangentsMode::Smooth => {
            indices.extend((0..slot_count).map(|slot| topology.slot_position(slot)));
            inputs.positions.len()
        }
        TangentsMode::PerCorner => {
            let mut unique: HashMap<TangentKey, u32> = HashMap::new();
            indices.reserve(slot_count);
            for slot in 0..slot_count {
                let corner = topology.source_corner(slot);
                let position = topology.slot_position(slot);
                let key = TangentKey::new(
                    &inputs.normals.get(corner, position),
                    &inputs.uvs.get(corner, position),
                );
                let next = unique.len() as u32;
                indices.push(*unique.entry(key).or_insert(next));
            }
            unique.len()
        }
    };

    log::debug!("{} unique tangent(s) for {} corners", count, slot_count);
    count
}

/// Compute one tangent per tangent slot.
///
/// `w` carries the bitangent sign: +1 when `cross(N, T)` points along the
/// accumulated bitangent, -1 otherwise, inverted when `swap_handedness` is set.
pub fn compute_tangents(
    topology: &Topology,
    inputs: &TangentInputs<'_>,
    swap_winding: bool,
    swap_handedness: bool,
    tangents: &mut Vec<Vec4>,
) {
    crate::profiling::profile_function!();

    let tangent_count = topology.tangent_count();
    let tangent_indices = topology.tangent_indices();
    tangents.clear();
    if tangent_indices.len() != topology.corner_count() {
        return;
    }

    let mut tangent_sums = vec![Vec3::zeros(); tangent_count];
    let mut bitangent_sums = vec![Vec3::zeros(); tangent_count];
    let mut slot_normals = vec![Vec3::zeros(); tangent_count];
    let (i1, i2) = fan_corners(swap_winding);

    let corner_data = |slot: usize| {
        let corner = topology.source_corner(slot);
        let position = topology.slot_position(slot);
        (
            inputs.positions[position as usize],
            inputs.uvs.get(corner, position),
        )
    };

    for face in 0..topology.face_count() {
        let slots = topology.face_slots(face);
        let count = slots.len();
        if count < 3 {
            continue;
        }

        let first = slots.start;
        let (p0, uv0) = corner_data(first);
        let mut t = Vec3::zeros();
        let mut b = Vec3::zeros();

        for tri in 0..count - 2 {
            let (p1, uv1) = corner_data(first + tri + i1);
            let (p2, uv2) = corner_data(first + tri + i2);
            let dp1 = p1 - p0;
            let dp2 = p2 - p0;
            let duv1 = uv1 - uv0;
            let duv2 = uv2 - uv0;

            let det = duv1.x * duv2.y - duv1.y * duv2.x;
            if det == 0.0 {
                continue;
            }
            let r = 1.0 / det;
            t += normalize_or_zero((dp1 * duv2.y - dp2 * duv1.y) * r);
            b += normalize_or_zero((dp2 * duv1.x - dp1 * duv2.x) * r);
        }

        if count > 3 {
            t = normalize_or_zero(t);
            b = normalize_or_zero(b);
        }

        for slot in slots {
            let id = tangent_indices[slot] as usize;
            tangent_sums[id] += t;
            bitangent_sums[id] += b;
            slot_normals[id] = inputs
                .normals
                .get(topology.source_corner(slot), topology.slot_position(slot));
        }
    }

    tangents.reserve(tangent_count);
    for ((&t, &b), &n) in tangent_sums.iter().zip(&bitangent_sums).zip(&slot_normals) {
        let ortho = normalize_or_zero(t - n * t.dot(&n));
        let negative = n.cross(&t).dot(&b) < 0.0;
        let w = if negative != swap_handedness { -1.0 } else { 1.0 };
        tangents.push(Vec4::new(ortho.x, ortho.y, ortho.z, w));
    }

    log::debug!("Computed {} tangents", tangents.len());
}
