//! Smooth normal synthesis.

use crate::math::{normalize_or_zero, Vec3};
use crate::topology::{fan_corners, Topology};

/// Compute one smooth normal per position.
///
/// Each face contributes its fan-averaged normal to every position it
/// touches; the sums are normalized once all faces are processed. Positions
/// not referenced by any non-degenerate face end up as zero vectors.
pub fn compute_smooth_normals(
    topology: &Topology,
    positions: &[Vec3],
    swap_winding: bool,
    normals: &mut Vec<Vec3>,
) {
    crate::profiling::profile_function!();

    normals.clear();
    normals.resize(positions.len(), Vec3::zeros());
    let (i1, i2) = fan_corners(swap_winding);

    for face in 0..topology.face_count() {
        let slots = topology.face_slots(face);
        let count = slots.len();
        if count < 3 {
            continue;
        }

        let first = slots.start;
        let p0 = positions[topology.slot_position(first) as usize];
        let mut face_normal = Vec3::zeros();
        for t in 0..count - 2 {
            let p1 = positions[topology.slot_position(first + t + i1) as usize];
            let p2 = positions[topology.slot_position(first + t + i2) as usize];
            face_normal += normalize_or_zero((p2 - p0).cross(&(p1 - p0)));
        }
        if count > 3 {
            face_normal = normalize_or_zero(face_normal);
        }

        for slot in slots {
            normals[topology.slot_position(slot) as usize] += face_normal;
        }
    }

    for n in normals.iter_mut() {
        *n = normalize_or_zero(*n);
    }

    log::debug!("Computed {} smooth normals", normals.len());
}
