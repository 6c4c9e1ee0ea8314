//! Face structure and everything derived from it.
//!
//! This module provides:
//! - [`Topology`] - Face counts, corner indices and the tables built from them
//! - [`Split`] / [`plan_splits`] - Index-buffer-sized face ranges
//! - [`WeldTables`] / [`weld_corners`] - Corner to shared-vertex mapping
//! - [`Submesh`] / [`SubmeshSummary`] - Per-split material groups
//!
//! A topology is built once per frame for meshes with varying topology and
//! once per stream otherwise; in the latter case every sample holds an
//! `Arc` to the same instance.
//!
//! # Corner slots
//!
//! Everything downstream of the topology walks *corner slots*. A slot is a
//! corner position in output order; [`Topology::source_corner`] maps it back
//! to the corner whose position and attributes it carries. The two differ
//! only when quad edges are turned, in which case 4-corner faces are rotated
//! by one corner so fan triangulation picks the other diagonal.

pub mod split;
pub mod submesh;
pub mod weld;

use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};

pub use split::{plan_splits, welded_split, Split};
pub use submesh::{Submesh, SubmeshSummary};
pub use weld::{weld_corners, WeldAttributes, WeldTables};

use crate::config::TopologySettings;
use crate::error::MeshError;
use crate::pool::Poolable;

/// Slot -> corner offset within a 4-corner face when quad edges are turned.
const QUAD_TURN_REMAP: [u32; 4] = [3, 0, 1, 2];

/// Fan corner offsets `(i1, i2)` for triangle `t` of a face: the triangle is
/// `(0, t + i1, t + i2)`.
#[inline]
pub fn fan_corners(swap_winding: bool) -> (usize, usize) {
    if swap_winding {
        (2, 1)
    } else {
        (1, 2)
    }
}

/// Number of triangles a face with `count` corners contributes.
#[inline]
pub fn face_triangle_count(count: u32) -> usize {
    (count as usize).saturating_sub(2)
}

/// Set after welding; cleared by the first fill that writes extra vertex data.
#[derive(Debug, Default)]
struct PendingFlag(AtomicBool);

impl PendingFlag {
    fn set(&self, value: bool) {
        self.0.store(value, Ordering::Relaxed);
    }

    fn take(&self) -> bool {
        self.0.swap(false, Ordering::Relaxed)
    }
}

impl Clone for PendingFlag {
    fn clone(&self) -> Self {
        Self(AtomicBool::new(self.0.load(Ordering::Relaxed)))
    }
}

/// Face structure of one mesh frame plus its derived tables.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    face_counts: Vec<u32>,
    corner_indices: Vec<u32>,
    face_offsets: Vec<u32>,
    /// Slot -> source corner; empty for the identity order.
    corner_order: Vec<u32>,
    triangulated_index_count: usize,
    settings: TopologySettings,

    sharing_enabled: bool,
    weld: WeldTables,
    extra_data_pending: PendingFlag,

    splits: Vec<Split>,
    face_split_indices: Vec<u32>,

    /// Face -> material group; empty when there is a single group.
    face_groups: Vec<u32>,
    group_count: usize,
    submeshes: Vec<Submesh>,

    tangent_indices: Vec<u32>,
    tangent_count: usize,
}

impl Topology {
    /// Build a topology from face counts and corner indices.
    pub fn new(
        face_counts: &[u32],
        corner_indices: &[u32],
        settings: TopologySettings,
    ) -> Result<Self, MeshError> {
        let mut topology = Self::default();
        topology.rebuild(face_counts, corner_indices, settings)?;
        Ok(topology)
    }

    /// Replace the face structure, discarding every derived table.
    ///
    /// Allocations are kept, so a recycled topology rebuilds without
    /// reallocating when the next frame is no larger than the previous one.
    pub fn rebuild(
        &mut self,
        face_counts: &[u32],
        corner_indices: &[u32],
        settings: TopologySettings,
    ) -> Result<(), MeshError> {
        crate::profiling::profile_function!();

        let expected: usize = face_counts.iter().map(|&c| c as usize).sum();
        if expected != corner_indices.len() {
            return Err(MeshError::CornerCountMismatch {
                expected,
                actual: corner_indices.len(),
            });
        }

        self.clear();
        self.settings = settings;
        self.face_counts.extend_from_slice(face_counts);
        self.corner_indices.extend_from_slice(corner_indices);

        self.face_offsets.reserve(face_counts.len());
        let mut offset = 0u32;
        for &count in face_counts {
            self.face_offsets.push(offset);
            offset += count;
            self.triangulated_index_count += face_triangle_count(count) * 3;
        }

        if settings.turn_quad_edges {
            self.build_quad_turn();
        }

        self.sharing_enabled = settings.share_vertices;
        self.group_count = 1;
        self.update_splits();

        log::trace!(
            "Built topology: {} faces, {} corners, {} triangulated indices",
            self.face_count(),
            self.corner_count(),
            self.triangulated_index_count
        );
        Ok(())
    }

    fn build_quad_turn(&mut self) {
        self.corner_order.clear();
        self.corner_order.extend(0..self.corner_indices.len() as u32);
        let mut turned = 0usize;
        for (&count, &offset) in self.face_counts.iter().zip(&self.face_offsets) {
            if count == 4 {
                for (slot, remap) in QUAD_TURN_REMAP.iter().enumerate() {
                    self.corner_order[offset as usize + slot] = offset + remap;
                }
                turned += 1;
            }
        }
        log::debug!("Turned edges of {} quads", turned);
    }

    /// Check every corner against the frame's position count.
    pub fn validate_positions(&self, position_count: usize) -> Result<(), MeshError> {
        match self
            .corner_indices
            .iter()
            .position(|&i| i as usize >= position_count)
        {
            Some(corner) => Err(MeshError::PositionIndexOutOfRange {
                corner,
                index: self.corner_indices[corner],
                position_count,
            }),
            None => Ok(()),
        }
    }

    /// Settings the topology was built with.
    pub fn settings(&self) -> TopologySettings {
        self.settings
    }

    /// Corner count of every face.
    pub fn face_counts(&self) -> &[u32] {
        &self.face_counts
    }

    /// Position index of every corner, in source order.
    pub fn corner_indices(&self) -> &[u32] {
        &self.corner_indices
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.face_counts.len()
    }

    /// Number of corners.
    pub fn corner_count(&self) -> usize {
        self.corner_indices.len()
    }

    /// Index count after fan triangulation, degenerate faces excluded.
    pub fn triangulated_index_count(&self) -> usize {
        self.triangulated_index_count
    }

    /// Corner slots of `face`.
    pub fn face_slots(&self, face: usize) -> Range<usize> {
        let start = self.face_offsets[face] as usize;
        start..start + self.face_counts[face] as usize
    }

    /// Source corner carried by `slot`.
    #[inline]
    pub fn source_corner(&self, slot: usize) -> usize {
        self.corner_order
            .get(slot)
            .map_or(slot, |&corner| corner as usize)
    }

    /// Position referenced by `slot`.
    #[inline]
    pub fn slot_position(&self, slot: usize) -> u32 {
        self.corner_indices[self.source_corner(slot)]
    }

    /// True if quad edges have been turned.
    pub fn has_turned_quads(&self) -> bool {
        !self.corner_order.is_empty()
    }

    // --- Splits ---

    /// Number of splits, re-planning first if the table is stale or `force` is set.
    pub fn refresh_splits(&mut self, force: bool) -> usize {
        if force || self.splits_stale() {
            self.update_splits();
        }
        self.splits.len()
    }

    /// True if the split table no longer covers every face.
    pub fn splits_stale(&self) -> bool {
        self.face_split_indices.len() != self.face_count()
    }

    /// Re-plan splits and the submeshes that depend on them.
    fn update_splits(&mut self) {
        if self.is_welded() {
            let split = welded_split(self.face_count(), self.weld.vertex_count());
            self.splits.clear();
            self.splits.push(split);
            self.face_split_indices.clear();
            self.face_split_indices.resize(self.face_count(), 0);
        } else {
            plan_splits(
                &self.face_counts,
                self.settings.index_format.max_split_vertices(),
                &mut self.splits,
                &mut self.face_split_indices,
            );
        }
        self.partition_submeshes();
    }

    /// Number of splits.
    pub fn split_count(&self) -> usize {
        self.splits.len()
    }

    /// All splits.
    pub fn splits(&self) -> &[Split] {
        &self.splits
    }

    /// Split by index.
    pub fn split(&self, index: usize) -> Option<&Split> {
        self.splits.get(index)
    }

    /// Split containing each face.
    pub fn face_split_indices(&self) -> &[u32] {
        &self.face_split_indices
    }

    /// Vertex count of a split, 0 for an unknown index.
    pub fn vertex_buffer_length(&self, split_index: usize) -> usize {
        self.splits
            .get(split_index)
            .map_or(0, |split| split.vertex_count)
    }

    // --- Welding ---

    /// Weld corners into shared vertices if sharing was requested.
    ///
    /// Sharing is dropped for this topology when the shared vertex count
    /// does not fit a single split. Returns whether the topology is welded.
    pub fn weld(&mut self, attributes: &WeldAttributes<'_>, position_count: usize) -> bool {
        self.weld.clear();
        self.sharing_enabled = self.settings.share_vertices;
        if !self.sharing_enabled || self.corner_indices.is_empty() {
            self.update_splits();
            return false;
        }

        let mut tables = std::mem::take(&mut self.weld);
        weld_corners(
            &self.corner_indices,
            |slot| self.source_corner(slot),
            position_count,
            attributes,
            &mut tables,
        );
        self.weld = tables;
        crate::profiling::profile_plot!("welded_vertices", self.weld.vertex_count());

        let limit = self.settings.index_format.max_split_vertices();
        if self.weld.vertex_count() > limit {
            log::warn!(
                "Disabling vertex sharing: {} shared vertices exceed the split limit of {}",
                self.weld.vertex_count(),
                limit
            );
            self.weld.clear();
            self.sharing_enabled = false;
        } else {
            self.extra_data_pending.set(true);
        }

        self.update_splits();
        self.is_welded()
    }

    /// True if corners are mapped to shared vertices.
    pub fn is_welded(&self) -> bool {
        self.sharing_enabled && !self.weld.is_empty()
    }

    /// Welding tables (empty unless welded).
    pub fn weld_tables(&self) -> &WeldTables {
        &self.weld
    }

    /// Whether the next fill must write normals, UVs and tangents.
    ///
    /// Always true unless the topology is welded with static extra data, in
    /// which case only the first call after a weld returns true.
    pub(crate) fn take_extra_data_pending(&self) -> bool {
        if self.is_welded() && self.settings.treat_vertex_extra_data_as_static {
            self.extra_data_pending.take()
        } else {
            true
        }
    }

    // --- Tangent indices ---

    /// Tangent slot of every corner slot; empty if not computed.
    pub fn tangent_indices(&self) -> &[u32] {
        &self.tangent_indices
    }

    /// Number of tangent slots.
    pub fn tangent_count(&self) -> usize {
        self.tangent_count
    }

    /// True if tangent indices are present.
    pub fn has_tangent_indices(&self) -> bool {
        !self.tangent_indices.is_empty()
    }

    /// Recompute tangent indices with `build`, which fills the index table
    /// and returns the slot count.
    pub(crate) fn rebuild_tangent_indices(
        &mut self,
        build: impl FnOnce(&Self, &mut Vec<u32>) -> usize,
    ) {
        let mut indices = std::mem::take(&mut self.tangent_indices);
        indices.clear();
        let count = build(self, &mut indices);
        self.tangent_indices = indices;
        self.tangent_count = count;
    }

    /// Drop tangent indices.
    pub fn clear_tangent_indices(&mut self) {
        self.tangent_indices.clear();
        self.tangent_count = 0;
    }

    /// Drop everything, keeping allocations.
    pub fn clear(&mut self) {
        self.face_counts.clear();
        self.corner_indices.clear();
        self.face_offsets.clear();
        self.corner_order.clear();
        self.triangulated_index_count = 0;
        self.settings = TopologySettings::default();
        self.sharing_enabled = false;
        self.weld.clear();
        self.extra_data_pending.set(false);
        self.splits.clear();
        self.face_split_indices.clear();
        self.face_groups.clear();
        self.group_count = 1;
        self.submeshes.clear();
        self.tangent_indices.clear();
        self.tangent_count = 0;
    }
}

impl Poolable for Topology {
    fn new_empty() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        self.clear();
    }
}
