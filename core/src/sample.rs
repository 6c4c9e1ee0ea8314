//! One frame of a mesh, ready for buffer fills.
//!
//! A [`Sample`] holds the frame's attribute arrays, the attributes
//! synthesized from them and an `Arc` to its [`Topology`]. Samples of a
//! non-varying mesh share one topology; a sample mutates it only through
//! `Arc::make_mut`, so a sample that still shares its topology with older
//! samples gets a private copy instead of changing theirs.
//!
//! The copy costs a full topology clone. It happens whenever a sample has
//! to rewrite topology tables (tangent slots with `cache_tangent_splits`
//! off, a re-weld after a normals change) while the host still holds an
//! older sample of the same mesh. Recycling samples before reading the
//! next one keeps every update in place.
//!
//! Host protocol for one frame:
//!
//! ```ignore
//! let summary = sample.summary(false);
//! for split in 0..summary.split_count {
//!     let mut buffers = VertexBufferSet::new(sample.vertex_buffer_length(split), channels);
//!     sample.fill_vertex_buffer(split, &mut buffers);
//! }
//! sample.prepare_submeshes();
//! while let Some(submesh) = sample.next_submesh() {
//!     let mut indices = IndexBufferData::new(format, submesh.triangle_count * 3);
//!     sample.fill_submesh_indices(&submesh, &mut indices);
//! }
//! ```

use std::sync::Arc;

use crate::attributes::{AttributeSource, CornerLookup};
use crate::config::{MeshConfig, NormalsMode, TangentsMode};
use crate::error::MeshError;
use crate::fill::{self, FillReport, FillSources, IndexBufferData, Motion, VertexBufferSet};
use crate::math::{Bounds, Vec2, Vec3, Vec4};
use crate::raw::{copy_checked, RawMeshBuffers};
use crate::source::{FrameData, SampleTime};
use crate::synth::{self, TangentInputs};
use crate::topology::{SubmeshSummary, Topology, WeldAttributes};

/// What a sample can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SampleSummary {
    /// Number of splits.
    pub split_count: usize,
    /// Normals are available.
    pub has_normals: bool,
    /// UVs are available.
    pub has_uvs: bool,
    /// Tangents are available.
    pub has_tangents: bool,
    /// Motion vectors are emitted.
    pub has_velocities: bool,
}

/// Effect of [`Sample::update_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigChange {
    /// Index buffers must be refilled.
    pub topology_changed: bool,
    /// Vertex buffers must be refilled.
    pub data_changed: bool,
}

/// Normals written to the vertex buffer under `config`.
fn output_normals<'a>(
    config: &MeshConfig,
    normals: Option<&'a AttributeSource<Vec3>>,
    smooth: &'a [Vec3],
) -> Option<CornerLookup<'a, Vec3>> {
    let smooth = (!smooth.is_empty()).then_some(CornerLookup::PerPosition(smooth));
    match config.normals_mode {
        NormalsMode::Ignore => None,
        NormalsMode::ReadFromFile => normals.map(AttributeSource::lookup),
        NormalsMode::ComputeIfMissing => normals.map(AttributeSource::lookup).or(smooth),
        NormalsMode::AlwaysCompute => smooth,
    }
}

/// Normals tangents are orthogonalized against under `config`.
fn tangent_normals<'a>(
    config: &MeshConfig,
    normals: Option<&'a AttributeSource<Vec3>>,
    smooth: &'a [Vec3],
) -> Option<CornerLookup<'a, Vec3>> {
    if synth::smooth_normals_required(config, normals.is_some()) {
        (!smooth.is_empty()).then_some(CornerLookup::PerPosition(smooth))
    } else {
        normals.map(AttributeSource::lookup)
    }
}

/// One frame of a mesh stream.
#[derive(Debug, Clone)]
pub struct Sample {
    config: MeshConfig,
    topology: Arc<Topology>,
    owns_topology: bool,
    varying_topology: bool,
    topology_changed: bool,

    positions: Vec<Vec3>,
    next_positions: Option<Vec<Vec3>>,
    velocities: Option<Vec<Vec3>>,
    normals: Option<AttributeSource<Vec3>>,
    uvs: Option<AttributeSource<Vec2>>,
    bounds: Bounds,
    time: SampleTime,

    smooth_normals: Vec<Vec3>,
    tangents: Vec<Vec4>,

    submesh_cursor: usize,
}

impl Sample {
    /// Build a standalone sample that owns the frame's face structure.
    pub fn from_frame(config: MeshConfig, frame: FrameData) -> Result<Self, MeshError> {
        let faces = frame.topology.as_ref().ok_or(MeshError::MissingTopology(0))?;
        let mut topology = Topology::new(
            &faces.face_counts,
            &faces.corner_indices,
            config.topology_settings(),
        )?;
        topology.set_face_sets(&frame.face_sets);
        Self::with_topology(
            config,
            Arc::new(topology),
            true,
            false,
            frame,
            None,
            SampleTime::default(),
            true,
        )
    }

    /// Build a sample over an existing topology and prepare it for fills.
    ///
    /// `topology_changed` tells the sample that the topology was just built,
    /// so topology-level tables (tangent slots, welding) must be computed
    /// rather than reused.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn with_topology(
        config: MeshConfig,
        topology: Arc<Topology>,
        owns_topology: bool,
        varying_topology: bool,
        frame: FrameData,
        next_positions: Option<Vec<Vec3>>,
        time: SampleTime,
        topology_changed: bool,
    ) -> Result<Self, MeshError> {
        Self::validate_frame(&topology, &frame, next_positions.as_deref())?;
        Ok(Self::from_validated(
            config,
            topology,
            owns_topology,
            varying_topology,
            frame,
            next_positions,
            time,
            topology_changed,
        ))
    }

    /// Check that `frame` and `next_positions` fit `topology`.
    pub(crate) fn validate_frame(
        topology: &Topology,
        frame: &FrameData,
        next_positions: Option<&[Vec3]>,
    ) -> Result<(), MeshError> {
        topology.validate_positions(frame.positions.len())?;
        frame.validate(topology.face_count(), topology.corner_count())?;
        if let Some(next) = next_positions {
            if next.len() != frame.positions.len() {
                return Err(MeshError::NextPositionCount {
                    expected: frame.positions.len(),
                    actual: next.len(),
                });
            }
        }
        Ok(())
    }

    /// [`Sample::with_topology`] for a frame already passed through
    /// [`Sample::validate_frame`].
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_validated(
        config: MeshConfig,
        topology: Arc<Topology>,
        owns_topology: bool,
        varying_topology: bool,
        frame: FrameData,
        next_positions: Option<Vec<Vec3>>,
        time: SampleTime,
        topology_changed: bool,
    ) -> Self {
        let bounds = frame
            .bounds
            .unwrap_or_else(|| Bounds::from_points(&frame.positions));
        let mut sample = Self {
            config,
            topology,
            owns_topology,
            varying_topology,
            topology_changed,
            positions: frame.positions,
            next_positions,
            velocities: frame.velocities,
            normals: frame.normals,
            uvs: frame.uvs,
            bounds,
            time,
            smooth_normals: Vec::new(),
            tangents: Vec::new(),
            submesh_cursor: 0,
        };
        sample.prepare(topology_changed);
        sample
    }

    /// Compute derived attributes and topology tables for a fresh sample.
    fn prepare(&mut self, topology_changed: bool) {
        crate::profiling::profile_function!();

        if synth::smooth_normals_required(&self.config, self.normals.is_some()) {
            self.compute_smooth_normals();
        }

        if synth::tangents_requested(&self.config, self.uvs.is_some())
            && self.tangent_normals().is_some()
        {
            if !self.topology.has_tangent_indices()
                || !self.config.cache_tangent_splits
                || topology_changed
            {
                self.rebuild_tangent_indices();
            }
            self.compute_tangents();
        }

        if self.config.share_vertices && topology_changed && !self.varying_topology {
            self.weld();
        }

        if self.topology.splits_stale() {
            self.topology_mut().refresh_splits(true);
        }
    }

    fn topology_mut(&mut self) -> &mut Topology {
        Arc::make_mut(&mut self.topology)
    }

    fn tangent_normals(&self) -> Option<CornerLookup<'_, Vec3>> {
        tangent_normals(&self.config, self.normals.as_ref(), &self.smooth_normals)
    }

    fn output_normals(&self) -> Option<CornerLookup<'_, Vec3>> {
        output_normals(&self.config, self.normals.as_ref(), &self.smooth_normals)
    }

    fn compute_smooth_normals(&mut self) {
        synth::compute_smooth_normals(
            &self.topology,
            &self.positions,
            self.config.swap_face_winding,
            &mut self.smooth_normals,
        );
    }

    fn rebuild_tangent_indices(&mut self) {
        let (Some(normals), Some(uvs)) = (
            tangent_normals(&self.config, self.normals.as_ref(), &self.smooth_normals),
            self.uvs.as_ref().map(AttributeSource::lookup),
        ) else {
            return;
        };
        let inputs = TangentInputs {
            positions: &self.positions,
            normals,
            uvs,
        };
        let mode = self.config.tangents_mode;
        Arc::make_mut(&mut self.topology).rebuild_tangent_indices(|topology, indices| {
            synth::build_tangent_indices(topology, mode, &inputs, indices)
        });
    }

    fn compute_tangents(&mut self) {
        let (Some(normals), Some(uvs)) = (
            tangent_normals(&self.config, self.normals.as_ref(), &self.smooth_normals),
            self.uvs.as_ref().map(AttributeSource::lookup),
        ) else {
            self.tangents.clear();
            return;
        };
        let inputs = TangentInputs {
            positions: &self.positions,
            normals,
            uvs,
        };
        synth::compute_tangents(
            &self.topology,
            &inputs,
            self.config.swap_face_winding,
            self.config.swap_handedness,
            &mut self.tangents,
        );
    }

    fn weld(&mut self) -> bool {
        // Corners in different tangent slots must stay apart even when
        // their normals are not emitted.
        let emit_normals = self.has_normals();
        let split_tangents =
            self.config.tangents_mode == TangentsMode::PerCorner && self.has_tangents();
        let normals = if emit_normals {
            output_normals(&self.config, self.normals.as_ref(), &self.smooth_normals)
        } else if split_tangents {
            tangent_normals(&self.config, self.normals.as_ref(), &self.smooth_normals)
        } else {
            None
        };
        let attributes = WeldAttributes {
            normals,
            uvs: self.uvs.as_ref().map(AttributeSource::lookup),
        };
        let position_count = self.positions.len();
        Arc::make_mut(&mut self.topology).weld(&attributes, position_count)
    }

    /// Apply a new configuration to this sample.
    ///
    /// Derived attributes are recomputed or dropped as the new modes
    /// require. The returned flags tell the host which buffers to refill.
    pub fn update_config(&mut self, config: MeshConfig) -> ConfigChange {
        let previous = self.config;
        let mut topology_changed = config.swap_face_winding != previous.swap_face_winding;
        let mut data_changed = config.swap_handedness != previous.swap_handedness;
        let mut normals_changed = config.normals_mode != previous.normals_mode;
        let tangents_mode_changed = config.tangents_mode != previous.tangents_mode;
        self.config = config;

        if synth::smooth_normals_required(&config, self.normals.is_some()) {
            if self.smooth_normals.is_empty() || topology_changed {
                self.compute_smooth_normals();
                data_changed = true;
                normals_changed = true;
            }
        } else if !self.smooth_normals.is_empty() {
            log::debug!("Clearing smooth normals");
            self.smooth_normals.clear();
            data_changed = true;
            normals_changed = true;
        }

        let mut tangents_required = synth::tangents_requested(&config, self.uvs.is_some());
        if tangents_required {
            let mode_changed = tangents_mode_changed;
            if self.tangent_normals().is_some() {
                if !self.topology.has_tangent_indices()
                    || !config.cache_tangent_splits
                    || mode_changed
                    || normals_changed
                {
                    self.rebuild_tangent_indices();
                }
                if self.tangents.is_empty()
                    || mode_changed
                    || topology_changed
                    || normals_changed
                    || config.swap_handedness != previous.swap_handedness
                {
                    self.compute_tangents();
                    data_changed = true;
                }
            } else {
                tangents_required = false;
            }
        }

        if !tangents_required {
            if !self.tangents.is_empty() {
                log::debug!("Clearing tangents");
                self.tangents.clear();
                data_changed = true;
            }
            if self.topology.has_tangent_indices()
                && (self.owns_topology || !config.cache_tangent_splits)
            {
                self.topology_mut().clear_tangent_indices();
            }
        }

        if (normals_changed || tangents_mode_changed) && self.topology.is_welded() {
            self.weld();
            topology_changed = true;
        }

        if topology_changed {
            data_changed = true;
        }
        ConfigChange {
            topology_changed,
            data_changed,
        }
    }

    /// Configuration in effect.
    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// Topology of the sample.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Shared handle to the topology.
    pub fn shared_topology(&self) -> &Arc<Topology> {
        &self.topology
    }

    /// True if the topology was built for this sample rather than reused.
    ///
    /// Index buffers filled from an earlier sample stay valid otherwise.
    pub fn topology_changed(&self) -> bool {
        self.topology_changed
    }

    /// True if the topology belongs to this sample alone.
    pub fn owns_topology(&self) -> bool {
        self.owns_topology
    }

    pub(crate) fn into_owned_topology(self) -> Option<Topology> {
        if self.owns_topology {
            Arc::try_unwrap(self.topology).ok()
        } else {
            None
        }
    }

    /// True if normals will be emitted.
    pub fn has_normals(&self) -> bool {
        match self.config.normals_mode {
            NormalsMode::ReadFromFile => self.normals.is_some(),
            NormalsMode::Ignore => false,
            NormalsMode::ComputeIfMissing | NormalsMode::AlwaysCompute => {
                self.output_normals().is_some()
            }
        }
    }

    /// True if the frame has UVs.
    pub fn has_uvs(&self) -> bool {
        self.uvs.is_some()
    }

    /// True if motion vectors are emitted.
    pub fn has_velocities(&self) -> bool {
        !self.varying_topology && self.config.interpolate_samples
    }

    /// True if tangents will be emitted.
    pub fn has_tangents(&self) -> bool {
        self.config.tangents_mode != TangentsMode::None
            && self.has_uvs()
            && !self.tangents.is_empty()
            && self.topology.has_tangent_indices()
    }

    /// Split count and available attributes.
    ///
    /// `force_refresh` re-plans the splits first.
    pub fn summary(&mut self, force_refresh: bool) -> SampleSummary {
        let split_count = if force_refresh || self.topology.splits_stale() {
            self.topology_mut().refresh_splits(true)
        } else {
            self.topology.split_count()
        };
        SampleSummary {
            split_count,
            has_normals: self.has_normals(),
            has_uvs: self.has_uvs(),
            has_tangents: self.has_tangents(),
            has_velocities: self.has_velocities(),
        }
    }

    /// Number of splits.
    pub fn split_count(&self) -> usize {
        self.topology.split_count()
    }

    /// Vertex count of a split, 0 for an unknown index.
    pub fn vertex_buffer_length(&self, split_index: usize) -> usize {
        self.topology.vertex_buffer_length(split_index)
    }

    /// Copy one split's vertices into `buffers`.
    ///
    /// Requested channels without source data are zeroed.
    pub fn fill_vertex_buffer(
        &self,
        split_index: usize,
        buffers: &mut VertexBufferSet,
    ) -> FillReport {
        let motion = if self.has_velocities() {
            self.next_positions.as_deref().map(|next_positions| Motion {
                next_positions,
                time_offset: self.time.offset,
                time_interval: self.time.interval,
                motion_scale: self.config.vertex_motion_scale,
            })
        } else {
            None
        };
        let sources = FillSources {
            positions: &self.positions,
            motion,
            normals: if self.has_normals() {
                self.output_normals()
            } else {
                None
            },
            uvs: self.uvs.as_ref().map(AttributeSource::lookup),
            tangents: self.has_tangents().then_some(self.tangents.as_slice()),
            x_scale: self.config.x_scale(),
        };
        fill::fill_split(&self.topology, split_index, &sources, buffers)
    }

    /// Restart submesh iteration. Returns the submesh count.
    pub fn prepare_submeshes(&mut self) -> usize {
        self.submesh_cursor = 0;
        self.topology.submeshes().len()
    }

    /// Number of submeshes in a split.
    pub fn split_submesh_count(&self, split_index: usize) -> usize {
        self.topology.split_submesh_count(split_index)
    }

    /// Next submesh, or `None` once every submesh has been returned.
    pub fn next_submesh(&mut self) -> Option<SubmeshSummary> {
        let index = self.submesh_cursor;
        let submesh = self.topology.submesh(index)?;
        self.submesh_cursor += 1;
        Some(SubmeshSummary::new(index, submesh))
    }

    /// Every submesh, independent of the [`next_submesh`](Self::next_submesh) cursor.
    pub fn submeshes(&self) -> impl Iterator<Item = SubmeshSummary> + '_ {
        self.topology
            .submeshes()
            .iter()
            .enumerate()
            .map(|(index, submesh)| SubmeshSummary::new(index, submesh))
    }

    /// Write a submesh's triangle indices. Returns the count written.
    pub fn fill_submesh_indices(
        &self,
        submesh: &SubmeshSummary,
        indices: &mut IndexBufferData,
    ) -> usize {
        fill::write_submesh_indices(
            &self.topology,
            submesh.index,
            self.config.swap_face_winding,
            indices,
        )
    }

    /// Copy the frame's unprocessed arrays into host-sized destinations.
    pub fn copy_raw_data(&self, raw: &mut RawMeshBuffers) {
        let topology = &self.topology;
        raw.face_count = copy_checked("face counts", Some(topology.face_counts()), &mut raw.face_counts);
        raw.corner_index_count = copy_checked(
            "corner indices",
            Some(topology.corner_indices()),
            &mut raw.corner_indices,
        );
        raw.position_count = copy_checked("positions", Some(&self.positions), &mut raw.positions);
        raw.velocity_count =
            copy_checked("velocities", self.velocities.as_deref(), &mut raw.velocities);
        raw.normal_count = copy_checked(
            "normals",
            self.normals.as_ref().map(AttributeSource::values),
            &mut raw.normals,
        );
        raw.normal_index_count = copy_checked(
            "normal indices",
            self.normals.as_ref().and_then(AttributeSource::indices),
            &mut raw.normal_indices,
        );
        raw.uv_count = copy_checked(
            "uvs",
            self.uvs.as_ref().map(AttributeSource::values),
            &mut raw.uvs,
        );
        raw.uv_index_count = copy_checked(
            "uv indices",
            self.uvs.as_ref().and_then(AttributeSource::indices),
            &mut raw.uv_indices,
        );
        raw.bounds = self.bounds;
    }

    /// Bounds of the frame.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Interpolation timing.
    pub fn time(&self) -> SampleTime {
        self.time
    }

    /// Current positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Positions of the next sample, when interpolating.
    pub fn next_positions(&self) -> Option<&[Vec3]> {
        self.next_positions.as_deref()
    }

    /// Normals stored in the frame.
    pub fn normals(&self) -> Option<&AttributeSource<Vec3>> {
        self.normals.as_ref()
    }

    /// UVs stored in the frame.
    pub fn uvs(&self) -> Option<&AttributeSource<Vec2>> {
        self.uvs.as_ref()
    }

    /// Computed smooth normals, one per position; empty if not computed.
    pub fn smooth_normals(&self) -> &[Vec3] {
        &self.smooth_normals
    }

    /// Computed tangents, one per tangent slot; empty if not computed.
    pub fn tangents(&self) -> &[Vec4] {
        &self.tangents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fill::VertexChannels;
    use crate::source::FaceTopology;

    fn quad_frame() -> FrameData {
        FrameData::new(
            FaceTopology::new(vec![4], vec![0, 1, 2, 3]),
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
        )
        .with_uvs(AttributeSource::face_varying(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]))
    }

    #[test]
    fn test_summary_defaults() {
        let mut sample = Sample::from_frame(MeshConfig::default(), quad_frame()).unwrap();
        let summary = sample.summary(false);
        assert_eq!(summary.split_count, 1);
        // No file normals: ComputeIfMissing synthesizes them.
        assert!(summary.has_normals);
        assert!(summary.has_uvs);
        assert!(!summary.has_tangents);
        assert!(!summary.has_velocities);
        assert_eq!(sample.smooth_normals().len(), 4);
    }

    #[test]
    fn test_ignore_normals() {
        let config = MeshConfig::default().with_normals_mode(NormalsMode::Ignore);
        let mut sample = Sample::from_frame(config, quad_frame()).unwrap();
        assert!(!sample.summary(false).has_normals);
        assert!(sample.smooth_normals().is_empty());
    }

    #[test]
    fn test_update_config_adds_and_drops_tangents() {
        let mut sample = Sample::from_frame(MeshConfig::default(), quad_frame()).unwrap();
        let change =
            sample.update_config(MeshConfig::default().with_tangents_mode(TangentsMode::PerCorner));
        assert!(change.data_changed);
        assert!(!change.topology_changed);
        assert!(sample.has_tangents());

        let change = sample.update_config(MeshConfig::default());
        assert!(change.data_changed);
        assert!(!sample.has_tangents());
        assert!(!sample.topology().has_tangent_indices());
    }

    #[test]
    fn test_update_config_winding() {
        let mut sample = Sample::from_frame(MeshConfig::default(), quad_frame()).unwrap();
        let before = sample.smooth_normals()[0];
        let change = sample.update_config(MeshConfig::default().with_swap_face_winding(true));
        assert!(change.topology_changed);
        assert!(change.data_changed);
        assert_eq!(sample.smooth_normals()[0], -before);

        let unchanged = sample.update_config(MeshConfig::default().with_swap_face_winding(true));
        assert_eq!(unchanged, ConfigChange::default());
    }

    #[test]
    fn test_submesh_iteration_restarts() {
        let mut sample = Sample::from_frame(MeshConfig::default(), quad_frame()).unwrap();
        assert_eq!(sample.prepare_submeshes(), 1);
        let first = sample.next_submesh().unwrap();
        assert_eq!(first.triangle_count, 2);
        assert!(sample.next_submesh().is_none());
        assert_eq!(sample.prepare_submeshes(), 1);
        assert_eq!(sample.next_submesh(), Some(first));
        assert_eq!(sample.submeshes().count(), 1);
    }

    #[test]
    fn test_fill_with_handedness_swap() {
        let config = MeshConfig::default().with_swap_handedness(true);
        let sample = Sample::from_frame(config, quad_frame()).unwrap();
        let mut buffers = VertexBufferSet::new(4, VertexChannels::all());
        let report = sample.fill_vertex_buffer(0, &mut buffers);
        assert_eq!(report.positions, 4);
        assert_eq!(report.normals, 4);
        assert_eq!(report.uvs, 4);
        assert_eq!(report.tangents, 0);
        assert_eq!(buffers.positions[1], Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(report.bounds.min(), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_copy_raw_data() {
        let sample = Sample::from_frame(MeshConfig::default(), quad_frame()).unwrap();
        let mut raw = RawMeshBuffers::with_capacity(1, 4, 2);
        sample.copy_raw_data(&mut raw);
        assert_eq!(raw.face_count, 1);
        assert_eq!(raw.corner_index_count, 4);
        // Position destination too small.
        assert_eq!(raw.position_count, 0);
        assert_eq!(raw.uv_count, 4);
        assert_eq!(raw.uv_index_count, 0);
        assert_eq!(raw.bounds, sample.bounds());
    }

    #[test]
    fn test_next_position_count_checked() {
        let frame = quad_frame();
        let topology = Arc::new(Topology::new(&[4], &[0, 1, 2, 3], Default::default()).unwrap());
        let err = Sample::with_topology(
            MeshConfig::default(),
            topology,
            false,
            false,
            frame,
            Some(vec![Vec3::zeros(); 3]),
            SampleTime::default(),
            true,
        )
        .unwrap_err();
        assert_eq!(
            err,
            MeshError::NextPositionCount {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_missing_topology() {
        let frame = FrameData::positions_only(vec![Vec3::zeros(); 3]);
        assert_eq!(
            Sample::from_frame(MeshConfig::default(), frame).unwrap_err(),
            MeshError::MissingTopology(0)
        );
    }
}
