//! Per-mesh sample reader.
//!
//! A [`MeshStream`] owns a [`FrameSource`] and turns its frames into
//! [`Sample`]s. For meshes whose face structure never changes it builds one
//! topology and hands an `Arc` of it to every sample. For meshes with
//! varying topology every sample gets its own topology, taken from a pool
//! that [`MeshStream::recycle`] refills.

use std::sync::Arc;

use crate::config::MeshConfig;
use crate::error::MeshError;
use crate::math::Vec3;
use crate::pool::Pool;
use crate::sample::Sample;
use crate::source::{FaceTopology, FrameData, FrameSource, SampleTime, TopologyVariance};
use crate::topology::Topology;

/// Index count budget of one submesh when estimating peak submesh counts.
pub const INDICES_PER_SUBMESH: usize = 64_998;

/// Whole-stream statistics used by the host to size its resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshSummary {
    /// How the topology varies.
    pub variance: TopologyVariance,
    /// Number of samples.
    pub sample_count: usize,
    /// Largest position count of any sample.
    pub peak_position_count: usize,
    /// Largest corner count of any sample.
    pub peak_index_count: usize,
    /// Largest fan-triangulated index count of any sample.
    pub peak_triangulated_index_count: usize,
    /// Upper estimate of submeshes per sample.
    pub peak_submesh_count: usize,
}

/// Reader for one mesh.
#[derive(Debug)]
pub struct MeshStream<S: FrameSource> {
    source: S,
    config: MeshConfig,
    shared_topology: Option<Arc<Topology>>,
    topology_pool: Pool<Topology>,
    summary: Option<MeshSummary>,
}

impl<S: FrameSource> MeshStream<S> {
    /// Create a stream over `source`.
    pub fn new(source: S, config: MeshConfig) -> Self {
        Self {
            source,
            config,
            shared_topology: None,
            topology_pool: Pool::new(2),
            summary: None,
        }
    }

    /// Frame source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Configuration applied to new samples.
    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// Change the configuration for samples read from now on.
    ///
    /// A change to any topology setting drops the shared topology; the next
    /// read rebuilds it. Samples already handed out keep the old one.
    pub fn set_config(&mut self, config: MeshConfig) {
        if config.topology_settings() != self.config.topology_settings()
            && self.shared_topology.take().is_some()
        {
            log::debug!("Topology settings changed, discarding shared topology");
        }
        self.config = config;
    }

    /// True if a shared topology is cached.
    pub fn has_shared_topology(&self) -> bool {
        self.shared_topology.is_some()
    }

    /// Read sample `index` and prepare it for buffer fills.
    pub fn read_sample(&mut self, index: usize, time: SampleTime) -> Result<Sample, MeshError> {
        crate::profiling::profile_function!();

        let count = self.source.sample_count();
        if index >= count {
            return Err(MeshError::SampleOutOfRange { index, count });
        }
        log::trace!("Reading sample {} of {}", index, count);

        let frame = self.source.read_frame(index)?;
        if self.source.variance().is_varying() {
            self.read_varying(index, frame, time)
        } else {
            self.read_shared(index, frame, time)
        }
    }

    fn read_varying(
        &mut self,
        index: usize,
        mut frame: FrameData,
        time: SampleTime,
    ) -> Result<Sample, MeshError> {
        let faces = frame
            .topology
            .take()
            .ok_or(MeshError::MissingTopology(index))?;

        let mut topology = self.topology_pool.acquire();
        let mut settings = self.config.topology_settings();
        settings.share_vertices = false;
        settings.treat_vertex_extra_data_as_static = false;
        let built = topology
            .rebuild(&faces.face_counts, &faces.corner_indices, settings)
            .and_then(|()| Sample::validate_frame(&topology, &frame, None));
        if let Err(err) = built {
            self.topology_pool.release(topology);
            return Err(err);
        }
        topology.set_face_sets(&frame.face_sets);

        Ok(Sample::from_validated(
            self.config,
            Arc::new(topology),
            true,
            true,
            frame,
            None,
            time,
            true,
        ))
    }

    fn read_shared(
        &mut self,
        index: usize,
        mut frame: FrameData,
        time: SampleTime,
    ) -> Result<Sample, MeshError> {
        let (topology, topology_changed) = match self.shared_topology.take() {
            Some(topology) => (topology, false),
            None => (Arc::new(self.build_shared(index, &mut frame)?), true),
        };

        // A bad frame must not cost the cached topology.
        let validated = self.read_next_positions(index).and_then(|next| {
            Sample::validate_frame(&topology, &frame, next.as_deref())?;
            Ok(next)
        });
        let next_positions = match validated {
            Ok(next) => next,
            Err(err) => {
                if !topology_changed {
                    self.shared_topology = Some(topology);
                }
                return Err(err);
            }
        };

        let sample = Sample::from_validated(
            self.config,
            topology,
            false,
            false,
            frame,
            next_positions,
            time,
            topology_changed,
        );
        self.shared_topology = Some(Arc::clone(sample.shared_topology()));
        Ok(sample)
    }

    /// Positions of the sample after `index`, clamped to the last one.
    fn read_next_positions(&self, index: usize) -> Result<Option<Vec<Vec3>>, MeshError> {
        if !self.config.interpolate_samples {
            return Ok(None);
        }
        let next = (index + 1).min(self.source.sample_count() - 1);
        self.source.read_positions(next).map(Some)
    }

    /// Build the shared topology from `frame`, or from the first frame if
    /// `frame` carries no face structure.
    fn build_shared(&self, index: usize, frame: &mut FrameData) -> Result<Topology, MeshError> {
        let (faces, face_sets): (FaceTopology, Vec<Vec<u32>>) = match frame.topology.take() {
            Some(faces) => (faces, frame.face_sets.clone()),
            None => {
                let first = self.source.read_frame(0)?;
                let faces = first.topology.ok_or(MeshError::MissingTopology(index))?;
                (faces, first.face_sets)
            }
        };

        let mut topology = Topology::new(
            &faces.face_counts,
            &faces.corner_indices,
            self.config.topology_settings(),
        )?;
        topology.set_face_sets(&face_sets);
        if frame.face_sets.is_empty() {
            frame.face_sets = face_sets;
        }
        log::debug!(
            "Built shared topology: {} faces, {} corners",
            topology.face_count(),
            topology.corner_count()
        );
        Ok(topology)
    }

    /// Return a sample the host is done with.
    ///
    /// An owned topology goes back to the pool for the next varying frame.
    pub fn recycle(&mut self, sample: Sample) {
        if let Some(topology) = sample.into_owned_topology() {
            self.topology_pool.release(topology);
        }
        crate::profiling::profile_plot!("pooled_topologies", self.topology_pool.len());
    }

    /// Peak counts over every sample. Computed once and cached.
    pub fn summary(&mut self) -> Result<MeshSummary, MeshError> {
        if let Some(summary) = self.summary {
            return Ok(summary);
        }

        let mut summary = MeshSummary {
            variance: self.source.variance(),
            sample_count: self.source.sample_count(),
            ..Default::default()
        };
        for index in 0..summary.sample_count {
            let counts = self.source.frame_counts(index)?;
            summary.peak_position_count = summary.peak_position_count.max(counts.positions);
            summary.peak_index_count = summary.peak_index_count.max(counts.corner_indices);
            summary.peak_triangulated_index_count = summary
                .peak_triangulated_index_count
                .max(counts.triangulated_indices);
        }
        summary.peak_submesh_count = summary.peak_index_count.div_ceil(INDICES_PER_SUBMESH);

        log::debug!(
            "Mesh summary: {} samples, peak {} positions, {} indices, {} submeshes",
            summary.sample_count,
            summary.peak_position_count,
            summary.peak_index_count,
            summary.peak_submesh_count
        );
        self.summary = Some(summary);
        Ok(summary)
    }
}
