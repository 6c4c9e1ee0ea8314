//! Per-frame input from the geometry cache reader.
//!
//! This module provides:
//! - [`FrameData`] - Raw arrays of one mesh frame
//! - [`FrameSource`] - The reader interface a [`MeshStream`](crate::stream::MeshStream) pulls from
//! - [`InMemorySource`] - A `FrameSource` over frames already in memory

use crate::attributes::AttributeSource;
use crate::error::MeshError;
use crate::math::{Bounds, Vec2, Vec3};
use crate::topology::face_triangle_count;

/// How a mesh's topology changes over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TopologyVariance {
    /// Nothing changes.
    #[default]
    Constant,
    /// Positions change, face structure does not.
    Homogeneous,
    /// Face structure changes from frame to frame.
    Heterogeneous,
}

impl TopologyVariance {
    /// True if every frame carries its own face structure.
    pub fn is_varying(&self) -> bool {
        matches!(self, Self::Heterogeneous)
    }
}

/// Face structure of a frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FaceTopology {
    /// Corner count of every face.
    pub face_counts: Vec<u32>,
    /// Position index of every corner.
    pub corner_indices: Vec<u32>,
}

impl FaceTopology {
    /// Create a face structure.
    pub fn new(face_counts: Vec<u32>, corner_indices: Vec<u32>) -> Self {
        Self {
            face_counts,
            corner_indices,
        }
    }

    /// Index count after fan triangulation.
    pub fn triangulated_index_count(&self) -> usize {
        self.face_counts
            .iter()
            .map(|&count| face_triangle_count(count) * 3)
            .sum()
    }
}

/// Raw arrays of one mesh frame.
///
/// `topology` may be omitted for frames of a non-varying mesh, in which case
/// the stream reuses the face structure it already has.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameData {
    /// Face structure, if the frame carries one.
    pub topology: Option<FaceTopology>,
    /// Positions.
    pub positions: Vec<Vec3>,
    /// Per-position velocities.
    pub velocities: Option<Vec<Vec3>>,
    /// Normals.
    pub normals: Option<AttributeSource<Vec3>>,
    /// Texture coordinates.
    pub uvs: Option<AttributeSource<Vec2>>,
    /// Faces of each material group.
    pub face_sets: Vec<Vec<u32>>,
    /// Stored bounds; computed from positions when absent.
    pub bounds: Option<Bounds>,
}

impl FrameData {
    /// Frame with the given face structure and positions.
    pub fn new(topology: FaceTopology, positions: Vec<Vec3>) -> Self {
        Self {
            topology: Some(topology),
            positions,
            ..Default::default()
        }
    }

    /// Frame that reuses the stream's face structure.
    pub fn positions_only(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            ..Default::default()
        }
    }

    /// Set velocities.
    pub fn with_velocities(mut self, velocities: Vec<Vec3>) -> Self {
        self.velocities = Some(velocities);
        self
    }

    /// Set normals.
    pub fn with_normals(mut self, normals: AttributeSource<Vec3>) -> Self {
        self.normals = Some(normals);
        self
    }

    /// Set UVs.
    pub fn with_uvs(mut self, uvs: AttributeSource<Vec2>) -> Self {
        self.uvs = Some(uvs);
        self
    }

    /// Set material group face lists.
    pub fn with_face_sets(mut self, face_sets: Vec<Vec<u32>>) -> Self {
        self.face_sets = face_sets;
        self
    }

    /// Set stored bounds.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Check per-frame arrays against a face structure of `face_count` faces
    /// and `corner_count` corners.
    pub fn validate(&self, face_count: usize, corner_count: usize) -> Result<(), MeshError> {
        let position_count = self.positions.len();
        if let Some(velocities) = &self.velocities {
            if velocities.len() != position_count {
                return Err(MeshError::VelocityCount {
                    expected: position_count,
                    actual: velocities.len(),
                });
            }
        }
        if let Some(normals) = &self.normals {
            normals.validate("normals", corner_count, position_count)?;
        }
        if let Some(uvs) = &self.uvs {
            uvs.validate("uvs", corner_count, position_count)?;
        }
        for (set, faces) in self.face_sets.iter().enumerate() {
            if let Some(&face) = faces.iter().find(|&&f| f as usize >= face_count) {
                return Err(MeshError::FaceSetOutOfRange {
                    set,
                    face,
                    face_count,
                });
            }
        }
        Ok(())
    }
}

/// Element counts of a frame, used for peak statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameCounts {
    /// Positions.
    pub positions: usize,
    /// Corners.
    pub corner_indices: usize,
    /// Indices after fan triangulation.
    pub triangulated_indices: usize,
}

/// Time of a sample relative to the next one, used for interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleTime {
    /// Fraction of the way from this sample to the next.
    pub offset: f32,
    /// Time between this sample and the next.
    pub interval: f32,
}

impl SampleTime {
    /// Create a sample time.
    pub fn new(offset: f32, interval: f32) -> Self {
        Self { offset, interval }
    }
}

/// Reader interface for a mesh's frames.
pub trait FrameSource {
    /// How the topology varies over time.
    fn variance(&self) -> TopologyVariance;

    /// Number of samples.
    fn sample_count(&self) -> usize;

    /// Read frame `index`.
    fn read_frame(&self, index: usize) -> Result<FrameData, MeshError>;

    /// Read only the positions of frame `index`.
    fn read_positions(&self, index: usize) -> Result<Vec<Vec3>, MeshError> {
        Ok(self.read_frame(index)?.positions)
    }

    /// Element counts of frame `index`. Frames without a face structure
    /// report zero corners.
    fn frame_counts(&self, index: usize) -> Result<FrameCounts, MeshError> {
        let frame = self.read_frame(index)?;
        Ok(FrameCounts {
            positions: frame.positions.len(),
            corner_indices: frame
                .topology
                .as_ref()
                .map_or(0, |t| t.corner_indices.len()),
            triangulated_indices: frame
                .topology
                .as_ref()
                .map_or(0, FaceTopology::triangulated_index_count),
        })
    }
}

/// A [`FrameSource`] over frames held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    variance: TopologyVariance,
    frames: Vec<FrameData>,
}

impl InMemorySource {
    /// Create a source from frames.
    pub fn new(variance: TopologyVariance, frames: Vec<FrameData>) -> Self {
        Self { variance, frames }
    }

    /// Append a frame.
    pub fn push(&mut self, frame: FrameData) {
        self.frames.push(frame);
    }

    /// Stored frames.
    pub fn frames(&self) -> &[FrameData] {
        &self.frames
    }

    fn frame(&self, index: usize) -> Result<&FrameData, MeshError> {
        self.frames.get(index).ok_or(MeshError::SampleOutOfRange {
            index,
            count: self.frames.len(),
        })
    }
}

impl FrameSource for InMemorySource {
    fn variance(&self) -> TopologyVariance {
        self.variance
    }

    fn sample_count(&self) -> usize {
        self.frames.len()
    }

    fn read_frame(&self, index: usize) -> Result<FrameData, MeshError> {
        self.frame(index).cloned()
    }

    fn read_positions(&self, index: usize) -> Result<Vec<Vec3>, MeshError> {
        Ok(self.frame(index)?.positions.clone())
    }

    fn frame_counts(&self, index: usize) -> Result<FrameCounts, MeshError> {
        let frame = self.frame(index)?;
        let topology = frame.topology.as_ref();
        Ok(FrameCounts {
            positions: frame.positions.len(),
            corner_indices: topology.map_or(0, |t| t.corner_indices.len()),
            triangulated_indices: topology.map_or(0, FaceTopology::triangulated_index_count),
        })
    }
}
