//! Host-side destination buffers.

use crate::config::IndexFormat;
use crate::math::{Vec2, Vec3, Vec4};

/// Destination channel of a vertex buffer fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Positions.
    Positions,
    /// Normals.
    Normals,
    /// Texture coordinates.
    Uvs,
    /// Tangents with handedness in `w`.
    Tangents,
    /// Motion vectors, split over the xy and z channels.
    Velocities,
}

/// Which optional channels a [`VertexBufferSet`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VertexChannels {
    /// Allocate normals.
    pub normals: bool,
    /// Allocate UVs.
    pub uvs: bool,
    /// Allocate tangents.
    pub tangents: bool,
    /// Allocate motion vectors.
    pub velocities: bool,
}

impl VertexChannels {
    /// Every optional channel.
    pub fn all() -> Self {
        Self {
            normals: true,
            uvs: true,
            tangents: true,
            velocities: true,
        }
    }
}

/// Destination vertex buffers for one split.
///
/// An empty channel is not requested and is left alone by a fill. A
/// channel shorter than the split's vertex count is skipped as well, with a
/// warning. Positions are always written when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBufferSet {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Vertex normals.
    pub normals: Vec<Vec3>,
    /// Vertex UVs.
    pub uvs: Vec<Vec2>,
    /// Vertex tangents.
    pub tangents: Vec<Vec4>,
    /// Motion vector x and y.
    pub velocities_xy: Vec<Vec2>,
    /// Motion vector z, stored in `x`.
    pub velocities_z: Vec<Vec2>,
}

impl VertexBufferSet {
    /// Allocate zeroed buffers of `vertex_count` vertices.
    pub fn new(vertex_count: usize, channels: VertexChannels) -> Self {
        let len = |enabled: bool| if enabled { vertex_count } else { 0 };
        Self {
            positions: vec![Vec3::zeros(); vertex_count],
            normals: vec![Vec3::zeros(); len(channels.normals)],
            uvs: vec![Vec2::zeros(); len(channels.uvs)],
            tangents: vec![Vec4::zeros(); len(channels.tangents)],
            velocities_xy: vec![Vec2::zeros(); len(channels.velocities)],
            velocities_z: vec![Vec2::zeros(); len(channels.velocities)],
        }
    }

    /// Length of a destination channel. Velocities report the shorter of
    /// their two buffers.
    pub fn channel_len(&self, channel: Channel) -> usize {
        match channel {
            Channel::Positions => self.positions.len(),
            Channel::Normals => self.normals.len(),
            Channel::Uvs => self.uvs.len(),
            Channel::Tangents => self.tangents.len(),
            Channel::Velocities => self.velocities_xy.len().min(self.velocities_z.len()),
        }
    }

    /// Positions as bytes for upload.
    pub fn positions_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normals as bytes for upload.
    pub fn normals_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// UVs as bytes for upload.
    pub fn uvs_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    /// Tangents as bytes for upload.
    pub fn tangents_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.tangents)
    }

    /// Motion vector xy as bytes for upload.
    pub fn velocities_xy_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.velocities_xy)
    }

    /// Motion vector z as bytes for upload.
    pub fn velocities_z_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.velocities_z)
    }
}

/// Index buffer storage in either supported width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexBufferData {
    /// 16-bit indices.
    U16(Vec<u16>),
    /// 32-bit indices.
    U32(Vec<u32>),
}

impl Default for IndexBufferData {
    fn default() -> Self {
        Self::U16(Vec::new())
    }
}

impl IndexBufferData {
    /// Zeroed buffer of `len` indices.
    pub fn new(format: IndexFormat, len: usize) -> Self {
        match format {
            IndexFormat::Uint16 => Self::U16(vec![0; len]),
            IndexFormat::Uint32 => Self::U32(vec![0; len]),
        }
    }

    /// Index format.
    pub fn format(&self) -> IndexFormat {
        match self {
            Self::U16(_) => IndexFormat::Uint16,
            Self::U32(_) => IndexFormat::Uint32,
        }
    }

    /// Number of indices.
    pub fn len(&self) -> usize {
        match self {
            Self::U16(data) => data.len(),
            Self::U32(data) => data.len(),
        }
    }

    /// True if the buffer holds no indices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index at `i`, widened.
    pub fn get(&self, i: usize) -> Option<u32> {
        match self {
            Self::U16(data) => data.get(i).map(|&v| v as u32),
            Self::U32(data) => data.get(i).copied(),
        }
    }

    /// True if every index of a split with `vertex_count` vertices fits.
    ///
    /// A split holding one face larger than the 16-bit limit does not fit
    /// a 16-bit buffer.
    pub fn can_address(&self, vertex_count: usize) -> bool {
        match self {
            Self::U16(_) => vertex_count <= u16::MAX as usize + 1,
            Self::U32(_) => true,
        }
    }

    /// Store `value` at `i`. Callers check [`IndexBufferData::can_address`]
    /// first; 16-bit buffers keep only the low bits.
    #[inline]
    pub(crate) fn set(&mut self, i: usize, value: u32) {
        match self {
            Self::U16(data) => data[i] = value as u16,
            Self::U32(data) => data[i] = value,
        }
    }

    /// Widened copy of every index.
    pub fn to_u32(&self) -> Vec<u32> {
        match self {
            Self::U16(data) => data.iter().map(|&v| v as u32).collect(),
            Self::U32(data) => data.clone(),
        }
    }

    /// Raw bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::U16(data) => bytemuck::cast_slice(data),
            Self::U32(data) => bytemuck::cast_slice(data),
        }
    }
}
