//! Import configuration.
//!
//! This module provides:
//! - [`IndexFormat`] - Index data format (u16 or u32) and its split limit
//! - [`NormalsMode`] / [`TangentsMode`] - Attribute synthesis policies
//! - [`MeshConfig`] - All options recognised by the buffer preparation
//! - [`TopologySettings`] - The subset of options that shape a [`Topology`](crate::topology::Topology)

/// Maximum vertices per split with 16-bit indices.
pub const MAX_SPLIT_VERTICES_16: usize = 65_000;

/// Maximum vertices per split with 32-bit indices.
pub const MAX_SPLIT_VERTICES_32: usize = 2_000_000_000;

/// Index format of the host's index buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexFormat {
    /// 16-bit unsigned integers.
    #[default]
    Uint16,
    /// 32-bit unsigned integers.
    Uint32,
}

impl IndexFormat {
    /// Get the size in bytes of each index.
    pub fn size(&self) -> usize {
        match self {
            Self::Uint16 => 2,
            Self::Uint32 => 4,
        }
    }

    /// Maximum number of vertices a single split may address.
    ///
    /// The 16-bit limit stays below `u16::MAX` to leave room for
    /// primitive-restart values on the host side.
    pub fn max_split_vertices(&self) -> usize {
        match self {
            Self::Uint16 => MAX_SPLIT_VERTICES_16,
            Self::Uint32 => MAX_SPLIT_VERTICES_32,
        }
    }
}

/// Where output normals come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NormalsMode {
    /// Use normals stored in the frame; emit none if absent.
    ReadFromFile,
    /// Use stored normals, computing smooth normals when none are stored.
    #[default]
    ComputeIfMissing,
    /// Always compute smooth normals, ignoring stored ones.
    AlwaysCompute,
    /// Never emit normals.
    Ignore,
}

/// How tangents are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TangentsMode {
    /// No tangents.
    #[default]
    None,
    /// One tangent per position, on top of smooth normals.
    Smooth,
    /// One tangent per distinct (normal, uv) corner pair.
    PerCorner,
}

/// Options controlling buffer preparation for one mesh stream.
///
/// # Example
///
/// ```
/// use meshsplit_core::config::{IndexFormat, MeshConfig, TangentsMode};
///
/// let config = MeshConfig::default()
///     .with_tangents_mode(TangentsMode::PerCorner)
///     .with_index_format(IndexFormat::Uint32)
///     .with_share_vertices(true);
/// assert_eq!(config.index_format.max_split_vertices(), 2_000_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshConfig {
    /// Normal source policy.
    pub normals_mode: NormalsMode,
    /// Tangent generation policy.
    pub tangents_mode: TangentsMode,
    /// Weld corners with identical attributes into shared vertices.
    pub share_vertices: bool,
    /// Index width of the host's index buffers.
    pub index_format: IndexFormat,
    /// Reverse triangle winding.
    pub swap_face_winding: bool,
    /// Mirror along X (handedness conversion).
    pub swap_handedness: bool,
    /// Triangulate quads along the other diagonal.
    pub turn_quad_edges: bool,
    /// Interpolate positions toward the next sample and emit motion vectors.
    pub interpolate_samples: bool,
    /// Scale applied to emitted motion vectors.
    pub vertex_motion_scale: f32,
    /// Keep tangent splits across frames of a constant topology.
    pub cache_tangent_splits: bool,
    /// With sharing active, write normals/UVs/tangents only once per weld.
    pub treat_vertex_extra_data_as_static: bool,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            normals_mode: NormalsMode::ComputeIfMissing,
            tangents_mode: TangentsMode::None,
            share_vertices: false,
            index_format: IndexFormat::Uint16,
            swap_face_winding: false,
            swap_handedness: false,
            turn_quad_edges: false,
            interpolate_samples: false,
            vertex_motion_scale: 1.0,
            cache_tangent_splits: true,
            treat_vertex_extra_data_as_static: false,
        }
    }
}

impl MeshConfig {
    /// Set the normals mode.
    pub fn with_normals_mode(mut self, mode: NormalsMode) -> Self {
        self.normals_mode = mode;
        self
    }

    /// Set the tangents mode.
    pub fn with_tangents_mode(mut self, mode: TangentsMode) -> Self {
        self.tangents_mode = mode;
        self
    }

    /// Enable or disable vertex sharing.
    pub fn with_share_vertices(mut self, share: bool) -> Self {
        self.share_vertices = share;
        self
    }

    /// Set the index format.
    pub fn with_index_format(mut self, format: IndexFormat) -> Self {
        self.index_format = format;
        self
    }

    /// Reverse face winding.
    pub fn with_swap_face_winding(mut self, swap: bool) -> Self {
        self.swap_face_winding = swap;
        self
    }

    /// Mirror along X.
    pub fn with_swap_handedness(mut self, swap: bool) -> Self {
        self.swap_handedness = swap;
        self
    }

    /// Turn quad diagonals.
    pub fn with_turn_quad_edges(mut self, turn: bool) -> Self {
        self.turn_quad_edges = turn;
        self
    }

    /// Enable sample interpolation.
    pub fn with_interpolate_samples(mut self, interpolate: bool) -> Self {
        self.interpolate_samples = interpolate;
        self
    }

    /// Set the motion vector scale.
    pub fn with_vertex_motion_scale(mut self, scale: f32) -> Self {
        self.vertex_motion_scale = scale;
        self
    }

    /// Cache tangent splits across frames.
    pub fn with_cache_tangent_splits(mut self, cache: bool) -> Self {
        self.cache_tangent_splits = cache;
        self
    }

    /// Treat welded extra vertex data as static.
    pub fn with_treat_vertex_extra_data_as_static(mut self, treat: bool) -> Self {
        self.treat_vertex_extra_data_as_static = treat;
        self
    }

    /// Sign applied to X components.
    pub fn x_scale(&self) -> f32 {
        if self.swap_handedness {
            -1.0
        } else {
            1.0
        }
    }

    /// Topology-shaping subset of this configuration.
    pub fn topology_settings(&self) -> TopologySettings {
        TopologySettings {
            index_format: self.index_format,
            share_vertices: self.share_vertices,
            turn_quad_edges: self.turn_quad_edges,
            treat_vertex_extra_data_as_static: self.treat_vertex_extra_data_as_static,
        }
    }
}

/// Options baked into a topology when it is built.
///
/// A change in any of these discards a shared topology instead of patching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TopologySettings {
    /// Index width, which fixes the split limit.
    pub index_format: IndexFormat,
    /// Vertex sharing requested.
    pub share_vertices: bool,
    /// Quad diagonal turning.
    pub turn_quad_edges: bool,
    /// Static extra vertex data.
    pub treat_vertex_extra_data_as_static: bool,
}
