//! Command line arguments shared by the demo tools.
//!
//! Uses clap for CLI parsing with help text (`--help`) and validation.

use clap::Parser;
use meshsplit_core::generators::GridDesc;
use meshsplit_core::{IndexFormat, MeshConfig, NormalsMode, TangentsMode, TopologyVariance};

// ============================================================================
// CLI enums (clap value enums mapped onto core types)
// ============================================================================

/// Index width selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CliIndexFormat {
    /// 16-bit indices, splits of at most 65000 vertices.
    #[default]
    U16,
    /// 32-bit indices.
    U32,
}

impl From<CliIndexFormat> for IndexFormat {
    fn from(cli: CliIndexFormat) -> Self {
        match cli {
            CliIndexFormat::U16 => IndexFormat::Uint16,
            CliIndexFormat::U32 => IndexFormat::Uint32,
        }
    }
}

/// Normals handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CliNormals {
    /// Use normals stored in the frame.
    File,
    /// Use stored normals, compute smooth ones when absent.
    #[default]
    IfMissing,
    /// Always compute smooth normals.
    Compute,
    /// Emit no normals.
    Ignore,
}

impl From<CliNormals> for NormalsMode {
    fn from(cli: CliNormals) -> Self {
        match cli {
            CliNormals::File => NormalsMode::ReadFromFile,
            CliNormals::IfMissing => NormalsMode::ComputeIfMissing,
            CliNormals::Compute => NormalsMode::AlwaysCompute,
            CliNormals::Ignore => NormalsMode::Ignore,
        }
    }
}

/// Tangent handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CliTangents {
    /// No tangents.
    #[default]
    None,
    /// One tangent per position.
    Smooth,
    /// Tangents split where normals or UVs differ.
    PerCorner,
}

impl From<CliTangents> for TangentsMode {
    fn from(cli: CliTangents) -> Self {
        match cli {
            CliTangents::None => TangentsMode::None,
            CliTangents::Smooth => TangentsMode::Smooth,
            CliTangents::PerCorner => TangentsMode::PerCorner,
        }
    }
}

// ============================================================================
// Report arguments
// ============================================================================

/// Arguments of the `split_report` tool.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "split_report",
    about = "Stream a generated mesh and report how it is split",
    long_about = "Generates an animated quad grid, streams it through the meshsplit core \
        and logs split, submesh and fill statistics for every frame.\n\n\
        EXAMPLES:\n\
          # 200k triangles with 16-bit indices\n\
          ./split_report --columns 400 --rows 250 --triangulate\n\
        \n\
          # Welded grid with a UV seam and tangents\n\
          ./split_report --share-vertices --uv-seam --tangents per-corner",
    version
)]
pub struct ReportArgs {
    /// Quads along X.
    #[arg(long, default_value = "64")]
    pub columns: u32,

    /// Quads along Y.
    #[arg(long, default_value = "64")]
    pub rows: u32,

    /// Emit triangles instead of quads.
    #[arg(long)]
    pub triangulate: bool,

    /// Number of frames to stream.
    #[arg(long, default_value = "4")]
    pub frames: usize,

    /// Material groups, assigned by row.
    #[arg(long, default_value = "1")]
    pub groups: u32,

    /// Give the grid a UV seam down the middle.
    #[arg(long)]
    pub uv_seam: bool,

    /// Rebuild the face structure every frame.
    #[arg(long)]
    pub varying: bool,

    /// Index width.
    #[arg(long, default_value = "u16", value_enum)]
    pub index_format: CliIndexFormat,

    /// Normals handling.
    #[arg(long, default_value = "if-missing", value_enum)]
    pub normals: CliNormals,

    /// Tangent handling.
    #[arg(long, default_value = "none", value_enum)]
    pub tangents: CliTangents,

    /// Weld corners with identical attributes.
    #[arg(long)]
    pub share_vertices: bool,

    /// Interpolate towards the next frame and emit motion vectors.
    #[arg(long)]
    pub interpolate: bool,

    /// Turn quad diagonals.
    #[arg(long)]
    pub turn_quads: bool,
}

impl ReportArgs {
    /// Grid described by the arguments.
    pub fn grid(&self) -> GridDesc {
        GridDesc::new(self.columns, self.rows)
            .with_triangulate(self.triangulate)
            .with_uv_seam(self.uv_seam)
            .with_material_groups(self.groups)
    }

    /// Topology variance described by the arguments.
    pub fn variance(&self) -> TopologyVariance {
        if self.varying {
            TopologyVariance::Heterogeneous
        } else {
            TopologyVariance::Homogeneous
        }
    }

    /// Mesh configuration described by the arguments.
    pub fn config(&self) -> MeshConfig {
        if self.varying && self.share_vertices {
            log::warn!("--share-vertices has no effect with --varying topology");
        }
        MeshConfig::default()
            .with_index_format(self.index_format.into())
            .with_normals_mode(self.normals.into())
            .with_tangents_mode(self.tangents.into())
            .with_share_vertices(self.share_vertices)
            .with_interpolate_samples(self.interpolate)
            .with_turn_quad_edges(self.turn_quads)
    }
}
