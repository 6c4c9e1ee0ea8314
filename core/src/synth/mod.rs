//! Attribute synthesis: smooth normals and tangent space.
//!
//! Both passes walk faces by corner slot, so they see quads the way the
//! triangulation will emit them.

pub mod normals;
pub mod tangents;

pub use normals::compute_smooth_normals;
pub use tangents::{build_tangent_indices, compute_tangents, TangentInputs};

use crate::config::{MeshConfig, NormalsMode, TangentsMode};

/// True if `config` needs smooth normals for a frame with or without file normals.
pub fn smooth_normals_required(config: &MeshConfig, has_file_normals: bool) -> bool {
    config.normals_mode == NormalsMode::AlwaysCompute
        || config.tangents_mode == TangentsMode::Smooth
        || (!has_file_normals && config.normals_mode == NormalsMode::ComputeIfMissing)
}

/// True if `config` asks for tangents and the frame has UVs to derive them from.
pub fn tangents_requested(config: &MeshConfig, has_uvs: bool) -> bool {
    has_uvs && config.tangents_mode != TangentsMode::None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_normals_policy() {
        let config = MeshConfig::default();
        assert!(smooth_normals_required(&config, false));
        assert!(!smooth_normals_required(&config, true));

        let read = config.with_normals_mode(NormalsMode::ReadFromFile);
        assert!(!smooth_normals_required(&read, false));

        let always = config.with_normals_mode(NormalsMode::AlwaysCompute);
        assert!(smooth_normals_required(&always, true));

        let smooth_tangents = read.with_tangents_mode(TangentsMode::Smooth);
        assert!(smooth_normals_required(&smooth_tangents, true));
    }

    #[test]
    fn test_tangents_policy() {
        let config = MeshConfig::default().with_tangents_mode(TangentsMode::PerCorner);
        assert!(tangents_requested(&config, true));
        assert!(!tangents_requested(&config, false));
        assert!(!tangents_requested(&MeshConfig::default(), true));
    }
}
