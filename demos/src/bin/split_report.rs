//! # Split Report
//!
//! Streams a generated grid through the meshsplit core the way a renderer
//! would, and logs what each frame produces: splits, submeshes, and how
//! many vertices and indices every fill wrote.
//!
//! Run with `RUST_LOG=debug` to see the core's own decisions as well.

use clap::Parser;
use meshsplit_core::profiling::{frame_mark, profile_plot};
use meshsplit_core::{
    IndexBufferData, MeshError, MeshStream, SampleTime, VertexBufferSet, VertexChannels,
};
use meshsplit_demos::args::ReportArgs;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("meshsplit split_report v{}", meshsplit_demos::VERSION);

    let args = ReportArgs::parse();
    if let Err(err) = run(&args) {
        log::error!("Failed to stream mesh: {}", err);
        std::process::exit(1);
    }
}

fn run(args: &ReportArgs) -> Result<(), MeshError> {
    let grid = args.grid();
    let config = args.config();
    let mut stream = MeshStream::new(grid.animated_source(args.variance(), args.frames), config);

    let summary = stream.summary()?;
    log::info!(
        "{} samples, peak {} positions, {} indices ({} triangulated), up to {} submeshes",
        summary.sample_count,
        summary.peak_position_count,
        summary.peak_index_count,
        summary.peak_triangulated_index_count,
        summary.peak_submesh_count
    );

    let interval = 1.0 / args.frames.max(1) as f32;
    for index in 0..summary.sample_count {
        let mut sample = stream.read_sample(index, SampleTime::new(0.5, interval))?;
        let sample_summary = sample.summary(false);
        let channels = VertexChannels {
            normals: sample_summary.has_normals,
            uvs: sample_summary.has_uvs,
            tangents: sample_summary.has_tangents,
            velocities: sample_summary.has_velocities,
        };

        let mut vertex_total = 0;
        for split in 0..sample_summary.split_count {
            let mut buffers = VertexBufferSet::new(sample.vertex_buffer_length(split), channels);
            let report = sample.fill_vertex_buffer(split, &mut buffers);
            log::debug!(
                "  split {}: {} vertices, {} submeshes, bounds center {:?}",
                split,
                report.vertex_count,
                sample.split_submesh_count(split),
                report.bounds.center
            );
            vertex_total += report.vertex_count;
        }

        let mut index_total = 0;
        sample.prepare_submeshes();
        while let Some(submesh) = sample.next_submesh() {
            let mut indices = IndexBufferData::new(config.index_format, submesh.triangle_count * 3);
            index_total += sample.fill_submesh_indices(&submesh, &mut indices);
        }

        log::info!(
            "frame {}: {} splits, {} vertices, {} indices, normals {}, uvs {}, tangents {}, velocities {}{}",
            index,
            sample_summary.split_count,
            vertex_total,
            index_total,
            sample_summary.has_normals,
            sample_summary.has_uvs,
            sample_summary.has_tangents,
            sample_summary.has_velocities,
            if sample.topology().is_welded() { ", welded" } else { "" }
        );
        profile_plot!("vertices", vertex_total);
        profile_plot!("indices", index_total);

        stream.recycle(sample);
        frame_mark!();
    }

    Ok(())
}
