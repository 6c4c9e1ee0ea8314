//! # meshsplit core
//!
//! Turns animated polygon mesh frames into render-ready vertex and index
//! buffers. Large meshes are split so each part fits a 16-bit index range,
//! corners with identical attributes can be welded into shared vertices,
//! and faces are partitioned into per-material submeshes.
//!
//! The usual entry point is [`MeshStream`], which reads frames from a
//! [`FrameSource`] and produces [`Sample`]s ready for buffer fills.

pub mod attributes;
pub mod config;
pub mod error;
pub mod fill;
pub mod generators;
pub mod math;
pub mod pool;
pub mod profiling;
pub mod raw;
pub mod sample;
pub mod source;
pub mod stream;
pub mod synth;
pub mod topology;

pub use attributes::{AttributeSource, CornerLookup, GeometryScope};
pub use config::{IndexFormat, MeshConfig, NormalsMode, TangentsMode, TopologySettings};
pub use error::MeshError;
pub use fill::{Channel, FillReport, IndexBufferData, VertexBufferSet, VertexChannels};
pub use math::{Bounds, Vec2, Vec3, Vec4};
pub use raw::RawMeshBuffers;
pub use sample::{ConfigChange, Sample, SampleSummary};
pub use source::{FaceTopology, FrameData, FrameSource, InMemorySource, SampleTime, TopologyVariance};
pub use stream::{MeshStream, MeshSummary};
pub use topology::{Split, SubmeshSummary, Topology};

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
