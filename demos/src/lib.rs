//! # meshsplit demos
//!
//! Command line tools that run generated meshes through the meshsplit core.
//!
//! ## Available Tools
//!
//! - `split_report` - Stream an animated grid and report splits, submeshes and fill counts

pub mod args;

/// Demos library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
