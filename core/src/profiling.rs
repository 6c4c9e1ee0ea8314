//! Profiling support via Tracy.
//!
//! Instrumentation is enabled with the `profiling` Cargo feature:
//!
//! ```bash
//! cargo run -p meshsplit-demos --features profiling
//! ```
//!
//! Split planning, welding, attribute synthesis and buffer fills open spans
//! with the macros below. The core also plots per-frame counts:
//!
//! | Plot                | Value                                  |
//! |---------------------|----------------------------------------|
//! | `welded_vertices`   | Shared vertices after each weld        |
//! | `split_vertices`    | Vertices written by each split fill    |
//! | `pooled_topologies` | Topologies waiting for a varying frame |
//!
//! Hosts add their own with [`profile_plot!`] and close frames with
//! [`frame_mark!`]. When profiling is disabled (the default), all macros
//! compile to no-ops and plotted values are still evaluated.
//!
//! ```ignore
//! use meshsplit_core::profiling::{frame_mark, profile_plot};
//!
//! for index in 0..summary.sample_count {
//!     let sample = stream.read_sample(index, time)?;
//!     profile_plot!("splits", sample.split_count());
//!     stream.recycle(sample);
//!     frame_mark!();
//! }
//! ```

#[cfg(feature = "profiling")]
pub use tracy_client::{self, frame_mark as tracy_frame_mark, plot as tracy_plot, span};

/// Mark the end of a frame for Tracy's frame analysis.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! frame_mark {
    () => {
        $crate::profiling::tracy_frame_mark()
    };
}

/// Mark the end of a frame (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! frame_mark {
    () => {};
}

/// Create a profiling span for the current scope.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_scope {
    ($name:expr) => {
        let _profile_span = $crate::profiling::span!($name);
    };
}

/// Create a profiling span (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_scope {
    ($name:expr) => {};
}

/// Create a profiling span for the entire function.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_function {
    () => {
        let _profile_span = $crate::profiling::span!();
    };
}

/// Create a profiling span for function (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_function {
    () => {};
}

/// Plot a count over time in Tracy. Any numeric value is widened to `f64`.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_plot {
    ($name:literal, $value:expr) => {
        $crate::profiling::tracy_plot!($name, $value as f64)
    };
}

/// Evaluate a plotted value without recording it.
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_plot {
    ($name:literal, $value:expr) => {
        let _ = $value;
    };
}

pub use frame_mark;
pub use profile_function;
pub use profile_plot;
pub use profile_scope;
