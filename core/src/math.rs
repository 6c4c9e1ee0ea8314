//! Math type aliases and helper functions.
//!
//! All mesh data is single precision, matching what the host uploads to the GPU.

pub use nalgebra;

/// 2D vector (f32). Used for UVs and the packed velocity channels.
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4D vector (f32). Tangents carry the handedness sign in `w`.
pub type Vec4 = nalgebra::Vector4<f32>;

/// Normalize `v`, returning the zero vector for zero-length input.
///
/// Degenerate triangles and unused positions produce zero vectors; this keeps
/// them at zero instead of turning them into NaNs.
#[inline]
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    v.try_normalize(0.0).unwrap_or_else(Vec3::zeros)
}

/// Bit pattern of a 3D vector, used for exact-equality keys.
#[inline]
pub fn vec3_bits(v: &Vec3) -> [u32; 3] {
    [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()]
}

/// Bit pattern of a 2D vector, used for exact-equality keys.
#[inline]
pub fn vec2_bits(v: &Vec2) -> [u32; 2] {
    [v.x.to_bits(), v.y.to_bits()]
}

/// Axis-aligned bounds stored as center and extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Center of the box.
    pub center: Vec3,
    /// Full extent (max - min) along each axis.
    pub extent: Vec3,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            center: Vec3::zeros(),
            extent: Vec3::zeros(),
        }
    }
}

impl Bounds {
    /// Build bounds from min and max corners.
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self {
            center: (min + max) * 0.5,
            extent: max - min,
        }
    }

    /// Minimum corner.
    pub fn min(&self) -> Vec3 {
        self.center - self.extent * 0.5
    }

    /// Maximum corner.
    pub fn max(&self) -> Vec3 {
        self.center + self.extent * 0.5
    }

    /// Compute the bounds of a point set. Empty input gives zero bounds.
    pub fn from_points(points: &[Vec3]) -> Self {
        let mut builder = BoundsBuilder::new();
        for p in points {
            builder.include(p);
        }
        builder.build()
    }
}

/// Running min/max accumulator.
#[derive(Debug, Clone, Copy)]
pub struct BoundsBuilder {
    min: Vec3,
    max: Vec3,
    empty: bool,
}

impl Default for BoundsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundsBuilder {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self {
            min: Vec3::zeros(),
            max: Vec3::zeros(),
            empty: true,
        }
    }

    /// Grow the box to contain `p`.
    #[inline]
    pub fn include(&mut self, p: &Vec3) {
        if self.empty {
            self.min = *p;
            self.max = *p;
            self.empty = false;
        } else {
            self.min = self.min.inf(p);
            self.max = self.max.sup(p);
        }
    }

    /// True if no point has been included.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Finish accumulation.
    pub fn build(&self) -> Bounds {
        if self.empty {
            Bounds::default()
        } else {
            Bounds::from_min_max(self.min, self.max)
        }
    }
}
