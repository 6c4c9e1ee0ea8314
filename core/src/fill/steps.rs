//! Per-attribute copy steps.
//!
//! A fill is an ordered list of [`CopyStep`]s chosen once per split. Each
//! step owns one destination channel and walks the split's vertices through
//! a shared [`VertexWalk`], so every combination of present and absent
//! attributes, welded or not, runs through the same few loops.

use crate::attributes::CornerLookup;
use crate::math::{BoundsBuilder, Vec2, Vec3, Vec4};
use crate::topology::Topology;

use super::buffers::{Channel, VertexBufferSet};
use super::FillReport;

/// Order in which a split's output vertices map back to corner slots.
#[derive(Debug, Clone, Copy)]
pub enum VertexOrder<'a> {
    /// One output vertex per corner, starting at the split's corner offset.
    Corners {
        /// Corner slot of output vertex 0.
        offset: usize,
    },
    /// One output vertex per shared vertex; the slice holds each one's slot.
    Welded(&'a [u32]),
}

/// Resolves output vertices of one split to corners and positions.
#[derive(Debug, Clone, Copy)]
pub struct VertexWalk<'a> {
    topology: &'a Topology,
    order: VertexOrder<'a>,
    vertex_count: usize,
}

impl<'a> VertexWalk<'a> {
    /// Walk `vertex_count` output vertices in `order`.
    pub fn new(topology: &'a Topology, order: VertexOrder<'a>, vertex_count: usize) -> Self {
        Self {
            topology,
            order,
            vertex_count,
        }
    }

    /// Number of output vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Corner slot of output vertex `vertex`.
    #[inline]
    pub fn slot(&self, vertex: usize) -> usize {
        match self.order {
            VertexOrder::Corners { offset } => offset + vertex,
            VertexOrder::Welded(slots) => slots[vertex] as usize,
        }
    }

    /// Source corner and position of output vertex `vertex`.
    #[inline]
    pub fn corner(&self, vertex: usize) -> (usize, u32) {
        let slot = self.slot(vertex);
        (
            self.topology.source_corner(slot),
            self.topology.slot_position(slot),
        )
    }

    /// Write `value(vertex)` into every vertex of `dst`.
    ///
    /// Returns the number of vertices written: 0 if the channel was not
    /// requested or is too small for the split.
    fn write<T>(
        &self,
        channel: Channel,
        dst: &mut [T],
        mut value: impl FnMut(usize) -> T,
    ) -> usize {
        if !self.fits(channel, dst.len()) {
            return 0;
        }
        for (vertex, out) in dst[..self.vertex_count].iter_mut().enumerate() {
            *out = value(vertex);
        }
        self.vertex_count
    }

    fn fits(&self, channel: Channel, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        if len < self.vertex_count {
            log::warn!(
                "Skipping {:?}: destination holds {} vertices, split needs {}",
                channel,
                len,
                self.vertex_count
            );
            return false;
        }
        true
    }
}

/// One destination channel's share of a vertex buffer fill.
pub trait CopyStep {
    /// Channel the step writes.
    fn channel(&self) -> Channel;

    /// Write the channel and record the result in `report`.
    fn run(&self, walk: &VertexWalk<'_>, buffers: &mut VertexBufferSet, report: &mut FillReport);
}

/// Interpolation towards the next sample.
#[derive(Debug, Clone, Copy)]
pub struct Motion<'a> {
    /// Positions of the next sample.
    pub next_positions: &'a [Vec3],
    /// Fraction of the way towards the next sample.
    pub time_offset: f32,
    /// Time between the two samples.
    pub time_interval: f32,
    /// Scale applied to motion vectors.
    pub motion_scale: f32,
}

impl Motion<'_> {
    /// Interpolated position and motion vector for position `index`.
    #[inline]
    fn sample(&self, current: Vec3, index: usize) -> (Vec3, Vec3) {
        let distance = self.next_positions[index] - current;
        let velocity = if self.time_interval > 0.0 {
            distance / self.time_interval * self.motion_scale
        } else {
            Vec3::zeros()
        };
        (current + distance * self.time_offset, velocity)
    }
}

/// Positions, bounds and, when interpolating, motion vectors.
pub struct PositionStep<'a> {
    /// Current positions.
    pub positions: &'a [Vec3],
    /// Interpolation inputs.
    pub motion: Option<Motion<'a>>,
    /// Sign applied to X.
    pub x_scale: f32,
}

impl CopyStep for PositionStep<'_> {
    fn channel(&self) -> Channel {
        Channel::Positions
    }

    fn run(&self, walk: &VertexWalk<'_>, buffers: &mut VertexBufferSet, report: &mut FillReport) {
        let mut bounds = BoundsBuilder::new();
        let x_scale = self.x_scale;

        let Some(motion) = self.motion else {
            report.positions = walk.write(Channel::Positions, &mut buffers.positions, |v| {
                let (_, position) = walk.corner(v);
                let mut p = self.positions[position as usize];
                p.x *= x_scale;
                bounds.include(&p);
                p
            });
            report.bounds = bounds.build();
            return;
        };

        let vertex_count = walk.vertex_count();
        if !walk.fits(Channel::Positions, buffers.positions.len()) {
            return;
        }
        let write_velocities = walk.fits(Channel::Velocities, buffers.channel_len(Channel::Velocities));
        for v in 0..vertex_count {
            let (_, position) = walk.corner(v);
            let index = position as usize;
            let (mut p, velocity) = motion.sample(self.positions[index], index);
            p.x *= x_scale;
            bounds.include(&p);
            buffers.positions[v] = p;
            if write_velocities {
                buffers.velocities_xy[v] = Vec2::new(velocity.x * x_scale, velocity.y);
                buffers.velocities_z[v] = Vec2::new(velocity.z, 0.0);
            }
        }
        report.positions = vertex_count;
        report.velocities = if write_velocities { vertex_count } else { 0 };
        report.bounds = bounds.build();
    }
}

/// Normals resolved per corner, mirrored along X.
pub struct NormalStep<'a> {
    /// Normal source.
    pub normals: CornerLookup<'a, Vec3>,
    /// Sign applied to X.
    pub x_scale: f32,
}

impl CopyStep for NormalStep<'_> {
    fn channel(&self) -> Channel {
        Channel::Normals
    }

    fn run(&self, walk: &VertexWalk<'_>, buffers: &mut VertexBufferSet, report: &mut FillReport) {
        report.normals = walk.write(Channel::Normals, &mut buffers.normals, |v| {
            let (corner, position) = walk.corner(v);
            let mut n = self.normals.get(corner, position);
            n.x *= self.x_scale;
            n
        });
    }
}

/// UVs resolved per corner.
pub struct UvStep<'a> {
    /// UV source.
    pub uvs: CornerLookup<'a, Vec2>,
}

impl CopyStep for UvStep<'_> {
    fn channel(&self) -> Channel {
        Channel::Uvs
    }

    fn run(&self, walk: &VertexWalk<'_>, buffers: &mut VertexBufferSet, report: &mut FillReport) {
        report.uvs = walk.write(Channel::Uvs, &mut buffers.uvs, |v| {
            let (corner, position) = walk.corner(v);
            self.uvs.get(corner, position)
        });
    }
}

/// Tangents looked up through the topology's tangent slots.
pub struct TangentStep<'a> {
    /// One tangent per tangent slot.
    pub tangents: &'a [Vec4],
    /// Tangent slot of every corner slot.
    pub tangent_indices: &'a [u32],
    /// Sign applied to X.
    pub x_scale: f32,
}

impl CopyStep for TangentStep<'_> {
    fn channel(&self) -> Channel {
        Channel::Tangents
    }

    fn run(&self, walk: &VertexWalk<'_>, buffers: &mut VertexBufferSet, report: &mut FillReport) {
        report.tangents = walk.write(Channel::Tangents, &mut buffers.tangents, |v| {
            let mut t = self.tangents[self.tangent_indices[walk.slot(v)] as usize];
            t.x *= self.x_scale;
            t
        });
    }
}

/// Zeroes a requested channel that has no source data.
pub struct ZeroFillStep(pub Channel);

impl CopyStep for ZeroFillStep {
    fn channel(&self) -> Channel {
        self.0
    }

    fn run(&self, walk: &VertexWalk<'_>, buffers: &mut VertexBufferSet, _report: &mut FillReport) {
        let written = match self.0 {
            Channel::Positions => walk.write(self.0, &mut buffers.positions, |_| Vec3::zeros()),
            Channel::Normals => walk.write(self.0, &mut buffers.normals, |_| Vec3::zeros()),
            Channel::Uvs => walk.write(self.0, &mut buffers.uvs, |_| Vec2::zeros()),
            Channel::Tangents => walk.write(self.0, &mut buffers.tangents, |_| Vec4::zeros()),
            Channel::Velocities => {
                walk.write(self.0, &mut buffers.velocities_xy, |_| Vec2::zeros())
                    .min(walk.write(self.0, &mut buffers.velocities_z, |_| Vec2::zeros()))
            }
        };
        if written > 0 {
            log::trace!("Zeroed {:?} for {} vertices", self.0, written);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TopologySettings;
    use crate::fill::VertexChannels;

    fn triangle() -> Topology {
        Topology::new(&[3], &[2, 0, 1], TopologySettings::default()).unwrap()
    }

    #[test]
    fn test_position_step_mirrors_and_bounds() {
        let topology = triangle();
        let walk = VertexWalk::new(&topology, VertexOrder::Corners { offset: 0 }, 3);
        let positions = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 0.0, 3.0),
        ];
        let step = PositionStep {
            positions: &positions,
            motion: None,
            x_scale: -1.0,
        };
        let mut buffers = VertexBufferSet::new(3, VertexChannels::default());
        let mut report = FillReport::default();
        step.run(&walk, &mut buffers, &mut report);

        assert_eq!(report.positions, 3);
        assert_eq!(buffers.positions[0], Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(buffers.positions[1], Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(report.bounds.min(), Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(report.bounds.max(), Vec3::new(0.0, 2.0, 3.0));
    }

    #[test]
    fn test_motion_interpolates_and_emits_velocity() {
        let topology = triangle();
        let walk = VertexWalk::new(&topology, VertexOrder::Corners { offset: 0 }, 3);
        let positions = [Vec3::zeros(); 3];
        let next = [Vec3::new(2.0, 4.0, 6.0); 3];
        let step = PositionStep {
            positions: &positions,
            motion: Some(Motion {
                next_positions: &next,
                time_offset: 0.5,
                time_interval: 2.0,
                motion_scale: 1.0,
            }),
            x_scale: -1.0,
        };
        let mut buffers = VertexBufferSet::new(3, VertexChannels::all());
        let mut report = FillReport::default();
        step.run(&walk, &mut buffers, &mut report);

        assert_eq!(buffers.positions[0], Vec3::new(-1.0, 2.0, 3.0));
        assert_eq!(buffers.velocities_xy[0], Vec2::new(-1.0, 2.0));
        assert_eq!(buffers.velocities_z[0], Vec2::new(3.0, 0.0));
        assert_eq!(report.velocities, 3);
    }

    #[test]
    fn test_short_destination_is_skipped() {
        let topology = triangle();
        let walk = VertexWalk::new(&topology, VertexOrder::Corners { offset: 0 }, 3);
        let uvs = [Vec2::new(0.5, 0.5); 3];
        let step = UvStep {
            uvs: CornerLookup::PerPosition(&uvs),
        };
        let mut buffers = VertexBufferSet::default();
        buffers.uvs = vec![Vec2::new(9.0, 9.0); 2];
        let mut report = FillReport::default();
        step.run(&walk, &mut buffers, &mut report);
        assert_eq!(report.uvs, 0);
        assert_eq!(buffers.uvs, vec![Vec2::new(9.0, 9.0); 2]);
    }

    #[test]
    fn test_zero_fill() {
        let topology = triangle();
        let walk = VertexWalk::new(&topology, VertexOrder::Corners { offset: 0 }, 3);
        let mut buffers = VertexBufferSet::default();
        buffers.tangents = vec![Vec4::new(1.0, 1.0, 1.0, 1.0); 4];
        let mut report = FillReport::default();
        ZeroFillStep(Channel::Tangents).run(&walk, &mut buffers, &mut report);
        assert_eq!(&buffers.tangents[..3], &[Vec4::zeros(); 3]);
        // Past the split's vertex count the buffer is untouched.
        assert_eq!(buffers.tangents[3], Vec4::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_welded_order_uses_representatives() {
        let topology = Topology::new(&[3], &[0, 1, 2], TopologySettings::default()).unwrap();
        let slots = [2u32, 0];
        let walk = VertexWalk::new(&topology, VertexOrder::Welded(&slots), 2);
        assert_eq!(walk.corner(0), (2, 2));
        assert_eq!(walk.slot(1), 0);
    }
}
