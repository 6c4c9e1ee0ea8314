//! Frame generators for common test shapes.
//!
//! These generators produce [`FrameData`] values that a [`MeshStream`]
//! can read through an [`InMemorySource`]. They are used by the tests,
//! benchmarks and demos to exercise splitting and welding without a
//! geometry cache reader.
//!
//! [`MeshStream`]: crate::stream::MeshStream

use std::f32::consts::PI;

use crate::attributes::AttributeSource;
use crate::math::{Vec2, Vec3};
use crate::source::{FaceTopology, FrameData, InMemorySource, TopologyVariance};

/// Parameters of a quad grid on the XY plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridDesc {
    /// Quads along X.
    pub columns: u32,
    /// Quads along Y.
    pub rows: u32,
    /// Distance between neighbouring positions.
    pub spacing: f32,
    /// Emit indexed UVs with a seam down the middle column.
    pub uv_seam: bool,
    /// Emit per-position normals.
    pub normals: bool,
    /// Split faces into this many material groups by row. 0 or 1 emits none.
    pub material_groups: u32,
    /// Emit quads as pairs of triangles.
    pub triangulate: bool,
}

impl Default for GridDesc {
    fn default() -> Self {
        Self {
            columns: 4,
            rows: 4,
            spacing: 1.0,
            uv_seam: false,
            normals: false,
            material_groups: 0,
            triangulate: false,
        }
    }
}

impl GridDesc {
    /// Grid of `columns` x `rows` quads.
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            ..Default::default()
        }
    }

    /// Set the position spacing.
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Emit indexed UVs with a seam.
    pub fn with_uv_seam(mut self, seam: bool) -> Self {
        self.uv_seam = seam;
        self
    }

    /// Emit per-position normals.
    pub fn with_normals(mut self, normals: bool) -> Self {
        self.normals = normals;
        self
    }

    /// Split faces into material groups by row.
    pub fn with_material_groups(mut self, groups: u32) -> Self {
        self.material_groups = groups;
        self
    }

    /// Emit triangles instead of quads.
    pub fn with_triangulate(mut self, triangulate: bool) -> Self {
        self.triangulate = triangulate;
        self
    }

    /// Number of positions.
    pub fn position_count(&self) -> usize {
        (self.columns as usize + 1) * (self.rows as usize + 1)
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        let quads = self.columns as usize * self.rows as usize;
        if self.triangulate {
            quads * 2
        } else {
            quads
        }
    }

    fn position_index(&self, column: u32, row: u32) -> u32 {
        row * (self.columns + 1) + column
    }

    /// Face structure of the grid.
    pub fn topology(&self) -> FaceTopology {
        let mut face_counts = Vec::with_capacity(self.face_count());
        let mut corner_indices = Vec::with_capacity(self.columns as usize * self.rows as usize * 6);

        for row in 0..self.rows {
            for column in 0..self.columns {
                let a = self.position_index(column, row);
                let b = self.position_index(column + 1, row);
                let c = self.position_index(column + 1, row + 1);
                let d = self.position_index(column, row + 1);
                if self.triangulate {
                    face_counts.extend_from_slice(&[3, 3]);
                    corner_indices.extend_from_slice(&[a, b, c, a, c, d]);
                } else {
                    face_counts.push(4);
                    corner_indices.extend_from_slice(&[a, b, c, d]);
                }
            }
        }

        FaceTopology::new(face_counts, corner_indices)
    }

    /// Positions displaced along Z by a travelling wave at `time`.
    pub fn positions(&self, time: f32) -> Vec<Vec3> {
        let mut positions = Vec::with_capacity(self.position_count());
        for row in 0..=self.rows {
            for column in 0..=self.columns {
                let x = column as f32 * self.spacing;
                let y = row as f32 * self.spacing;
                let z = if time == 0.0 {
                    0.0
                } else {
                    0.25 * self.spacing * (x * 0.5 + time * 2.0 * PI).sin()
                };
                positions.push(Vec3::new(x, y, z));
            }
        }
        positions
    }

    /// Texture coordinates.
    ///
    /// Without a seam every position has one UV. With a seam the middle
    /// column of positions carries u = 0.5 on its left faces and u = 0.0 on
    /// its right faces, so those corners must not be welded.
    pub fn uvs(&self, topology: &FaceTopology) -> AttributeSource<Vec2> {
        let width = self.columns.max(1) as f32;
        let height = self.rows.max(1) as f32;
        let uv_of = |position: u32| {
            let column = position % (self.columns + 1);
            let row = position / (self.columns + 1);
            Vec2::new(column as f32 / width, row as f32 / height)
        };

        if !self.uv_seam {
            let values = (0..self.position_count() as u32).map(uv_of).collect();
            return AttributeSource::vertex(values);
        }

        let seam = self.columns / 2;
        let mut values: Vec<Vec2> = (0..self.position_count() as u32).map(uv_of).collect();
        let mut indices = topology.corner_indices.clone();
        let mut right_side = Vec::new();

        let mut corner = 0;
        for &count in &topology.face_counts {
            let face = &topology.corner_indices[corner..corner + count as usize];
            let min_column = face
                .iter()
                .map(|&p| p % (self.columns + 1))
                .min()
                .unwrap_or(0);
            for (offset, &position) in face.iter().enumerate() {
                let column = position % (self.columns + 1);
                if column == seam && min_column >= seam {
                    let row = position / (self.columns + 1);
                    let slot = match right_side.iter().position(|&(r, _)| r == row) {
                        Some(slot) => right_side[slot].1,
                        None => {
                            values.push(Vec2::new(0.0, row as f32 / height));
                            let slot = values.len() as u32 - 1;
                            right_side.push((row, slot));
                            slot
                        }
                    };
                    indices[corner + offset] = slot;
                }
            }
            corner += count as usize;
        }

        AttributeSource::indexed(values, indices)
    }

    /// Face lists of each material group.
    pub fn face_sets(&self) -> Vec<Vec<u32>> {
        if self.material_groups <= 1 {
            return Vec::new();
        }
        let faces_per_row = if self.triangulate {
            self.columns * 2
        } else {
            self.columns
        };
        let mut sets = vec![Vec::new(); self.material_groups as usize];
        for row in 0..self.rows {
            let set = &mut sets[(row % self.material_groups) as usize];
            set.extend(row * faces_per_row..(row + 1) * faces_per_row);
        }
        sets
    }

    /// One frame of the grid at `time`.
    pub fn frame(&self, time: f32) -> FrameData {
        let topology = self.topology();
        let mut frame = FrameData::positions_only(self.positions(time))
            .with_uvs(self.uvs(&topology))
            .with_face_sets(self.face_sets());
        if self.normals {
            frame = frame.with_normals(AttributeSource::vertex(vec![
                Vec3::new(0.0, 0.0, 1.0);
                self.position_count()
            ]));
        }
        frame.topology = Some(topology);
        frame
    }

    /// A source with `frame_count` animated frames.
    ///
    /// Non-varying sources carry the face structure only in the first
    /// frame, like a cache reader that stores it once.
    pub fn animated_source(&self, variance: TopologyVariance, frame_count: usize) -> InMemorySource {
        let frames = (0..frame_count)
            .map(|i| {
                let mut frame = self.frame(i as f32 / frame_count.max(1) as f32);
                if i > 0 && !variance.is_varying() {
                    frame.topology = None;
                    frame.face_sets.clear();
                }
                frame
            })
            .collect();
        InMemorySource::new(variance, frames)
    }
}

/// A source whose face structure grows every frame: frame `i` is a strip of
/// `i + 1` quads.
pub fn growing_strip_source(frame_count: usize) -> InMemorySource {
    let frames = (0..frame_count)
        .map(|i| GridDesc::new(i as u32 + 1, 1).frame(0.0))
        .collect();
    InMemorySource::new(TopologyVariance::Heterogeneous, frames)
}
