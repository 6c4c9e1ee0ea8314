//! Per-vertex and per-corner attribute storage.
//!
//! Normals and UVs arrive either with one value per position
//! ([`GeometryScope::Vertex`]) or with one value per corner
//! ([`GeometryScope::FaceVarying`]), optionally through an index array.
//! [`CornerLookup`] hides that distinction from the algorithms.

use crate::error::MeshError;

/// Whether an attribute is defined per position or per corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeometryScope {
    /// One value per position.
    #[default]
    Vertex,
    /// One value per corner (face-varying).
    FaceVarying,
}

/// An attribute value array with optional per-corner indices.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSource<T> {
    values: Vec<T>,
    indices: Option<Vec<u32>>,
    scope: GeometryScope,
}

impl<T: Copy> AttributeSource<T> {
    /// One value per position.
    pub fn vertex(values: Vec<T>) -> Self {
        Self {
            values,
            indices: None,
            scope: GeometryScope::Vertex,
        }
    }

    /// One value per corner, stored in corner order.
    pub fn face_varying(values: Vec<T>) -> Self {
        Self {
            values,
            indices: None,
            scope: GeometryScope::FaceVarying,
        }
    }

    /// Face-varying values addressed through a per-corner index array.
    pub fn indexed(values: Vec<T>, indices: Vec<u32>) -> Self {
        Self {
            values,
            indices: Some(indices),
            scope: GeometryScope::FaceVarying,
        }
    }

    /// Value array.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Per-corner index array, if any.
    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    /// Attribute scope.
    pub fn scope(&self) -> GeometryScope {
        self.scope
    }

    /// Resolver for per-corner access.
    pub fn lookup(&self) -> CornerLookup<'_, T> {
        match (self.scope, self.indices.as_deref()) {
            (GeometryScope::Vertex, _) => CornerLookup::PerPosition(&self.values),
            (GeometryScope::FaceVarying, Some(indices)) => CornerLookup::Indexed {
                values: &self.values,
                indices,
            },
            (GeometryScope::FaceVarying, None) => CornerLookup::PerCorner(&self.values),
        }
    }

    /// Check that every corner resolves to an existing value.
    pub(crate) fn validate(
        &self,
        attribute: &'static str,
        corner_count: usize,
        position_count: usize,
    ) -> Result<(), MeshError> {
        match (self.scope, self.indices.as_deref()) {
            (GeometryScope::Vertex, _) => {
                if self.values.len() < position_count {
                    return Err(MeshError::AttributeValueCount {
                        attribute,
                        expected: position_count,
                        actual: self.values.len(),
                    });
                }
            }
            (GeometryScope::FaceVarying, Some(indices)) => {
                if indices.len() != corner_count {
                    return Err(MeshError::AttributeIndexCount {
                        attribute,
                        expected: corner_count,
                        actual: indices.len(),
                    });
                }
                let value_count = self.values.len();
                if let Some(corner) = indices.iter().position(|&i| i as usize >= value_count) {
                    return Err(MeshError::AttributeIndexOutOfRange {
                        attribute,
                        corner,
                        index: indices[corner],
                        value_count,
                    });
                }
            }
            (GeometryScope::FaceVarying, None) => {
                if self.values.len() < corner_count {
                    return Err(MeshError::AttributeValueCount {
                        attribute,
                        expected: corner_count,
                        actual: self.values.len(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Borrowed resolver from (corner, position) to an attribute value.
#[derive(Debug, Clone, Copy)]
pub enum CornerLookup<'a, T> {
    /// Indexed by position.
    PerPosition(&'a [T]),
    /// Indexed by corner.
    PerCorner(&'a [T]),
    /// Indexed through a per-corner index array.
    Indexed {
        /// Value array.
        values: &'a [T],
        /// Per-corner indices into `values`.
        indices: &'a [u32],
    },
}

impl<'a, T: Copy> CornerLookup<'a, T> {
    /// Index into the value array for a corner referencing `position`.
    #[inline]
    pub fn value_index(&self, corner: usize, position: u32) -> usize {
        match self {
            Self::PerPosition(_) => position as usize,
            Self::PerCorner(_) => corner,
            Self::Indexed { indices, .. } => indices[corner] as usize,
        }
    }

    /// Value for a corner referencing `position`.
    #[inline]
    pub fn get(&self, corner: usize, position: u32) -> T {
        let index = self.value_index(corner, position);
        match self {
            Self::PerPosition(values) | Self::PerCorner(values) => values[index],
            Self::Indexed { values, .. } => values[index],
        }
    }
}
