//! Error types for frame validation.
//!
//! Buffer preparation itself never fails; these errors are raised only when
//! frame data handed over by the reader is inconsistent with itself.

use thiserror::Error;

/// Errors that can occur while accepting a frame from the reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// The corner index array length does not match the sum of face counts.
    #[error("corner index count {actual} does not match face counts total {expected}")]
    CornerCountMismatch {
        /// Sum of all face counts.
        expected: usize,
        /// Length of the corner index array.
        actual: usize,
    },
    /// A corner references a position that does not exist.
    #[error("corner {corner} references position {index}, but only {position_count} positions exist")]
    PositionIndexOutOfRange {
        /// Corner index.
        corner: usize,
        /// Referenced position index.
        index: u32,
        /// Number of positions in the frame.
        position_count: usize,
    },
    /// An attribute index array has the wrong length.
    #[error("{attribute} index count {actual} does not match corner count {expected}")]
    AttributeIndexCount {
        /// Attribute name.
        attribute: &'static str,
        /// Expected number of indices.
        expected: usize,
        /// Actual number of indices.
        actual: usize,
    },
    /// An attribute value array is too short for its scope.
    #[error("{attribute} has {actual} values, at least {expected} required")]
    AttributeValueCount {
        /// Attribute name.
        attribute: &'static str,
        /// Minimum number of values required.
        expected: usize,
        /// Actual number of values.
        actual: usize,
    },
    /// An attribute index points past the end of its value array.
    #[error("{attribute} index {index} at corner {corner} exceeds value count {value_count}")]
    AttributeIndexOutOfRange {
        /// Attribute name.
        attribute: &'static str,
        /// Corner index.
        corner: usize,
        /// Offending value index.
        index: u32,
        /// Number of values.
        value_count: usize,
    },
    /// Next-frame positions do not line up with current positions.
    #[error("next frame has {actual} positions, current frame has {expected}")]
    NextPositionCount {
        /// Current position count.
        expected: usize,
        /// Next-frame position count.
        actual: usize,
    },
    /// Velocity array does not line up with positions.
    #[error("velocity count {actual} does not match position count {expected}")]
    VelocityCount {
        /// Position count.
        expected: usize,
        /// Velocity count.
        actual: usize,
    },
    /// A face set lists a face that does not exist.
    #[error("face set {set} references face {face}, but only {face_count} faces exist")]
    FaceSetOutOfRange {
        /// Face set index.
        set: usize,
        /// Offending face index.
        face: u32,
        /// Number of faces.
        face_count: usize,
    },
    /// The frame carries no face data and no topology is available to reuse.
    #[error("frame {0} has no topology and none is cached")]
    MissingTopology(usize),
    /// The requested sample does not exist.
    #[error("sample {index} out of range ({count} samples)")]
    SampleOutOfRange {
        /// Requested sample index.
        index: usize,
        /// Number of samples in the source.
        count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::CornerCountMismatch {
            expected: 12,
            actual: 10,
        };
        assert_eq!(
            err.to_string(),
            "corner index count 10 does not match face counts total 12"
        );

        let err = MeshError::MissingTopology(3);
        assert_eq!(err.to_string(), "frame 3 has no topology and none is cached");
    }
}
