//! Error types for curve operations.

/// Which side of a keyframe a tangent or weight belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Incoming side (towards the previous keyframe).
    In,
    /// Outgoing side (towards the next keyframe).
    Out,
}

impl core::fmt::Display for Side {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Side::In => write!(f, "in"),
            Side::Out => write!(f, "out"),
        }
    }
}

/// Error type for curve operations.
///
/// Covers keyframe validation, duplicate keys, configuration parsing and the
/// explicit variant of the root solve.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    /// A keyframe coordinate is NaN or infinite.
    #[error("Keyframe {index} {coordinate} coordinate {value} is not finite")]
    NonFiniteCoordinate {
        /// Index of the keyframe in the input sequence.
        index: usize,
        /// Which coordinate is invalid ("x" or "y").
        coordinate: &'static str,
        /// The invalid value.
        value: f64,
    },

    /// A keyframe tangent is NaN. Infinite tangents are valid (hold segments).
    #[error("Keyframe {index} {side} tangent is NaN")]
    NanTangent {
        /// Index of the keyframe in the input sequence.
        index: usize,
        /// Which tangent is invalid.
        side: Side,
    },

    /// A keyframe weight is outside `[0,1]` or non-finite.
    #[error("Keyframe {index} {side} weight {value} is outside valid range [0,1]")]
    WeightOutOfRange {
        /// Index of the keyframe in the input sequence.
        index: usize,
        /// Which weight is invalid.
        side: Side,
        /// The invalid value.
        value: f64,
    },

    /// Two keyframes share the same `x`.
    #[error("Duplicate keyframe at x = {x}")]
    DuplicateKey {
        /// The shared x coordinate.
        x: f64,
    },

    /// The cubic has no real root with `t` in `[0,1]` for the requested x.
    #[error("No curve parameter in [0,1] maps to x = {x}")]
    NoRootInRange {
        /// The x coordinate that could not be inverted.
        x: f64,
    },

    /// A wrap mode name did not match any known mode.
    #[error("Unknown wrap mode: {0}")]
    UnknownWrapMode(String),
}

/// A specialized `Result` type for curve operations.
pub type Result<T> = std::result::Result<T, CurveError>;
