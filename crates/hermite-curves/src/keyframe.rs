//! Keyframe record.

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, Result, Side};
use crate::point::Point;

/// Control-point weight used when a side is not weighted.
pub const DEFAULT_WEIGHT: f64 = 1.0 / 3.0;

/// One control point of a curve.
///
/// Tangents are slopes (`dy/dx`). An infinite tangent turns the adjacent
/// segment into a hold: `+∞` keeps the left key's value, `-∞` jumps to the
/// right key's value.
///
/// Weights are the fraction of the x-span to the neighbouring key at which
/// the Bezier control point is placed. They only apply when the matching
/// `use_weighted_*` flag is set; otherwise [`DEFAULT_WEIGHT`] is used.
///
/// # Example
///
/// ```
/// use hermite_curves::KeyFrame;
///
/// let key = KeyFrame::new(1.0, 2.0)
///     .with_tangents(0.5, -0.5)
///     .with_out_weight(0.25);
///
/// assert!(key.use_weighted_out);
/// assert!(!key.use_weighted_in);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyFrame {
    /// Input coordinate. Unique within a curve and defines key order.
    pub x: f64,
    /// Output coordinate.
    pub y: f64,
    /// Incoming slope.
    pub in_tangent: f64,
    /// Outgoing slope.
    pub out_tangent: f64,
    /// Incoming weight in `[0,1]`.
    pub in_weight: f64,
    /// Outgoing weight in `[0,1]`.
    pub out_weight: f64,
    /// Use `in_weight` instead of the default third.
    pub use_weighted_in: bool,
    /// Use `out_weight` instead of the default third.
    pub use_weighted_out: bool,
}

impl KeyFrame {
    /// Create a flat, unweighted key at `(x, y)`.
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            in_tangent: 0.0,
            out_tangent: 0.0,
            in_weight: DEFAULT_WEIGHT,
            out_weight: DEFAULT_WEIGHT,
            use_weighted_in: false,
            use_weighted_out: false,
        }
    }

    /// Set both tangents.
    pub const fn with_tangents(mut self, in_tangent: f64, out_tangent: f64) -> Self {
        self.in_tangent = in_tangent;
        self.out_tangent = out_tangent;
        self
    }

    /// Enable the incoming weight.
    pub const fn with_in_weight(mut self, weight: f64) -> Self {
        self.in_weight = weight;
        self.use_weighted_in = true;
        self
    }

    /// Enable the outgoing weight.
    pub const fn with_out_weight(mut self, weight: f64) -> Self {
        self.out_weight = weight;
        self.use_weighted_out = true;
        self
    }

    /// Position of the key.
    #[inline]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Weight actually applied to the incoming control point.
    #[inline]
    pub fn effective_in_weight(&self) -> f64 {
        if self.use_weighted_in {
            self.in_weight
        } else {
            DEFAULT_WEIGHT
        }
    }

    /// Weight actually applied to the outgoing control point.
    #[inline]
    pub fn effective_out_weight(&self) -> f64 {
        if self.use_weighted_out {
            self.out_weight
        } else {
            DEFAULT_WEIGHT
        }
    }

    /// Validate the key, reporting `index` in any error.
    ///
    /// Coordinates must be finite, tangents must not be NaN, and weights on
    /// weighted sides must lie in `[0,1]`.
    ///
    /// # Errors
    ///
    /// Returns the first [`CurveError`] found.
    pub fn validate(&self, index: usize) -> Result<()> {
        for (coordinate, value) in [("x", self.x), ("y", self.y)] {
            if !value.is_finite() {
                return Err(CurveError::NonFiniteCoordinate {
                    index,
                    coordinate,
                    value,
                });
            }
        }
        if self.in_tangent.is_nan() {
            return Err(CurveError::NanTangent {
                index,
                side: Side::In,
            });
        }
        if self.out_tangent.is_nan() {
            return Err(CurveError::NanTangent {
                index,
                side: Side::Out,
            });
        }
        let weights = [
            (Side::In, self.use_weighted_in, self.in_weight),
            (Side::Out, self.use_weighted_out, self.out_weight),
        ];
        for (side, used, value) in weights {
            if used && !(value.is_finite() && (0.0..=1.0).contains(&value)) {
                return Err(CurveError::WeightOutOfRange { index, side, value });
            }
        }
        Ok(())
    }
}

impl Default for KeyFrame {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
