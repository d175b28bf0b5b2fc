//! Keyframed Cubic Hermite curves
//!
//! This crate evaluates one-dimensional animation curves defined by
//! keyframes with tangents and optional weights, the kind of curve found in
//! animation and timeline editors.
//!
//! # Overview
//!
//! - **[`KeyFrame`]**: position, in/out tangents and in/out weights
//! - **[`Curve`]**: sorted keyframes joined by cubic Bezier segments,
//!   with [`WrapMode`] policies before the first and after the last key
//! - **[`hermite`]**: the pure segment math, including the closed-form
//!   inversion of `x(t)` used to evaluate weighted segments exactly
//! - **[`CurveLut`]**: a baked table for O(1) allocation-free lookup
//! - **[`CurveSettings`]**: serde configuration for hosts
//!
//! # Evaluation
//!
//! Evaluating a curve at `x` finds the segment containing `x`, solves the
//! segment's x-cubic for the Bezier parameter `t` with Cardano's formula and
//! returns `y(t)`. Infinite tangents turn a segment into a step. Queries
//! outside the keys are clamped, looped or ping-ponged.
//!
//! Control points are cached inside the curve and rebuilt lazily after
//! [`Curve::set_keyframes`], so evaluation only needs `&self`.
//!
//! # Example
//!
//! ```
//! use hermite_curves::{Curve, KeyFrame, WrapMode};
//!
//! let mut curve = Curve::from_keyframes([
//!     KeyFrame::new(0.0, 0.0).with_tangents(0.0, 2.0).with_out_weight(0.6),
//!     KeyFrame::new(1.0, 1.0).with_tangents(0.0, 0.0),
//!     KeyFrame::new(2.0, 0.0),
//! ])?;
//! curve.set_post_wrap(WrapMode::PingPong);
//!
//! let y = curve.evaluate(0.5);
//! assert!(y > 0.0 && y < 1.5);
//!
//! // Past the end the curve runs backwards.
//! assert!((curve.evaluate(2.5) - curve.evaluate(1.5)).abs() < 1e-12);
//! # Ok::<(), hermite_curves::CurveError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod complex;
pub mod curve;
pub mod error;
pub mod hermite;
pub mod keyframe;
pub mod lut;
pub mod point;
pub mod prelude;
pub mod settings;
pub mod tolerance;
pub mod wrap;

pub use curve::Curve;
pub use error::{CurveError, Result, Side};
pub use hermite::Segment;
pub use keyframe::KeyFrame;
pub use lut::CurveLut;
pub use point::Point;
pub use settings::{CurveSettings, DuplicateKeyPolicy};
pub use wrap::WrapMode;
