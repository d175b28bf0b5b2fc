//! Prelude module for common curve types.
//!
//! This module provides a convenient way to import the most commonly used
//! types from the curves crate.

pub use crate::curve::Curve;
pub use crate::error::{CurveError, Result};
pub use crate::hermite::Segment;
pub use crate::keyframe::KeyFrame;
pub use crate::lut::CurveLut;
pub use crate::point::Point;
pub use crate::settings::{CurveSettings, DuplicateKeyPolicy};
pub use crate::wrap::WrapMode;
