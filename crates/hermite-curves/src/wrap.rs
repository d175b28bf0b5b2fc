//! Out-of-range policy for curve evaluation.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CurveError;

/// How a curve is extended beyond its first or last keyframe.
///
/// # Example
///
/// ```
/// use hermite_curves::WrapMode;
///
/// let mode: WrapMode = "ping_pong".parse()?;
/// assert_eq!(mode, WrapMode::PingPong);
/// assert_eq!(mode.to_string(), "ping_pong");
/// # Ok::<(), hermite_curves::CurveError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// Hold the boundary key's value.
    #[default]
    Clamp,
    /// Repeat the curve.
    Loop,
    /// Repeat the curve, mirroring every other period.
    PingPong,
}

impl WrapMode {
    /// All modes, in declaration order.
    pub const ALL: [WrapMode; 3] = [WrapMode::Clamp, WrapMode::Loop, WrapMode::PingPong];

    /// Configuration name of the mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            WrapMode::Clamp => "clamp",
            WrapMode::Loop => "loop",
            WrapMode::PingPong => "ping_pong",
        }
    }
}

impl fmt::Display for WrapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WrapMode {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WrapMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CurveError::UnknownWrapMode(s.to_string()))
    }
}

/// Where an out-of-range query should be answered from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WrapTarget {
    /// Return the boundary key's `y`.
    Boundary,
    /// Evaluate the curve again at this in-range `x`.
    Evaluate(f64),
}

#[derive(Debug, Clone, Copy)]
struct Overshoot {
    remainder: f64,
    on_even_cycle: bool,
}

impl Overshoot {
    /// `None` when the curve has no usable period or the overshoot is unbounded.
    fn measure(amount_over: f64, total_length: f64) -> Option<Self> {
        if !(total_length.is_finite() && total_length > 0.0) || !amount_over.is_finite() {
            return None;
        }
        let cycle_index = (amount_over / total_length).ceil();
        Some(Self {
            remainder: amount_over % total_length,
            on_even_cycle: cycle_index.rem_euclid(2.0) < 1.0,
        })
    }
}

/// Map a query left of the first key (`x < first_x`).
///
/// # Example
///
/// ```
/// use hermite_curves::WrapMode;
/// use hermite_curves::wrap::{WrapTarget, wrap_left};
///
/// assert_eq!(wrap_left(-1.0, 0.0, 4.0, WrapMode::Clamp), WrapTarget::Boundary);
/// assert_eq!(wrap_left(-1.0, 0.0, 4.0, WrapMode::Loop), WrapTarget::Evaluate(3.0));
/// assert_eq!(wrap_left(-1.0, 0.0, 4.0, WrapMode::PingPong), WrapTarget::Evaluate(1.0));
/// ```
pub fn wrap_left(x: f64, first_x: f64, last_x: f64, mode: WrapMode) -> WrapTarget {
    if mode == WrapMode::Clamp {
        return WrapTarget::Boundary;
    }
    let Some(overshoot) = Overshoot::measure(first_x - x, last_x - first_x) else {
        return WrapTarget::Boundary;
    };

    let looped = last_x - overshoot.remainder;
    let mirrored = first_x + overshoot.remainder;
    match mode {
        WrapMode::Clamp => WrapTarget::Boundary,
        WrapMode::Loop => WrapTarget::Evaluate(looped),
        WrapMode::PingPong if overshoot.on_even_cycle => WrapTarget::Evaluate(looped),
        WrapMode::PingPong => WrapTarget::Evaluate(mirrored),
    }
}

/// Map a query right of the last key (`x > last_x`).
pub fn wrap_right(x: f64, first_x: f64, last_x: f64, mode: WrapMode) -> WrapTarget {
    if mode == WrapMode::Clamp {
        return WrapTarget::Boundary;
    }
    let Some(overshoot) = Overshoot::measure(x - last_x, last_x - first_x) else {
        return WrapTarget::Boundary;
    };

    let looped = first_x + overshoot.remainder;
    let mirrored = last_x - overshoot.remainder;
    match mode {
        WrapMode::Clamp => WrapTarget::Boundary,
        WrapMode::Loop => WrapTarget::Evaluate(looped),
        WrapMode::PingPong if overshoot.on_even_cycle => WrapTarget::Evaluate(looped),
        WrapMode::PingPong => WrapTarget::Evaluate(mirrored),
    }
}
