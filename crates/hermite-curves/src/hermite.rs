//! Cubic Hermite segment math.
//!
//! A segment between two keyframes is a cubic Bezier whose inner control
//! points come from the keys' tangents and weights. To evaluate the curve at
//! an arbitrary `x`, the x-component of the Bezier is inverted in closed form
//! (Cardano's method with the primitive cube root of unity) to recover the
//! curve parameter `t`, and the y-component is then evaluated at `t`.
//!
//! All functions here are pure and operate on [`Point`] values.

use tracing::warn;

use crate::complex::Complex;
use crate::error::{CurveError, Result};
use crate::keyframe::KeyFrame;
use crate::point::Point;

/// Imaginary magnitude below which a candidate root is treated as real.
pub const IMAGINARY_TOLERANCE: f64 = 1e-10;

/// Looser bound used only when no candidate meets [`IMAGINARY_TOLERANCE`].
/// Double roots lose about half their digits through the square root.
const LOOSE_IMAGINARY_TOLERANCE: f64 = 1e-6;

/// Real parts this far outside `[0,1]` are still accepted, then clamped.
const PARAMETER_SLACK: f64 = 1e-9;

/// Leading coefficients below this (in normalized coordinates) are dropped.
const NEGLIGIBLE_COEFFICIENT: f64 = 1e-7;

/// `|C|` below this means the radical vanished.
const VANISHING_RADICAL: f64 = 1e-12;

/// Normalized residual a closed-form root must reach before it is trusted.
const RESIDUAL_TOLERANCE: f64 = 1e-12;

const MIN_SLOPE: f64 = 1e-12;
const NEWTON_STEPS: usize = 2;
const BISECTION_STEPS: usize = 64;

/// Compute the Bezier control points between two adjacent keyframes.
///
/// Returns `(right control point of start, left control point of end)`.
/// Unweighted sides place the control point a third of the way along the
/// x-span; weighted sides use the key's weight instead.
///
/// # Example
///
/// ```
/// use hermite_curves::{KeyFrame, Point};
/// use hermite_curves::hermite::compute_control_points;
///
/// let start = KeyFrame::new(0.0, 0.0).with_tangents(0.0, 3.0);
/// let end = KeyFrame::new(3.0, 6.0);
/// let (cp1, cp2) = compute_control_points(&start, &end);
///
/// assert_eq!(cp1, Point::new(1.0, 3.0));
/// assert_eq!(cp2, Point::new(2.0, 6.0));
/// ```
pub fn compute_control_points(start: &KeyFrame, end: &KeyFrame) -> (Point, Point) {
    let delta_x = end.x - start.x;

    let out_weight = start.effective_out_weight();
    let right = Point::new(
        start.x + out_weight * delta_x,
        start.y + start.out_tangent * out_weight * delta_x,
    );

    let in_weight = end.effective_in_weight();
    let left = Point::new(
        end.x - in_weight * delta_x,
        end.y - end.in_tangent * in_weight * delta_x,
    );

    (right, left)
}

/// Evaluate the cubic Bezier at parameter `t`.
///
/// Uses the formula: B(t) = (1-t)³P₀ + 3(1-t)²tP₁ + 3(1-t)t²P₂ + t³P₃
///
/// # Arguments
///
/// * `t` - Parameter value in `[0,1]` (will be clamped)
#[inline]
pub fn evaluate_at_parameter(t: f64, start: Point, cp1: Point, cp2: Point, end: Point) -> Point {
    let t = t.clamp(0.0, 1.0);
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let mt3 = mt2 * mt;

    let x = mt3 * start.x + 3.0 * mt2 * t * cp1.x + 3.0 * mt * t2 * cp2.x + t3 * end.x;
    let y = mt3 * start.y + 3.0 * mt2 * t * cp1.y + 3.0 * mt * t2 * cp2.y + t3 * end.y;

    Point::new(x, y)
}

/// Find the curve parameter `t` whose x-coordinate is `x`.
///
/// The closed-form root is checked against the cubic and, if it misses, the
/// parameter is bracketed on `[0,1]` instead. Control points inside the
/// segment's x-span keep `x(t)` monotonic, so every `x` the segment covers
/// has a root.
///
/// # Errors
///
/// Returns [`CurveError::NoRootInRange`] if no real root lies in `[0,1]`,
/// which happens when `x` is outside the segment or the segment has no
/// x-extent.
pub fn try_solve_parameter_for_x(
    x: f64,
    start: Point,
    cp1: Point,
    cp2: Point,
    end: Point,
) -> Result<f64> {
    XCubic::normalized(x, start, cp1, cp2, end)
        .and_then(|cubic| cubic.solve())
        .ok_or(CurveError::NoRootInRange { x })
}

/// Find the curve parameter `t` whose x-coordinate is `x`, falling back to
/// `t = 0` when the cubic has no usable root.
///
/// The fallback keeps evaluation total; it is logged at `warn` because it
/// means the caller asked for an `x` the segment does not cover. Use
/// [`try_solve_parameter_for_x`] to get the failure as an error instead.
pub fn solve_parameter_for_x(x: f64, start: Point, cp1: Point, cp2: Point, end: Point) -> f64 {
    match try_solve_parameter_for_x(x, start, cp1, cp2, end) {
        Ok(t) => t,
        Err(err) => {
            warn!(
                "{} (segment {}..{}); falling back to t = 0",
                err, start.x, end.x
            );
            0.0
        }
    }
}

/// Evaluate the segment's y at `x`.
#[inline]
pub fn evaluate_curve(x: f64, start: Point, cp1: Point, cp2: Point, end: Point) -> f64 {
    let t = solve_parameter_for_x(x, start, cp1, cp2, end);
    evaluate_at_parameter(t, start, cp1, cp2, end).y
}

/// One Bezier segment: two key positions and the control points between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Position of the left key.
    pub start: Point,
    /// Right control point of the left key.
    pub cp1: Point,
    /// Left control point of the right key.
    pub cp2: Point,
    /// Position of the right key.
    pub end: Point,
}

impl Segment {
    /// Build the segment between two adjacent keys.
    pub fn from_keys(start: &KeyFrame, end: &KeyFrame) -> Self {
        let (cp1, cp2) = compute_control_points(start, end);
        Self {
            start: start.position(),
            cp1,
            cp2,
            end: end.position(),
        }
    }

    /// Point on the segment at parameter `t`.
    #[inline]
    pub fn point_at(&self, t: f64) -> Point {
        evaluate_at_parameter(t, self.start, self.cp1, self.cp2, self.end)
    }

    /// See [`solve_parameter_for_x`].
    #[inline]
    pub fn solve_parameter(&self, x: f64) -> f64 {
        solve_parameter_for_x(x, self.start, self.cp1, self.cp2, self.end)
    }

    /// See [`try_solve_parameter_for_x`].
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::NoRootInRange`] if `x` cannot be inverted.
    #[inline]
    pub fn try_solve_parameter(&self, x: f64) -> Result<f64> {
        try_solve_parameter_for_x(x, self.start, self.cp1, self.cp2, self.end)
    }

    /// See [`evaluate_curve`].
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        evaluate_curve(x, self.start, self.cp1, self.cp2, self.end)
    }

    /// Like [`Segment::evaluate`] but without the `t = 0` fallback.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::NoRootInRange`] if `x` cannot be inverted.
    pub fn try_evaluate(&self, x: f64) -> Result<f64> {
        let t = self.try_solve_parameter(x)?;
        Ok(self.point_at(t).y)
    }
}

/// `a·t³ + b·t² + c·t + d = 0`, the x-component of a segment minus the target,
/// expressed over the segment's x-span mapped to `[0,1]`.
///
/// Normalizing leaves `t` unchanged and keeps the coefficients O(1), so the
/// root tolerances do not depend on where the curve lives on the x-axis.
#[derive(Debug, Clone, Copy)]
struct XCubic {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

/// Up to three candidate roots, without allocating.
#[derive(Debug, Clone, Copy)]
struct Candidates {
    roots: [Complex; 3],
    len: usize,
}

impl Candidates {
    const NONE: Self = Self {
        roots: [Complex::ZERO; 3],
        len: 0,
    };

    fn one(root: f64) -> Self {
        Self {
            roots: [Complex::real(root), Complex::ZERO, Complex::ZERO],
            len: 1,
        }
    }

    fn two(first: f64, second: f64) -> Self {
        Self {
            roots: [Complex::real(first), Complex::real(second), Complex::ZERO],
            len: 2,
        }
    }

    fn iter(&self) -> impl Iterator<Item = &Complex> {
        self.roots.iter().take(self.len)
    }
}

impl XCubic {
    fn normalized(x: f64, start: Point, cp1: Point, cp2: Point, end: Point) -> Option<Self> {
        let span = end.x - start.x;
        if !(span.is_finite() && span > 0.0) {
            return None;
        }
        let p1 = (cp1.x - start.x) / span;
        let p2 = (cp2.x - start.x) / span;
        let target = (x - start.x) / span;

        // Start at 0 and end at 1 in normalized coordinates.
        Some(Self {
            a: 3.0 * p1 - 3.0 * p2 + 1.0,
            b: -6.0 * p1 + 3.0 * p2,
            c: 3.0 * p1,
            d: -target,
        })
    }

    #[inline]
    fn value(&self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t + self.d
    }

    #[inline]
    fn slope(&self, t: f64) -> f64 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }

    fn solve(&self) -> Option<f64> {
        let candidates = if self.a.abs() < NEGLIGIBLE_COEFFICIENT {
            self.reduced_roots()
        } else {
            self.cardano_roots()
        };
        match select_root(&candidates).map(|t| self.polish(t)) {
            Some(t) if self.value(t).abs() <= RESIDUAL_TOLERANCE => Some(t),
            closed_form => self.bisect().or(closed_form),
        }
    }

    /// Bisection on `[0,1]` for an increasing `x(t)` that brackets the target.
    fn bisect(&self) -> Option<f64> {
        let at_start = self.value(0.0);
        let at_end = self.value(1.0);
        if !(at_start <= PARAMETER_SLACK && at_end >= -PARAMETER_SLACK) {
            return None;
        }

        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        for _ in 0..BISECTION_STEPS {
            let mid = 0.5 * (lo + hi);
            if mid <= lo || mid >= hi {
                break;
            }
            if self.value(mid) < 0.0 {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Some(self.polish(0.5 * (lo + hi)))
    }

    /// The three roots from one radical:
    /// `root(i) = -1/(3a) · (b + ξⁱC + m/(ξⁱC))`.
    fn cardano_roots(&self) -> Candidates {
        let Self { a, b, c, d } = *self;

        let m = b * b - 3.0 * a * c;
        let n = 2.0 * b * b * b - 9.0 * a * b * c + 27.0 * a * a * d;
        let discriminant = n * n - 4.0 * m * m * m;

        // Either radical yields the same roots; a real one takes the sign of
        // `n` so the sum cannot cancel.
        let radical = if discriminant >= 0.0 {
            Complex::real(0.5 * (n + discriminant.sqrt().copysign(n))).cbrt()
        } else {
            (Complex::new(n, (-discriminant).sqrt()) / 2.0).cbrt()
        };
        if radical.abs() < VANISHING_RADICAL {
            // Triple root.
            return Candidates::one(-b / (3.0 * a));
        }

        let scale = -1.0 / (3.0 * a);
        let mut roots = [Complex::ZERO; 3];
        for (power, root) in (0u32..).zip(roots.iter_mut()) {
            let rotated = Complex::XI.powi(power) * radical;
            *root = (Complex::real(b) + rotated + Complex::real(m) / rotated) * scale;
        }
        Candidates { roots, len: 3 }
    }

    /// Roots of `b·t² + c·t + d`, or of `c·t + d` when `b` is negligible too.
    fn reduced_roots(&self) -> Candidates {
        let Self { b, c, d, .. } = *self;

        if b.abs() < NEGLIGIBLE_COEFFICIENT {
            if c.abs() < MIN_SLOPE {
                return Candidates::NONE;
            }
            return Candidates::one(-d / c);
        }

        let mut discriminant = c * c - 4.0 * b * d;
        if discriminant < 0.0 {
            // Dropping the cubic term can push a double root just below zero.
            if discriminant > -NEGLIGIBLE_COEFFICIENT {
                discriminant = 0.0;
            } else {
                return Candidates::NONE;
            }
        }

        let q = -0.5 * (c + discriminant.sqrt().copysign(c));
        if q.abs() < f64::MIN_POSITIVE {
            return Candidates::one(-c / (2.0 * b));
        }
        Candidates::two(q / b, d / q)
    }

    /// Newton–Raphson refinement on the full cubic, kept only while it helps.
    fn polish(&self, mut t: f64) -> f64 {
        for _ in 0..NEWTON_STEPS {
            let residual = self.value(t);
            let slope = self.slope(t);
            if slope.abs() < MIN_SLOPE {
                break;
            }
            let next = (t - residual / slope).clamp(0.0, 1.0);
            if self.value(next).abs() > residual.abs() {
                break;
            }
            t = next;
        }
        t
    }
}

/// First candidate in `[0,1]` that is real within [`IMAGINARY_TOLERANCE`];
/// failing that, the in-range candidate closest to real within the loose bound.
fn select_root(candidates: &Candidates) -> Option<f64> {
    let in_range = |root: &&Complex| (-PARAMETER_SLACK..=1.0 + PARAMETER_SLACK).contains(&root.re);

    candidates
        .iter()
        .filter(in_range)
        .find(|root| root.im.abs() < IMAGINARY_TOLERANCE)
        .or_else(|| {
            candidates
                .iter()
                .filter(in_range)
                .filter(|root| root.im.abs() < LOOSE_IMAGINARY_TOLERANCE)
                .min_by(|lhs, rhs| lhs.im.abs().total_cmp(&rhs.im.abs()))
        })
        .map(|root| root.re.clamp(0.0, 1.0))
}
