//! Keyframed curve evaluator.

use std::cell::OnceCell;

use tracing::{debug, trace, warn};

use crate::error::{CurveError, Result};
use crate::hermite::Segment;
use crate::keyframe::KeyFrame;
use crate::lut::CurveLut;
use crate::point::Point;
use crate::settings::{CurveSettings, DuplicateKeyPolicy};
use crate::tolerance::{are_close, greater_or_close, less_or_close};
use crate::wrap::{WrapMode, WrapTarget, wrap_left, wrap_right};

/// Nested wrap evaluations allowed before holding the boundary value.
const MAX_WRAP_DEPTH: u32 = 4;

/// A one-dimensional curve through a sorted set of keyframes.
///
/// Adjacent keys are joined by cubic Bezier segments built from their
/// tangents and weights. Control points are computed lazily on the first
/// evaluation after the keys change, so evaluation takes `&self`. The cache
/// makes `Curve` `Send` but not `Sync`; clone it to evaluate from several
/// threads.
///
/// # Example
///
/// ```
/// use hermite_curves::{Curve, KeyFrame, WrapMode};
///
/// let mut curve = Curve::from_keyframes([
///     KeyFrame::new(0.0, 0.0).with_tangents(0.0, 1.0),
///     KeyFrame::new(1.0, 1.0).with_tangents(1.0, 0.0),
/// ])?;
///
/// assert!((curve.evaluate(0.5) - 0.5).abs() < 1e-9);
/// assert_eq!(curve.evaluate(3.0), 1.0);
///
/// curve.set_post_wrap(WrapMode::Loop);
/// assert!((curve.evaluate(1.25) - 0.25).abs() < 1e-9);
/// # Ok::<(), hermite_curves::CurveError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Curve {
    keys: Vec<KeyFrame>,
    /// Empty while the keys have changed since the last evaluation.
    segments: OnceCell<Vec<Segment>>,
    pre_wrap: WrapMode,
    post_wrap: WrapMode,
    duplicate_keys: DuplicateKeyPolicy,
}

impl Curve {
    /// Create an empty curve. It evaluates to `0.0` everywhere.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a curve from keyframes in any order.
    ///
    /// # Errors
    ///
    /// Returns the first invalid keyframe or a duplicate `x`.
    pub fn from_keyframes(keyframes: impl IntoIterator<Item = KeyFrame>) -> Result<Self> {
        let mut curve = Self::new();
        curve.set_keyframes(keyframes)?;
        Ok(curve)
    }

    /// Create a curve from host configuration.
    ///
    /// # Errors
    ///
    /// See [`CurveSettings::validate`].
    pub fn from_settings(settings: &CurveSettings) -> Result<Self> {
        let keys = prepare_keyframes(settings.keyframes.iter().copied(), settings.duplicate_keys)?;
        debug!(
            keyframes = keys.len(),
            pre_wrap = %settings.pre_wrap,
            post_wrap = %settings.post_wrap,
            "Curve created from settings"
        );
        Ok(Self {
            keys,
            segments: OnceCell::new(),
            pre_wrap: settings.pre_wrap,
            post_wrap: settings.post_wrap,
            duplicate_keys: settings.duplicate_keys,
        })
    }

    /// Current configuration of the curve.
    pub fn settings(&self) -> CurveSettings {
        CurveSettings {
            pre_wrap: self.pre_wrap,
            post_wrap: self.post_wrap,
            duplicate_keys: self.duplicate_keys,
            keyframes: self.keys.clone(),
        }
    }

    /// Straight line from `(x0, y0)` to `(x1, y1)`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DuplicateKey`] if `x0` and `x1` coincide, or a
    /// validation error for non-finite input.
    pub fn linear(x0: f64, y0: f64, x1: f64, y1: f64) -> Result<Self> {
        if are_close(x0, x1) {
            return Err(CurveError::DuplicateKey { x: x1 });
        }
        let slope = (y1 - y0) / (x1 - x0);
        Self::from_keyframes([
            KeyFrame::new(x0, y0).with_tangents(slope, slope),
            KeyFrame::new(x1, y1).with_tangents(slope, slope),
        ])
    }

    /// Constant `y` over `[x0, x1]`.
    ///
    /// # Errors
    ///
    /// Same as [`Curve::linear`].
    pub fn constant(x0: f64, x1: f64, y: f64) -> Result<Self> {
        Self::linear(x0, y, x1, y)
    }

    /// Smooth transition from `(x0, y0)` to `(x1, y1)` with flat ends.
    ///
    /// # Errors
    ///
    /// Same as [`Curve::linear`].
    pub fn ease_in_out(x0: f64, y0: f64, x1: f64, y1: f64) -> Result<Self> {
        if are_close(x0, x1) {
            return Err(CurveError::DuplicateKey { x: x1 });
        }
        Self::from_keyframes([KeyFrame::new(x0, y0), KeyFrame::new(x1, y1)])
    }

    /// Replace every keyframe.
    ///
    /// Keys are validated, then stably sorted by `x`. On error the curve is
    /// left unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first invalid keyframe (indexed by input position), or
    /// [`CurveError::DuplicateKey`] under [`DuplicateKeyPolicy::Reject`].
    pub fn set_keyframes(&mut self, keyframes: impl IntoIterator<Item = KeyFrame>) -> Result<()> {
        self.keys = prepare_keyframes(keyframes, self.duplicate_keys)?;
        self.segments = OnceCell::new();
        debug!(keyframes = self.keys.len(), "Keyframes replaced");
        Ok(())
    }

    /// Keyframes sorted by `x`.
    #[inline]
    pub fn keyframes(&self) -> &[KeyFrame] {
        &self.keys
    }

    /// Number of keyframes.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the curve has no keyframes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// `(first.x, last.x)`, or `None` for an empty curve.
    pub fn range(&self) -> Option<(f64, f64)> {
        Some((self.keys.first()?.x, self.keys.last()?.x))
    }

    /// Policy left of the first key.
    pub fn pre_wrap(&self) -> WrapMode {
        self.pre_wrap
    }

    /// Set the policy left of the first key.
    pub fn set_pre_wrap(&mut self, mode: WrapMode) {
        self.pre_wrap = mode;
    }

    /// Policy right of the last key.
    pub fn post_wrap(&self) -> WrapMode {
        self.post_wrap
    }

    /// Set the policy right of the last key.
    pub fn set_post_wrap(&mut self, mode: WrapMode) {
        self.post_wrap = mode;
    }

    /// Policy applied by the next [`Curve::set_keyframes`].
    pub fn duplicate_key_policy(&self) -> DuplicateKeyPolicy {
        self.duplicate_keys
    }

    /// Change the duplicate policy. Existing keys are not re-checked.
    pub fn set_duplicate_key_policy(&mut self, policy: DuplicateKeyPolicy) {
        self.duplicate_keys = policy;
    }

    /// Whether control points need recomputing before the next evaluation.
    pub fn is_dirty(&self) -> bool {
        self.segments.get().is_none()
    }

    /// All segments, computing control points if the keys changed.
    pub fn segments(&self) -> &[Segment] {
        self.segments.get_or_init(|| {
            trace!(keyframes = self.keys.len(), "Recomputing control points");
            self.keys
                .iter()
                .zip(self.keys.iter().skip(1))
                .map(|(start, end)| Segment::from_keys(start, end))
                .collect()
        })
    }

    /// Segment between key `index` and key `index + 1`.
    pub fn segment(&self, index: usize) -> Option<Segment> {
        self.segments().get(index).copied()
    }

    /// Incoming control point of key `index`. The first key has none.
    pub fn left_control_point(&self, index: usize) -> Option<Point> {
        let previous = index.checked_sub(1)?;
        self.segment(previous).map(|segment| segment.cp2)
    }

    /// Outgoing control point of key `index`. The last key has none.
    pub fn right_control_point(&self, index: usize) -> Option<Point> {
        self.segment(index).map(|segment| segment.cp1)
    }

    /// Evaluate the curve at `x` with its own wrap modes.
    ///
    /// * empty curve: `0.0`
    /// * single key: that key's `y`
    /// * `NaN`: `NaN`
    ///
    /// # Panics
    ///
    /// Panics if no segment contains an in-range `x`, which the sorted-key
    /// invariant rules out.
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.evaluate_with(x, self.pre_wrap, self.post_wrap)
    }

    /// Evaluate the curve at `x` with explicit wrap modes.
    ///
    /// # Panics
    ///
    /// See [`Curve::evaluate`].
    pub fn evaluate_with(&self, x: f64, pre_wrap: WrapMode, post_wrap: WrapMode) -> f64 {
        self.evaluate_at_depth(x, pre_wrap, post_wrap, 0)
    }

    /// Bake the curve over its key range into a lookup table.
    ///
    /// An empty curve bakes to a zero table over `[0, 0]`.
    pub fn to_lut(&self) -> CurveLut {
        match self.range() {
            Some((start, end)) => CurveLut::from_fn(start, end, |x| self.evaluate(x)),
            None => CurveLut::default(),
        }
    }

    fn evaluate_at_depth(
        &self,
        x: f64,
        pre_wrap: WrapMode,
        post_wrap: WrapMode,
        depth: u32,
    ) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        let (first, last) = match self.keys.as_slice() {
            [] => return 0.0,
            [only] => return only.y,
            [first, .., last] => (first, last),
        };

        if less_or_close(x, first.x) {
            if are_close(x, first.x) {
                return first.y;
            }
            let target = wrap_left(x, first.x, last.x, pre_wrap);
            return self.follow_wrap(x, target, first.y, pre_wrap, post_wrap, depth);
        }
        if greater_or_close(x, last.x) {
            if are_close(x, last.x) {
                return last.y;
            }
            let target = wrap_right(x, first.x, last.x, post_wrap);
            return self.follow_wrap(x, target, last.y, pre_wrap, post_wrap, depth);
        }

        self.evaluate_inside(x)
    }

    fn follow_wrap(
        &self,
        x: f64,
        target: WrapTarget,
        boundary: f64,
        pre_wrap: WrapMode,
        post_wrap: WrapMode,
        depth: u32,
    ) -> f64 {
        match target {
            WrapTarget::Boundary => boundary,
            WrapTarget::Evaluate(inner) if depth < MAX_WRAP_DEPTH => {
                self.evaluate_at_depth(inner, pre_wrap, post_wrap, depth.saturating_add(1))
            }
            WrapTarget::Evaluate(inner) => {
                warn!(
                    x = x,
                    wrapped = inner,
                    depth = depth,
                    "Wrapped query did not land inside the curve; holding boundary value"
                );
                boundary
            }
        }
    }

    /// `x` lies strictly between the first and last keys.
    fn evaluate_inside(&self, x: f64) -> f64 {
        let pairs = self.keys.iter().zip(self.keys.iter().skip(1));
        for ((start, end), segment) in pairs.zip(self.segments()) {
            if greater_or_close(x, end.x) {
                continue;
            }
            if let Some(held) = hold_value(start, end) {
                return held;
            }
            if are_close(x, start.x) {
                return start.y;
            }
            return segment.evaluate(x);
        }
        scan_exhausted(x)
    }
}

/// Step value of a segment with an infinite tangent.
///
/// The end key's incoming tangent wins over the start key's outgoing one.
/// `+∞` holds the start value, `-∞` jumps to the end value.
fn hold_value(start: &KeyFrame, end: &KeyFrame) -> Option<f64> {
    [end.in_tangent, start.out_tangent]
        .into_iter()
        .find(|tangent| tangent.is_infinite())
        .map(|tangent| if tangent > 0.0 { start.y } else { end.y })
}

#[cold]
#[expect(
    clippy::panic,
    reason = "sorted keys guarantee an enclosing segment for in-range x"
)]
fn scan_exhausted(x: f64) -> ! {
    panic!("no curve segment contains x = {x}")
}

/// Validate, sort and de-duplicate a keyframe sequence.
pub(crate) fn prepare_keyframes(
    keyframes: impl IntoIterator<Item = KeyFrame>,
    policy: DuplicateKeyPolicy,
) -> Result<Vec<KeyFrame>> {
    let mut keys: Vec<KeyFrame> = keyframes.into_iter().collect();
    for (index, key) in keys.iter().enumerate() {
        key.validate(index)?;
    }
    keys.sort_by(|lhs, rhs| lhs.x.total_cmp(&rhs.x));

    if policy == DuplicateKeyPolicy::Reject
        && let Some((_, duplicate)) = keys
            .iter()
            .zip(keys.iter().skip(1))
            .find(|(lhs, rhs)| are_close(lhs.x, rhs.x))
    {
        return Err(CurveError::DuplicateKey { x: duplicate.x });
    }
    Ok(keys)
}
