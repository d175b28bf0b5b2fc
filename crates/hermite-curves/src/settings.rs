//! Host-facing curve configuration.
//!
//! [`CurveSettings`] is plain serde data so a host can embed curves in its
//! own configuration files; this crate does not define a file format.

use serde::{Deserialize, Serialize};

use crate::curve::prepare_keyframes;
use crate::error::Result;
use crate::keyframe::KeyFrame;
use crate::wrap::WrapMode;

/// What to do when two keyframes share the same `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeyPolicy {
    /// Fail with [`CurveError::DuplicateKey`](crate::CurveError::DuplicateKey).
    #[default]
    Reject,
    /// Keep all keys in input order. At a shared interior `x` the later key
    /// wins; at the first or last `x` the outermost key wins.
    StableOrder,
}

/// Complete description of a curve.
///
/// Every field has a default, so partial documents deserialize.
///
/// # Example
///
/// ```
/// use hermite_curves::{Curve, CurveSettings, WrapMode};
///
/// let settings: CurveSettings = serde_json::from_str(r#"{
///     "post_wrap": "loop",
///     "keyframes": [
///         { "x": 0.0, "y": 0.0 },
///         { "x": 1.0, "y": 1.0 }
///     ]
/// }"#)?;
/// assert_eq!(settings.pre_wrap, WrapMode::Clamp);
///
/// let curve = Curve::from_settings(&settings)?;
/// assert_eq!(curve.len(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveSettings {
    /// Policy for queries before the first key.
    pub pre_wrap: WrapMode,
    /// Policy for queries after the last key.
    pub post_wrap: WrapMode,
    /// Tie-break for equal-x keys.
    pub duplicate_keys: DuplicateKeyPolicy,
    /// Keys in any order.
    pub keyframes: Vec<KeyFrame>,
}

impl CurveSettings {
    /// Settings with the given keys and default policies.
    pub fn with_keyframes(keyframes: impl IntoIterator<Item = KeyFrame>) -> Self {
        Self {
            keyframes: keyframes.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Check that the settings describe a valid curve.
    ///
    /// # Errors
    ///
    /// Returns the first invalid keyframe, or a duplicate `x` under
    /// [`DuplicateKeyPolicy::Reject`].
    pub fn validate(&self) -> Result<()> {
        prepare_keyframes(self.keyframes.iter().copied(), self.duplicate_keys).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CurveError;

    #[test]
    fn test_settings_defaults() {
        let settings = CurveSettings::default();
        assert_eq!(settings.pre_wrap, WrapMode::Clamp);
        assert_eq!(settings.post_wrap, WrapMode::Clamp);
        assert_eq!(settings.duplicate_keys, DuplicateKeyPolicy::Reject);
        assert!(settings.keyframes.is_empty());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_partial_json() {
        let settings: CurveSettings =
            serde_json::from_str(r#"{"pre_wrap": "ping_pong", "duplicate_keys": "stable_order"}"#)
                .expect("parse");
        assert_eq!(settings.pre_wrap, WrapMode::PingPong);
        assert_eq!(settings.post_wrap, WrapMode::Clamp);
        assert_eq!(settings.duplicate_keys, DuplicateKeyPolicy::StableOrder);
    }

    #[test]
    fn test_settings_json_round_trip() {
        let mut settings = CurveSettings::with_keyframes([
            KeyFrame::new(0.0, 1.0).with_tangents(0.0, 2.0),
            KeyFrame::new(2.0, -1.0).with_in_weight(0.4),
        ]);
        settings.post_wrap = WrapMode::Loop;

        let json = serde_json::to_string(&settings).expect("serialize");
        let back: CurveSettings = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, settings);
    }

    #[test]
    fn test_settings_validate_duplicates() {
        let mut settings =
            CurveSettings::with_keyframes([KeyFrame::new(1.0, 0.0), KeyFrame::new(1.0, 5.0)]);
        assert_eq!(settings.validate(), Err(CurveError::DuplicateKey { x: 1.0 }));

        settings.duplicate_keys = DuplicateKeyPolicy::StableOrder;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_validate_bad_key() {
        let settings = CurveSettings::with_keyframes([
            KeyFrame::new(0.0, 0.0),
            KeyFrame::new(1.0, 0.0).with_out_weight(2.0),
        ]);
        assert!(matches!(
            settings.validate(),
            Err(CurveError::WeightOutOfRange { index: 1, .. })
        ));
    }

    #[test]
    fn test_settings_rejects_unknown_wrap_mode() {
        let result: std::result::Result<CurveSettings, _> =
            serde_json::from_str(r#"{"post_wrap": "mirror"}"#);
        assert!(result.is_err());
    }
}
