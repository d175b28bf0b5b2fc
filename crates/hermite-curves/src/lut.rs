//! Baked lookup table for allocation-free curve evaluation.

use serde::{Deserialize, Serialize};

/// Uniformly sampled copy of a curve over a fixed domain.
///
/// `lookup` is O(1), never allocates and never solves a cubic, so a curve can
/// be baked once and sampled from a hot loop. Outside the domain the nearest
/// end sample is returned; wrap modes are not baked in.
///
/// # Example
///
/// ```
/// use hermite_curves::Curve;
///
/// let curve = Curve::ease_in_out(0.0, 0.0, 10.0, 1.0)?;
/// let lut = curve.to_lut();
///
/// assert_eq!(lut.domain(), (0.0, 10.0));
/// assert!((lut.lookup(5.0) - curve.evaluate(5.0)).abs() < 1e-3);
/// assert!(lut.is_monotonic());
/// # Ok::<(), hermite_curves::CurveError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CurveLut {
    start: f64,
    end: f64,
    table: [f64; CurveLut::SIZE],
}

impl CurveLut {
    /// Number of samples.
    pub const SIZE: usize = 256;

    const LAST_INDEX: f64 = 255.0;

    /// Sample `f` at [`CurveLut::SIZE`] evenly spaced points of `[start, end]`.
    ///
    /// An empty or inverted domain samples `f(start)` everywhere.
    pub fn from_fn<F>(start: f64, end: f64, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        let span = if end > start { end - start } else { 0.0 };
        let mut table = [0.0; Self::SIZE];
        for (i, entry) in (0u32..).zip(table.iter_mut()) {
            let fraction = f64::from(i) / Self::LAST_INDEX;
            *entry = f(start + span * fraction);
        }
        Self { start, end, table }
    }

    /// Interpolated value at `x`, clamped to the domain.
    ///
    /// `NaN` yields `NaN`.
    #[inline]
    pub fn lookup(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        let span = self.end - self.start;
        if !span.is_finite() || span <= 0.0 {
            return self.table.first().copied().unwrap_or_default();
        }

        let scaled = ((x - self.start) / span).clamp(0.0, 1.0) * Self::LAST_INDEX;
        let low = scaled.floor().min(Self::LAST_INDEX - 1.0);
        let fraction = scaled - low;
        #[expect(
            clippy::cast_sign_loss,
            clippy::cast_possible_truncation,
            reason = "low is a whole number in [0, 254]"
        )]
        let index = low as usize;

        match (self.table.get(index), self.table.get(index + 1)) {
            (Some(&low_value), Some(&high_value)) => {
                low_value + fraction * (high_value - low_value)
            }
            _ => f64::NAN,
        }
    }

    /// `(start, end)` of the sampled domain.
    pub fn domain(&self) -> (f64, f64) {
        (self.start, self.end)
    }

    /// Raw samples.
    pub fn table(&self) -> &[f64; Self::SIZE] {
        &self.table
    }

    /// Whether samples never decrease.
    pub fn is_monotonic(&self) -> bool {
        self.table
            .iter()
            .zip(self.table.iter().skip(1))
            .all(|(previous, next)| next >= previous)
    }

    /// Smallest sample.
    pub fn min_value(&self) -> f64 {
        self.table.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest sample.
    pub fn max_value(&self) -> f64 {
        self.table.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

impl Default for CurveLut {
    /// Zero table over `[0, 0]`.
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 0.0,
            table: [0.0; Self::SIZE],
        }
    }
}

#[derive(Serialize, Deserialize)]
struct LutRepr {
    start: f64,
    end: f64,
    table: Vec<f64>,
}

impl Serialize for CurveLut {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        LutRepr {
            start: self.start,
            end: self.end,
            table: self.table.to_vec(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CurveLut {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = LutRepr::deserialize(deserializer)?;
        let table: [f64; Self::SIZE] = repr.table.try_into().map_err(|rejected: Vec<f64>| {
            serde::de::Error::custom(format!(
                "Expected {} entries in CurveLut, got {}",
                Self::SIZE,
                rejected.len()
            ))
        })?;
        Ok(CurveLut {
            start: repr.start,
            end: repr.end,
            table,
        })
    }
}
