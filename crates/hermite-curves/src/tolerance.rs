//! Tolerant floating-point comparison.
//!
//! Segment boundaries are located with a relative epsilon test so that keys
//! hit by a query resolve the same way regardless of rounding in the caller.

/// Machine epsilon for `f64`, `2.22044604925031e-16`.
pub const DBL_EPSILON: f64 = f64::EPSILON;

/// Returns `true` if `a` and `b` are equal within a relative epsilon.
///
/// Two values are close when `|a - b| < (|a| + |b| + 10) * DBL_EPSILON`.
/// Infinities are close only to the same infinity; NaN is never close.
///
/// # Example
///
/// ```
/// use hermite_curves::tolerance::are_close;
///
/// assert!(are_close(0.1 + 0.2, 0.3));
/// assert!(!are_close(1.0, 1.0 + 1e-9));
/// ```
#[inline]
pub fn are_close(a: f64, b: f64) -> bool {
    if a.is_infinite() || b.is_infinite() {
        return a.is_infinite() && b.is_infinite() && a.is_sign_positive() == b.is_sign_positive();
    }
    let eps = (a.abs() + b.abs() + 10.0) * DBL_EPSILON;
    (a - b).abs() < eps
}

/// `a < b` or `a` is close to `b`.
#[inline]
pub fn less_or_close(a: f64, b: f64) -> bool {
    a < b || are_close(a, b)
}

/// `a > b` or `a` is close to `b`.
#[inline]
pub fn greater_or_close(a: f64, b: f64) -> bool {
    a > b || are_close(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_are_close_exact() {
        assert!(are_close(0.0, 0.0));
        assert!(are_close(0.0, -0.0));
        assert!(are_close(123.456, 123.456));
    }

    #[test]
    fn test_are_close_rounding() {
        assert!(are_close(0.1 + 0.2, 0.3));
        assert!(are_close(1e6 + 1e-10, 1e6));
    }

    #[test]
    fn test_are_close_rejects_real_difference() {
        assert!(!are_close(1.0, 1.000_001));
        assert!(!are_close(0.0, 1e-12));
    }

    #[test]
    fn test_are_close_infinities() {
        assert!(are_close(f64::INFINITY, f64::INFINITY));
        assert!(are_close(f64::NEG_INFINITY, f64::NEG_INFINITY));
        assert!(!are_close(f64::INFINITY, f64::NEG_INFINITY));
        assert!(!are_close(f64::INFINITY, 1e308));
    }

    #[test]
    fn test_are_close_nan() {
        assert!(!are_close(f64::NAN, f64::NAN));
        assert!(!are_close(f64::NAN, 0.0));
    }

    #[test]
    fn test_ordered_comparisons() {
        assert!(less_or_close(1.0, 2.0));
        assert!(less_or_close(0.1 + 0.2, 0.3));
        assert!(!less_or_close(2.0, 1.0));
        assert!(greater_or_close(2.0, 1.0));
        assert!(greater_or_close(0.3, 0.1 + 0.2));
        assert!(!greater_or_close(1.0, 2.0));
        assert!(!less_or_close(f64::NAN, 1.0));
        assert!(!greater_or_close(f64::NAN, 1.0));
    }
}
