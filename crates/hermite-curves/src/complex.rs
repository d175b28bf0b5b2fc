//! Minimal complex arithmetic for the cubic root solve.
//!
//! Only the operations the Cardano solution needs are provided. The type is
//! crate-private: nothing in the public API exposes complex values.

use core::ops::{Add, Div, Mul, Neg, Sub};

/// Complex number in rectangular form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Complex {
    pub(crate) re: f64,
    pub(crate) im: f64,
}

impl Complex {
    pub(crate) const ZERO: Self = Self::new(0.0, 0.0);
    pub(crate) const ONE: Self = Self::new(1.0, 0.0);

    /// Primitive cube root of unity, `(-1 + i√3) / 2`.
    pub(crate) const XI: Self = Self::new(-0.5, 0.866_025_403_784_438_6);

    #[inline]
    pub(crate) const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    #[inline]
    pub(crate) const fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    #[inline]
    pub(crate) fn abs(self) -> f64 {
        self.re.hypot(self.im)
    }

    #[inline]
    pub(crate) fn arg(self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Principal cube root: modulus `r^(1/3)`, argument `θ/3` with `θ ∈ (-π, π]`.
    pub(crate) fn cbrt(self) -> Self {
        let r = self.abs();
        if r == 0.0 {
            return Self::ZERO;
        }
        let modulus = r.cbrt();
        let theta = self.arg() / 3.0;
        Self::new(modulus * theta.cos(), modulus * theta.sin())
    }

    /// Integer power by repeated multiplication.
    pub(crate) fn powi(self, n: u32) -> Self {
        (0..n).fold(Self::ONE, |acc, _| acc * self)
    }
}

impl Add for Complex {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Mul<f64> for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.re * rhs, self.im * rhs)
    }
}

impl Div for Complex {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        let denom = rhs.re * rhs.re + rhs.im * rhs.im;
        Self::new(
            (self.re * rhs.re + self.im * rhs.im) / denom,
            (self.im * rhs.re - self.re * rhs.im) / denom,
        )
    }
}

impl Div<f64> for Complex {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::new(self.re / rhs, self.im / rhs)
    }
}

impl Neg for Complex {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_close(actual: Complex, expected: Complex) {
        assert_abs_diff_eq!(actual.re, expected.re, epsilon = 1e-12);
        assert_abs_diff_eq!(actual.im, expected.im, epsilon = 1e-12);
    }

    #[test]
    fn test_xi_is_cube_root_of_unity() {
        assert_close(Complex::XI.powi(3), Complex::ONE);
        assert_close(Complex::XI * Complex::XI, Complex::new(-0.5, -0.866_025_403_784_438_6));
        let sum = Complex::ONE + Complex::XI + Complex::XI.powi(2);
        assert_close(sum, Complex::ZERO);
    }

    #[test]
    fn test_arithmetic() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, -1.0);
        assert_close(a + b, Complex::new(4.0, 1.0));
        assert_close(a - b, Complex::new(-2.0, 3.0));
        assert_close(a * b, Complex::new(5.0, 5.0));
        assert_close((a * b) / b, a);
        assert_close(-a, Complex::new(-1.0, -2.0));
        assert_close(a * 2.0, Complex::new(2.0, 4.0));
        assert_close(a / 2.0, Complex::new(0.5, 1.0));
    }

    #[test]
    fn test_cbrt_cubes_back() {
        for z in [
            Complex::real(27.0),
            Complex::real(-8.0),
            Complex::new(1.0, 1.0),
            Complex::new(-2.0, -5.0),
        ] {
            assert_close(z.cbrt().powi(3), z);
        }
    }

    #[test]
    fn test_cbrt_principal_branch() {
        // Principal root of -8 is 1 + i√3, not -2.
        assert_close(Complex::real(-8.0).cbrt(), Complex::new(1.0, 1.732_050_807_568_877_2));
        assert_close(Complex::real(8.0).cbrt(), Complex::real(2.0));
        assert_close(Complex::ZERO.cbrt(), Complex::ZERO);
    }
}
