//! Complex arithmetic for phasors.
//!
//! The value type is [`num_complex::Complex64`]. Addition, subtraction,
//! multiplication, conjugation, magnitude (`norm`, hypot semantics) and polar
//! construction come straight from it. Division is the one operation that
//! needs a guard: [`ComplexExt::checked_div`] refuses near-zero divisors so
//! no `NaN`/`Infinity` ever leaks into a solution.

pub use num_complex::Complex64 as Complex;

/// Squared-magnitude threshold below which a divisor counts as zero.
pub const DIVISION_EPSILON: f64 = 1e-12;

/// The additive identity.
pub const ZERO: Complex = Complex::new(0.0, 0.0);

/// The multiplicative identity.
pub const ONE: Complex = Complex::new(1.0, 0.0);

/// Extra operations on [`Complex`] used by the solver.
pub trait ComplexExt: Sized {
    /// Divide, returning `None` when `|rhs|²` is below [`DIVISION_EPSILON`].
    fn checked_div(self, rhs: Self) -> Option<Self>;

    /// Squared magnitude `re² + im²`.
    fn mag_sq(self) -> f64;

    /// Build from a magnitude and an angle in degrees.
    fn from_polar_degrees(magnitude: f64, degrees: f64) -> Self;

    /// Argument in degrees, in `(-180, 180]`.
    fn phase_degrees(self) -> f64;

    /// Both parts are finite.
    fn is_finite_value(self) -> bool;
}

impl ComplexExt for Complex {
    fn checked_div(self, rhs: Self) -> Option<Self> {
        let denom = rhs.norm_sqr();
        if denom < DIVISION_EPSILON || !denom.is_finite() {
            return None;
        }
        // a * conj(b) / |b|^2
        let num = self * rhs.conj();
        let q = Complex::new(num.re / denom, num.im / denom);
        q.is_finite_value().then_some(q)
    }

    fn mag_sq(self) -> f64 {
        self.norm_sqr()
    }

    fn from_polar_degrees(magnitude: f64, degrees: f64) -> Self {
        Complex::from_polar(magnitude, degrees.to_radians())
    }

    fn phase_degrees(self) -> f64 {
        self.arg().to_degrees()
    }

    fn is_finite_value(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_basic_ops() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, -1.0);
        assert_eq!(a + b, Complex::new(4.0, 1.0));
        assert_eq!(a - b, Complex::new(-2.0, 3.0));
        // (1+2j)(3-j) = 3 - j + 6j - 2j^2 = 5 + 5j
        assert_eq!(a * b, Complex::new(5.0, 5.0));
        assert_eq!(a.conj(), Complex::new(1.0, -2.0));
    }

    #[test]
    fn test_checked_div() {
        let a = Complex::new(5.0, 5.0);
        let b = Complex::new(3.0, -1.0);
        let q = a.checked_div(b).unwrap();
        assert_abs_diff_eq!(q.re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(q.im, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_checked_div_rejects_zero() {
        assert!(ONE.checked_div(ZERO).is_none());
        assert!(ONE.checked_div(Complex::new(1e-7, 0.0)).is_none());
        assert!(ONE.checked_div(Complex::new(f64::NAN, 0.0)).is_none());
    }

    #[test]
    fn test_magnitude_uses_hypot() {
        let big = Complex::new(1e200, 1e200);
        assert!(big.norm().is_finite());
        assert_abs_diff_eq!(Complex::new(3.0, 4.0).norm(), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(Complex::new(3.0, 4.0).mag_sq(), 25.0, epsilon = 1e-12);
    }

    #[test]
    fn test_polar() {
        let p = Complex::from_polar_degrees(2.0, 90.0);
        assert_abs_diff_eq!(p.re, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.im, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.phase_degrees(), 90.0, epsilon = 1e-9);

        let q = Complex::from_polar(1.0, std::f64::consts::PI);
        assert_abs_diff_eq!(q.re, -1.0, epsilon = 1e-12);
    }
}
