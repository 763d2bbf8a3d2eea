//! Tolerance-aware helpers over [`Complex64`].
//!
//! Equality between complex values is never exact anywhere in RCF: every
//! comparison goes through one of the helpers below with an explicit
//! tolerance.

pub use num_complex::Complex64;

/// The additive identity.
pub const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// The multiplicative identity.
pub const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Returns whether both components of `value` lie strictly below `tol` in magnitude.
pub fn is_near_zero(value: Complex64, tol: f64) -> bool {
    value.re.abs() < tol && value.im.abs() < tol
}

/// Returns whether the complex distance between `value` and `target` is below `tol`.
pub fn is_near(value: Complex64, target: Complex64, tol: f64) -> bool {
    (value - target).norm() < tol
}

/// Returns whether `lhs` and `rhs` agree within `tol` (complex distance).
pub fn approx_eq(lhs: Complex64, rhs: Complex64, tol: f64) -> bool {
    is_near(lhs, rhs, tol)
}

/// Returns whether both components are finite.
pub fn is_finite(value: Complex64) -> bool {
    value.re.is_finite() && value.im.is_finite()
}

/// Builds a complex value from an `[re, im]` pair.
pub fn from_pair(pair: [f64; 2]) -> Complex64 {
    Complex64::new(pair[0], pair[1])
}

/// Splits a complex value into an `[re, im]` pair.
pub fn to_pair(value: Complex64) -> [f64; 2] {
    [value.re, value.im]
}

/// Raises `base` to a non-negative integer power by repeated squaring.
pub fn pow_index(base: Complex64, exponent: u64) -> Complex64 {
    let mut result = ONE;
    let mut square = base;
    let mut remaining = exponent;
    while remaining > 0 {
        if remaining & 1 == 1 {
            result *= square;
        }
        remaining >>= 1;
        if remaining > 0 {
            square *= square;
        }
    }
    result
}
