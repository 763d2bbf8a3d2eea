use serde::{Deserialize, Serialize};

use crate::complex::{self, Complex64, ZERO};
use crate::errors::{ErrorInfo, RcfError};

/// Polynomial with complex coefficients stored in ascending powers.
///
/// Index `i` of [`Polynomial::coeffs`] is the coefficient of `n^i`. The
/// empty polynomial is not representable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Complex64>", into = "Vec<Complex64>")]
pub struct Polynomial {
    coeffs: Vec<Complex64>,
}

impl Polynomial {
    /// Creates a polynomial from ascending complex coefficients.
    pub fn new(coeffs: Vec<Complex64>) -> Result<Self, RcfError> {
        if coeffs.is_empty() {
            return Err(RcfError::InvalidInput(
                ErrorInfo::new("empty-polynomial", "a polynomial needs at least one coefficient")
                    .with_hint("use [0] for the zero polynomial"),
            ));
        }
        Ok(Self { coeffs })
    }

    /// Creates a polynomial from ascending real coefficients.
    pub fn from_real(coeffs: &[f64]) -> Result<Self, RcfError> {
        Self::new(coeffs.iter().map(|&re| Complex64::new(re, 0.0)).collect())
    }

    /// The constant polynomial `1`.
    pub fn one() -> Self {
        Self {
            coeffs: vec![complex::ONE],
        }
    }

    /// Decodes an interleaved `[re0, im0, re1, im1, ...]` buffer.
    ///
    /// Odd-length, empty and non-finite buffers are rejected as render errors
    /// because they only ever originate from a malformed closed-form handle.
    pub fn from_interleaved(flat: &[f64]) -> Result<Self, RcfError> {
        if flat.is_empty() || flat.len() % 2 != 0 {
            return Err(RcfError::Render(
                ErrorInfo::new(
                    "malformed-coefficients",
                    "interleaved coefficient buffer must hold a positive even number of values",
                )
                .with_context("len", flat.len().to_string()),
            ));
        }
        if let Some(position) = flat.iter().position(|value| !value.is_finite()) {
            return Err(RcfError::Render(
                ErrorInfo::new("non-finite-coefficient", "coefficient buffer holds NaN or inf")
                    .with_context("position", position.to_string()),
            ));
        }
        let coeffs = flat
            .chunks_exact(2)
            .map(|pair| Complex64::new(pair[0], pair[1]))
            .collect();
        Ok(Self { coeffs })
    }

    /// Encodes the coefficients as an interleaved `[re, im, ...]` buffer.
    pub fn to_interleaved(&self) -> Vec<f64> {
        self.coeffs
            .iter()
            .flat_map(|coeff| [coeff.re, coeff.im])
            .collect()
    }

    /// Ascending coefficients.
    pub fn coeffs(&self) -> &[Complex64] {
        &self.coeffs
    }

    /// Evaluates the polynomial at `x` with Horner's rule.
    pub fn eval(&self, x: Complex64) -> Complex64 {
        self.coeffs
            .iter()
            .rev()
            .fold(ZERO, |acc, &coeff| acc * x + coeff)
    }

    /// Evaluates the polynomial at a non-negative integer point.
    pub fn eval_at(&self, index: u64) -> Complex64 {
        self.eval(Complex64::new(index as f64, 0.0))
    }

    /// Returns whether every coefficient lies within `tol` of zero.
    pub fn is_near_zero(&self, tol: f64) -> bool {
        self.coeffs
            .iter()
            .all(|&coeff| complex::is_near_zero(coeff, tol))
    }

    /// Returns whether every coefficient is finite.
    pub fn is_finite(&self) -> bool {
        self.coeffs.iter().all(|&coeff| complex::is_finite(coeff))
    }
}

impl TryFrom<Vec<Complex64>> for Polynomial {
    type Error = RcfError;

    fn try_from(coeffs: Vec<Complex64>) -> Result<Self, Self::Error> {
        Self::new(coeffs)
    }
}

impl From<Polynomial> for Vec<Complex64> {
    fn from(poly: Polynomial) -> Self {
        poly.coeffs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horner_matches_expanded_form() {
        // 2n^2 - 3n + 1
        let poly = Polynomial::from_real(&[1.0, -3.0, 2.0]).unwrap();
        for n in 0..8u64 {
            let x = n as f64;
            let expected = 2.0 * x * x - 3.0 * x + 1.0;
            assert!((poly.eval_at(n).re - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn empty_polynomial_is_rejected() {
        let err = Polynomial::new(Vec::new()).unwrap_err();
        assert_eq!(err.info().code, "empty-polynomial");
    }

    #[test]
    fn odd_interleaved_buffer_is_a_render_error() {
        let err = Polynomial::from_interleaved(&[1.0, 0.0, 2.0]).unwrap_err();
        assert!(matches!(err, RcfError::Render(_)));
    }

    #[test]
    fn nan_interleaved_buffer_is_a_render_error() {
        let err = Polynomial::from_interleaved(&[1.0, f64::NAN]).unwrap_err();
        assert_eq!(err.info().code, "non-finite-coefficient");
    }
}
