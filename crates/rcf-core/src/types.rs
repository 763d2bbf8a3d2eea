use serde::{Deserialize, Serialize};

use crate::complex::{self, Complex64};
use crate::errors::{ErrorInfo, RcfError};
use crate::polynomial::Polynomial;

/// Largest sequence index accepted by the local verification engines.
pub const MAX_INDEX: u64 = 1_000_000;

/// Largest recurrence order `k` accepted anywhere in RCF.
pub const MAX_ORDER: usize = 1_000;

/// Polynomial-exponential term `n ↦ Q(n) · base^n`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralTerm {
    /// Polynomial factor `Q` in ascending powers.
    pub polynomial: Polynomial,
    /// Geometric base.
    pub base: Complex64,
}

impl GeneralTerm {
    /// Creates a term from its polynomial and base.
    pub fn new(polynomial: Polynomial, base: Complex64) -> Self {
        Self { polynomial, base }
    }

    /// Creates a term from real polynomial coefficients and a real base.
    pub fn real(coeffs: &[f64], base: f64) -> Result<Self, RcfError> {
        Ok(Self::new(
            Polynomial::from_real(coeffs)?,
            Complex64::new(base, 0.0),
        ))
    }

    /// Evaluates `Q(index) · base^index`, with `Q` by Horner's rule.
    pub fn eval_at(&self, index: u64) -> Complex64 {
        self.polynomial.eval_at(index) * complex::pow_index(self.base, index)
    }

    /// Returns whether the polynomial and base are finite.
    pub fn is_finite(&self) -> bool {
        self.polynomial.is_finite() && complex::is_finite(self.base)
    }
}

/// Linear recurrence with constant coefficients and polynomial-exponential forcing.
///
/// `a[i] = Σ_{j=1..k} homogeneous_coeffs[j-1] · a[i-j] + Σ_t Q_t(i) · base_t^i`
/// for `i ≥ k`, with `a[0..k]` given by `initial_values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRecurrenceSpec {
    /// Coefficients `c_1..c_k` applied to `a[i-1]..a[i-k]`.
    pub homogeneous_coeffs: Vec<Complex64>,
    /// Forcing terms added at every simulated index.
    #[serde(default)]
    pub forcing_terms: Vec<GeneralTerm>,
    /// Initial values `a[0]..a[k-1]`.
    pub initial_values: Vec<Complex64>,
}

impl LinearRecurrenceSpec {
    /// Creates and validates a recurrence specification.
    pub fn new(
        homogeneous_coeffs: Vec<Complex64>,
        forcing_terms: Vec<GeneralTerm>,
        initial_values: Vec<Complex64>,
    ) -> Result<Self, RcfError> {
        let spec = Self {
            homogeneous_coeffs,
            forcing_terms,
            initial_values,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Degenerate first-order form whose solution is the partial sum
    /// `S(n) = Σ_{i=1..n} f(i)` of the supplied forcing terms.
    pub fn partial_sum(forcing_terms: Vec<GeneralTerm>) -> Self {
        Self {
            homogeneous_coeffs: vec![complex::ONE],
            forcing_terms,
            initial_values: vec![complex::ZERO],
        }
    }

    /// Recurrence order `k`.
    pub fn order(&self) -> usize {
        self.homogeneous_coeffs.len()
    }

    /// Checks the length invariant and that every number is finite.
    pub fn validate(&self) -> Result<(), RcfError> {
        if self.order() > MAX_ORDER {
            return Err(order_out_of_range(self.order()));
        }
        if self.homogeneous_coeffs.len() != self.initial_values.len() {
            return Err(RcfError::InvalidInput(
                ErrorInfo::new(
                    "order-mismatch",
                    "homogeneous coefficients and initial values must have equal length",
                )
                .with_context("coeffs", self.homogeneous_coeffs.len().to_string())
                .with_context("initial_values", self.initial_values.len().to_string()),
            ));
        }
        if let Some(position) = self
            .homogeneous_coeffs
            .iter()
            .position(|&value| !complex::is_finite(value))
        {
            return Err(non_finite("homogeneous_coeffs", position));
        }
        if let Some(position) = self
            .initial_values
            .iter()
            .position(|&value| !complex::is_finite(value))
        {
            return Err(non_finite("initial_values", position));
        }
        if let Some(position) = self.forcing_terms.iter().position(|term| !term.is_finite()) {
            return Err(non_finite("forcing_terms", position));
        }
        Ok(())
    }

    /// Sum of every forcing term evaluated at `index`.
    pub fn forcing_at(&self, index: u64) -> Complex64 {
        self.forcing_terms
            .iter()
            .map(|term| term.eval_at(index))
            .sum()
    }
}

/// Error for a recurrence order above [`MAX_ORDER`].
pub fn order_out_of_range(order: impl ToString) -> RcfError {
    RcfError::InvalidInput(
        ErrorInfo::new("order-out-of-range", "recurrence order exceeds the supported maximum")
            .with_context("order", order.to_string())
            .with_context("max", MAX_ORDER.to_string()),
    )
}

fn non_finite(field: &str, position: usize) -> RcfError {
    RcfError::InvalidInput(
        ErrorInfo::new("non-finite-input", "input holds NaN or infinite values")
            .with_context("field", field)
            .with_context("position", position.to_string()),
    )
}
