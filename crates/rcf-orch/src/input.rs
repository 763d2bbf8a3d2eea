//! User input as it arrives from a form or a file, and its normalisation into
//! a [`LinearRecurrenceSpec`].

use log::warn;
use rcf_core::complex::{self, Complex64};
use rcf_core::{
    order_out_of_range, ErrorInfo, GeneralTerm, LinearRecurrenceSpec, Polynomial, RcfError,
    MAX_ORDER,
};
use serde::{Deserialize, Serialize};

/// One `Q(n) · r^n` term as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermInput {
    /// Real coefficients of `Q` in ascending powers.
    pub poly: Vec<f64>,
    /// Base `r` as `[re, im]`.
    pub base: [f64; 2],
}

/// General recurrence `a(n) = c_1 a(n-1) + … + c_k a(n-k) + Σ Q(n) r^n`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceInput {
    /// Requested order `k`; coefficient and initial lists are zero-padded or
    /// truncated to it. Defaults to the length of `coeffs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    /// Homogeneous coefficients `c_1..c_k`.
    pub coeffs: Vec<f64>,
    /// Initial values `a(0)..a(k-1)`.
    pub initial_values: Vec<f64>,
    /// Forcing terms.
    #[serde(default)]
    pub forcing_terms: Vec<TermInput>,
}

/// Partial sum `Σ_{k=1..n} f(k)` of user-supplied terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SumInput {
    /// Summand terms.
    pub terms: Vec<TermInput>,
}

/// What the user asked to solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Scenario {
    /// General linear recurrence.
    Recurrence(RecurrenceInput),
    /// Partial sum of explicit terms.
    Sum(SumInput),
}

impl Scenario {
    /// Discriminant of the scenario.
    pub fn kind(&self) -> ScenarioKind {
        match self {
            Scenario::Recurrence(_) => ScenarioKind::Recurrence,
            Scenario::Sum(_) => ScenarioKind::Sum,
        }
    }
}

/// Scenario discriminant recorded in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioKind {
    /// General linear recurrence.
    Recurrence,
    /// Partial sum of explicit terms.
    Sum,
}

/// Validated scenario ready to hand to a solver.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRun {
    /// Scenario discriminant.
    pub kind: ScenarioKind,
    /// Recurrence to solve; the partial-sum form for sums.
    pub spec: LinearRecurrenceSpec,
}

impl PreparedRun {
    /// Sum scenarios without terms are identically zero and need no solver.
    pub fn is_trivial(&self) -> bool {
        self.kind == ScenarioKind::Sum && self.spec.forcing_terms.is_empty()
    }
}

/// Clamps a user-entered count or index to a non-negative integer.
///
/// Rounds toward negative infinity; negatives become zero and non-finite
/// input is rejected.
pub fn clamp_index(value: f64) -> Result<u64, RcfError> {
    if !value.is_finite() {
        return Err(RcfError::InvalidInput(
            ErrorInfo::new("non-finite-input", "index must be a finite number")
                .with_context("value", value.to_string()),
        ));
    }
    Ok(value.floor().max(0.0) as u64)
}

/// Validates `scenario` and builds the recurrence it describes.
pub fn prepare(scenario: &Scenario) -> Result<PreparedRun, RcfError> {
    match scenario {
        Scenario::Recurrence(input) => {
            let order = match input.order {
                Some(order) => clamp_order(order)?,
                None => input.coeffs.len(),
            };
            if order > MAX_ORDER {
                return Err(order_out_of_range(order));
            }
            let coeffs = real_values("coeffs", &input.coeffs, order)?;
            let initial_values = real_values("initial_values", &input.initial_values, order)?;
            let forcing_terms = terms("forcing_terms", &input.forcing_terms)?;
            Ok(PreparedRun {
                kind: ScenarioKind::Recurrence,
                spec: LinearRecurrenceSpec::new(coeffs, forcing_terms, initial_values)?,
            })
        }
        Scenario::Sum(input) => {
            let mut terms = terms("terms", &input.terms)?;
            if let Some(first) = terms.first_mut() {
                if !complex::is_near(first.base, complex::ONE, f64::EPSILON) {
                    warn!(
                        "sum scenario uses base 1 for its first term; ignoring supplied base {}",
                        first.base
                    );
                }
                first.base = complex::ONE;
            }
            Ok(PreparedRun {
                kind: ScenarioKind::Sum,
                spec: LinearRecurrenceSpec::partial_sum(terms),
            })
        }
    }
}

/// Clamps a requested order, rejecting values above [`MAX_ORDER`] before any
/// buffer is sized from them.
fn clamp_order(order: f64) -> Result<usize, RcfError> {
    let clamped = clamp_index(order)?;
    match usize::try_from(clamped) {
        Ok(order) if order <= MAX_ORDER => Ok(order),
        _ => Err(order_out_of_range(clamped)),
    }
}

/// Zero-pads or truncates `values` to `len` after checking they are finite.
fn real_values(field: &str, values: &[f64], len: usize) -> Result<Vec<Complex64>, RcfError> {
    if let Some(position) = values.iter().position(|value| !value.is_finite()) {
        return Err(non_finite(field, position));
    }
    let mut out: Vec<Complex64> = values
        .iter()
        .take(len)
        .map(|&value| Complex64::new(value, 0.0))
        .collect();
    out.resize(len, complex::ZERO);
    Ok(out)
}

fn terms(field: &str, inputs: &[TermInput]) -> Result<Vec<GeneralTerm>, RcfError> {
    inputs
        .iter()
        .enumerate()
        .map(|(position, input)| {
            if input.poly.iter().any(|value| !value.is_finite())
                || input.base.iter().any(|value| !value.is_finite())
            {
                return Err(non_finite(field, position));
            }
            let polynomial = Polynomial::from_real(&input.poly).map_err(|err| match err {
                RcfError::InvalidInput(info) => RcfError::InvalidInput(
                    info.with_context("field", field)
                        .with_context("position", position.to_string()),
                ),
                other => other,
            })?;
            Ok(GeneralTerm::new(polynomial, complex::from_pair(input.base)))
        })
        .collect()
}

fn non_finite(field: &str, position: usize) -> RcfError {
    RcfError::InvalidInput(
        ErrorInfo::new("non-finite-input", "input holds NaN or infinite values")
            .with_context("field", field)
            .with_context("position", position.to_string()),
    )
}
