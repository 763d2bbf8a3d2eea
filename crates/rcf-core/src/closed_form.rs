//! Closed forms held as plain data.
//!
//! [`ClosedForm`] is what an external solver's output looks like once it has
//! been copied out of the solver: a list of [`GeneralTerm`]s. It implements
//! [`ClosedFormHandle`] so that saved solver output and test doubles can be
//! driven through exactly the same renderer and orchestrator paths as a live
//! solver handle.

use serde::{Deserialize, Serialize};

use crate::complex::{self, Complex64};
use crate::types::GeneralTerm;
use crate::{ClosedFormHandle, TermStructure};

/// Magnitude below which the plain notation treats a component as zero.
const NOTATION_EPS: f64 = 1e-12;

/// Sum of polynomial-exponential terms `Σ_t Q_t(n) · base_t^n`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClosedForm {
    /// Terms in solver order.
    pub terms: Vec<GeneralTerm>,
}

impl ClosedForm {
    /// Creates a closed form from its terms, keeping their order.
    pub fn new(terms: Vec<GeneralTerm>) -> Self {
        Self { terms }
    }

    /// The empty sum.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Evaluates the closed form at `index`.
    pub fn eval_at(&self, index: u64) -> Complex64 {
        self.terms.iter().map(|term| term.eval_at(index)).sum()
    }

    /// Plain solver-style notation such as `3n^2 - n + 1` or `(n + 1) (2)^n`.
    ///
    /// Coefficients print at full precision, bases are always parenthesised and
    /// a base of `1` is elided. No rounding or tolerance collapsing happens here.
    pub fn plain_notation(&self, variable: &str) -> String {
        let parts: Vec<String> = self
            .terms
            .iter()
            .filter_map(|term| plain_term(term, variable))
            .collect();
        if parts.is_empty() {
            return "0".to_string();
        }
        join_signed(parts)
    }
}

impl TermStructure for ClosedForm {
    fn term_count(&self) -> usize {
        self.terms.len()
    }

    fn term_poly(&self, index: usize) -> Vec<f64> {
        self.terms
            .get(index)
            .map(|term| term.polynomial.to_interleaved())
            .unwrap_or_default()
    }

    fn term_base(&self, index: usize) -> Vec<f64> {
        self.terms
            .get(index)
            .map(|term| complex::to_pair(term.base).to_vec())
            .unwrap_or_default()
    }
}

impl ClosedFormHandle for ClosedForm {
    fn term_structure(&self) -> Option<&dyn TermStructure> {
        Some(self)
    }

    fn notation(&self, variable: &str) -> String {
        self.plain_notation(variable)
    }

    fn term(&self, n: u64) -> [f64; 2] {
        complex::to_pair(self.eval_at(n))
    }

    fn release(self: Box<Self>) {}
}

fn plain_real(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

fn plain_complex(value: Complex64) -> String {
    if value.im.abs() < NOTATION_EPS {
        return plain_real(value.re);
    }
    if value.re.abs() < NOTATION_EPS {
        return format!("{}i", plain_real(value.im));
    }
    let sign = if value.im < 0.0 { '-' } else { '+' };
    format!(
        "{}{}{}i",
        plain_real(value.re),
        sign,
        plain_real(value.im.abs())
    )
}

fn plain_coefficient(value: Complex64) -> String {
    if value.im.abs() < NOTATION_EPS {
        plain_real(value.re)
    } else {
        format!("({})", plain_complex(value))
    }
}

fn plain_power(variable: &str, power: usize) -> String {
    match power {
        0 => String::new(),
        1 => variable.to_string(),
        _ => format!("{variable}^{power}"),
    }
}

fn plain_polynomial(term: &GeneralTerm, variable: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    for (power, &coeff) in term.polynomial.coeffs().iter().enumerate().rev() {
        if coeff.norm() <= NOTATION_EPS {
            continue;
        }
        let symbol = plain_power(variable, power);
        let piece = if symbol.is_empty() {
            plain_coefficient(coeff)
        } else if complex::is_near(coeff, complex::ONE, NOTATION_EPS) {
            symbol
        } else if complex::is_near(coeff, -complex::ONE, NOTATION_EPS) {
            format!("-{symbol}")
        } else {
            format!("{}{symbol}", plain_coefficient(coeff))
        };
        pieces.push(piece);
    }
    pieces
}

fn plain_term(term: &GeneralTerm, variable: &str) -> Option<String> {
    let pieces = plain_polynomial(term, variable);
    if pieces.is_empty() {
        return None;
    }
    let multi = pieces.len() > 1;
    let poly = join_signed(pieces);
    if complex::is_near(term.base, complex::ONE, NOTATION_EPS) {
        return Some(poly);
    }
    let base = format!("({})^{variable}", plain_complex(term.base));
    if multi {
        Some(format!("({poly}) {base}"))
    } else {
        Some(format!("{poly} {base}"))
    }
}

fn join_signed(parts: Vec<String>) -> String {
    let mut out = String::new();
    for (idx, part) in parts.into_iter().enumerate() {
        if idx == 0 {
            out.push_str(&part);
        } else if let Some(rest) = part.strip_prefix('-') {
            out.push_str(" - ");
            out.push_str(rest);
        } else {
            out.push_str(" + ");
            out.push_str(&part);
        }
    }
    out
}
