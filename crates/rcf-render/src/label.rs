//! Display labels for the user's own input, in the same canonical style as
//! rendered closed forms.

use rcf_core::complex::{self, Complex64};
use rcf_core::{GeneralTerm, LinearRecurrenceSpec, RenderConfig};

use crate::number::{collapse_signs, format_complex, has_both_parts};
use crate::structured::render_term;

/// Summation index used inside sum labels.
const SUM_INDEX: &str = "k";

/// Renders `terms` as a canonical sum of `Q(v) \cdot r^{v}` pieces.
pub fn render_general_terms(terms: &[GeneralTerm], config: &RenderConfig) -> String {
    let parts: Vec<String> = terms
        .iter()
        .filter_map(|term| render_term(term, config))
        .collect();
    if parts.is_empty() {
        return "0".to_string();
    }
    collapse_signs(&parts.join(" + "))
}

/// Label for a sum scenario, e.g. `\sum_{k=1}^{n} k \cdot 2^{k} =`.
pub fn sum_label(terms: &[GeneralTerm], config: &RenderConfig) -> String {
    let inner = config.clone().with_variable(SUM_INDEX);
    let body = render_general_terms(terms, &inner);
    let body = if terms.len() > 1 || body.contains(" + ") || body.contains(" - ") {
        format!("\\left({body}\\right)")
    } else {
        body
    };
    format!(
        "\\sum_{{{SUM_INDEX}=1}}^{{{}}} {body} =",
        config.variable
    )
}

/// Label for a recurrence scenario, e.g. `a(n) = a(n - 1) + a(n - 2) =`.
pub fn recurrence_label(spec: &LinearRecurrenceSpec, config: &RenderConfig) -> String {
    let tol = config.tolerance();
    let var = &config.variable;
    let mut parts = Vec::new();
    for (offset, &coeff) in spec.homogeneous_coeffs.iter().enumerate() {
        let lag = format!("a({var} - {})", offset + 1);
        if let Some(piece) = scaled(coeff, &lag, tol, config.precision) {
            parts.push(piece);
        }
    }
    let forcing = render_general_terms(&spec.forcing_terms, config);
    if forcing != "0" {
        parts.push(forcing);
    }
    let rhs = if parts.is_empty() {
        "0".to_string()
    } else {
        collapse_signs(&parts.join(" + "))
    };
    format!("a({var}) = {rhs} =")
}

/// Label for the partial sum of a solved recurrence.
pub fn partial_sum_label(config: &RenderConfig) -> String {
    let var = &config.variable;
    format!("S({var}) = \\sum_{{{SUM_INDEX}=1}}^{{{var}}} a({SUM_INDEX}) =")
}

fn scaled(coeff: Complex64, symbol: &str, tol: f64, precision: u32) -> Option<String> {
    if complex::is_near_zero(coeff, tol) {
        return None;
    }
    let text = if complex::is_near(coeff, complex::ONE, tol) {
        symbol.to_string()
    } else if complex::is_near(coeff, -complex::ONE, tol) {
        format!("-{symbol}")
    } else if has_both_parts(coeff, tol) {
        format!(
            "\\left({}\\right) \\cdot {symbol}",
            format_complex(coeff, tol, precision)
        )
    } else {
        format!("{} \\cdot {symbol}", format_complex(coeff, tol, precision))
    };
    Some(text)
}
