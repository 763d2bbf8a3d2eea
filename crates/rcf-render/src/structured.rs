use rcf_core::complex::{self, Complex64};
use rcf_core::{
    ClosedFormHandle, ErrorInfo, GeneralTerm, Polynomial, RcfError, RenderConfig, TermStructure,
};

use crate::number::{collapse_signs, enclose_if_needed, format_complex, has_both_parts, snap};
use crate::{ClosedFormRenderer, RendererKind};

/// Renders from the handle's structured per-term buffers.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredRenderer;

impl ClosedFormRenderer for StructuredRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::Structured
    }

    fn render(
        &self,
        handle: &dyn ClosedFormHandle,
        config: &RenderConfig,
    ) -> Result<String, RcfError> {
        let structure = handle.term_structure().ok_or_else(|| {
            RcfError::render(
                "structure-unavailable",
                "handle does not expose per-term structure",
            )
        })?;
        render_structure(structure, config)
    }
}

/// Renders every term exposed by `structure`, decoding and validating its buffers.
pub fn render_structure(
    structure: &dyn TermStructure,
    config: &RenderConfig,
) -> Result<String, RcfError> {
    config.validate()?;
    let mut parts = Vec::new();
    for index in 0..structure.term_count() {
        let term = decode_term(structure, index)?;
        if let Some(text) = render_term(&term, config) {
            parts.push(text);
        }
    }
    if parts.is_empty() {
        return Ok("0".to_string());
    }
    Ok(collapse_signs(&parts.join(" + ")))
}

fn decode_term(structure: &dyn TermStructure, index: usize) -> Result<GeneralTerm, RcfError> {
    let polynomial =
        Polynomial::from_interleaved(&structure.term_poly(index)).map_err(|err| match err {
            RcfError::Render(info) => RcfError::Render(info.with_context("term", index.to_string())),
            other => other,
        })?;
    let base = structure.term_base(index);
    if base.len() != 2 || !base.iter().all(|value| value.is_finite()) {
        return Err(RcfError::Render(
            ErrorInfo::new("malformed-base", "term base must be a finite [re, im] pair")
                .with_context("term", index.to_string())
                .with_context("len", base.len().to_string()),
        ));
    }
    Ok(GeneralTerm::new(polynomial, Complex64::new(base[0], base[1])))
}

/// Renders a single term, or `None` when its polynomial collapses to zero.
pub fn render_term(term: &GeneralTerm, config: &RenderConfig) -> Option<String> {
    let tol = config.tolerance();
    let coeffs: Vec<Complex64> = term
        .polynomial
        .coeffs()
        .iter()
        .map(|&coeff| snap(coeff, tol))
        .collect();
    let pieces = polynomial_pieces(&coeffs, config);
    if pieces.is_empty() {
        return None;
    }
    let mixed_constant = pieces.len() == 1
        && has_both_parts(coeffs[0], tol)
        && coeffs[1..]
            .iter()
            .all(|&coeff| complex::is_near_zero(coeff, tol));
    let grouped = pieces.len() > 1 || mixed_constant;
    let poly = collapse_signs(&pieces.join(" + "));
    let base = snap(term.base, tol);
    if complex::is_near(base, complex::ONE, tol) {
        return Some(poly);
    }
    let base = enclose_if_needed(&format_complex(base, tol, config.precision));
    let power = format!("{base}^{{{}}}", config.variable);
    // A bare `Q \cdot` would bind only Q's last piece to the power, so
    // multi-piece and mixed complex polynomials are wrapped.
    let text = match poly.as_str() {
        "1" => power,
        "-1" => format!("-{power}"),
        _ if grouped => format!("\\left({poly}\\right) \\cdot {power}"),
        _ => format!("{poly} \\cdot {power}"),
    };
    Some(text)
}

fn power_symbol(variable: &str, power: usize) -> Option<String> {
    match power {
        0 => None,
        1 => Some(variable.to_string()),
        _ => Some(format!("{variable}^{{{power}}}")),
    }
}

/// Pieces from the highest power down; `coeffs` are already snapped.
fn polynomial_pieces(coeffs: &[Complex64], config: &RenderConfig) -> Vec<String> {
    let tol = config.tolerance();
    let mut pieces = Vec::new();
    for (power, &coeff) in coeffs.iter().enumerate().rev() {
        if complex::is_near_zero(coeff, tol) {
            continue;
        }
        let piece = match power_symbol(&config.variable, power) {
            None => format_complex(coeff, tol, config.precision),
            Some(symbol) if complex::is_near(coeff, complex::ONE, tol) => symbol,
            Some(symbol) if complex::is_near(coeff, -complex::ONE, tol) => format!("-{symbol}"),
            Some(symbol) if has_both_parts(coeff, tol) => format!(
                "\\left({}\\right) \\cdot {symbol}",
                format_complex(coeff, tol, config.precision)
            ),
            Some(symbol) => format!(
                "{} \\cdot {symbol}",
                format_complex(coeff, tol, config.precision)
            ),
        };
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use rcf_core::ClosedForm;

    use super::*;

    fn render(cf: &ClosedForm, precision: u32) -> String {
        render_structure(cf, &RenderConfig::new(precision).unwrap()).unwrap()
    }

    #[test]
    fn unit_polynomial_with_unit_base() {
        let cf = ClosedForm::new(vec![GeneralTerm::real(&[1.0], 1.0).unwrap()]);
        assert_eq!(render(&cf, 4), "1");
    }

    #[test]
    fn linear_times_power_of_two() {
        let cf = ClosedForm::new(vec![GeneralTerm::real(&[0.0, 1.0], 2.0).unwrap()]);
        assert_eq!(render(&cf, 4), "n \\cdot 2^{n}");
    }

    #[test]
    fn negative_pieces_collapse_signs() {
        let cf = ClosedForm::new(vec![GeneralTerm::real(&[1.0, -3.0, 2.0], 1.0).unwrap()]);
        assert_eq!(render(&cf, 4), "2 \\cdot n^{2} - 3 \\cdot n + 1");
    }

    #[test]
    fn near_zero_term_is_dropped() {
        let cf = ClosedForm::new(vec![
            GeneralTerm::real(&[1e-9, -2e-7], 3.0).unwrap(),
            GeneralTerm::real(&[0.0, 1.0], 1.0).unwrap(),
        ]);
        assert_eq!(render(&cf, 4), "n");
    }

    #[test]
    fn base_near_one_is_elided() {
        let cf = ClosedForm::new(vec![GeneralTerm::real(&[2.0], 1.0 + 1e-7).unwrap()]);
        assert_eq!(render(&cf, 4), "2");
    }

    #[test]
    fn negative_and_complex_bases_are_parenthesised() {
        let cf = ClosedForm::new(vec![
            GeneralTerm::real(&[1.0], -2.0).unwrap(),
            GeneralTerm::new(Polynomial::one(), Complex64::new(1.0, 1.0)),
        ]);
        assert_eq!(
            render(&cf, 4),
            "\\left(-2\\right)^{n} + \\left(1 + i\\right)^{n}"
        );
    }

    #[test]
    fn multi_piece_polynomial_is_grouped() {
        let cf = ClosedForm::new(vec![GeneralTerm::real(&[1.0, 1.0], 3.0).unwrap()]);
        assert_eq!(render(&cf, 4), "\\left(n + 1\\right) \\cdot 3^{n}");
    }

    #[test]
    fn minus_one_polynomial_negates_the_power() {
        let cf = ClosedForm::new(vec![
            GeneralTerm::real(&[0.0, 1.0], 1.0).unwrap(),
            GeneralTerm::real(&[-1.0], 2.0).unwrap(),
        ]);
        assert_eq!(render(&cf, 4), "n - 2^{n}");
    }

    #[test]
    fn mixed_constant_is_grouped_before_the_power() {
        let poly = Polynomial::new(vec![Complex64::new(1.0, -2.0)]).unwrap();
        let cf = ClosedForm::new(vec![GeneralTerm::new(poly, Complex64::new(3.0, 0.0))]);
        assert_eq!(
            render(&cf, 4),
            "\\left(1 - 2 \\cdot i\\right) \\cdot 3^{n}"
        );
    }

    #[test]
    fn near_unit_components_snap_to_one() {
        let coefficient = ClosedForm::new(vec![GeneralTerm::real(&[0.0, 1.0004], 2.0).unwrap()]);
        assert_eq!(render(&coefficient, 4), "n \\cdot 2^{n}");
        let base = ClosedForm::new(vec![GeneralTerm::real(&[-0.9996], -1.0004).unwrap()]);
        assert_eq!(render(&base, 4), "-\\left(-1\\right)^{n}");
        let imaginary = Polynomial::new(vec![Complex64::new(2.0, 1.0004)]).unwrap();
        let cf = ClosedForm::new(vec![GeneralTerm::new(imaginary, complex::ONE)]);
        assert_eq!(render(&cf, 4), "2 + i");
    }

    #[test]
    fn rounding_follows_precision() {
        let cf = ClosedForm::new(vec![GeneralTerm::real(&[0.0, 0.333333], 1.5).unwrap()]);
        assert_eq!(render(&cf, 2), "0.33 \\cdot n \\cdot 1.5^{n}");
    }

    #[test]
    fn empty_closed_form_renders_zero() {
        assert_eq!(render(&ClosedForm::zero(), 4), "0");
    }

    #[test]
    fn custom_variable() {
        let cf = ClosedForm::new(vec![GeneralTerm::real(&[0.0, 0.0, 1.0], 2.0).unwrap()]);
        let config = RenderConfig::new(4).unwrap().with_variable("k");
        assert_eq!(render_structure(&cf, &config).unwrap(), "k^{2} \\cdot 2^{k}");
    }
}
