use log::trace;
use rcf_core::complex::{self, Complex64};
use rcf_core::{ErrorInfo, GeneralTerm, RcfError, MAX_INDEX};

/// Computes `Σ_{i=1..n} Σ_t Q_t(i) · base_t^i` term by term.
///
/// Every summand is evaluated on its own; nothing is carried between indices
/// apart from the running total.
pub fn direct_sum(terms: &[GeneralTerm], n: u64) -> Result<Complex64, RcfError> {
    if n > MAX_INDEX {
        return Err(RcfError::InvalidInput(
            ErrorInfo::new(
                "index-out-of-range",
                "summation bound exceeds the supported maximum",
            )
            .with_context("index", n.to_string())
            .with_context("max", MAX_INDEX.to_string()),
        ));
    }
    if let Some(position) = terms.iter().position(|term| !term.is_finite()) {
        return Err(RcfError::InvalidInput(
            ErrorInfo::new("non-finite-input", "input holds NaN or infinite values")
                .with_context("field", "terms")
                .with_context("position", position.to_string()),
        ));
    }
    let mut total = complex::ZERO;
    for i in 1..=n {
        let summand: Complex64 = terms.iter().map(|term| term.eval_at(i)).sum();
        total += summand;
        trace!("direct f({i}) = {summand}");
    }
    Ok(total)
}
