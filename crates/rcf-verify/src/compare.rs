use rcf_core::complex::Complex64;
use rcf_core::{GeneralTerm, LinearRecurrenceSpec, RcfError};
use serde::{Deserialize, Serialize};

use crate::direct::direct_sum;
use crate::forward::forward_eval;

/// Distance between two evaluations.
pub fn deviation(lhs: Complex64, rhs: Complex64) -> f64 {
    (lhs - rhs).norm()
}

/// Largest pairwise distance among `values`; zero for fewer than two.
pub fn max_deviation(values: &[Complex64]) -> f64 {
    let mut worst = 0.0f64;
    for (idx, &lhs) in values.iter().enumerate() {
        for &rhs in &values[idx + 1..] {
            worst = worst.max(deviation(lhs, rhs));
        }
    }
    worst
}

/// Both local evaluations of a partial sum at one index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossCheck {
    /// Upper summation bound.
    pub index: u64,
    /// Forward simulation of the partial-sum recurrence.
    pub forward: Complex64,
    /// Direct summation of the terms.
    pub direct: Complex64,
}

impl CrossCheck {
    /// Distance between the two evaluations.
    pub fn deviation(&self) -> f64 {
        deviation(self.forward, self.direct)
    }

    /// Whether the evaluations lie within `tol` of each other.
    pub fn agrees(&self, tol: f64) -> bool {
        self.deviation() < tol
    }
}

/// Evaluates `Σ_{i=1..n} f(i)` with both engines.
pub fn cross_check_sum(terms: &[GeneralTerm], n: u64) -> Result<CrossCheck, RcfError> {
    let spec = LinearRecurrenceSpec::partial_sum(terms.to_vec());
    Ok(CrossCheck {
        index: n,
        forward: forward_eval(&spec, n, None)?,
        direct: direct_sum(terms, n)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_deviation_is_pairwise() {
        let values = [
            Complex64::new(0.0, 0.0),
            Complex64::new(3.0, 4.0),
            Complex64::new(1.0, 0.0),
        ];
        assert_eq!(max_deviation(&values), 5.0);
        assert_eq!(max_deviation(&values[..1]), 0.0);
        assert_eq!(max_deviation(&[]), 0.0);
    }

    #[test]
    fn unit_sum_agrees_at_ten() {
        let terms = vec![GeneralTerm::real(&[1.0], 1.0).unwrap()];
        let check = cross_check_sum(&terms, 10).unwrap();
        assert_eq!(check.forward, Complex64::new(10.0, 0.0));
        assert_eq!(check.direct, Complex64::new(10.0, 0.0));
        assert!(check.agrees(1e-12));
    }

    #[test]
    fn cross_check_serialises_pairs() {
        let check = CrossCheck {
            index: 3,
            forward: Complex64::new(6.0, 0.0),
            direct: Complex64::new(6.0, 0.0),
        };
        let json = serde_json::to_value(check).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"index": 3, "forward": [6.0, 0.0], "direct": [6.0, 0.0]})
        );
    }
}
