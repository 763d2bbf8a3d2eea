use proptest::prelude::*;
use rcf_core::complex;
use rcf_core::{Complex64, GeneralTerm, LinearRecurrenceSpec, Polynomial};
use rcf_verify::{cross_check_sum, direct_sum, forward_eval, forward_prefix_sum};

#[test]
fn partial_sum_of_ones_is_ten_with_both_engines() {
    let terms = vec![GeneralTerm::real(&[1.0], 1.0).unwrap()];
    let spec = LinearRecurrenceSpec::partial_sum(terms.clone());
    let forward = forward_eval(&spec, 10, None).unwrap();
    let direct = direct_sum(&terms, 10).unwrap();
    assert_eq!(forward, Complex64::new(10.0, 0.0));
    assert_eq!(direct, Complex64::new(10.0, 0.0));
}

#[test]
fn prefix_sum_of_sequence_matches_direct_sum_of_its_closed_form() {
    // a(n) = 2^n has the closed form 1 · 2^n.
    let spec = LinearRecurrenceSpec::new(
        vec![Complex64::new(2.0, 0.0)],
        Vec::new(),
        vec![complex::ONE],
    )
    .unwrap();
    let closed_form = vec![GeneralTerm::real(&[1.0], 2.0).unwrap()];
    let forward = forward_prefix_sum(&spec, 12).unwrap();
    let direct = direct_sum(&closed_form, 12).unwrap();
    assert!(complex::approx_eq(forward, direct, 1e-9));
}

fn term_strategy() -> impl Strategy<Value = GeneralTerm> {
    (
        prop::collection::vec((-3.0f64..3.0, -3.0f64..3.0), 1..4),
        (-1.5f64..1.5, -1.5f64..1.5),
    )
        .prop_map(|(coeffs, (re, im))| {
            let coeffs = coeffs
                .into_iter()
                .map(|(re, im)| Complex64::new(re, im))
                .collect();
            GeneralTerm::new(
                Polynomial::new(coeffs).expect("non-empty"),
                Complex64::new(re, im),
            )
        })
}

proptest! {
    #[test]
    fn forward_partial_sum_matches_direct_sum(
        terms in prop::collection::vec(term_strategy(), 0..4),
        n in 0u64..40,
    ) {
        let check = cross_check_sum(&terms, n).unwrap();
        let scale = 1.0 + check.direct.norm();
        prop_assert!(check.deviation() <= 1e-9 * scale);
    }
}
