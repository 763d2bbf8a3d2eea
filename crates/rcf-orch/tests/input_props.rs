use proptest::prelude::*;
use rcf_orch::{clamp_index, prepare, RecurrenceInput, Scenario, SumInput, TermInput};

proptest! {
    #[test]
    fn clamp_is_floor_of_non_negative(value in -1.0e6f64..1.0e6) {
        let clamped = clamp_index(value).unwrap();
        prop_assert!(clamped as f64 <= value.max(0.0));
        prop_assert!(value < 0.0 || (clamped as f64) > value - 1.0);
    }

    #[test]
    fn order_fixes_both_lengths(
        order in 0.0f64..8.0,
        coeffs in prop::collection::vec(-5.0f64..5.0, 0..10),
        initial in prop::collection::vec(-5.0f64..5.0, 0..10),
    ) {
        let scenario = Scenario::Recurrence(RecurrenceInput {
            order: Some(order),
            coeffs,
            initial_values: initial,
            forcing_terms: Vec::new(),
        });
        let prepared = prepare(&scenario).unwrap();
        let k = order.floor() as usize;
        prop_assert_eq!(prepared.spec.homogeneous_coeffs.len(), k);
        prop_assert_eq!(prepared.spec.initial_values.len(), k);
    }

    #[test]
    fn later_sum_terms_keep_their_base(re in -3.0f64..3.0, im in -3.0f64..3.0) {
        let scenario = Scenario::Sum(SumInput {
            terms: vec![
                TermInput { poly: vec![1.0], base: [re, im] },
                TermInput { poly: vec![1.0], base: [re, im] },
            ],
        });
        let prepared = prepare(&scenario).unwrap();
        let terms = &prepared.spec.forcing_terms;
        prop_assert_eq!(terms[0].base, rcf_core::complex::ONE);
        prop_assert_eq!(terms[1].base, rcf_core::Complex64::new(re, im));
    }
}
