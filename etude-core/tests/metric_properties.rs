//! Property tests for metric math and summary normalization

use etude_core::domain::metrics::{accuracy, f_score, precision, recall, specificity};
use etude_core::{normalize, Metric, Score, ScoreCounts};
use proptest::prelude::*;

fn count() -> impl Strategy<Value = u32> {
    0u32..10_000
}

proptest! {
    #[test]
    fn ratios_stay_in_unit_interval(tp in count(), fp in count(), tn in count(), fn_ in count()) {
        let (tp, fp, tn, fn_) = (tp as f64, fp as f64, tn as f64, fn_ as f64);
        for value in [
            accuracy(tp, fp, tn, fn_),
            precision(tp, fp),
            recall(tp, fn_),
            specificity(tn, fn_),
        ] {
            prop_assert!(value.is_finite());
            prop_assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn precision_matches_definition(tp in 1u32..10_000, fp in count()) {
        let (tp, fp) = (tp as f64, fp as f64);
        prop_assert_eq!(precision(tp, fp), tp / (tp + fp));
    }

    #[test]
    fn zero_denominators_give_zero(tn in count()) {
        prop_assert_eq!(accuracy(0.0, 0.0, 0.0, 0.0), 0.0);
        prop_assert_eq!(precision(0.0, 0.0), 0.0);
        prop_assert_eq!(recall(0.0, 0.0), 0.0);
        prop_assert_eq!(specificity(0.0, 0.0), 0.0);
        prop_assert_eq!(f_score(0.0, 0.0, tn as f64), 0.0);
    }

    #[test]
    fn f_score_is_bounded_by_weight(p in 0.0f64..=1.0, r in 0.0f64..=1.0) {
        let f = f_score(p, r, 1.0);
        prop_assert!(f.is_finite());
        prop_assert!(f >= 0.0 && f <= p.max(r) + 1e-12);
    }

    #[test]
    fn normalized_row_has_one_value_per_metric(
        tp in count(),
        fn_ in count(),
        picks in proptest::collection::vec(0usize..Metric::ALL.len(), 0..12),
    ) {
        let counts: ScoreCounts = [
            (Score::TruePositive, tp as usize),
            (Score::FalseNegative, fn_ as usize),
        ]
        .into_iter()
        .collect();
        let requested: Vec<Metric> = picks.iter().map(|i| Metric::ALL[*i]).collect();

        let row = normalize(&counts, "aggregate", &requested).unwrap();
        prop_assert_eq!(row.values.len(), requested.len());
        for (metric, value) in requested.iter().zip(&row.values) {
            match metric {
                Metric::TP => prop_assert_eq!(*value, tp as f64),
                Metric::FN => prop_assert_eq!(*value, fn_ as f64),
                Metric::FP | Metric::TN => prop_assert_eq!(*value, 0.0),
                _ => prop_assert!(value.is_finite()),
            }
        }
    }
}

#[test]
fn documented_values() {
    assert_eq!(recall(3.0, 1.0), 0.75);
    assert_eq!(f_score(1.0, 1.0, 1.0), 1.0);
}
