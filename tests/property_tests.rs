//! Property-based tests using proptest.
//!
//! These tests verify seeding, splitting, encoding, and resampling
//! invariants of the modeling pipeline.

use ictus::model_selection::train_test_split;
use ictus::prelude::*;
use proptest::prelude::*;

// Strategy for two jittered clusters with class sizes drawn independently
fn labeled_clusters() -> impl Strategy<Value = (Matrix<f32>, Vec<usize>)> {
    (4usize..16, 4usize..16).prop_flat_map(|(n_negative, n_positive)| {
        let n = n_negative + n_positive;
        proptest::collection::vec(0.0f32..1.0, n * 2).prop_map(move |jitter| {
            let mut data = Vec::with_capacity(n * 2);
            let mut labels = Vec::with_capacity(n);
            for i in 0..n {
                let base = if i < n_negative { 0.0 } else { 10.0 };
                data.push(base + jitter[2 * i]);
                data.push(base + jitter[2 * i + 1]);
                labels.push(usize::from(i >= n_negative));
            }
            let x = Matrix::from_vec(n, 2, data).expect("Test data should be valid");
            (x, labels)
        })
    })
}

// Strategy for paired prediction/truth label vectors
fn label_pairs() -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
    (1usize..60).prop_flat_map(|n| {
        (
            proptest::collection::vec(0usize..2, n),
            proptest::collection::vec(0usize..2, n),
        )
    })
}

fn class_count(y: &[usize], class: usize) -> usize {
    y.iter().filter(|&&c| c == class).count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Stratified split properties

    #[test]
    fn split_preserves_rows_and_class_counts((x, y) in labeled_clusters(), seed in any::<u64>()) {
        let (x_train, x_test, y_train, y_test) =
            train_test_split(&x, &y, 0.2, Some(seed)).expect("Split should succeed");

        prop_assert_eq!(x_train.shape().0 + x_test.shape().0, x.shape().0);
        prop_assert_eq!(y_train.len() + y_test.len(), y.len());
        for class in [0, 1] {
            let split_total = class_count(&y_train, class) + class_count(&y_test, class);
            prop_assert_eq!(split_total, class_count(&y, class));
        }
    }

    #[test]
    fn split_keeps_both_classes_on_both_sides((x, y) in labeled_clusters(), seed in any::<u64>()) {
        let (_, _, y_train, y_test) =
            train_test_split(&x, &y, 0.2, Some(seed)).expect("Split should succeed");

        for class in [0, 1] {
            prop_assert!(class_count(&y_train, class) >= 1);
            prop_assert!(class_count(&y_test, class) >= 1);
        }
    }

    #[test]
    fn split_is_deterministic_per_seed((x, y) in labeled_clusters(), seed in any::<u64>()) {
        let (xa_train, xa_test, ya_train, ya_test) =
            train_test_split(&x, &y, 0.2, Some(seed)).expect("Split should succeed");
        let (xb_train, xb_test, yb_train, yb_test) =
            train_test_split(&x, &y, 0.2, Some(seed)).expect("Split should succeed");

        prop_assert_eq!(xa_train, xb_train);
        prop_assert_eq!(xa_test, xb_test);
        prop_assert_eq!(ya_train, yb_train);
        prop_assert_eq!(ya_test, yb_test);
    }

    // Label encoding properties

    #[test]
    fn encoder_round_trips_every_fitted_value(
        values in proptest::collection::vec("[a-z]{1,8}", 1..20)
    ) {
        let mut encoder = LabelEncoder::new();
        encoder.fit(&values);

        for value in &values {
            let code = encoder.transform(value).expect("Fitted value should encode");
            let decoded = encoder.inverse_transform(code).expect("Code should decode");
            prop_assert_eq!(decoded, value.as_str());
        }
    }

    #[test]
    fn encoder_codes_are_dense_and_sorted(
        values in proptest::collection::vec("[a-z]{1,8}", 1..20)
    ) {
        let mut encoder = LabelEncoder::new();
        encoder.fit(&values);
        let classes = encoder.classes().expect("Fitted encoder has classes");

        prop_assert!(classes.windows(2).all(|w| w[0] < w[1]));
        for (expected_code, class) in classes.iter().enumerate() {
            prop_assert_eq!(encoder.transform(class).expect("Known class"), expected_code);
        }
    }

    // SMOTE properties

    #[test]
    fn smote_balances_and_keeps_originals((x, y) in labeled_clusters(), seed in any::<u64>()) {
        let smote = Smote::new().with_random_state(seed);
        let (x_resampled, y_resampled) =
            smote.fit_resample(&x, &y).expect("Resample should succeed");

        prop_assert_eq!(
            class_count(&y_resampled, 0),
            class_count(&y_resampled, 1)
        );
        prop_assert!(y_resampled.len() >= y.len());
        prop_assert_eq!(&y_resampled[..y.len()], &y[..]);
        for row in 0..x.shape().0 {
            prop_assert_eq!(x_resampled.row_slice(row), x.row_slice(row));
        }
    }

    // Forest properties

    #[test]
    fn forest_is_deterministic_per_seed((x, y) in labeled_clusters(), seed in any::<u64>()) {
        let mut forest_a = RandomForestClassifier::new(10).with_random_state(seed);
        forest_a.fit(&x, &y).expect("Fit should succeed");
        let mut forest_b = RandomForestClassifier::new(10).with_random_state(seed);
        forest_b.fit(&x, &y).expect("Fit should succeed");

        prop_assert_eq!(forest_a.predict(&x), forest_b.predict(&x));
    }

    #[test]
    fn forest_predictions_stay_in_label_range((x, y) in labeled_clusters(), seed in any::<u64>()) {
        let mut forest = RandomForestClassifier::new(10)
            .with_class_weight(ClassWeight::Balanced)
            .with_random_state(seed);
        forest.fit(&x, &y).expect("Fit should succeed");

        for prediction in forest.predict(&x) {
            prop_assert!(prediction <= 1);
        }
    }

    // Metric properties

    #[test]
    fn metrics_are_bounded((y_pred, y_true) in label_pairs()) {
        for value in [
            accuracy(&y_pred, &y_true),
            precision(&y_pred, &y_true),
            recall(&y_pred, &y_true),
            f1_score(&y_pred, &y_true),
        ] {
            prop_assert!((0.0..=1.0).contains(&value));
        }
    }
}
