pub(crate) use super::*;

fn separable_clusters() -> (Matrix<f32>, Vec<usize>) {
    // 8 samples near the origin, 8 near 10.0, one feature.
    let mut data = Vec::with_capacity(16);
    for i in 0..8 {
        data.push(i as f32 * 0.1);
    }
    for i in 0..8 {
        data.push(10.0 + i as f32 * 0.1);
    }
    let x = Matrix::from_vec(16, 1, data).expect("matrix");
    let y = vec![0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1];
    (x, y)
}

// ========================================================================
// Decision Tree Tests
// ========================================================================

#[test]
fn test_tree_fit_predict_separable() {
    let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 8.0, 9.0]).expect("matrix");
    let y = vec![0, 0, 1, 1];

    let mut clf = DecisionTreeClassifier::new();
    clf.fit(&x, &y).expect("fit");

    assert_eq!(clf.predict(&x), vec![0, 0, 1, 1]);

    let probe = Matrix::from_vec(2, 1, vec![0.0, 10.0]).expect("matrix");
    assert_eq!(clf.predict(&probe), vec![0, 1]);
}

#[test]
fn test_tree_single_class_collapses_to_leaf() {
    let x = Matrix::from_vec(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("matrix");
    let y = vec![1, 1, 1];

    let mut clf = DecisionTreeClassifier::new();
    clf.fit(&x, &y).expect("fit");

    assert!(matches!(clf.tree, Some(TreeNode::Leaf(_))));
    assert_eq!(clf.predict(&x), vec![1, 1, 1]);
}

#[test]
fn test_tree_max_depth_limits_growth() {
    // Alternating labels need depth 3 when grown without a limit.
    let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).expect("matrix");
    let y = vec![0, 1, 0, 1];

    let mut unlimited = DecisionTreeClassifier::new();
    unlimited.fit(&x, &y).expect("fit");
    assert_eq!(unlimited.tree.as_ref().expect("tree").depth(), 3);

    let mut capped = DecisionTreeClassifier::new().with_max_depth(1);
    capped.fit(&x, &y).expect("fit");
    assert_eq!(capped.tree.as_ref().expect("tree").depth(), 1);
    assert_eq!(capped.predict(&x), vec![0, 1, 1, 1]);
}

#[test]
fn test_tree_unsplittable_data_uses_majority() {
    // Identical feature values leave nothing to split on.
    let x = Matrix::from_vec(3, 1, vec![5.0, 5.0, 5.0]).expect("matrix");
    let y = vec![0, 0, 1];

    let mut clf = DecisionTreeClassifier::new();
    clf.fit(&x, &y).expect("fit");

    assert!(matches!(clf.tree, Some(TreeNode::Leaf(_))));
    assert_eq!(clf.predict(&x), vec![0, 0, 0]);
}

#[test]
fn test_tree_fit_weighted_flips_majority() {
    let x = Matrix::from_vec(3, 1, vec![5.0, 5.0, 5.0]).expect("matrix");
    let y = vec![0, 0, 1];

    let mut clf = DecisionTreeClassifier::new();
    clf.fit_weighted(&x, &y, &[1.0, 1.0, 3.0]).expect("fit");

    assert_eq!(clf.predict(&x), vec![1, 1, 1]);
}

#[test]
fn test_tree_fit_rejects_length_mismatch() {
    let x = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).expect("matrix");
    let err = DecisionTreeClassifier::new().fit(&x, &[0, 1]).unwrap_err();
    assert_eq!(err.to_string(), "Number of samples in X and y must match");
}

#[test]
fn test_tree_fit_rejects_weight_length_mismatch() {
    let x = Matrix::from_vec(2, 1, vec![1.0, 2.0]).expect("matrix");
    let err = DecisionTreeClassifier::new()
        .fit_weighted(&x, &[0, 1], &[1.0])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Number of samples in y and sample_weight must match"
    );
}

#[test]
fn test_tree_fit_rejects_empty() {
    let x = Matrix::from_vec(0, 1, vec![]).expect("matrix");
    let err = DecisionTreeClassifier::new().fit(&x, &[]).unwrap_err();
    assert_eq!(err, "Cannot fit with zero samples");
}

#[test]
#[should_panic(expected = "Model not fitted yet")]
fn test_tree_predict_unfitted_panics() {
    let x = Matrix::from_vec(1, 1, vec![1.0]).expect("matrix");
    DecisionTreeClassifier::new().predict(&x);
}

#[test]
#[should_panic(expected = "Feature count mismatch")]
fn test_tree_predict_feature_mismatch_panics() {
    let x = Matrix::from_vec(2, 2, vec![1.0, 2.0, 8.0, 9.0]).expect("matrix");
    let mut clf = DecisionTreeClassifier::new();
    clf.fit(&x, &[0, 1]).expect("fit");

    let probe = Matrix::from_vec(1, 1, vec![1.0]).expect("matrix");
    clf.predict(&probe);
}

#[test]
fn test_tree_score() {
    let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 8.0, 9.0]).expect("matrix");
    let y = vec![0, 0, 1, 1];

    let mut clf = DecisionTreeClassifier::new();
    clf.fit(&x, &y).expect("fit");

    assert!((clf.score(&x, &y) - 1.0).abs() < 1e-6);
    assert!((clf.score(&x, &[1, 0, 1, 1]) - 0.5).abs() < 1e-6);
}

// ========================================================================
// Class Weight Tests
// ========================================================================

#[test]
fn test_class_weight_default_is_uniform() {
    assert_eq!(ClassWeight::default(), ClassWeight::Uniform);
}

// ========================================================================
// Random Forest Tests
// ========================================================================

#[test]
fn test_forest_fit_predict_clusters() {
    let (x, y) = separable_clusters();

    let mut forest = RandomForestClassifier::new(25).with_random_state(42);
    forest.fit(&x, &y).expect("fit");

    let probe = Matrix::from_vec(2, 1, vec![0.3, 10.3]).expect("matrix");
    assert_eq!(forest.predict(&probe), vec![0, 1]);
    assert!((forest.score(&x, &y) - 1.0).abs() < 1e-6);
}

#[test]
fn test_forest_reproducible_with_same_seed() {
    let (x, y) = separable_clusters();

    let mut a = RandomForestClassifier::new(10).with_random_state(7);
    let mut b = RandomForestClassifier::new(10).with_random_state(7);
    a.fit(&x, &y).expect("fit");
    b.fit(&x, &y).expect("fit");

    assert_eq!(a.predict(&x), b.predict(&x));
}

#[test]
fn test_forest_balanced_weights_on_imbalanced_data() {
    // 12 negatives, 3 positives, still separable.
    let mut data = Vec::with_capacity(15);
    for i in 0..12 {
        data.push(i as f32 * 0.1);
    }
    for i in 0..3 {
        data.push(10.0 + i as f32 * 0.1);
    }
    let x = Matrix::from_vec(15, 1, data).expect("matrix");
    let mut y = vec![0; 12];
    y.extend_from_slice(&[1, 1, 1]);

    let mut forest = RandomForestClassifier::new(25)
        .with_class_weight(ClassWeight::Balanced)
        .with_random_state(42);
    forest.fit(&x, &y).expect("fit");

    let probe = Matrix::from_vec(2, 1, vec![0.5, 10.1]).expect("matrix");
    assert_eq!(forest.predict(&probe), vec![0, 1]);
}

#[test]
fn test_forest_predict_proba_rows_sum_to_one() {
    let (x, y) = separable_clusters();

    let mut forest = RandomForestClassifier::new(15).with_random_state(3);
    forest.fit(&x, &y).expect("fit");

    let proba = forest.predict_proba(&x);
    assert_eq!(proba.shape(), (16, 2));

    let predictions = forest.predict(&x);
    for row in 0..16 {
        let p0 = proba.get(row, 0);
        let p1 = proba.get(row, 1);
        assert!((p0 + p1 - 1.0).abs() < 1e-6);

        let argmax = usize::from(p1 > p0);
        assert_eq!(argmax, predictions[row]);
    }
}

#[test]
fn test_forest_zero_estimators_rejected() {
    let (x, y) = separable_clusters();
    let err = RandomForestClassifier::new(0).fit(&x, &y).unwrap_err();
    assert!(matches!(err, IctusError::InvalidHyperparameter { .. }));
    assert!(err.to_string().contains("n_estimators"));
}

#[test]
fn test_forest_rejects_length_mismatch() {
    let x = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).expect("matrix");
    let err = RandomForestClassifier::new(5).fit(&x, &[0, 1]).unwrap_err();
    assert_eq!(err, "Number of samples in X and y must match");
}

#[test]
fn test_forest_rejects_empty() {
    let x = Matrix::from_vec(0, 1, vec![]).expect("matrix");
    let err = RandomForestClassifier::new(5).fit(&x, &[]).unwrap_err();
    assert_eq!(err, "Cannot fit with zero samples");
}

#[test]
fn test_forest_is_fitted_lifecycle() {
    let (x, y) = separable_clusters();

    let mut forest = RandomForestClassifier::new(5).with_random_state(1);
    assert!(!forest.is_fitted());
    assert_eq!(forest.n_estimators(), 5);

    forest.fit(&x, &y).expect("fit");
    assert!(forest.is_fitted());
}

#[test]
fn test_forest_max_depth_applies_to_trees() {
    let (x, y) = separable_clusters();

    let mut forest = RandomForestClassifier::new(5)
        .with_max_depth(1)
        .with_random_state(9);
    forest.fit(&x, &y).expect("fit");

    for tree in &forest.trees {
        assert!(tree.tree.as_ref().expect("tree").depth() <= 1);
    }
}

#[test]
fn test_forest_serde_roundtrip() {
    let (x, y) = separable_clusters();

    let mut forest = RandomForestClassifier::new(10).with_random_state(42);
    forest.fit(&x, &y).expect("fit");

    let bytes = bincode::serialize(&forest).expect("serialize");
    let restored: RandomForestClassifier = bincode::deserialize(&bytes).expect("deserialize");

    assert!(restored.is_fitted());
    assert_eq!(restored.predict(&x), forest.predict(&x));
}

// ========================================================================
// Bootstrap Sampling Tests
// ========================================================================

#[test]
fn test_bootstrap_sample_size_and_range() {
    let indices = bootstrap_sample(10, Some(42));
    assert_eq!(indices.len(), 10);
    assert!(indices.iter().all(|&i| i < 10));
}

#[test]
fn test_bootstrap_sample_seeded_reproducible() {
    assert_eq!(bootstrap_sample(20, Some(5)), bootstrap_sample(20, Some(5)));
}

#[test]
fn test_bootstrap_sample_seeds_differ() {
    assert_ne!(bootstrap_sample(20, Some(1)), bootstrap_sample(20, Some(2)));
}
