//! Dataset splitting for model evaluation.
//!
//! Provides a stratified train/test split: each label class contributes a
//! proportional share to the test side, so a rare positive class is present
//! in both splits even on heavily imbalanced data.

use crate::primitives::Matrix;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;

/// Validates inputs for `train_test_split`.
fn validate_split_inputs(x: &Matrix<f32>, y: &[usize], test_size: f32) -> Result<(), String> {
    if test_size <= 0.0 || test_size >= 1.0 {
        return Err(format!(
            "test_size must be between 0 and 1, got {test_size}"
        ));
    }

    let (n_samples, _) = x.shape();
    if n_samples != y.len() {
        return Err(format!(
            "X and y must have same number of samples, got {} and {}",
            n_samples,
            y.len()
        ));
    }

    if n_samples == 0 {
        return Err("Cannot split an empty dataset".to_string());
    }

    Ok(())
}

/// Groups sample indices by label, in ascending label order.
fn class_index_pools(y: &[usize]) -> BTreeMap<usize, Vec<usize>> {
    let mut pools: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (idx, &label) in y.iter().enumerate() {
        pools.entry(label).or_default().push(idx);
    }
    pools
}

/// Extracts the rows and labels selected by `indices`.
fn extract_samples(x: &Matrix<f32>, y: &[usize], indices: &[usize]) -> (Matrix<f32>, Vec<usize>) {
    let n_features = x.shape().1;
    let mut x_data = Vec::with_capacity(indices.len() * n_features);
    let mut y_data = Vec::with_capacity(indices.len());

    for &idx in indices {
        for j in 0..n_features {
            x_data.push(x.get(idx, j));
        }
        y_data.push(y[idx]);
    }

    let x_subset =
        Matrix::from_vec(indices.len(), n_features, x_data).expect("Failed to create matrix");

    (x_subset, y_data)
}

/// Split arrays into random train and test subsets, stratified by label.
///
/// Per label class, indices are shuffled and a proportional share (rounded,
/// but at least one row per side) goes to the test set. The assembled train
/// and test orders are shuffled again so rows are not grouped by class.
///
/// # Arguments
///
/// * `x` - Feature matrix
/// * `y` - Class labels, one per row of `x`
/// * `test_size` - Proportion of dataset to include in test split (0.0 to 1.0)
/// * `random_state` - Optional random seed for reproducibility
///
/// # Returns
///
/// Tuple of (x_train, x_test, y_train, y_test)
///
/// # Errors
///
/// Returns an error if `test_size` is out of range, lengths disagree, the
/// dataset is empty, or any class has fewer than two members.
///
/// # Example
///
/// ```rust
/// use ictus::model_selection::train_test_split;
/// use ictus::primitives::Matrix;
///
/// let x = Matrix::from_vec(10, 2, (0..20).map(|i| i as f32).collect()).expect("Matrix creation should succeed with valid dimensions and data");
/// let y = vec![0, 1, 0, 1, 0, 1, 0, 1, 0, 1];
///
/// let (x_train, x_test, y_train, y_test) = train_test_split(&x, &y, 0.2, Some(42)).expect("Train/test split should succeed with valid inputs");
/// assert_eq!(x_train.shape().0, 8);  // 80% training
/// assert_eq!(x_test.shape().0, 2);   // 20% test
/// ```
#[allow(clippy::type_complexity)]
pub fn train_test_split(
    x: &Matrix<f32>,
    y: &[usize],
    test_size: f32,
    random_state: Option<u64>,
) -> Result<(Matrix<f32>, Matrix<f32>, Vec<usize>, Vec<usize>), String> {
    validate_split_inputs(x, y, test_size)?;

    let mut rng = match random_state {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut train_indices = Vec::new();
    let mut test_indices = Vec::new();

    for (label, mut pool) in class_index_pools(y) {
        if pool.len() < 2 {
            return Err(format!(
                "Stratified split requires at least 2 samples per class, class {label} has {}",
                pool.len()
            ));
        }

        pool.shuffle(&mut rng);
        let n_test = (pool.len() as f32 * test_size).round() as usize;
        let n_test = n_test.clamp(1, pool.len() - 1);

        test_indices.extend_from_slice(&pool[..n_test]);
        train_indices.extend_from_slice(&pool[n_test..]);
    }

    // Undo the class grouping left by the per-class pools.
    train_indices.shuffle(&mut rng);
    test_indices.shuffle(&mut rng);

    let (x_train, y_train) = extract_samples(x, y, &train_indices);
    let (x_test, y_test) = extract_samples(x, y, &test_indices);

    Ok((x_train, x_test, y_train, y_test))
}
