//! Classification metrics for evaluating classifier performance.
//!
//! Provides accuracy, precision, recall, F1-score, and confusion matrix
//! computation for binary classification. Class label 1 is the positive
//! class; any other label counts as negative.

use crate::primitives::Matrix;

/// Compute classification accuracy.
///
/// accuracy = `correct_predictions` / `total_predictions`
///
/// # Arguments
///
/// * `y_pred` - Predicted class labels
/// * `y_true` - True class labels
///
/// # Returns
///
/// Accuracy score between 0.0 and 1.0
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
///
/// # Examples
///
/// ```
/// use ictus::metrics::classification::accuracy;
///
/// let y_true = vec![0, 1, 0, 1];
/// let y_pred = vec![0, 1, 1, 1];
/// let acc = accuracy(&y_pred, &y_true);
/// assert!((acc - 0.75).abs() < 1e-6);
/// ```
#[must_use]
pub fn accuracy(y_pred: &[usize], y_true: &[usize]) -> f32 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let correct = y_pred
        .iter()
        .zip(y_true.iter())
        .filter(|(p, t)| p == t)
        .count();

    correct as f32 / y_true.len() as f32
}

/// Compute precision for the positive class.
///
/// precision = TP / (TP + FP)
///
/// Returns 0.0 when nothing was predicted positive.
///
/// # Arguments
///
/// * `y_pred` - Predicted class labels
/// * `y_true` - True class labels
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
///
/// # Examples
///
/// ```
/// use ictus::metrics::classification::precision;
///
/// let y_true = vec![0, 1, 0, 1];
/// let y_pred = vec![0, 1, 1, 1];
/// let prec = precision(&y_pred, &y_true);
/// assert!((prec - 2.0 / 3.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn precision(y_pred: &[usize], y_true: &[usize]) -> f32 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let (tp, fp, _) = compute_binary_counts(y_pred, y_true);

    if tp + fp == 0 {
        0.0
    } else {
        tp as f32 / (tp + fp) as f32
    }
}

/// Compute recall for the positive class.
///
/// recall = TP / (TP + FN)
///
/// Returns 0.0 when the positive class has no true instances.
///
/// # Arguments
///
/// * `y_pred` - Predicted class labels
/// * `y_true` - True class labels
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
///
/// # Examples
///
/// ```
/// use ictus::metrics::classification::recall;
///
/// let y_true = vec![0, 1, 0, 1];
/// let y_pred = vec![0, 1, 1, 1];
/// let rec = recall(&y_pred, &y_true);
/// assert!((rec - 1.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn recall(y_pred: &[usize], y_true: &[usize]) -> f32 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let (tp, _, fn_count) = compute_binary_counts(y_pred, y_true);

    if tp + fn_count == 0 {
        0.0
    } else {
        tp as f32 / (tp + fn_count) as f32
    }
}

/// Compute F1 score (harmonic mean of precision and recall).
///
/// F1 = 2 * (precision * recall) / (precision + recall)
///
/// Returns 0.0 when both precision and recall are 0.0.
///
/// # Arguments
///
/// * `y_pred` - Predicted class labels
/// * `y_true` - True class labels
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
///
/// # Examples
///
/// ```
/// use ictus::metrics::classification::f1_score;
///
/// let y_true = vec![0, 1, 0, 1];
/// let y_pred = vec![0, 1, 1, 1];
/// let f1 = f1_score(&y_pred, &y_true);
/// assert!((f1 - 0.8).abs() < 1e-6);
/// ```
#[must_use]
pub fn f1_score(y_pred: &[usize], y_true: &[usize]) -> f32 {
    let prec = precision(y_pred, y_true);
    let rec = recall(y_pred, y_true);

    if prec + rec == 0.0 {
        0.0
    } else {
        2.0 * prec * rec / (prec + rec)
    }
}

/// Compute confusion matrix.
///
/// Returns a matrix where element `[i,j]` is the count of samples
/// with true label i and predicted label j. The matrix is at least
/// 2x2 so both binary classes always have a row and column.
///
/// # Arguments
///
/// * `y_pred` - Predicted class labels
/// * `y_true` - True class labels
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
///
/// # Examples
///
/// ```
/// use ictus::metrics::classification::confusion_matrix;
///
/// let y_true = vec![0, 0, 1, 1];
/// let y_pred = vec![0, 1, 1, 1];
/// let cm = confusion_matrix(&y_pred, &y_true);
/// assert_eq!(cm.get(0, 0), 1);
/// assert_eq!(cm.get(0, 1), 1);
/// assert_eq!(cm.get(1, 0), 0);
/// assert_eq!(cm.get(1, 1), 2);
/// ```
#[must_use]
pub fn confusion_matrix(y_pred: &[usize], y_true: &[usize]) -> Matrix<usize> {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let n_classes = y_true
        .iter()
        .chain(y_pred.iter())
        .max()
        .map_or(0, |&m| m + 1)
        .max(2);

    let mut data = vec![0usize; n_classes * n_classes];

    for (&true_label, &pred_label) in y_true.iter().zip(y_pred.iter()) {
        data[true_label * n_classes + pred_label] += 1;
    }

    Matrix::from_vec(n_classes, n_classes, data)
        .expect("Confusion matrix dimensions match data length")
}

/// Helper function to compute TP, FP, FN for the positive class.
fn compute_binary_counts(y_pred: &[usize], y_true: &[usize]) -> (usize, usize, usize) {
    let mut tp = 0;
    let mut fp = 0;
    let mut fn_count = 0;

    for (&pred, &truth) in y_pred.iter().zip(y_true.iter()) {
        match (pred == 1, truth == 1) {
            (true, true) => tp += 1,
            (true, false) => fp += 1,
            (false, true) => fn_count += 1,
            (false, false) => {}
        }
    }

    (tp, fp, fn_count)
}

#[cfg(test)]
#[path = "classification_tests.rs"]
mod tests;
