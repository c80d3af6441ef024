//! Helper functions for tree building algorithms.
//!
//! This module contains internal helper functions used by the decision tree
//! and the random forest. All impurity computations are weighted: each
//! sample carries a weight, so class-balanced fitting reduces to passing
//! per-sample weights derived from class frequencies.

use super::{Leaf, Node, TreeNode};
use crate::primitives::Matrix;
use std::collections::BTreeMap;

/// Per-sample weights implementing a class weighting policy.
///
/// Balanced weighting follows n_samples / (n_classes * count(class)), so
/// every class contributes equal total mass regardless of frequency.
pub(super) fn compute_sample_weights(y: &[usize], balanced: bool) -> Vec<f32> {
    if !balanced || y.is_empty() {
        return vec![1.0; y.len()];
    }

    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for &label in y {
        *counts.entry(label).or_insert(0) += 1;
    }

    let n = y.len() as f32;
    let k = counts.len() as f32;
    let weight_of: BTreeMap<usize, f32> = counts
        .into_iter()
        .map(|(label, count)| (label, n / (k * count as f32)))
        .collect();

    y.iter().map(|label| weight_of[label]).collect()
}

/// Total weight mass per class (BTreeMap for deterministic iteration order).
fn class_masses(y: &[usize], w: &[f32]) -> BTreeMap<usize, f32> {
    let mut masses = BTreeMap::new();
    for (&label, &weight) in y.iter().zip(w.iter()) {
        *masses.entry(label).or_insert(0.0) += weight;
    }
    masses
}

/// Calculate weighted Gini impurity for a set of labels.
///
/// Gini impurity measures the probability of incorrectly classifying a
/// randomly chosen element if it were labeled according to the (weighted)
/// distribution of labels.
///
/// Formula: Gini = 1 - `Σ(p_i²)` where `p_i` is the weight share of class i
pub fn gini_impurity(y: &[usize], w: &[f32]) -> f32 {
    if y.is_empty() {
        return 0.0;
    }

    let masses = class_masses(y, w);
    let total: f32 = masses.values().sum();
    if total <= 0.0 {
        return 0.0;
    }

    let mut gini = 1.0;
    for mass in masses.values() {
        let p = mass / total;
        gini -= p * p;
    }

    gini
}

/// Calculate the mass-weighted Gini impurity of a split.
pub fn gini_split(
    left_y: &[usize],
    left_w: &[f32],
    right_y: &[usize],
    right_w: &[f32],
) -> f32 {
    let mass_left: f32 = left_w.iter().sum();
    let mass_right: f32 = right_w.iter().sum();
    let mass_total = mass_left + mass_right;

    if mass_total <= 0.0 {
        return 0.0;
    }

    let weight_left = mass_left / mass_total;
    let weight_right = mass_right / mass_total;

    weight_left * gini_impurity(left_y, left_w) + weight_right * gini_impurity(right_y, right_w)
}

/// Get sorted unique values from feature data.
pub(super) fn get_sorted_unique_values(x: &[f32]) -> Vec<f32> {
    let mut sorted_indices: Vec<usize> = (0..x.len()).collect();
    sorted_indices.sort_by(|&a, &b| {
        x[a].partial_cmp(&x[b])
            .expect("f32 values should be comparable")
    });

    let mut unique_values = Vec::new();
    let mut prev_val = x[sorted_indices[0]];
    unique_values.push(prev_val);

    for &idx in sorted_indices.get(1..).unwrap_or(&[]) {
        if (x[idx] - prev_val).abs() > 1e-10 {
            unique_values.push(x[idx]);
            prev_val = x[idx];
        }
    }

    unique_values
}

/// Split labels and weights into left/right partitions based on threshold.
///
/// Returns None if either side would be empty.
#[allow(clippy::type_complexity)]
pub(super) fn split_labels_by_threshold(
    x: &[f32],
    y: &[usize],
    w: &[f32],
    threshold: f32,
) -> Option<(Vec<usize>, Vec<f32>, Vec<usize>, Vec<f32>)> {
    let mut left_y = Vec::new();
    let mut left_w = Vec::new();
    let mut right_y = Vec::new();
    let mut right_w = Vec::new();

    for (idx, &val) in x.iter().enumerate() {
        if val <= threshold {
            left_y.push(y[idx]);
            left_w.push(w[idx]);
        } else {
            right_y.push(y[idx]);
            right_w.push(w[idx]);
        }
    }

    if left_y.is_empty() || right_y.is_empty() {
        None
    } else {
        Some((left_y, left_w, right_y, right_w))
    }
}

/// Find the best split for a given feature.
///
/// Tries the midpoint between each pair of adjacent unique values and
/// returns the (threshold, gain) with the largest impurity decrease.
pub(super) fn find_best_split_for_feature(
    x: &[f32],
    y: &[usize],
    w: &[f32],
) -> Option<(f32, f32)> {
    if x.len() < 2 {
        return None;
    }

    let unique_values = get_sorted_unique_values(x);
    if unique_values.len() < 2 {
        return None;
    }

    let current_impurity = gini_impurity(y, w);
    let mut best_gain = 0.0;
    let mut best_threshold = 0.0;

    for i in 0..unique_values.len() - 1 {
        let threshold = (unique_values[i] + unique_values[i + 1]) / 2.0;

        if let Some((left_y, left_w, right_y, right_w)) =
            split_labels_by_threshold(x, y, w, threshold)
        {
            let gain = current_impurity - gini_split(&left_y, &left_w, &right_y, &right_w);

            if gain > best_gain {
                best_gain = gain;
                best_threshold = threshold;
            }
        }
    }

    if best_gain > 0.0 {
        Some((best_threshold, best_gain))
    } else {
        None
    }
}

/// Find the best split across all features.
pub(super) fn find_best_split(
    x_matrix: &Matrix<f32>,
    y: &[usize],
    w: &[f32],
) -> Option<(usize, f32, f32)> {
    let (n_samples, n_features) = x_matrix.shape();

    if n_samples < 2 {
        return None;
    }

    let mut best_gain = 0.0;
    let mut best_feature = 0;
    let mut best_threshold = 0.0;

    for feature_idx in 0..n_features {
        let mut feature_values = Vec::with_capacity(n_samples);
        for row in 0..n_samples {
            feature_values.push(x_matrix.get(row, feature_idx));
        }

        if let Some((threshold, gain)) = find_best_split_for_feature(&feature_values, y, w) {
            if gain > best_gain {
                best_gain = gain;
                best_feature = feature_idx;
                best_threshold = threshold;
            }
        }
    }

    if best_gain > 0.0 {
        Some((best_feature, best_threshold, best_gain))
    } else {
        None
    }
}

/// Find the class with the largest weight mass.
pub(super) fn majority_class(y: &[usize], w: &[f32]) -> usize {
    let masses = class_masses(y, w);
    // BTreeMap iterates in key order, so ties break toward the lowest class.
    let mut best_class = 0;
    let mut best_mass = f32::NEG_INFINITY;
    for (class, mass) in masses {
        if mass > best_mass {
            best_mass = mass;
            best_class = class;
        }
    }
    best_class
}

/// Split data into subsets based on indices.
pub(super) fn split_data_by_indices(
    x: &Matrix<f32>,
    y: &[usize],
    w: &[f32],
    indices: &[usize],
) -> (Matrix<f32>, Vec<usize>, Vec<f32>) {
    let n_cols = x.shape().1;
    let mut data = Vec::with_capacity(indices.len() * n_cols);
    let mut labels = Vec::with_capacity(indices.len());
    let mut weights = Vec::with_capacity(indices.len());

    for &idx in indices {
        for col in 0..n_cols {
            data.push(x.get(idx, col));
        }
        labels.push(y[idx]);
        weights.push(w[idx]);
    }

    let matrix = Matrix::from_vec(indices.len(), n_cols, data)
        .expect("matrix creation should succeed with valid indices");
    (matrix, labels, weights)
}

/// Check if tree building should stop at this node.
pub(super) fn check_stopping_criteria(
    y: &[usize],
    w: &[f32],
    depth: usize,
    max_depth: Option<usize>,
) -> Option<TreeNode> {
    let n_samples = y.len();

    // Criterion 1: All same label (pure node)
    if y.iter().all(|&label| label == y[0]) {
        return Some(TreeNode::Leaf(Leaf {
            class_label: y[0],
            n_samples,
        }));
    }

    // Criterion 2: Max depth reached
    if let Some(max_d) = max_depth {
        if depth >= max_d {
            return Some(TreeNode::Leaf(Leaf {
                class_label: majority_class(y, w),
                n_samples,
            }));
        }
    }

    None
}

/// Split data indices based on feature threshold.
pub(super) fn split_indices_by_threshold(
    x: &Matrix<f32>,
    feature_idx: usize,
    threshold: f32,
    n_samples: usize,
) -> Option<(Vec<usize>, Vec<usize>)> {
    let mut left_indices = Vec::new();
    let mut right_indices = Vec::new();

    for row in 0..n_samples {
        if x.get(row, feature_idx) <= threshold {
            left_indices.push(row);
        } else {
            right_indices.push(row);
        }
    }

    if left_indices.is_empty() || right_indices.is_empty() {
        None
    } else {
        Some((left_indices, right_indices))
    }
}

/// Build a decision tree recursively.
pub(super) fn build_tree(
    x: &Matrix<f32>,
    y: &[usize],
    w: &[f32],
    depth: usize,
    max_depth: Option<usize>,
) -> TreeNode {
    let n_samples = y.len();

    if let Some(leaf) = check_stopping_criteria(y, w, depth, max_depth) {
        return leaf;
    }

    let Some((feature_idx, threshold, _gain)) = find_best_split(x, y, w) else {
        return TreeNode::Leaf(Leaf {
            class_label: majority_class(y, w),
            n_samples,
        });
    };

    let Some((left_indices, right_indices)) =
        split_indices_by_threshold(x, feature_idx, threshold, n_samples)
    else {
        return TreeNode::Leaf(Leaf {
            class_label: majority_class(y, w),
            n_samples,
        });
    };

    let (left_matrix, left_labels, left_weights) = split_data_by_indices(x, y, w, &left_indices);
    let (right_matrix, right_labels, right_weights) =
        split_data_by_indices(x, y, w, &right_indices);

    let left_child = build_tree(&left_matrix, &left_labels, &left_weights, depth + 1, max_depth);
    let right_child = build_tree(
        &right_matrix,
        &right_labels,
        &right_weights,
        depth + 1,
        max_depth,
    );

    TreeNode::Node(Node {
        feature_idx,
        threshold,
        left: Box::new(left_child),
        right: Box::new(right_child),
    })
}

#[cfg(test)]
#[path = "helpers_tests.rs"]
mod tests;
