//! Decision tree and ensemble classifiers.
//!
//! This module implements:
//! - CART (Classification and Regression Trees) using Gini impurity
//! - Class-weighted tree growing for imbalanced data
//! - Random Forest ensemble classifier with bootstrap aggregation
//!
//! # Example
//!
//! ```
//! use ictus::primitives::Matrix;
//! use ictus::tree::DecisionTreeClassifier;
//!
//! let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 8.0, 9.0]).unwrap();
//! let y = vec![0, 0, 1, 1];
//!
//! let mut tree = DecisionTreeClassifier::new().with_max_depth(3);
//! tree.fit(&x, &y).unwrap();
//!
//! assert_eq!(tree.predict(&x), vec![0, 0, 1, 1]);
//! ```

use crate::error::{IctusError, Result};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};

mod helpers;

use helpers::{build_tree, compute_sample_weights};

/// Internal node in a decision tree.
///
/// Contains a split condition (feature and threshold) and pointers to
/// left and right subtrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Index of the feature to split on
    pub feature_idx: usize,
    /// Threshold value for the split
    pub threshold: f32,
    /// Left subtree (samples where feature <= threshold)
    pub left: Box<TreeNode>,
    /// Right subtree (samples where feature > threshold)
    pub right: Box<TreeNode>,
}

/// Leaf node in a decision tree.
///
/// Contains the predicted class label and number of training samples
/// that reached this leaf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaf {
    /// Predicted class label for this leaf
    pub class_label: usize,
    /// Number of training samples in this leaf
    pub n_samples: usize,
}

/// A node in a decision tree (either internal node or leaf).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Internal decision node with split condition
    Node(Node),
    /// Leaf node with class prediction
    Leaf(Leaf),
}

impl TreeNode {
    /// Returns the depth of the tree rooted at this node.
    ///
    /// Leaf nodes have depth 0, internal nodes have depth 1 + max(left, right).
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Node(node) => 1 + node.left.depth().max(node.right.depth()),
        }
    }
}

/// Weighting applied to training samples when growing trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClassWeight {
    /// Every sample carries weight 1.0.
    #[default]
    Uniform,
    /// Samples of class c carry weight n_samples / (n_classes * count(c)),
    /// giving every class the same total mass.
    Balanced,
}

/// Decision tree classifier using the CART algorithm.
///
/// Uses Gini impurity over sample masses as the splitting criterion, so
/// per-sample weights shift both split selection and leaf labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    tree: Option<TreeNode>,
    max_depth: Option<usize>,
    /// Number of features the model was trained on (for validation)
    #[serde(default)]
    n_features: Option<usize>,
}

impl DecisionTreeClassifier {
    /// Creates a new decision tree classifier with default parameters.
    pub fn new() -> Self {
        Self {
            tree: None,
            max_depth: None,
            n_features: None,
        }
    }

    /// Sets the maximum depth of the tree.
    ///
    /// # Arguments
    ///
    /// * `depth` - Maximum depth (root has depth 0)
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Fits the decision tree to training data with uniform sample weights.
    ///
    /// # Arguments
    ///
    /// * `x` - Training features (n_samples × n_features)
    /// * `y` - Training labels (n_samples class indices)
    ///
    /// # Errors
    ///
    /// Returns an error if the data is invalid.
    pub fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()> {
        self.fit_weighted(x, y, &vec![1.0; y.len()])
    }

    /// Fits the decision tree with explicit per-sample weights.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is invalid or lengths disagree.
    pub fn fit_weighted(
        &mut self,
        x: &Matrix<f32>,
        y: &[usize],
        sample_weight: &[f32],
    ) -> Result<()> {
        let (n_rows, n_cols) = x.shape();
        if n_rows != y.len() {
            return Err("Number of samples in X and y must match".into());
        }
        if y.len() != sample_weight.len() {
            return Err("Number of samples in y and sample_weight must match".into());
        }
        if n_rows == 0 {
            return Err("Cannot fit with zero samples".into());
        }

        self.n_features = Some(n_cols);
        self.tree = Some(build_tree(x, y, sample_weight, 0, self.max_depth));
        Ok(())
    }

    /// Predicts class labels for samples.
    ///
    /// # Arguments
    ///
    /// * `x` - Feature matrix (n_samples × n_features)
    ///
    /// # Returns
    ///
    /// Vector of predicted class labels
    ///
    /// # Panics
    ///
    /// Panics if called before fit() or if feature count doesn't match training data
    pub fn predict(&self, x: &Matrix<f32>) -> Vec<usize> {
        let (n_samples, n_features) = x.shape();

        // Validate feature count matches what we trained on
        if let Some(expected) = self.n_features {
            assert!(
                n_features == expected,
                "Feature count mismatch: model was trained with {expected} features but input has {n_features} features"
            );
        }

        let mut predictions = Vec::with_capacity(n_samples);

        for row in 0..n_samples {
            predictions.push(self.predict_one(x.row_slice(row)));
        }

        predictions
    }

    /// Predicts the class label for a single sample.
    fn predict_one(&self, x: &[f32]) -> usize {
        let tree = self.tree.as_ref().expect("Model not fitted yet");

        let mut node = tree;
        loop {
            match node {
                TreeNode::Leaf(leaf) => return leaf.class_label,
                TreeNode::Node(internal) => {
                    if x[internal.feature_idx] <= internal.threshold {
                        node = &internal.left;
                    } else {
                        node = &internal.right;
                    }
                }
            }
        }
    }

    /// Computes the accuracy score on test data.
    ///
    /// # Arguments
    ///
    /// * `x` - Test features (n_samples × n_features)
    /// * `y` - True labels (n_samples)
    ///
    /// # Returns
    ///
    /// Accuracy (fraction of correct predictions)
    pub fn score(&self, x: &Matrix<f32>, y: &[usize]) -> f32 {
        let predictions = self.predict(x);
        let correct = predictions
            .iter()
            .zip(y.iter())
            .filter(|(pred, true_label)| pred == true_label)
            .count();
        correct as f32 / y.len() as f32
    }
}

impl Default for DecisionTreeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Random Forest classifier - an ensemble of decision trees.
///
/// Combines multiple decision trees trained on bootstrap samples to
/// reduce overfitting. Class-balanced sample weights are computed once
/// on the training set and carried into every bootstrap sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    trees: Vec<DecisionTreeClassifier>,
    n_estimators: usize,
    max_depth: Option<usize>,
    class_weight: ClassWeight,
    random_state: Option<u64>,
    /// Number of classes seen during fit (for probability output)
    #[serde(default)]
    n_classes: Option<usize>,
}

impl RandomForestClassifier {
    /// Creates a new Random Forest classifier.
    ///
    /// # Arguments
    ///
    /// * `n_estimators` - Number of trees in the forest
    pub fn new(n_estimators: usize) -> Self {
        Self {
            trees: Vec::new(),
            n_estimators,
            max_depth: None,
            class_weight: ClassWeight::Uniform,
            random_state: None,
            n_classes: None,
        }
    }

    /// Sets the maximum depth for each tree.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Sets the class weighting scheme.
    pub fn with_class_weight(mut self, class_weight: ClassWeight) -> Self {
        self.class_weight = class_weight;
        self
    }

    /// Sets the random state for reproducibility.
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// Returns the configured number of trees.
    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    /// Returns true once the forest has been fitted.
    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Fits the random forest to training data.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is invalid or `n_estimators` is zero.
    pub fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()> {
        let (n_samples, n_features) = x.shape();
        if self.n_estimators == 0 {
            return Err(IctusError::InvalidHyperparameter {
                param: "n_estimators".to_string(),
                value: "0".to_string(),
                constraint: ">0".to_string(),
            });
        }
        if n_samples != y.len() {
            return Err("Number of samples in X and y must match".into());
        }
        if n_samples == 0 {
            return Err("Cannot fit with zero samples".into());
        }

        let weights =
            compute_sample_weights(y, matches!(self.class_weight, ClassWeight::Balanced));
        self.n_classes = y.iter().max().map(|&m| m + 1);
        self.trees = Vec::with_capacity(self.n_estimators);

        // Train each tree on a bootstrap sample
        for i in 0..self.n_estimators {
            let seed = self.random_state.map(|s| s + i as u64);
            let bootstrap_indices = bootstrap_sample(n_samples, seed);

            // Extract bootstrap sample, carrying each row's weight with it
            let mut bootstrap_x_data = Vec::with_capacity(n_samples * n_features);
            let mut bootstrap_y = Vec::with_capacity(n_samples);
            let mut bootstrap_w = Vec::with_capacity(n_samples);

            for &idx in &bootstrap_indices {
                bootstrap_x_data.extend_from_slice(x.row_slice(idx));
                bootstrap_y.push(y[idx]);
                bootstrap_w.push(weights[idx]);
            }

            let bootstrap_x = Matrix::from_vec(n_samples, n_features, bootstrap_x_data)
                .map_err(|_| "Failed to create bootstrap matrix")?;

            // Create and train a decision tree
            let mut tree = if let Some(max_depth) = self.max_depth {
                DecisionTreeClassifier::new().with_max_depth(max_depth)
            } else {
                DecisionTreeClassifier::new()
            };

            tree.fit_weighted(&bootstrap_x, &bootstrap_y, &bootstrap_w)?;
            self.trees.push(tree);
        }

        Ok(())
    }

    /// Makes predictions for input data using majority voting.
    ///
    /// Ties break toward the lowest class label.
    pub fn predict(&self, x: &Matrix<f32>) -> Vec<usize> {
        let n_samples = x.shape().0;
        let n_classes = self.n_classes.unwrap_or(2);

        // Each tree predicts the whole batch once
        let per_tree: Vec<Vec<usize>> =
            self.trees.iter().map(|tree| tree.predict(x)).collect();

        let mut predictions = Vec::with_capacity(n_samples);
        for sample_idx in 0..n_samples {
            let mut votes = vec![0usize; n_classes];
            for tree_predictions in &per_tree {
                let class = tree_predictions[sample_idx];
                if class < n_classes {
                    votes[class] += 1;
                }
            }

            // Scanning in class order keeps ties deterministic.
            let mut predicted_class = 0;
            let mut max_votes = 0;
            for (class, &count) in votes.iter().enumerate() {
                if count > max_votes {
                    max_votes = count;
                    predicted_class = class;
                }
            }

            predictions.push(predicted_class);
        }

        predictions
    }

    /// Predict class probabilities for input features.
    ///
    /// Returns probability distribution over classes based on
    /// vote proportions across trees in the forest.
    ///
    /// # Returns
    ///
    /// `Matrix<f32>` with shape `(n_samples, n_classes)` where each row
    /// sums to 1.0.
    pub fn predict_proba(&self, x: &Matrix<f32>) -> Matrix<f32> {
        let n_samples = x.shape().0;
        let n_classes = self.n_classes.unwrap_or(2);
        let n_trees = self.trees.len() as f32;

        let per_tree: Vec<Vec<usize>> =
            self.trees.iter().map(|tree| tree.predict(x)).collect();

        let mut proba_data = vec![0.0f32; n_samples * n_classes];
        for sample_idx in 0..n_samples {
            let mut votes = vec![0usize; n_classes];
            for tree_predictions in &per_tree {
                let class = tree_predictions[sample_idx];
                if class < n_classes {
                    votes[class] += 1;
                }
            }

            for (class_idx, &count) in votes.iter().enumerate() {
                proba_data[sample_idx * n_classes + class_idx] = count as f32 / n_trees;
            }
        }

        Matrix::from_vec(n_samples, n_classes, proba_data)
            .expect("Matrix creation should succeed")
    }

    /// Calculates accuracy score on test data.
    pub fn score(&self, x: &Matrix<f32>, y: &[usize]) -> f32 {
        let predictions = self.predict(x);
        let correct = predictions
            .iter()
            .zip(y.iter())
            .filter(|(pred, true_label)| pred == true_label)
            .count();
        correct as f32 / y.len() as f32
    }
}

/// Creates a bootstrap sample (random sample with replacement).
///
/// Returns indices of samples to include in the bootstrap sample.
fn bootstrap_sample(n_samples: usize, random_state: Option<u64>) -> Vec<usize> {
    use rand::distributions::{Distribution, Uniform};
    use rand::SeedableRng;

    let dist = Uniform::from(0..n_samples);

    let mut indices = Vec::with_capacity(n_samples);

    if let Some(seed) = random_state {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        for _ in 0..n_samples {
            indices.push(dist.sample(&mut rng));
        }
    } else {
        let mut rng = rand::thread_rng();
        for _ in 0..n_samples {
            indices.push(dist.sample(&mut rng));
        }
    }

    indices
}

#[cfg(test)]
mod tests;
