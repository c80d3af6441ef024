//! Evaluation metrics for classification models.
//!
//! Includes binary classification metrics (accuracy, precision, recall,
//! F1-score) and confusion matrix computation.

pub mod classification;

pub use classification::{accuracy, confusion_matrix, f1_score, precision, recall};
