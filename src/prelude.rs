//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use ictus::prelude::*;
//! ```

pub use crate::artifact::ModelBundle;
pub use crate::dataset::StrokeDataset;
pub use crate::encoding::{EncoderSet, LabelEncoder};
pub use crate::metrics::{accuracy, confusion_matrix, f1_score, precision, recall};
pub use crate::model_selection::train_test_split;
pub use crate::oversample::Smote;
pub use crate::primitives::{Matrix, Vector};
pub use crate::tracking::{ExperimentTracker, FileRunRecorder, InMemoryRecorder};
pub use crate::tree::{ClassWeight, DecisionTreeClassifier, RandomForestClassifier};
