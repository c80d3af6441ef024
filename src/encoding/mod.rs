//! Label encoding for categorical feature columns.
//!
//! Each categorical column gets its own fitted encoder: distinct values are
//! sorted lexicographically and assigned integer codes 0..k. The fitted
//! encoders travel with the model artifact so the training-time assignment
//! is the one serving is validated against.
//!
//! # Example
//!
//! ```
//! use ictus::encoding::LabelEncoder;
//!
//! let mut encoder = LabelEncoder::new();
//! encoder.fit(&["Urban".to_string(), "Rural".to_string(), "Urban".to_string()]);
//! assert_eq!(encoder.transform("Rural").expect("seen during fit"), 0);
//! assert_eq!(encoder.transform("Urban").expect("seen during fit"), 1);
//! ```

use crate::error::{IctusError, Result};
use serde::{Deserialize, Serialize};

/// Maps each distinct category value in a column to a unique integer.
///
/// Codes are assigned by lexicographic order of the distinct values seen
/// during fitting, so the assignment is a pure function of the training
/// data's category set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    /// Distinct classes in code order (computed during fit).
    classes: Option<Vec<String>>,
}

impl Default for LabelEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelEncoder {
    /// Creates a new, unfitted encoder.
    #[must_use]
    pub fn new() -> Self {
        Self { classes: None }
    }

    /// Fits the encoder on a column of raw values.
    ///
    /// Distinct values are sorted lexicographically; the code of a value is
    /// its position in that ordering.
    pub fn fit(&mut self, values: &[String]) {
        let mut classes: Vec<String> = values.to_vec();
        classes.sort_unstable();
        classes.dedup();
        self.classes = Some(classes);
    }

    /// Returns true if the encoder has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.classes.is_some()
    }

    /// Returns the fitted classes in code order.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoder is not fitted.
    pub fn classes(&self) -> Result<&[String]> {
        self.classes
            .as_deref()
            .ok_or_else(|| IctusError::NotFitted {
                what: "LabelEncoder".to_string(),
            })
    }

    /// Returns the number of distinct classes (0 if unfitted).
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.classes.as_ref().map_or(0, Vec::len)
    }

    /// Returns the integer code for a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoder is not fitted or the value was never
    /// seen during fitting.
    pub fn transform(&self, value: &str) -> Result<usize> {
        let classes = self.classes()?;
        classes
            .binary_search_by(|c| c.as_str().cmp(value))
            .map_err(|_| IctusError::UnknownCategory {
                column: String::new(),
                value: value.to_string(),
            })
    }

    /// Returns the original value for an integer code.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoder is not fitted or the code is out of
    /// range.
    pub fn inverse_transform(&self, code: usize) -> Result<&str> {
        let classes = self.classes()?;
        classes
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| IctusError::data(format!("code {code} out of range for encoder")))
    }

    /// Fits on the values and returns their codes in one pass.
    ///
    /// # Errors
    ///
    /// Returns an error only if transform of a just-fitted value fails,
    /// which cannot happen in practice.
    pub fn fit_transform(&mut self, values: &[String]) -> Result<Vec<usize>> {
        self.fit(values);
        values.iter().map(|v| self.transform(v)).collect()
    }
}

/// Ordered collection of per-column label encoders.
///
/// Column order is insertion order, which the dataset loader keeps equal to
/// the canonical categorical-column order. Serialized into the model bundle
/// as the persisted half of the training/serving encoding contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncoderSet {
    columns: Vec<(String, LabelEncoder)>,
}

impl EncoderSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Adds a fitted encoder under a column name, keeping insertion order.
    pub fn insert(&mut self, column: &str, encoder: LabelEncoder) {
        self.columns.push((column.to_string(), encoder));
    }

    /// Looks up the encoder for a column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&LabelEncoder> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, encoder)| encoder)
    }

    /// Returns the column names in insertion order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Returns the number of encoders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the set holds no encoders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Encodes a value in the named column.
    ///
    /// # Errors
    ///
    /// Returns an error if the column has no encoder or the value is unknown,
    /// with the column name attached.
    pub fn encode(&self, column: &str, value: &str) -> Result<usize> {
        let encoder = self.get(column).ok_or_else(|| {
            IctusError::data(format!("no encoder fitted for column '{column}'"))
        })?;
        encoder.transform(value).map_err(|e| match e {
            IctusError::UnknownCategory { value, .. } => IctusError::UnknownCategory {
                column: column.to_string(),
                value,
            },
            other => other,
        })
    }
}
