//! Trained model persistence.
//!
//! A fitted classifier is only usable for serving when the feature layout
//! and the category encodings from training travel with it. [`ModelBundle`]
//! packages the forest, the fitted encoders, and the feature-name schema
//! into a single bincode file, and refuses to load when any part no longer
//! matches the current schema.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dataset::{self, CATEGORICAL_COLUMNS};
use crate::encoding::EncoderSet;
use crate::error::{IctusError, Result};
use crate::tree::RandomForestClassifier;

/// On-disk bundle format version, checked at load time.
pub const FORMAT_VERSION: u32 = 1;

/// A fitted model together with everything needed to score new rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    /// Bundle format version.
    pub format_version: u32,
    /// Human-readable model description, e.g. `"RandomForestClassifier + SMOTE"`.
    pub model_type: String,
    /// Feature column names in training order.
    pub feature_names: Vec<String>,
    /// Fitted category encoders, one per categorical column.
    pub encoders: EncoderSet,
    /// The fitted forest.
    pub forest: RandomForestClassifier,
}

impl ModelBundle {
    /// Creates a bundle around a fitted forest and its encoders.
    ///
    /// The feature schema is stamped from the canonical training column
    /// order, so a bundle built here always validates against the same
    /// library version that loads it.
    #[must_use]
    pub fn new(model_type: &str, encoders: EncoderSet, forest: RandomForestClassifier) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            model_type: model_type.to_string(),
            feature_names: dataset::feature_names(),
            encoders,
            forest,
        }
    }

    /// Saves the bundle to a binary file using bincode.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let bytes = bincode::serialize(self)
            .map_err(|e| IctusError::Serialization(format!("Failed to serialize bundle: {e}")))?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Loads a bundle from a binary file and validates it.
    ///
    /// # Errors
    ///
    /// Returns an error if file reading or deserialization fails, or if
    /// the bundle does not pass [`ModelBundle::validate`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path)?;
        let bundle: Self = bincode::deserialize(&bytes)
            .map_err(|e| IctusError::Serialization(format!("Failed to deserialize bundle: {e}")))?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Checks that the bundle is complete and matches the current schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the format version is unknown, the feature
    /// names differ from the training column order, any categorical
    /// column is missing a fitted encoder, or the forest is not fitted.
    pub fn validate(&self) -> Result<()> {
        if self.format_version != FORMAT_VERSION {
            return Err(IctusError::SchemaMismatch {
                expected: format!("bundle format version {FORMAT_VERSION}"),
                actual: format!("version {}", self.format_version),
            });
        }
        let expected = dataset::feature_names();
        if self.feature_names != expected {
            return Err(IctusError::SchemaMismatch {
                expected: expected.join(", "),
                actual: self.feature_names.join(", "),
            });
        }
        for column in CATEGORICAL_COLUMNS {
            match self.encoders.get(column) {
                Some(encoder) if encoder.is_fitted() => {}
                Some(_) => {
                    return Err(IctusError::NotFitted {
                        what: format!("encoder for {column}"),
                    });
                }
                None => {
                    return Err(IctusError::SchemaMismatch {
                        expected: format!("encoder for {column}"),
                        actual: "missing".to_string(),
                    });
                }
            }
        }
        if !self.forest.is_fitted() {
            return Err(IctusError::NotFitted {
                what: "RandomForestClassifier".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
