//! Ictus: stroke-risk modeling in pure Rust.
//!
//! Ictus provides the full modeling pipeline behind a stroke-prediction
//! service: dataset preparation, label encoding, stratified splitting,
//! synthetic minority oversampling, a class-weighted random forest,
//! binary classification metrics, and the serialized artifact that
//! carries a fitted model to the serving side.
//!
//! # Quick Start
//!
//! ```
//! use ictus::prelude::*;
//!
//! // Two well-separated clusters
//! let x = Matrix::from_vec(4, 1, vec![
//!     1.0,
//!     2.0,
//!     8.0,
//!     9.0,
//! ]).unwrap();
//! let y = vec![0, 0, 1, 1];
//!
//! // Train a seeded random forest
//! let mut model = RandomForestClassifier::new(25).with_random_state(42);
//! model.fit(&x, &y).unwrap();
//!
//! // Make predictions
//! let predictions = model.predict(&x);
//! assert_eq!(predictions, y);
//! assert!(model.score(&x, &y) > 0.99);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`error`]: Error types and the crate-wide Result alias
//! - [`dataset`]: Stroke dataset loading and preparation
//! - [`encoding`]: Label encoding for categorical columns
//! - [`model_selection`]: Stratified train/test splitting
//! - [`oversample`]: SMOTE class balancing
//! - [`tree`]: Decision tree and random forest classifiers
//! - [`metrics`]: Binary classification metrics
//! - [`artifact`]: The serialized model bundle (forest + encoders + schema)
//! - [`tracking`]: Per-run experiment tracking sink
//! - [`clock`]: UTC timestamp formatting without a calendar dependency

pub mod artifact;
pub mod clock;
pub mod dataset;
pub mod encoding;
pub mod error;
pub mod metrics;
pub mod model_selection;
pub mod oversample;
pub mod prelude;
pub mod primitives;
pub mod tracking;
pub mod tree;

pub use error::{IctusError, Result};
pub use primitives::{Matrix, Vector};
