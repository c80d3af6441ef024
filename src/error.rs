//! Error types for Ictus operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for Ictus operations.
///
/// Provides detailed context about failures including dimension mismatches,
/// invalid hyperparameters, dataset problems, and artifact schema violations.
///
/// # Examples
///
/// ```
/// use ictus::error::IctusError;
///
/// let err = IctusError::DimensionMismatch {
///     expected: "100x10".to_string(),
///     actual: "100x5".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug)]
pub enum IctusError {
    /// Matrix/vector dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Estimator or encoder used before fitting.
    NotFitted {
        /// What was used unfitted
        what: String,
    },

    /// Malformed or incomplete training data.
    DataError {
        /// Error description
        message: String,
    },

    /// Persisted artifact disagrees with the expected schema.
    SchemaMismatch {
        /// Expected schema description
        expected: String,
        /// Actual schema found
        actual: String,
    },

    /// Category value never seen during encoder fitting.
    UnknownCategory {
        /// Column name
        column: String,
        /// Offending value
        value: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Serialization/deserialization error.
    Serialization(String),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for IctusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IctusError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Matrix dimension mismatch: expected {expected}, got {actual}"
                )
            }
            IctusError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            IctusError::NotFitted { what } => {
                write!(f, "Not fitted: {what} must be fitted before use")
            }
            IctusError::DataError { message } => write!(f, "Data error: {message}"),
            IctusError::SchemaMismatch { expected, actual } => {
                write!(f, "Schema mismatch: expected {expected}, got {actual}")
            }
            IctusError::UnknownCategory { column, value } => {
                write!(f, "Unknown category in column '{column}': '{value}'")
            }
            IctusError::Io(e) => write!(f, "I/O error: {e}"),
            IctusError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            IctusError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for IctusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IctusError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for IctusError {
    fn from(err: std::io::Error) -> Self {
        IctusError::Io(err)
    }
}

impl From<&str> for IctusError {
    fn from(msg: &str) -> Self {
        IctusError::Other(msg.to_string())
    }
}

impl From<String> for IctusError {
    fn from(msg: String) -> Self {
        IctusError::Other(msg)
    }
}

impl IctusError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::Other(format!("empty input: {context}"))
    }

    /// Create a data error with a descriptive message
    #[must_use]
    pub fn data(message: impl Into<String>) -> Self {
        Self::DataError {
            message: message.into(),
        }
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<&str> for IctusError {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<IctusError> for &str {
    fn eq(&self, other: &IctusError) -> bool {
        *self == other.to_string()
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, IctusError>;
