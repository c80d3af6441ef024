//! Error types for ictus-cli

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Malformed input data
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Library error
    #[error("{0}")]
    Ictus(String),

    /// Model bundle could not be loaded
    #[error("Model load failed: {0}")]
    ModelLoadFailed(String),

    /// Inference failed
    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),
}

impl CliError {
    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileNotFound(_) => ExitCode::from(3),
            Self::InvalidFormat(_) => ExitCode::from(4),
            Self::ValidationFailed(_) => ExitCode::from(5),
            Self::ModelLoadFailed(_) => ExitCode::from(6),
            Self::Io(_) | Self::Csv(_) => ExitCode::from(7),
            Self::InferenceFailed(_) => ExitCode::from(8),
            Self::ServerError(_) => ExitCode::from(10),
            Self::Ictus(_) => ExitCode::from(1),
        }
    }
}

impl From<ictus::IctusError> for CliError {
    fn from(e: ictus::IctusError) -> Self {
        match e {
            ictus::IctusError::Io(io) => Self::Io(io),
            ictus::IctusError::DataError { .. } | ictus::IctusError::SchemaMismatch { .. } => {
                Self::InvalidFormat(e.to_string())
            }
            _ => Self::Ictus(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_errors_map_to_invalid_format() {
        let err = CliError::from(ictus::IctusError::data("line 3: bad value"));
        assert!(matches!(err, CliError::InvalidFormat(_)));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_io_errors_pass_through() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = CliError::from(ictus::IctusError::Io(io));
        assert!(matches!(err, CliError::Io(_)));
    }
}
