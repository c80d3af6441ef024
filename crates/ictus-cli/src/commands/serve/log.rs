//! Prediction log writer
//!
//! One writer owns the log file for the process lifetime: the header
//! decision happens once at open, and every append is serialized
//! through a mutex, so interleaved rows and duplicate headers cannot
//! occur however many handlers run concurrently.

use crate::error::{CliError, Result};
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use super::types::PredictRequest;

/// Prediction log column order.
pub(crate) const LOG_COLUMNS: [&str; 12] = [
    "timestamp",
    "gender",
    "age",
    "hypertension",
    "heart_disease",
    "ever_married",
    "work_type",
    "residence_type",
    "avg_glucose_level",
    "bmi",
    "smoking_status",
    "prediction",
];

/// Append-only CSV prediction log with a single writer.
pub(crate) struct PredictionLog {
    writer: Mutex<csv::Writer<File>>,
}

impl PredictionLog {
    /// Opens the log for appending, creating the parent directory and
    /// writing the header when the file is absent or empty.
    pub(crate) fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let needs_header = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer.write_record(LOG_COLUMNS)?;
            writer.flush()?;
        }

        Ok(Self {
            writer: Mutex::new(writer),
        })
    }

    /// Appends one prediction row and flushes it to disk.
    pub(crate) fn append(
        &self,
        timestamp: &str,
        request: &PredictRequest,
        prediction: usize,
    ) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| CliError::ServerError("prediction log writer poisoned".to_string()))?;
        writer.write_record([
            timestamp.to_string(),
            request.gender.to_string(),
            request.age.to_string(),
            request.hypertension.to_string(),
            request.heart_disease.to_string(),
            request.ever_married.to_string(),
            request.work_type.to_string(),
            request.residence_type.to_string(),
            request.avg_glucose_level.to_string(),
            request.bmi.to_string(),
            request.smoking_status.to_string(),
            prediction.to_string(),
        ])?;
        writer.flush()?;
        Ok(())
    }
}
