//! Experiment tracking sink.
//!
//! Each training run records its parameters and evaluation metrics to a
//! single JSON document so runs can be compared after the fact. The
//! [`ExperimentTracker`] trait keeps the recording surface small; the
//! file-backed recorder is the production sink and the in-memory one
//! backs tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::clock;
use crate::error::{IctusError, Result};

/// Recording surface for one training run.
pub trait ExperimentTracker {
    /// Records a named string parameter.
    fn log_param(&mut self, key: &str, value: &str);

    /// Records a named metric value.
    fn log_metric(&mut self, key: &str, value: f32);

    /// Writes the accumulated run record to the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot be written.
    fn flush(&mut self) -> Result<()>;
}

/// One run document: identity plus everything logged during the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Run identifier, stamped from the UTC clock at construction.
    pub run_id: String,
    /// UTC timestamp of run start.
    pub started_at: String,
    /// Logged parameters, sorted by key.
    pub parameters: BTreeMap<String, String>,
    /// Logged metrics, sorted by key.
    pub metrics: BTreeMap<String, f32>,
}

impl RunRecord {
    fn new() -> Self {
        Self {
            run_id: clock::utc_compact(),
            started_at: clock::utc_timestamp(),
            parameters: BTreeMap::new(),
            metrics: BTreeMap::new(),
        }
    }
}

/// File-backed recorder writing `run-<id>.json` under a runs directory.
///
/// The directory is created on flush if absent. Flushing twice rewrites
/// the same document.
#[derive(Debug)]
pub struct FileRunRecorder {
    dir: PathBuf,
    record: RunRecord,
}

impl FileRunRecorder {
    /// Creates a recorder for a new run under `runs_dir`.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(runs_dir: P) -> Self {
        Self {
            dir: runs_dir.into(),
            record: RunRecord::new(),
        }
    }

    /// Returns this run's identifier.
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.record.run_id
    }

    /// Returns the path the run document is written to.
    #[must_use]
    pub fn run_path(&self) -> PathBuf {
        self.dir.join(format!("run-{}.json", self.record.run_id))
    }
}

impl ExperimentTracker for FileRunRecorder {
    fn log_param(&mut self, key: &str, value: &str) {
        self.record
            .parameters
            .insert(key.to_string(), value.to_string());
    }

    fn log_metric(&mut self, key: &str, value: f32) {
        self.record.metrics.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(&self.record)
            .map_err(|e| IctusError::Serialization(format!("Failed to serialize run: {e}")))?;
        fs::write(self.run_path(), json)?;
        Ok(())
    }
}

/// In-memory recorder for tests; flush is a no-op.
#[derive(Debug, Default)]
pub struct InMemoryRecorder {
    parameters: BTreeMap<String, String>,
    metrics: BTreeMap<String, f32>,
}

impl InMemoryRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the logged parameters.
    #[must_use]
    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// Returns the logged metrics.
    #[must_use]
    pub fn metrics(&self) -> &BTreeMap<String, f32> {
        &self.metrics
    }
}

impl ExperimentTracker for InMemoryRecorder {
    fn log_param(&mut self, key: &str, value: &str) {
        self.parameters.insert(key.to_string(), value.to_string());
    }

    fn log_metric(&mut self, key: &str, value: f32) {
        self.metrics.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Reads a run document back from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_run<P: AsRef<Path>>(path: P) -> Result<RunRecord> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json)
        .map_err(|e| IctusError::Serialization(format!("Failed to parse run: {e}")))
}
