//! Stroke dataset loading and preparation.
//!
//! Reads the raw stroke CSV export, drops the row id, imputes missing
//! BMI values with the column median, and label encodes the five
//! categorical columns into a numeric feature matrix.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::encoding::{EncoderSet, LabelEncoder};
use crate::error::{IctusError, Result};
use crate::primitives::Matrix;

/// Columns expected in the raw CSV export.
pub const EXPECTED_COLUMNS: [&str; 12] = [
    "id",
    "gender",
    "age",
    "hypertension",
    "heart_disease",
    "ever_married",
    "work_type",
    "Residence_type",
    "avg_glucose_level",
    "bmi",
    "smoking_status",
    "stroke",
];

/// Model feature columns in canonical order.
///
/// The raw export capitalizes `Residence_type`; that spelling exists
/// only in [`EXPECTED_COLUMNS`] and is renamed at the parsing boundary.
pub const FEATURE_COLUMNS: [&str; 10] = [
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
];

/// Categorical columns that are label encoded.
pub const CATEGORICAL_COLUMNS: [&str; 5] = [
    "gender",
    "ever_married",
    "work_type",
    "residence_type",
    "smoking_status",
];

/// Marker used for missing BMI values in the raw export.
const MISSING_BMI: &str = "N/A";

/// Feature column names as owned strings, in canonical order.
#[must_use]
pub fn feature_names() -> Vec<String> {
    FEATURE_COLUMNS.iter().map(ToString::to_string).collect()
}

/// One raw CSV row. The id column is dropped by not mapping it.
#[derive(Debug, Deserialize)]
struct RawRecord {
    gender: String,
    age: f32,
    hypertension: u8,
    heart_disease: u8,
    ever_married: String,
    work_type: String,
    #[serde(rename = "Residence_type")]
    residence_type: String,
    avg_glucose_level: f32,
    bmi: String,
    smoking_status: String,
    stroke: u8,
}

/// A prepared training dataset.
///
/// Rows follow the input file order. Features are encoded and imputed,
/// labels are 0 (no stroke) or 1 (stroke).
#[derive(Debug, Clone)]
pub struct StrokeDataset {
    /// Feature matrix (n_samples × 10), columns in [`FEATURE_COLUMNS`] order.
    pub x: Matrix<f32>,
    /// Stroke labels, one per row.
    pub y: Vec<usize>,
    /// Fitted label encoders for the categorical columns.
    pub encoders: EncoderSet,
    /// Number of BMI values replaced by the column median.
    pub n_imputed: usize,
}

impl StrokeDataset {
    /// Returns the number of samples.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.x.shape().0
    }

    /// Returns the number of features.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.x.shape().1
    }
}

/// Loads and prepares the stroke dataset from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or the contents are
/// not a valid stroke export.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<StrokeDataset> {
    let file = File::open(path)?;
    read_csv(file)
}

/// Reads and prepares the stroke dataset from any CSV reader.
///
/// Columns are matched by name, so column order does not matter and
/// unknown extra columns are ignored.
///
/// # Errors
///
/// Returns [`IctusError::SchemaMismatch`] if expected columns are
/// missing, and [`IctusError::DataError`] for unreadable rows, labels
/// outside {0, 1}, or a BMI column with no numeric values.
pub fn read_csv<R: Read>(reader: R) -> Result<StrokeDataset> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    validate_header(&mut csv_reader)?;

    let mut records = Vec::new();
    for (i, row) in csv_reader.deserialize::<RawRecord>().enumerate() {
        // Header is line 1, so the first data row is line 2.
        let line = i + 2;
        let record =
            row.map_err(|e| IctusError::data(format!("line {line}: {e}")))?;
        if record.stroke > 1 {
            return Err(IctusError::data(format!(
                "line {line}: stroke label must be 0 or 1, got {}",
                record.stroke
            )));
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(IctusError::data("CSV contains no data rows"));
    }

    let bmi_values = parse_bmi_column(&records)?;
    let n_imputed = bmi_values.iter().filter(|v| v.is_none()).count();
    let bmi_median = median_of_present(&bmi_values)?;

    let encoders = fit_encoders(&records);

    let n_samples = records.len();
    let mut data = Vec::with_capacity(n_samples * FEATURE_COLUMNS.len());
    let mut y = Vec::with_capacity(n_samples);

    for (record, bmi) in records.iter().zip(bmi_values.iter()) {
        data.push(encoders.encode("gender", &record.gender)? as f32);
        data.push(record.age);
        data.push(f32::from(record.hypertension));
        data.push(f32::from(record.heart_disease));
        data.push(encoders.encode("ever_married", &record.ever_married)? as f32);
        data.push(encoders.encode("work_type", &record.work_type)? as f32);
        data.push(encoders.encode("residence_type", &record.residence_type)? as f32);
        data.push(record.avg_glucose_level);
        data.push(bmi.unwrap_or(bmi_median));
        data.push(encoders.encode("smoking_status", &record.smoking_status)? as f32);
        y.push(usize::from(record.stroke));
    }

    let x = Matrix::from_vec(n_samples, FEATURE_COLUMNS.len(), data)?;

    Ok(StrokeDataset {
        x,
        y,
        encoders,
        n_imputed,
    })
}

fn validate_header<R: Read>(reader: &mut csv::Reader<R>) -> Result<()> {
    let headers = reader
        .headers()
        .map_err(|e| IctusError::data(format!("Failed to read CSV header: {e}")))?;

    let found: Vec<&str> = headers.iter().collect();
    let missing: Vec<&str> = EXPECTED_COLUMNS
        .into_iter()
        .filter(|col| !found.contains(col))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(IctusError::SchemaMismatch {
            expected: EXPECTED_COLUMNS.join(", "),
            actual: format!("header missing [{}]", missing.join(", ")),
        })
    }
}

fn parse_bmi_column(records: &[RawRecord]) -> Result<Vec<Option<f32>>> {
    let mut values = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let raw = record.bmi.trim();
        if raw.is_empty() || raw == MISSING_BMI {
            values.push(None);
        } else {
            let parsed = raw.parse::<f32>().map_err(|_| {
                IctusError::data(format!("line {}: invalid bmi value '{raw}'", i + 2))
            })?;
            values.push(Some(parsed));
        }
    }
    Ok(values)
}

/// Median of the present BMI values.
///
/// Uses the mean of the two middle values for even counts.
fn median_of_present(values: &[Option<f32>]) -> Result<f32> {
    let mut present: Vec<f32> = values.iter().filter_map(|v| *v).collect();
    if present.is_empty() {
        return Err(IctusError::data(
            "bmi column has no numeric values to impute from",
        ));
    }

    present.sort_by(f32::total_cmp);
    let n = present.len();
    if n % 2 == 1 {
        Ok(present[n / 2])
    } else {
        Ok((present[n / 2 - 1] + present[n / 2]) / 2.0)
    }
}

fn fit_encoders(records: &[RawRecord]) -> EncoderSet {
    let mut encoders = EncoderSet::new();

    for column in CATEGORICAL_COLUMNS {
        let values: Vec<String> = records
            .iter()
            .map(|r| match column {
                "gender" => r.gender.clone(),
                "ever_married" => r.ever_married.clone(),
                "work_type" => r.work_type.clone(),
                "residence_type" => r.residence_type.clone(),
                _ => r.smoking_status.clone(),
            })
            .collect();

        let mut encoder = LabelEncoder::new();
        encoder.fit(&values);
        encoders.insert(column, encoder);
    }

    encoders
}
