pub(crate) use super::*;

use crate::encoding::LabelEncoder;
use crate::primitives::Matrix;

fn encoders_for(columns: &[&str]) -> EncoderSet {
    let mut set = EncoderSet::new();
    for column in columns {
        let mut encoder = LabelEncoder::new();
        encoder.fit(&["No".to_string(), "Yes".to_string()]);
        set.insert(column, encoder);
    }
    set
}

fn ten_feature_rows(ages: &[f32]) -> Matrix<f32> {
    let mut data = Vec::new();
    for &age in ages {
        let mut row = vec![0.0_f32; 10];
        row[1] = age;
        data.extend(row);
    }
    Matrix::from_vec(ages.len(), 10, data).expect("matrix")
}

fn fitted_forest() -> RandomForestClassifier {
    let x = ten_feature_rows(&[30.0, 35.0, 70.0, 75.0]);
    let mut forest = RandomForestClassifier::new(5).with_random_state(42);
    forest.fit(&x, &[0, 0, 1, 1]).expect("fit");
    forest
}

fn valid_bundle() -> ModelBundle {
    ModelBundle::new(
        "RandomForestClassifier + SMOTE",
        encoders_for(&CATEGORICAL_COLUMNS),
        fitted_forest(),
    )
}

// ========================================================================
// Validation
// ========================================================================

#[test]
fn test_new_stamps_current_schema() {
    let bundle = valid_bundle();

    assert_eq!(bundle.format_version, FORMAT_VERSION);
    assert_eq!(bundle.model_type, "RandomForestClassifier + SMOTE");
    assert_eq!(bundle.feature_names, dataset::feature_names());
}

#[test]
fn test_validate_accepts_complete_bundle() {
    assert!(valid_bundle().validate().is_ok());
}

#[test]
fn test_validate_rejects_unknown_version() {
    let mut bundle = valid_bundle();
    bundle.format_version = 99;

    let err = bundle.validate().unwrap_err();
    assert!(matches!(err, IctusError::SchemaMismatch { .. }));
    assert!(err.to_string().contains("format version"));
}

#[test]
fn test_validate_rejects_feature_name_drift() {
    let mut bundle = valid_bundle();
    bundle.feature_names.swap(0, 1);

    let err = bundle.validate().unwrap_err();
    assert!(matches!(err, IctusError::SchemaMismatch { .. }));
}

#[test]
fn test_validate_rejects_missing_encoder() {
    let partial: Vec<&str> = CATEGORICAL_COLUMNS
        .into_iter()
        .filter(|col| *col != "smoking_status")
        .collect();
    let bundle = ModelBundle::new("test", encoders_for(&partial), fitted_forest());

    let err = bundle.validate().unwrap_err();
    assert!(err.to_string().contains("smoking_status"));
}

#[test]
fn test_validate_rejects_unfitted_encoder() {
    let mut encoders = EncoderSet::new();
    encoders.insert("gender", LabelEncoder::new());
    for column in &CATEGORICAL_COLUMNS[1..] {
        let mut encoder = LabelEncoder::new();
        encoder.fit(&["No".to_string(), "Yes".to_string()]);
        encoders.insert(column, encoder);
    }
    let bundle = ModelBundle::new("test", encoders, fitted_forest());

    let err = bundle.validate().unwrap_err();
    assert!(matches!(err, IctusError::NotFitted { .. }));
    assert!(err.to_string().contains("gender"));
}

#[test]
fn test_validate_rejects_unfitted_forest() {
    let bundle = ModelBundle::new(
        "test",
        encoders_for(&CATEGORICAL_COLUMNS),
        RandomForestClassifier::new(5),
    );

    let err = bundle.validate().unwrap_err();
    assert!(matches!(err, IctusError::NotFitted { .. }));
}

// ========================================================================
// Save / Load
// ========================================================================

#[test]
fn test_save_load_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("model/stroke_model.bin");
    let bundle = valid_bundle();

    bundle.save(&path).expect("save");
    let loaded = ModelBundle::load(&path).expect("load");

    let probe = ten_feature_rows(&[20.0, 90.0]);
    assert_eq!(loaded.forest.predict(&probe), bundle.forest.predict(&probe));
    assert_eq!(loaded.encoders, bundle.encoders);
    assert_eq!(loaded.model_type, bundle.model_type);
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("a/b/c/model.bin");

    valid_bundle().save(&path).expect("save");
    assert!(path.exists());
}

#[test]
fn test_load_rejects_stale_version_on_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("model.bin");
    let mut bundle = valid_bundle();
    bundle.format_version = 99;
    bundle.save(&path).expect("save");

    let err = ModelBundle::load(&path).unwrap_err();
    assert!(matches!(err, IctusError::SchemaMismatch { .. }));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let err = ModelBundle::load("/nonexistent/model.bin").unwrap_err();
    assert!(matches!(err, IctusError::Io(_)));
}

#[test]
fn test_load_garbage_is_serialization_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("model.bin");
    std::fs::write(&path, b"not a bundle").expect("write");

    let err = ModelBundle::load(&path).unwrap_err();
    assert!(matches!(err, IctusError::Serialization(_)));
}
