//! Train command implementation
//!
//! Loads the labeled stroke CSV, balances the training split with SMOTE,
//! fits a random forest, reports held-out metrics, records the run, and
//! persists the model bundle.

use crate::error::{CliError, Result};
use crate::output;
use colored::Colorize;
use ictus::artifact::ModelBundle;
use ictus::metrics::classification::{accuracy, confusion_matrix, f1_score, precision, recall};
use ictus::model_selection::train_test_split;
use ictus::oversample::Smote;
use ictus::primitives::Matrix;
use ictus::tracking::{ExperimentTracker, FileRunRecorder};
use ictus::tree::{ClassWeight, RandomForestClassifier};
use std::path::Path;

/// Model type recorded in run documents and saved bundles.
pub(crate) const MODEL_TYPE: &str = "RandomForestClassifier + SMOTE";

/// Fraction of rows held out for evaluation.
const TEST_SIZE: f32 = 0.2;

/// Run the train command
pub(crate) fn run(
    data: &Path,
    model: &Path,
    runs_dir: &Path,
    trees: usize,
    seed: u64,
) -> Result<()> {
    if !data.exists() {
        return Err(CliError::FileNotFound(data.to_path_buf()));
    }
    println!("Training on {}...", data.display());

    let dataset = ictus::dataset::load_csv(data)?;
    let stroke_cases = dataset.y.iter().filter(|&&label| label == 1).count();

    output::section("Training Data");
    output::kv("Samples", dataset.n_samples());
    output::kv("Features", dataset.n_features());
    output::kv("Stroke cases", stroke_cases);
    output::kv("Imputed BMI values", dataset.n_imputed);

    let (x_train, x_test, y_train, y_test) =
        train_test_split(&dataset.x, &dataset.y, TEST_SIZE, Some(seed))
            .map_err(CliError::ValidationFailed)?;

    // Only the training split is resampled; the test split stays as drawn.
    let (x_balanced, y_balanced) = Smote::new()
        .with_random_state(seed)
        .fit_resample(&x_train, &y_train)?;

    output::section("Model");
    output::kv("Type", MODEL_TYPE);
    output::kv("Trees", trees);
    output::kv("Seed", seed);
    output::kv("Train rows", y_train.len());
    output::kv("Train rows after SMOTE", y_balanced.len());
    output::kv("Test rows", y_test.len());

    let mut forest = RandomForestClassifier::new(trees)
        .with_class_weight(ClassWeight::Balanced)
        .with_random_state(seed);
    forest.fit(&x_balanced, &y_balanced)?;

    let y_pred = forest.predict(&x_test);
    let acc = accuracy(&y_pred, &y_test);
    let prec = precision(&y_pred, &y_test);
    let rec = recall(&y_pred, &y_test);
    let f1 = f1_score(&y_pred, &y_test);
    let cm = confusion_matrix(&y_pred, &y_test);

    output::section("Evaluation");
    println!("  {}:", "Confusion Matrix".white().bold());
    for line in format_confusion_matrix(&cm).lines() {
        println!("    {line}");
    }
    output::kv("Accuracy", format!("{acc:.4}"));
    output::kv("Precision", format!("{prec:.4}"));
    output::kv("Recall", format!("{rec:.4}"));
    output::kv("F1 Score", format!("{f1:.4}"));

    let mut recorder = FileRunRecorder::new(runs_dir);
    recorder.log_param("model_type", MODEL_TYPE);
    recorder.log_metric("accuracy", acc);
    recorder.log_metric("precision", prec);
    recorder.log_metric("recall", rec);
    recorder.log_metric("f1_score", f1);
    recorder.flush()?;
    output::kv("Run file", recorder.run_path().display());

    let bundle = ModelBundle::new(MODEL_TYPE, dataset.encoders, forest);
    bundle.save(model)?;
    println!();
    output::success(&format!("Model saved to {}", model.display()));

    Ok(())
}

/// Render a count matrix with aligned columns, rows as actual classes
/// and columns as predicted classes.
fn format_confusion_matrix(cm: &Matrix<usize>) -> String {
    let (n_rows, n_cols) = cm.shape();
    let width = (0..n_rows)
        .flat_map(|i| (0..n_cols).map(move |j| cm.get(i, j)))
        .map(|count| count.to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for i in 0..n_rows {
        out.push_str(if i == 0 { "[[" } else { " [" });
        for j in 0..n_cols {
            if j > 0 {
                out.push(' ');
            }
            out.push_str(&format!("{:>width$}", cm.get(i, j)));
        }
        out.push(']');
        if i + 1 == n_rows {
            out.push(']');
        } else {
            out.push('\n');
        }
    }
    out
}
