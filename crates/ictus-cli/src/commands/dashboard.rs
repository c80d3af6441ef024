//! Dashboard command implementation
//!
//! Renders read-only statistics from the prediction log. Every statistic
//! is recomputed from the file's current contents on each invocation.

use crate::error::{CliError, Result};
use crate::output;
use colored::Colorize;
use ictus::clock;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One prediction log row. Feature columns the dashboard does not use
/// are left unmapped.
#[derive(Debug, Deserialize)]
struct LogRow {
    timestamp: String,
    age: f32,
    avg_glucose_level: f32,
    prediction: usize,
}

/// Aggregated prediction log statistics.
#[derive(Debug, Default)]
struct LogSummary {
    total: usize,
    prediction_sum: usize,
    counts: [usize; 2],
    age_sums: [f64; 2],
    glucose_sums: [f64; 2],
    daily: BTreeMap<String, [usize; 2]>,
}

impl LogSummary {
    fn stroke_percentage(&self) -> f64 {
        self.prediction_sum as f64 / self.total as f64 * 100.0
    }
}

/// Run the dashboard command
pub(crate) fn run(log: &Path) -> Result<()> {
    if !log.exists() {
        output::warning("No prediction data available yet.");
        return Ok(());
    }

    let file = File::open(log)?;
    let summary = summarize(file)?;
    if summary.total == 0 {
        output::warning("No prediction data available yet.");
        return Ok(());
    }

    println!("Reading {}...", log.display());

    output::section("General Statistics");
    output::kv("Total predictions", summary.total);
    output::kv("Stroke predictions", summary.prediction_sum);
    output::kv(
        "Stroke percentage",
        format!("{:.2}%", summary.stroke_percentage()),
    );

    output::section("Prediction Distribution");
    for class in [0usize, 1] {
        let count = summary.counts[class];
        let pct = count as f32 / summary.total as f32 * 100.0;
        let bar_len = (pct / 2.0) as usize;
        let bar = "█".repeat(bar_len.min(25));
        println!("  {:12} {:>5} ({:>5.1}%) {}", class_label(class), count, pct, bar);
    }

    output::section("Daily Prediction Trend");
    if summary.daily.is_empty() {
        println!("  {}", "(no rows with a parsable timestamp)".dimmed());
    } else {
        println!("  {:<12} {:>9} {:>6}", "Date", "No Stroke", "Stroke");
        for (date, counts) in &summary.daily {
            println!("  {:<12} {:>9} {:>6}", date, counts[0], counts[1]);
        }
    }

    output::section("Average Age & Glucose Level by Prediction Category");
    println!("  {:<12} {:>8} {:>12}", "Category", "Mean Age", "Mean Glucose");
    for class in [0usize, 1] {
        let count = summary.counts[class];
        if count == 0 {
            continue;
        }
        println!(
            "  {:<12} {:>8.2} {:>12.2}",
            class_label(class),
            summary.age_sums[class] / count as f64,
            summary.glucose_sums[class] / count as f64
        );
    }

    Ok(())
}

fn class_label(class: usize) -> &'static str {
    if class == 1 {
        "Stroke"
    } else {
        "No Stroke"
    }
}

/// Aggregates prediction log rows from any CSV reader.
///
/// Rows without a parsable `YYYY-MM-DD` timestamp prefix still count
/// toward totals, distribution, and means; only the daily series skips
/// them.
fn summarize<R: Read>(reader: R) -> Result<LogSummary> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut summary = LogSummary::default();

    for (idx, result) in csv_reader.deserialize::<LogRow>().enumerate() {
        let row = result.map_err(|e| {
            CliError::InvalidFormat(format!("prediction log line {}: {e}", idx + 2))
        })?;

        summary.total += 1;
        summary.prediction_sum += row.prediction;
        if row.prediction < 2 {
            summary.counts[row.prediction] += 1;
            summary.age_sums[row.prediction] += f64::from(row.age);
            summary.glucose_sums[row.prediction] += f64::from(row.avg_glucose_level);
            if let Some(date) = clock::date_prefix(&row.timestamp) {
                summary.daily.entry(date.to_string()).or_default()[row.prediction] += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const LOG: &str = "\
timestamp,gender,age,hypertension,heart_disease,ever_married,work_type,residence_type,avg_glucose_level,bmi,smoking_status,prediction
2026-08-20 09:15:00.000000,1,67,0,1,1,2,1,228.69,36.6,1,1
2026-08-20 10:00:00.000000,0,41,0,0,1,2,0,95.1,27.3,2,0
2026-08-21 11:30:00.000000,1,80,1,1,1,2,1,105.92,32.5,1,1
not-a-timestamp,0,49,0,0,1,2,0,171.23,34.4,3,0
";

    #[test]
    fn test_summarize_counts_and_percentage() {
        let summary = summarize(LOG.as_bytes()).unwrap();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.prediction_sum, 2);
        assert_eq!(summary.counts, [2, 2]);
        assert!((summary.stroke_percentage() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_per_class_means() {
        let summary = summarize(LOG.as_bytes()).unwrap();
        assert!((summary.age_sums[0] / 2.0 - 45.0).abs() < 1e-3);
        assert!((summary.age_sums[1] / 2.0 - 73.5).abs() < 1e-3);
        assert!((summary.glucose_sums[0] / 2.0 - 133.165).abs() < 1e-3);
        assert!((summary.glucose_sums[1] / 2.0 - 167.305).abs() < 1e-3);
    }

    #[test]
    fn test_summarize_daily_series_ascending_and_skips_bad_timestamps() {
        let summary = summarize(LOG.as_bytes()).unwrap();
        let days: Vec<_> = summary.daily.iter().collect();
        assert_eq!(
            days,
            vec![
                (&"2026-08-20".to_string(), &[1, 1]),
                (&"2026-08-21".to_string(), &[0, 1]),
            ]
        );
        let dated: usize = summary.daily.values().map(|c| c[0] + c[1]).sum();
        assert_eq!(dated, 3);
        assert_eq!(summary.total, 4);
    }

    #[test]
    fn test_summarize_rejects_malformed_row() {
        let log = "\
timestamp,gender,age,hypertension,heart_disease,ever_married,work_type,residence_type,avg_glucose_level,bmi,smoking_status,prediction
2026-08-20 09:15:00.000000,1,sixty,0,1,1,2,1,228.69,36.6,1,1
";
        let err = summarize(log.as_bytes()).unwrap_err();
        assert!(matches!(err, CliError::InvalidFormat(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_run_without_log_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(&dir.path().join("absent.csv")).is_ok());
    }

    #[test]
    fn test_run_with_header_only_log_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prediction_logs.csv");
        fs::write(&path, LOG.lines().next().unwrap()).unwrap();
        assert!(run(&path).is_ok());
    }

    #[test]
    fn test_run_renders_populated_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prediction_logs.csv");
        fs::write(&path, LOG).unwrap();
        assert!(run(&path).is_ok());
    }
}
