//! Append-only CSV log of single predictions.

use std::fs::OpenOptions;
use std::path::Path;

use screening_structs::{FIELD_SPECS, PredictionRecord};
use thiserror::Error;

/// Failures while appending to the prediction log.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Appends one prediction to the log at `path`.
///
/// The header row (the eight field names plus `Outcome`) is written only
/// when the file does not exist yet. Rows reflect call order and are never
/// rewritten or deduplicated.
///
/// # Errors
///
/// Surfaces I/O and CSV failures to the caller; nothing is retried.
pub fn append(path: &Path, record: &PredictionRecord) -> Result<(), RecordError> {
    let write_header = !path.exists();

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if write_header {
        let mut header: Vec<&str> = FIELD_SPECS.iter().map(|spec| spec.name).collect();
        header.push("Outcome");
        writer.write_record(&header)?;
    }

    let mut row: Vec<String> = record
        .vector
        .values()
        .iter()
        .map(ToString::to_string)
        .collect();
    row.push(record.outcome.to_string());
    writer.write_record(&row)?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use screening_structs::{FeatureVector, Outcome};

    use super::*;

    fn sample_record(outcome: Outcome) -> PredictionRecord {
        PredictionRecord {
            vector: FeatureVector::new([2.0, 120.0, 70.0, 20.0, 80.0, 25.0, 0.5, 30.0]),
            outcome,
        }
    }

    #[test]
    fn test_two_appends_one_header() {
        let dir = tempfile::tempdir().expect("create temporary directory");
        let path = dir.path().join("predictions.csv");

        append(&path, &sample_record(Outcome::NonDiabetic)).expect("first append");
        append(&path, &sample_record(Outcome::Diabetic)).expect("second append");

        let content = std::fs::read_to_string(&path).expect("read log");
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 3, "one header plus two data rows");
        assert_eq!(
            lines[0],
            "Pregnancies,Glucose,Blood Pressure,Skin Thickness,Insulin,BMI,Diabetes Pedigree,Age,Outcome"
        );
        assert_eq!(lines[1], "2,120,70,20,80,25,0.5,30,Non-Diabetic");
        assert_eq!(lines[2], "2,120,70,20,80,25,0.5,30,Diabetic");
    }

    #[test]
    fn test_append_to_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("create temporary directory");
        let path = dir.path().join("missing").join("predictions.csv");

        let result = append(&path, &sample_record(Outcome::Diabetic));
        assert!(matches!(result, Err(RecordError::Io(_))));
    }
}
