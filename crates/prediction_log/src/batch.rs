//! Batch scoring of a tabular input file.

use std::path::Path;

use burn::prelude::Backend;
use ml_model::{ScreeningModel, predict_batch};
use screening_structs::{FIELD_COUNT, FIELD_SPECS, FeatureVector};
use thiserror::Error;
use tracing::info;

/// Failures that abort a batch run. There is no row-level rescue; the
/// first error stops the whole batch.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The input header lacks one or more of the declared field columns.
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A field cell could not be read as a number.
    #[error("row {row}: {column} is not a number")]
    Parse { row: usize, column: &'static str },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Summary of a completed batch run.
#[derive(Debug, Clone, Copy)]
pub struct BatchSummary {
    /// Number of rows scored and written.
    pub rows: usize,
}

/// Scores every row of `input_path` and writes the augmented table to
/// `output_path`.
///
/// The input must contain the eight declared field columns; extra columns
/// pass through untouched. Two columns are appended to each row:
/// `Predicted_Outcome` and `Probability`. The schema check runs before
/// anything is written, so no output file is produced when columns are
/// missing.
///
/// Row values are scored as-is: the range limits of the interactive form
/// are not applied here.
///
/// # Errors
///
/// Returns the first schema, parse, or I/O error encountered; the whole
/// batch aborts.
pub fn run_batch<B: Backend>(
    model: &ScreeningModel<B>,
    device: &B::Device,
    input_path: &Path,
    output_path: &Path,
) -> Result<BatchSummary, BatchError> {
    let mut reader = csv::Reader::from_path(input_path)?;
    let headers = reader.headers()?.clone();

    let mut column_indices = [0usize; FIELD_COUNT];
    let mut missing = Vec::new();
    for (slot, spec) in column_indices.iter_mut().zip(FIELD_SPECS.iter()) {
        match headers.iter().position(|header| header == spec.name) {
            Some(index) => *slot = index,
            None => missing.push(spec.name.to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(BatchError::MissingColumns(missing));
    }

    let mut rows = Vec::new();
    let mut vectors = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;

        let mut values = [0.0; FIELD_COUNT];
        for ((slot, &column), spec) in values
            .iter_mut()
            .zip(column_indices.iter())
            .zip(FIELD_SPECS.iter())
        {
            let raw = record.get(column).unwrap_or("");
            *slot = raw.trim().parse().map_err(|_| BatchError::Parse {
                row: index + 1,
                column: spec.name,
            })?;
        }

        vectors.push(FeatureVector::new(values));
        rows.push(record);
    }

    let predictions = predict_batch(model, &vectors, device);

    let mut writer = csv::Writer::from_path(output_path)?;

    let mut header: Vec<&str> = headers.iter().collect();
    header.push("Predicted_Outcome");
    header.push("Probability");
    writer.write_record(&header)?;

    for (record, prediction) in rows.iter().zip(predictions.iter()) {
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.push(prediction.outcome.to_string());
        row.push(prediction.probability.to_string());
        writer.write_record(&row)?;
    }
    writer.flush()?;

    info!(rows = rows.len(), output = %output_path.display(), "Batch scoring complete");

    Ok(BatchSummary { rows: rows.len() })
}
