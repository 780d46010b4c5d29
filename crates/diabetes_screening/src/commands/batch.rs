//! Batch command - scores every row of a CSV file.

use std::path::Path;

use anyhow::Result;
use burn::backend::NdArray;
use burn::backend::ndarray::NdArrayDevice;
use config::Config;
use ml_model::{ScreeningModel, load_checkpoint};
use prediction_log::run_batch;
use sqlx::SqlitePool;
use tracing::info;

type Backend = NdArray;

/// Runs the batch command.
///
/// # Errors
///
/// Returns an error on authentication failure, a missing model checkpoint,
/// or when the batch aborts (schema, parse, or I/O failure).
pub async fn run(
    pool: &SqlitePool,
    config: &Config,
    username: &str,
    input: &Path,
    output: &Path,
) -> Result<()> {
    super::authenticate(pool, username).await?;

    info!(input = %input.display(), "Running batch prediction");

    let device = NdArrayDevice::default();
    let model: ScreeningModel<Backend> = load_checkpoint(&config.model_path, &device)?;

    let summary = run_batch(&model, &device, input, output)?;

    println!(
        "Batch predictions saved to {} ({} rows)",
        output.display(),
        summary.rows
    );

    Ok(())
}
