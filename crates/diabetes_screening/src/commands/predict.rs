//! Predict command - scores one set of form entries and logs the result.

use std::collections::HashMap;

use anyhow::Result;
use burn::backend::NdArray;
use burn::backend::ndarray::NdArrayDevice;
use config::Config;
use ml_model::{ScreeningModel, load_checkpoint, predict};
use screening_structs::PredictionRecord;
use sqlx::SqlitePool;
use tracing::{error, info};

type Backend = NdArray;

/// Raw form entries, one free-text value per screening field.
///
/// Values stay unparsed here so the validator owns parsing and range
/// checks.
#[derive(Debug, clap::Args)]
pub struct RawForm {
    /// Number of times pregnant (0-20)
    #[arg(long)]
    pub pregnancies: String,

    /// Plasma glucose concentration (0-300 mg/dL)
    #[arg(long)]
    pub glucose: String,

    /// Diastolic blood pressure (0-200 mm Hg)
    #[arg(long)]
    pub blood_pressure: String,

    /// Triceps skinfold thickness (0-100 mm)
    #[arg(long)]
    pub skin_thickness: String,

    /// 2-hour serum insulin (0-850 mu U/ml)
    #[arg(long)]
    pub insulin: String,

    /// Body mass index (0-70)
    #[arg(long)]
    pub bmi: String,

    /// Diabetes pedigree function (0-2.5)
    #[arg(long)]
    pub diabetes_pedigree: String,

    /// Age in years (0-120)
    #[arg(long)]
    pub age: String,
}

impl RawForm {
    /// Keys the entries by field display name for the validator.
    #[must_use]
    pub fn into_entries(self) -> HashMap<String, String> {
        HashMap::from([
            (String::from("Pregnancies"), self.pregnancies),
            (String::from("Glucose"), self.glucose),
            (String::from("Blood Pressure"), self.blood_pressure),
            (String::from("Skin Thickness"), self.skin_thickness),
            (String::from("Insulin"), self.insulin),
            (String::from("BMI"), self.bmi),
            (String::from("Diabetes Pedigree"), self.diabetes_pedigree),
            (String::from("Age"), self.age),
        ])
    }
}

/// Runs the predict command.
///
/// Authenticates, validates the entries, scores them, prints the outcome,
/// and appends the record to the prediction log. A failed append is
/// reported but does not discard the prediction.
///
/// # Errors
///
/// Returns an error on authentication failure, invalid input, or when the
/// model checkpoint cannot be loaded.
pub async fn run(pool: &SqlitePool, config: &Config, username: &str, form: RawForm) -> Result<()> {
    super::authenticate(pool, username).await?;

    let vector = form_validator::validate(&form.into_entries())
        .map_err(|error| anyhow::anyhow!("Invalid input: {error}"))?;

    let device = NdArrayDevice::default();
    let model: ScreeningModel<Backend> = load_checkpoint(&config.model_path, &device)?;

    let result = predict(&model, &vector, &device);
    info!(outcome = %result.outcome, probability = result.probability, "Prediction complete");

    println!("Prediction: {}", result.outcome);
    println!("Probability: {:.2}%", result.probability * 100.0);

    let record = PredictionRecord {
        vector,
        outcome: result.outcome,
    };
    match prediction_log::append(&config.predictions_path, &record) {
        Ok(()) => info!(path = %config.predictions_path.display(), "Prediction saved"),
        Err(error) => error!(%error, "Could not save prediction"),
    }

    Ok(())
}
