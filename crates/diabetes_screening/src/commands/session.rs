//! Interactive session - login, metric entry, result display.
//!
//! Walks the full flow of the screening tool: a login prompt with
//! registration offered, then a menu that collects the eight metrics,
//! runs the classifier, and records the result. Logging out returns to
//! the login prompt; nothing survives a restart.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use burn::backend::NdArray;
use burn::backend::ndarray::NdArrayDevice;
use config::Config;
use database::{RegistrationError, UserRepository};
use ml_model::{ScreeningModel, load_checkpoint, predict};
use screening_structs::{FIELD_SPECS, PredictionRecord};
use sqlx::SqlitePool;
use tracing::{error, info};

use super::prompt;

type Backend = NdArray;

/// Runs the interactive session.
///
/// A missing model checkpoint leaves the session usable; predictions stay
/// disabled until a checkpoint is available.
///
/// # Errors
///
/// Returns an error when the store is unreachable or stdin closes.
pub async fn run(pool: &SqlitePool, config: &Config) -> Result<()> {
    let device = NdArrayDevice::default();

    let model: Option<ScreeningModel<Backend>> = match load_checkpoint(&config.model_path, &device)
    {
        Ok(model) => Some(model),
        Err(error) => {
            error!(%error, "Model unavailable; predictions are disabled");
            None
        }
    };

    println!("Diabetes Screening System");
    println!("Hint: register first if you're a new user.");

    loop {
        println!();
        println!("1) Log in  2) Register  3) Quit");
        match prompt("> ")?.as_str() {
            "1" => {
                if let Some(username) = login(pool).await? {
                    authenticated_menu(config, model.as_ref(), &device, &username)?;
                }
            }
            "2" => register(pool).await?,
            "3" | "q" | "quit" => break,
            _ => println!("Please choose 1, 2 or 3."),
        }
    }

    Ok(())
}

/// One login attempt; returns the username on success.
async fn login(pool: &SqlitePool) -> Result<Option<String>> {
    let username = prompt("Username: ")?;
    let password = prompt("Password: ")?;

    if UserRepository::authenticate(pool, &username, &password).await? {
        let greeting = UserRepository::find_by_username(pool, &username)
            .await?
            .map_or_else(|| username.clone(), |account| account.full_name);

        info!(username = %username, "Login successful");
        println!("Welcome, {greeting}.");
        Ok(Some(username))
    } else {
        // Unknown user and wrong password read the same on purpose.
        println!("Invalid username or password");
        Ok(None)
    }
}

async fn register(pool: &SqlitePool) -> Result<()> {
    let full_name = prompt("Full name: ")?;
    let username = prompt("Username: ")?;
    let email = prompt("Email: ")?;
    let password = prompt("Password (at least 8 characters): ")?;
    let confirm = prompt("Confirm password: ")?;

    if password != confirm {
        println!("Passwords do not match");
        return Ok(());
    }

    match UserRepository::register(pool, &username, &password, &email, &full_name).await {
        Ok(()) => println!("User registered successfully. You can log in now."),
        Err(RegistrationError::Database(error)) => {
            error!(%error, "Registration failed");
            println!("Registration failed: {error}");
        }
        Err(error) => println!("Registration failed: {error}"),
    }

    Ok(())
}

fn authenticated_menu(
    config: &Config,
    model: Option<&ScreeningModel<Backend>>,
    device: &NdArrayDevice,
    username: &str,
) -> Result<()> {
    loop {
        println!();
        println!("1) New prediction  2) Batch predict  3) Log out");
        match prompt("> ")?.as_str() {
            "1" => single_prediction(config, model, device)?,
            "2" => batch_prediction(model, device)?,
            "3" => {
                info!(username, "Logged out");
                return Ok(());
            }
            _ => println!("Please choose 1, 2 or 3."),
        }
    }
}

fn single_prediction(
    config: &Config,
    model: Option<&ScreeningModel<Backend>>,
    device: &NdArrayDevice,
) -> Result<()> {
    let Some(model) = model else {
        println!("Model not loaded; predictions are unavailable.");
        return Ok(());
    };

    let mut entries = HashMap::new();
    for spec in &FIELD_SPECS {
        let raw = prompt(&format!("{} ({} - {}): ", spec.name, spec.min, spec.max))?;
        entries.insert(spec.name.to_string(), raw);
    }

    let vector = match form_validator::validate(&entries) {
        Ok(vector) => vector,
        Err(error) => {
            println!("Invalid input: {error}");
            return Ok(());
        }
    };

    let result = predict(model, &vector, device);

    println!();
    println!("Prediction: {}", result.outcome);
    println!("Probability: {:.2}%", result.probability * 100.0);
    for (name, value) in vector.iter_named() {
        println!("{name}: {value}");
    }

    let record = PredictionRecord {
        vector,
        outcome: result.outcome,
    };
    match prediction_log::append(&config.predictions_path, &record) {
        Ok(()) => info!(path = %config.predictions_path.display(), "Prediction saved"),
        Err(error) => {
            error!(%error, "Could not save prediction");
            println!("Could not save prediction: {error}");
        }
    }

    Ok(())
}

fn batch_prediction(model: Option<&ScreeningModel<Backend>>, device: &NdArrayDevice) -> Result<()> {
    let Some(model) = model else {
        println!("Model not loaded; predictions are unavailable.");
        return Ok(());
    };

    let input = PathBuf::from(prompt("Input CSV: ")?);
    let output = PathBuf::from(prompt("Output CSV: ")?);

    match prediction_log::run_batch(model, device, &input, &output) {
        Ok(summary) => println!(
            "Batch predictions saved to {} ({} rows)",
            output.display(),
            summary.rows
        ),
        Err(error) => {
            error!(%error, "Batch prediction failed");
            println!("Batch prediction failed: {error}");
        }
    }

    Ok(())
}
