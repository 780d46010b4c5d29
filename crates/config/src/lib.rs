//! Environment-driven configuration for the diabetes screening tool.

use std::path::PathBuf;

/// Application configuration loaded from environment variables.
///
/// Every setting has a local default so the tool runs out of the box on a
/// desktop machine; a `.env` file is honored when present but never
/// required.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL for the credential store.
    pub database_url: String,

    /// Path stem of the model checkpoint (the recorder appends `.mpk`).
    pub model_path: PathBuf,

    /// Path of the append-only single-prediction CSV log.
    pub predictions_path: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `DATABASE_URL`: SQLite connection string (default: `sqlite://diabetes_users.db`)
    /// - `MODEL_PATH`: model checkpoint path stem (default: `diabetes_model`)
    /// - `PREDICTIONS_PATH`: prediction log path (default: `diabetes_predictions.csv`)
    #[must_use]
    pub fn from_env() -> Self {
        // A missing .env file is fine; real env vars still apply.
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| String::from("sqlite://diabetes_users.db"));

        let model_path = std::env::var("MODEL_PATH")
            .map_or_else(|_| PathBuf::from("diabetes_model"), PathBuf::from);

        let predictions_path = std::env::var("PREDICTIONS_PATH")
            .map_or_else(|_| PathBuf::from("diabetes_predictions.csv"), PathBuf::from);

        Self {
            database_url,
            model_path,
            predictions_path,
        }
    }
}
