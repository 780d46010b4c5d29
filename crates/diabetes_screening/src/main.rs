//! Diabetes Screening System
//!
//! Collects patient metrics, scores them with a pre-trained classifier,
//! and records the results. Access is gated behind a local
//! username/password store.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::Config;
use database::{create_pool, ensure_schema};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::predict::RawForm;

/// Diabetes Screening System
#[derive(Parser)]
#[command(name = "diabetes-screening")]
#[command(about = "ML-based diabetes risk screening with a local credential store")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account (password is prompted)
    Register {
        /// Account name, at least 4 characters
        #[arg(short, long)]
        username: String,

        /// Contact email, must be unique
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        full_name: String,
    },

    /// Score one set of metrics and append the result to the prediction log
    Predict {
        /// Account to authenticate as (password is prompted)
        #[arg(short, long)]
        username: String,

        #[command(flatten)]
        form: RawForm,
    },

    /// Score every row of a CSV file
    Batch {
        /// Account to authenticate as (password is prompted)
        #[arg(short, long)]
        username: String,

        /// Input CSV containing the eight metric columns
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the augmented CSV
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Interactive login and screening session (the default)
    Session,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env();
    let pool = create_pool(&config.database_url).await?;
    ensure_schema(&pool).await?;

    match cli.command.unwrap_or(Commands::Session) {
        Commands::Register {
            username,
            email,
            full_name,
        } => {
            commands::register::run(&pool, &username, &email, &full_name).await?;
        }
        Commands::Predict { username, form } => {
            commands::predict::run(&pool, &config, &username, form).await?;
        }
        Commands::Batch {
            username,
            input,
            output,
        } => {
            commands::batch::run(&pool, &config, &username, &input, &output).await?;
        }
        Commands::Session => {
            commands::session::run(&pool, &config).await?;
        }
    }

    Ok(())
}
