//! Register command - creates a new account.

use anyhow::{Result, bail};
use database::{RegistrationError, UserRepository};
use sqlx::SqlitePool;
use tracing::info;

use super::prompt;

/// Runs the register command.
///
/// The password is prompted twice and must match; the store enforces the
/// remaining rules.
///
/// # Errors
///
/// Returns an error naming the violated rule, or a store error.
pub async fn run(pool: &SqlitePool, username: &str, email: &str, full_name: &str) -> Result<()> {
    let password = prompt("Password (at least 8 characters): ")?;
    let confirm = prompt("Confirm password: ")?;

    if password != confirm {
        bail!("Passwords do not match");
    }

    match UserRepository::register(pool, username, &password, email, full_name).await {
        Ok(()) => {
            info!(username, "Account created");
            println!("User registered successfully.");
            Ok(())
        }
        Err(RegistrationError::Database(error)) => {
            Err(anyhow::Error::from(error).context("Registration failed"))
        }
        Err(error) => bail!("Registration failed: {error}"),
    }
}
