//! CLI command implementations.

pub mod batch;
pub mod predict;
pub mod register;
pub mod session;

mod input;

use anyhow::{Result, bail};
use database::UserRepository;
use sqlx::SqlitePool;

pub use input::prompt;

/// Prompts for the account password and checks the pair against the store.
///
/// Unknown usernames and wrong passwords produce the same failure.
///
/// # Errors
///
/// Returns an error when authentication fails or the store is unreachable.
pub async fn authenticate(pool: &SqlitePool, username: &str) -> Result<()> {
    let password = prompt("Password: ")?;

    if !UserRepository::authenticate(pool, username, &password).await? {
        bail!("Invalid username or password");
    }

    Ok(())
}
