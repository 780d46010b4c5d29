//! Credential store backed by `SQLite`.
//!
//! Connections are pooled and short-lived: each operation checks one out,
//! runs its statements, and returns it on every exit path.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

mod users;

pub use users::{MIN_PASSWORD_LEN, MIN_USERNAME_LEN, RegistrationError, UserRepository};

/// Creates a connection pool to the `SQLite` database, creating the
/// database file if it does not exist yet.
///
/// # Errors
///
/// Returns an error if the URL is malformed or the connection fails.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Creates the `users` table if absent. Idempotent; safe to run at every
/// startup.
///
/// Username is the primary key and email carries a unique constraint, so
/// uniqueness is enforced by the engine at insert time rather than by a
/// separate existence check.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS users (
            username TEXT PRIMARY KEY,
            password_hash TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            full_name TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        ",
    )
    .execute(pool)
    .await?;

    Ok(())
}
