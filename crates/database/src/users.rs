//! Registration and authentication against the `users` table.

use std::sync::LazyLock;

use chrono::Utc;
use regex_lite::Regex;
use screening_structs::UserAccount;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use thiserror::Error;

/// Minimum accepted username length.
pub const MIN_USERNAME_LEN: usize = 4;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// `local@domain.tld`-shaped addresses only.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

/// Reasons a registration attempt is rejected.
///
/// Rule violations are reported without mutating the store.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("all fields are required")]
    MissingField,

    #[error("username must be at least {MIN_USERNAME_LEN} characters long")]
    UsernameTooShort,

    #[error("password must be at least {MIN_PASSWORD_LEN} characters long")]
    PasswordTooShort,

    #[error("invalid email format")]
    InvalidEmail,

    #[error("username already exists")]
    UsernameTaken,

    #[error("email already registered")]
    EmailTaken,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Repository for user account operations.
pub struct UserRepository;

impl UserRepository {
    /// Registers a new account.
    ///
    /// Field rules are checked first (all fields present, username and
    /// password length, email shape). Uniqueness of username and email is
    /// enforced by the table's constraints in a single atomic insert, so
    /// two racing registrations cannot both succeed; constraint violations
    /// are reported as [`RegistrationError::UsernameTaken`] or
    /// [`RegistrationError::EmailTaken`].
    ///
    /// # Errors
    ///
    /// Returns the specific [`RegistrationError`] variant for the first
    /// violated rule, or `Database` for store failures.
    pub async fn register(
        pool: &SqlitePool,
        username: &str,
        password: &str,
        email: &str,
        full_name: &str,
    ) -> Result<(), RegistrationError> {
        if [username, password, email, full_name]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(RegistrationError::MissingField);
        }

        if username.len() < MIN_USERNAME_LEN {
            return Err(RegistrationError::UsernameTooShort);
        }

        if password.len() < MIN_PASSWORD_LEN {
            return Err(RegistrationError::PasswordTooShort);
        }

        if !EMAIL_PATTERN.is_match(email) {
            return Err(RegistrationError::InvalidEmail);
        }

        let result = sqlx::query(
            r"
            INSERT INTO users (username, password_hash, email, full_name, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(username)
        .bind(hash_password(password))
        .bind(email)
        .bind(full_name)
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) => Err(translate_unique_violation(error)),
        }
    }

    /// Checks a username/password pair against the store.
    ///
    /// Returns true iff the user exists and the digest of the supplied
    /// password matches the stored one. An unknown username and a wrong
    /// password are indistinguishable to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub async fn authenticate(
        pool: &SqlitePool,
        username: &str,
        password: &str,
    ) -> Result<bool, sqlx::Error> {
        let stored: Option<String> =
            sqlx::query_scalar("SELECT password_hash FROM users WHERE username = ?1")
                .bind(username)
                .fetch_optional(pool)
                .await?;

        Ok(stored.is_some_and(|hash| hash == hash_password(password)))
    }

    /// Looks up an account by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<UserAccount>, sqlx::Error> {
        sqlx::query_as::<_, UserAccount>(
            r"
            SELECT username, password_hash, email, full_name, created_at
            FROM users
            WHERE username = ?1
            ",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }
}

/// SHA-256 hex digest used for passwords at rest.
fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Maps unique-constraint violations onto the matching registration error.
fn translate_unique_violation(error: sqlx::Error) -> RegistrationError {
    if let sqlx::Error::Database(db_error) = &error {
        let message = db_error.message();
        if message.contains("users.username") {
            return RegistrationError::UsernameTaken;
        }
        if message.contains("users.email") {
            return RegistrationError::EmailTaken;
        }
    }

    RegistrationError::Database(error)
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;
    use crate::ensure_schema;

    // A single connection so the in-memory database is shared by every
    // statement in the test.
    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("open in-memory database");

        ensure_schema(&pool).await.expect("create schema");
        pool
    }

    async fn register_alice(pool: &SqlitePool) -> Result<(), RegistrationError> {
        UserRepository::register(pool, "alice", "hunter2hunter2", "alice@example.com", "Alice A").await
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let pool = test_pool().await;
        register_alice(&pool).await.expect("registration succeeds");

        let ok = UserRepository::authenticate(&pool, "alice", "hunter2hunter2")
            .await
            .expect("lookup succeeds");
        assert!(ok);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_are_indistinguishable() {
        let pool = test_pool().await;
        register_alice(&pool).await.expect("registration succeeds");

        let wrong_password = UserRepository::authenticate(&pool, "alice", "not-the-password")
            .await
            .expect("lookup succeeds");
        let unknown_user = UserRepository::authenticate(&pool, "nobody", "hunter2hunter2")
            .await
            .expect("lookup succeeds");

        assert!(!wrong_password);
        assert!(!unknown_user);
        assert_eq!(wrong_password, unknown_user);
    }

    #[tokio::test]
    async fn test_password_is_not_stored_in_plain_form() {
        let pool = test_pool().await;
        register_alice(&pool).await.expect("registration succeeds");

        let account = UserRepository::find_by_username(&pool, "alice")
            .await
            .expect("lookup succeeds")
            .expect("account exists");

        assert_ne!(account.password_hash, "hunter2hunter2");
        assert_eq!(account.email, "alice@example.com");
        assert_eq!(account.full_name, "Alice A");
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let pool = test_pool().await;
        register_alice(&pool).await.expect("registration succeeds");

        let error =
            UserRepository::register(&pool, "alice", "hunter2hunter2", "other@example.com", "Alice B")
                .await
                .expect_err("username is taken");
        assert!(matches!(error, RegistrationError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let pool = test_pool().await;
        register_alice(&pool).await.expect("registration succeeds");

        let error =
            UserRepository::register(&pool, "bob42", "hunter2hunter2", "alice@example.com", "Bob B")
                .await
                .expect_err("email is taken");
        assert!(matches!(error, RegistrationError::EmailTaken));
    }

    #[tokio::test]
    async fn test_field_rules() {
        let pool = test_pool().await;

        let missing =
            UserRepository::register(&pool, "alice", "hunter2hunter2", "", "Alice A").await;
        assert!(matches!(missing, Err(RegistrationError::MissingField)));

        let short_username =
            UserRepository::register(&pool, "al", "hunter2hunter2", "al@example.com", "Al").await;
        assert!(matches!(
            short_username,
            Err(RegistrationError::UsernameTooShort)
        ));

        let short_password =
            UserRepository::register(&pool, "alice", "short", "alice@example.com", "Alice A").await;
        assert!(matches!(
            short_password,
            Err(RegistrationError::PasswordTooShort)
        ));

        let bad_email =
            UserRepository::register(&pool, "alice", "hunter2hunter2", "not-an-email", "Alice A")
                .await;
        assert!(matches!(bad_email, Err(RegistrationError::InvalidEmail)));

        // None of the rejected attempts may have touched the store.
        let account = UserRepository::find_by_username(&pool, "alice")
            .await
            .expect("lookup succeeds");
        assert!(account.is_none());
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let pool = test_pool().await;
        ensure_schema(&pool).await.expect("second run succeeds");

        register_alice(&pool).await.expect("registration still works");
    }
}
