use chrono::{DateTime, Utc};

/// A registered account as stored in the credential store.
///
/// Accounts are created only through registration and never updated or
/// deleted. The password is stored as a one-way digest, never in plain form.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserAccount {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}
