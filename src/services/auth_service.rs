//! Domain service for registration and token login.

use thiserror::Error;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("A user with that username already exists")]
    UsernameTaken(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<crate::db::UsernameTaken>() {
            Ok(taken) => Self::UsernameTaken(taken.0),
            Err(err) => Self::Database(format!("{err:#}")),
        }
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an inactive account and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UsernameTaken`] if the name is in use.
    async fn register(&self, username: &str, password: &str) -> Result<i32, AuthError>;

    /// Verifies credentials and returns the user's token, creating it on the
    /// first successful login.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown user, a wrong
    /// password, or an account that has not been activated.
    async fn login(&self, username: &str, password: &str) -> Result<String, AuthError>;

    /// Marks an account active so it can log in.
    async fn activate(&self, username: &str) -> Result<(), AuthError>;
}
