//! Domain service for authentication and account settings.
//!
//! Keeps credential checks out of the `User` entity and the handlers:
//! handlers only translate `AuthError` variants into flash messages.

use thiserror::Error;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// User info DTO for the settings page and the page header.
#[derive(Debug, Clone)]
pub struct UserInfo {
    pub name: String,
    pub username: String,
}

/// Login result for the successfully verified user.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub username: String,
    pub name: String,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials against the stored hash.
    ///
    /// The submitted username must match a stored user exactly; a wrong
    /// username and a wrong password are indistinguishable to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Gets information for a specific user.
    async fn get_user_info(&self, username: &str) -> Result<UserInfo, AuthError>;

    /// Changes a user's display name.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] if the name is empty or over 20 characters.
    async fn update_display_name(&self, username: &str, name: &str) -> Result<(), AuthError>;
}
