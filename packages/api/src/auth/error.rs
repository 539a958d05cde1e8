//! Typed errors for the authentication flows.

use thiserror::Error;

use super::config::ConfigError;

/// Errors from the OAuth flows and local credential handling.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid or expired OAuth state")]
    InvalidState,
    #[error("token exchange failed: {0}")]
    TokenExchange(String),
    #[error("no verified primary email on the {0} account")]
    MissingEmail(&'static str),
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
    #[error("session error: {0}")]
    Session(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
