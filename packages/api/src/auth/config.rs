//! OAuth provider configuration from environment variables.
//!
//! Each provider needs a complete client id / client secret pair. An unset or
//! empty value is a [`ConfigError::MissingCredential`] naming the provider and
//! the variable, so a half-configured deployment fails before it serves a
//! single request. Redirect URIs derive from the optional `APP_URL` base.

use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use thiserror::Error;

/// Public base URL used when `APP_URL` is not set.
const DEFAULT_APP_URL: &str = "http://localhost:8080";

/// Fatal startup configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{provider} OAuth is not configured: {var} is not set")]
    MissingCredential {
        provider: &'static str,
        var: &'static str,
    },
    #[error("invalid {provider} OAuth URL: {source}")]
    InvalidUrl {
        provider: &'static str,
        #[source]
        source: oauth2::url::ParseError,
    },
}

/// OAuth provider configuration.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub redirect_url: RedirectUrl,
}

impl OAuthConfig {
    /// GitHub OAuth config from `GITHUB_CLIENT_ID` / `GITHUB_CLIENT_SECRET`.
    pub fn github() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::build(
            "GitHub",
            require_var("GitHub", "GITHUB_CLIENT_ID")?,
            require_var("GitHub", "GITHUB_CLIENT_SECRET")?,
            "https://github.com/login/oauth/authorize",
            "https://github.com/login/oauth/access_token",
            "github",
        )
    }

    /// Google OAuth config from `GOOGLE_CLIENT_ID` / `GOOGLE_CLIENT_SECRET`.
    pub fn google() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::build(
            "Google",
            require_var("Google", "GOOGLE_CLIENT_ID")?,
            require_var("Google", "GOOGLE_CLIENT_SECRET")?,
            "https://accounts.google.com/o/oauth2/v2/auth",
            "https://oauth2.googleapis.com/token",
            "google",
        )
    }

    fn build(
        provider: &'static str,
        client_id: String,
        client_secret: String,
        auth_url: &str,
        token_url: &str,
        slug: &str,
    ) -> Result<Self, ConfigError> {
        let base = std::env::var("APP_URL").unwrap_or_else(|_| DEFAULT_APP_URL.to_string());
        let redirect = format!("{}/auth/{}/callback", base.trim_end_matches('/'), slug);

        Ok(Self {
            client_id: ClientId::new(client_id),
            client_secret: ClientSecret::new(client_secret),
            auth_url: AuthUrl::new(auth_url.to_string())
                .map_err(|source| ConfigError::InvalidUrl { provider, source })?,
            token_url: TokenUrl::new(token_url.to_string())
                .map_err(|source| ConfigError::InvalidUrl { provider, source })?,
            redirect_url: RedirectUrl::new(redirect)
                .map_err(|source| ConfigError::InvalidUrl { provider, source })?,
        })
    }
}

fn require_var(provider: &'static str, var: &'static str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingCredential { provider, var }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    // Environment variables are process-wide; serialize the tests that touch them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn lock_env() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    #[test]
    fn missing_client_id_names_the_provider() {
        let _guard = lock_env();
        std::env::remove_var("GITHUB_CLIENT_ID");
        std::env::set_var("GITHUB_CLIENT_SECRET", "secret");

        let message = OAuthConfig::github().unwrap_err().to_string();
        assert!(message.contains("GitHub"));
        assert!(message.contains("GITHUB_CLIENT_ID"));
    }

    #[test]
    fn empty_secret_counts_as_missing() {
        let _guard = lock_env();
        std::env::set_var("GOOGLE_CLIENT_ID", "id");
        std::env::set_var("GOOGLE_CLIENT_SECRET", "   ");

        let message = OAuthConfig::google().unwrap_err().to_string();
        assert!(message.contains("Google"));
        assert!(message.contains("GOOGLE_CLIENT_SECRET"));
    }

    #[test]
    fn complete_pair_builds_redirect_from_app_url() {
        let _guard = lock_env();
        std::env::set_var("GITHUB_CLIENT_ID", "id");
        std::env::set_var("GITHUB_CLIENT_SECRET", "secret");
        std::env::set_var("APP_URL", "https://devflow.example/");

        let config = OAuthConfig::github().unwrap();
        assert_eq!(
            config.redirect_url.as_str(),
            "https://devflow.example/auth/github/callback"
        );

        std::env::remove_var("APP_URL");
    }
}
