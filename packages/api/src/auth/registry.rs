//! Process-wide OAuth provider registry.
//!
//! The environment is read and validated exactly once, before the server
//! starts accepting connections. Server functions and callback handlers read
//! the installed registry instead of re-reading the environment per request.

use std::sync::OnceLock;

use super::config::ConfigError;
use super::github::GitHubOAuth;
use super::google::GoogleOAuth;

static PROVIDERS: OnceLock<AuthProviders> = OnceLock::new();

/// The configured OAuth providers.
pub struct AuthProviders {
    pub github: GitHubOAuth,
    pub google: GoogleOAuth,
}

impl AuthProviders {
    /// Build both providers from the environment. Fails with a
    /// provider-identifying [`ConfigError`] when either credential pair is
    /// incomplete.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            github: GitHubOAuth::from_env()?,
            google: GoogleOAuth::from_env()?,
        })
    }

    /// Validate the environment and install the registry. Called by the
    /// server launcher; any error is fatal.
    pub fn init() -> Result<&'static Self, ConfigError> {
        if let Some(providers) = PROVIDERS.get() {
            return Ok(providers);
        }
        let providers = Self::from_env()?;
        Ok(PROVIDERS.get_or_init(|| providers))
    }

    /// The installed registry, if [`AuthProviders::init`] has run.
    pub fn get() -> Option<&'static Self> {
        PROVIDERS.get()
    }
}
