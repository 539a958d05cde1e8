//! GitHub OAuth 2.0 sign-in.
//!
//! Authorization Code flow with PKCE. [`GitHubOAuth::authorize_url`] builds an
//! authorization URL requesting the `user:email` and `read:user` scopes and
//! persists the CSRF state + verifier; [`GitHubOAuth::exchange_code`] is
//! called by the `/auth/github/callback` route, exchanges the code for an
//! access token, fetches the profile from `api.github.com/user` (falling back
//! to `/user/emails` for a verified primary address), and upserts the user
//! keyed on `(provider, provider_id)` so returning users get their profile
//! refreshed.

use oauth2::basic::BasicClient;
use oauth2::{
    AuthorizationCode, CsrfToken, EndpointNotSet, EndpointSet, PkceCodeChallenge,
    PkceCodeVerifier, Scope, TokenResponse,
};
use reqwest::Client;
use serde::Deserialize;

use super::config::{ConfigError, OAuthConfig};
use super::error::AuthError;
use super::state::{consume_state, store_state};
use crate::db::get_pool;
use crate::models::User;

/// GitHub user info from the REST API.
#[derive(Debug, Deserialize)]
struct GitHubUser {
    id: i64,
    login: String,
    email: Option<String>,
    name: Option<String>,
    avatar_url: Option<String>,
}

/// GitHub email info from `/user/emails`.
#[derive(Debug, Deserialize)]
struct GitHubEmail {
    email: String,
    primary: bool,
    verified: bool,
}

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// GitHub OAuth handler.
pub struct GitHubOAuth {
    config: OAuthConfig,
}

impl GitHubOAuth {
    /// Build the handler from `GITHUB_CLIENT_ID` / `GITHUB_CLIENT_SECRET`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            config: OAuthConfig::github()?,
        })
    }

    fn client(&self) -> ConfiguredClient {
        BasicClient::new(self.config.client_id.clone())
            .set_client_secret(self.config.client_secret.clone())
            .set_auth_uri(self.config.auth_url.clone())
            .set_token_uri(self.config.token_url.clone())
            .set_redirect_uri(self.config.redirect_url.clone())
    }

    /// Generate an authorization URL with PKCE and persist the state.
    pub async fn authorize_url(&self) -> Result<String, AuthError> {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_state) = self
            .client()
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("user:email".to_string()))
            .add_scope(Scope::new("read:user".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        store_state(csrf_state.secret(), "github", pkce_verifier.secret()).await?;

        Ok(auth_url.to_string())
    }

    /// Exchange the callback code for a token, fetch the profile, and upsert
    /// the user.
    pub async fn exchange_code(&self, code: &str, state: &str) -> Result<User, AuthError> {
        let pkce_verifier = consume_state(state, "github").await?;

        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let token = self
            .client()
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier))
            .request_async(&http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let access_token = token.access_token().secret();
        let api_client = Client::new();

        let github_user: GitHubUser = api_client
            .get("https://api.github.com/user")
            .header("Authorization", format!("Bearer {}", access_token))
            .header("User-Agent", "DevFlow")
            .send()
            .await?
            .json()
            .await?;

        let email = match github_user.email {
            Some(email) => email,
            None => {
                let emails: Vec<GitHubEmail> = api_client
                    .get("https://api.github.com/user/emails")
                    .header("Authorization", format!("Bearer {}", access_token))
                    .header("User-Agent", "DevFlow")
                    .send()
                    .await?
                    .json()
                    .await?;

                emails
                    .into_iter()
                    .find(|e| e.primary && e.verified)
                    .map(|e| e.email)
                    .ok_or(AuthError::MissingEmail("GitHub"))?
            }
        };

        let pool = get_pool().await?;
        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (email, name, username, avatar_url, provider, provider_id)
            VALUES ($1, $2, $3, $4, 'github', $5)
            ON CONFLICT (provider, provider_id)
            DO UPDATE SET
                email = EXCLUDED.email,
                name = EXCLUDED.name,
                avatar_url = EXCLUDED.avatar_url,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(&email)
        .bind(github_user.name.as_deref().unwrap_or(&github_user.login))
        .bind(&github_user.login)
        .bind(&github_user.avatar_url)
        .bind(github_user.id.to_string())
        .fetch_one(pool)
        .await?;

        Ok(user)
    }
}
