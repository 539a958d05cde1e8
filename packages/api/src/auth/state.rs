//! CSRF state and PKCE verifier persistence shared by the OAuth flows.
//!
//! The authorization URL step stores a `(state, provider, verifier)` row with
//! a 10-minute expiry; the callback consumes it atomically, so a state value
//! can be redeemed at most once.

use super::error::AuthError;
use crate::db::get_pool;

/// Persist a pending state/verifier pair for a provider.
pub(super) async fn store_state(
    state: &str,
    provider: &str,
    verifier: &str,
) -> Result<(), AuthError> {
    let pool = get_pool().await?;

    sqlx::query(
        r#"
        INSERT INTO oauth_states (state, provider, pkce_verifier, expires_at)
        VALUES ($1, $2, $3, NOW() + INTERVAL '10 minutes')
        "#,
    )
    .bind(state)
    .bind(provider)
    .bind(verifier)
    .execute(pool)
    .await?;

    Ok(())
}

/// Retrieve and delete a pending state row, validating expiry in one query.
pub(super) async fn consume_state(state: &str, provider: &str) -> Result<String, AuthError> {
    let pool = get_pool().await?;

    let row: Option<(String,)> = sqlx::query_as(
        r#"
        DELETE FROM oauth_states
        WHERE state = $1 AND provider = $2 AND expires_at > NOW()
        RETURNING pkce_verifier
        "#,
    )
    .bind(state)
    .bind(provider)
    .fetch_optional(pool)
    .await?;

    row.map(|(verifier,)| verifier).ok_or(AuthError::InvalidState)
}
