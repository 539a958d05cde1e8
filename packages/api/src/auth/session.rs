//! Session access for the authenticated user.

use tower_sessions::Session;
use uuid::Uuid;

use super::error::AuthError;

/// Key for storing the user id in the session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Read the signed-in user's id from the session, if any.
pub async fn session_user_id(session: &Session) -> Result<Option<Uuid>, AuthError> {
    let user_id: Option<String> = session
        .get(SESSION_USER_ID_KEY)
        .await
        .map_err(|e| AuthError::Session(e.to_string()))?;

    match user_id {
        Some(id) => Uuid::parse_str(&id)
            .map(Some)
            .map_err(|e| AuthError::Session(e.to_string())),
        None => Ok(None),
    }
}

/// Establish the session for a user after sign-in or sign-up.
pub async fn establish_session(session: &Session, user_id: Uuid) -> Result<(), AuthError> {
    session
        .insert(SESSION_USER_ID_KEY, user_id.to_string())
        .await
        .map_err(|e| AuthError::Session(e.to_string()))?;
    session
        .save()
        .await
        .map_err(|e| AuthError::Session(e.to_string()))
}
