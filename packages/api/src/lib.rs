//! # API crate — shared fullstack server functions for DevFlow
//!
//! Defines every Dioxus server function the web frontend calls, plus the
//! modules backing them:
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | — | OAuth (GitHub, Google) provider configuration and flows, sessions, Argon2id password hashing |
//! | [`db`] | `server` | PostgreSQL connection pool (lazy `OnceCell` singleton) |
//! | [`models`] | — | The `User` row and its client-safe [`UserInfo`] projection |
//!
//! Every public `async fn` here is a server function, annotated with
//! `#[get(...)]` or `#[post(...)]` and compiled twice: once with the full
//! server logic (behind `#[cfg(feature = "server")]`) and once as a thin
//! client stub that forwards the call over HTTP.
//!
//! - **Session**: `get_current_user`, `sign_out`
//! - **OAuth**: `get_sign_in_url`
//! - **Local accounts**: `sign_up`, `sign_in_with_password`

use dioxus::prelude::*;

pub mod auth;
pub mod db;
pub mod models;

pub use models::UserInfo;

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::User;

    let user_id = auth::session_user_id(&session)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user_id) = user_id else {
        return Ok(None);
    };

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.map(|u| u.to_info()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Get the OAuth authorization URL for a provider.
#[cfg(feature = "server")]
#[get("/api/auth/sign-in/:provider")]
pub async fn get_sign_in_url(provider: String) -> Result<String, ServerFnError> {
    let providers = auth::AuthProviders::get()
        .ok_or_else(|| ServerFnError::new("OAuth providers are not configured"))?;

    let url = match provider.as_str() {
        "github" => providers.github.authorize_url().await,
        "google" => providers.google.authorize_url().await,
        _ => return Err(ServerFnError::new(format!("Unknown provider: {}", provider))),
    }
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(url)
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/sign-in/:provider")]
pub async fn get_sign_in_url(provider: String) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Sign out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/sign-out", session: tower_sessions::Session)]
pub async fn sign_out() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/sign-out")]
pub async fn sign_out() -> Result<(), ServerFnError> {
    Ok(())
}

/// Create a local account with email, password, name, and username.
#[cfg(feature = "server")]
#[post("/api/auth/sign-up", session: tower_sessions::Session)]
pub async fn sign_up(
    email: String,
    password: String,
    name: String,
    username: String,
) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;

    let email = email.trim().to_lowercase();
    let name = name.trim().to_string();
    let username = username.trim().to_string();

    if email.is_empty() || !email.contains('@') {
        return Err(ServerFnError::new("Invalid email address"));
    }
    if password.len() < 6 {
        return Err(ServerFnError::new("Password must be at least 6 characters"));
    }
    if name.is_empty() {
        return Err(ServerFnError::new("Name is required"));
    }
    if username.len() < 3 {
        return Err(ServerFnError::new(
            "Username must be at least 3 characters",
        ));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let existing: Option<(i64,)> =
        sqlx::query_as("SELECT 1 as n FROM users WHERE provider = 'local' AND provider_id = $1")
            .bind(&email)
            .fetch_optional(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    if existing.is_some() {
        return Err(ServerFnError::new(
            "An account with this email already exists",
        ));
    }

    let taken: Option<(i64,)> = sqlx::query_as("SELECT 1 as n FROM users WHERE username = $1")
        .bind(&username)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if taken.is_some() {
        return Err(ServerFnError::new("Username is already taken"));
    }

    let password_hash =
        auth::hash_password(&password).map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: models::User = sqlx::query_as(
        "INSERT INTO users (email, name, username, provider, provider_id, password_hash) \
         VALUES ($1, $2, $3, 'local', $1, $4) RETURNING *",
    )
    .bind(&email)
    .bind(&name)
    .bind(&username)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    auth::establish_session(&session, user.id)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/sign-up")]
pub async fn sign_up(
    email: String,
    password: String,
    name: String,
    username: String,
) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Sign in to a local account with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/sign-in", session: tower_sessions::Session)]
pub async fn sign_in_with_password(
    email: String,
    password: String,
) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;

    let email = email.trim().to_lowercase();

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<models::User> =
        sqlx::query_as("SELECT * FROM users WHERE provider = 'local' AND provider_id = $1")
            .bind(&email)
            .fetch_optional(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user) = user else {
        return Err(ServerFnError::new("Invalid email or password"));
    };

    let Some(ref hash) = user.password_hash else {
        return Err(ServerFnError::new("Invalid email or password"));
    };

    let valid = auth::verify_password(&password, hash)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if !valid {
        return Err(ServerFnError::new("Invalid email or password"));
    }

    auth::establish_session(&session, user.id)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/sign-in")]
pub async fn sign_in_with_password(
    email: String,
    password: String,
) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
