//! The user model.
//!
//! [`User`] is the full `users` row, server only. [`UserInfo`] is the subset
//! that crosses the server/client boundary: it omits the password hash and
//! audit timestamps and carries the id as a `String` so it works in WASM.
//! `provider` is `"github"`, `"google"`, or `"local"` for email/password
//! accounts (where `provider_id` equals the email).

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Full user record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub provider: String,
    pub provider_id: String,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl User {
    /// Convert to [`UserInfo`] for client consumption.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            email: self.email.clone(),
            name: self.name.clone(),
            username: self.username.clone(),
            avatar_url: self.avatar_url.clone(),
            provider: self.provider.clone(),
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub provider: String,
}

impl UserInfo {
    /// Display name: the name, else the username, else the email.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: Option<&str>, username: Option<&str>) -> UserInfo {
        UserInfo {
            id: "1".to_string(),
            email: "ada@example.com".to_string(),
            name: name.map(String::from),
            username: username.map(String::from),
            avatar_url: None,
            provider: "local".to_string(),
        }
    }

    #[test]
    fn display_name_falls_back_through_username_to_email() {
        assert_eq!(info(Some("Ada"), Some("ada")).display_name(), "Ada");
        assert_eq!(info(None, Some("ada")).display_name(), "ada");
        assert_eq!(info(None, None).display_name(), "ada@example.com");
    }
}
