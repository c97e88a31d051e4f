//! User entity.

use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity as loaded from the primary store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Unique username.
    pub username: String,

    /// User's email address.
    pub email: String,

    /// Display name shown alongside posts and comments.
    pub display_name: Option<String>,

    /// Profile picture URL.
    pub avatar_url: Option<String>,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with the given details.
    #[must_use]
    pub fn new(username: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username,
            email,
            display_name: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the display name, falling back to the username.
    #[must_use]
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new("alice".to_string(), "alice@example.com".to_string());
        assert!(user.display_name.is_none());
        assert!(user.avatar_url.is_none());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_name_falls_back_to_username() {
        let mut user = User::new("alice".to_string(), "alice@example.com".to_string());
        assert_eq!(user.name(), "alice");

        user.display_name = Some("Alice L.".to_string());
        assert_eq!(user.name(), "Alice L.");
    }
}
