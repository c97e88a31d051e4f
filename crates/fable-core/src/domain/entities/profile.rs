//! User profile entity.

use crate::{ProfileId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Extended profile data for a user, stored as a separate record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier for the profile.
    pub id: ProfileId,

    /// The user this profile belongs to.
    pub user_id: UserId,

    /// Free-form biography text.
    pub bio: Option<String>,

    /// Self-reported location.
    pub location: Option<String>,

    /// Personal website URL.
    pub website: Option<String>,

    /// Profile creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Creates an empty profile for a user.
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: ProfileId::new(),
            user_id,
            bio: None,
            location: None,
            website: None,
            created_at: now,
            updated_at: now,
        }
    }
}
