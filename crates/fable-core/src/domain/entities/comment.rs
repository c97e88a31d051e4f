//! Comment entity.

use crate::{CommentId, PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment left under a post.
///
/// `liked_by` carries a serde default so that a payload without the field
/// decodes to an empty list rather than failing; an empty list survives a
/// cache round trip as an empty list, never as an absent value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier for the comment.
    pub id: CommentId,

    /// The post this comment belongs to.
    pub post_id: PostId,

    /// The user who wrote the comment.
    pub author_id: UserId,

    /// Comment body.
    pub content: String,

    /// Users who liked this comment.
    #[serde(default)]
    pub liked_by: Vec<UserId>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a new comment under a post.
    #[must_use]
    pub fn new(post_id: PostId, author_id: UserId, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: CommentId::new(),
            post_id,
            author_id,
            content,
            liked_by: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Records a like from a user. No-op if the user already liked it.
    pub fn like(&mut self, user_id: UserId) {
        if !self.liked_by.contains(&user_id) {
            self.liked_by.push(user_id);
            self.updated_at = Utc::now();
        }
    }

    /// Returns the number of likes.
    #[must_use]
    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }
}
