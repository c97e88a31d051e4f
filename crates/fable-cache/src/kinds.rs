//! `CacheEntity` implementations for the cached domain entities.

use crate::entity::CacheEntity;
use fable_core::{Comment, User, UserProfile};

impl CacheEntity for User {
    const KIND: &'static str = "user";

    fn primary_key(&self) -> String {
        self.id.to_string()
    }
}

impl CacheEntity for UserProfile {
    const KIND: &'static str = "profile";

    fn primary_key(&self) -> String {
        self.id.to_string()
    }
}

impl CacheEntity for Comment {
    const KIND: &'static str = "comment";
    const PARENT_KIND: Option<&'static str> = Some("post");

    fn primary_key(&self) -> String {
        self.id.to_string()
    }

    fn parent_key(&self) -> Option<String> {
        Some(self.post_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fable_core::{PostId, UserId};

    #[test]
    fn test_comment_is_parent_indexed() {
        let comment = Comment::new(PostId::new(), UserId::new(), "hi".to_string());
        assert_eq!(Comment::PARENT_KIND, Some("post"));
        assert_eq!(comment.parent_key(), Some(comment.post_id.to_string()));
        assert_eq!(comment.primary_key(), comment.id.to_string());
    }

    #[test]
    fn test_user_has_no_parent() {
        let user = User::new("alice".to_string(), "alice@example.com".to_string());
        assert_eq!(User::PARENT_KIND, None);
        assert_eq!(user.parent_key(), None);
    }
}
