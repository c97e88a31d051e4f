//! Cache key generators for consistent key naming.
//!
//! The schema must stay stable across deployments: entry keys are
//! `{kind}:{pk}` and secondary index keys are `{parent_kind}_{kind}s:{parent}`,
//! e.g. `comment:<id>` and `post_comments:<post_id>`.

use crate::entity::CacheEntity;

/// Generate the entry key for an entity's serialized form.
#[must_use]
pub fn entry_key<T: CacheEntity>(primary_key: &str) -> String {
    format!("{}:{}", T::KIND, primary_key)
}

/// Generate the secondary index key for a parent's cached children.
///
/// Returns `None` for kinds without a natural parent.
#[must_use]
pub fn parent_index_key<T: CacheEntity>(parent_key: &str) -> Option<String> {
    T::PARENT_KIND.map(|parent_kind| format!("{}_{}s:{}", parent_kind, T::KIND, parent_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fable_core::{Comment, User};

    #[test]
    fn test_entry_key_format() {
        assert_eq!(entry_key::<Comment>("c1"), "comment:c1");
        assert_eq!(entry_key::<User>("u1"), "user:u1");
    }

    #[test]
    fn test_parent_index_key_format() {
        assert_eq!(
            parent_index_key::<Comment>("p1").as_deref(),
            Some("post_comments:p1")
        );
    }

    #[test]
    fn test_unindexed_kind_has_no_index_key() {
        assert_eq!(parent_index_key::<User>("u1"), None);
    }
}
