//! Creation domain entities

use chrono::{DateTime, Utc};

use super::value_objects::{CreationId, CreationKind};
use crate::domain::entitlement::UserId;

/// A persisted generation result: the prompt that produced it and either the
/// generated text or the CDN URL of the generated media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creation {
    pub id: CreationId,
    pub user_id: UserId,
    pub prompt: String,
    pub content: String,
    pub kind: CreationKind,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Creation {
    /// Create a new unpublished creation
    pub fn new(user_id: UserId, prompt: String, content: String, kind: CreationKind) -> Self {
        let now = Utc::now();
        Self {
            id: CreationId::generate(),
            user_id,
            prompt,
            content,
            kind,
            published: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Flip the published flag
    pub fn toggle_published(&mut self) {
        self.published = !self.published;
        self.updated_at = Utc::now();
    }

    /// Whether the given user owns this creation
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Creation {
        Creation::new(
            UserId::new("user_1").unwrap(),
            "Rust borrow checker".to_string(),
            "An article...".to_string(),
            CreationKind::Article,
        )
    }

    #[test]
    fn new_creations_start_unpublished() {
        let creation = sample();
        assert!(!creation.published);
        assert_eq!(creation.kind, CreationKind::Article);
    }

    #[test]
    fn toggle_flips_published() {
        let mut creation = sample();
        creation.toggle_published();
        assert!(creation.published);
        creation.toggle_published();
        assert!(!creation.published);
    }

    #[test]
    fn ownership_check() {
        let creation = sample();
        assert!(creation.is_owned_by(&UserId::new("user_1").unwrap()));
        assert!(!creation.is_owned_by(&UserId::new("user_2").unwrap()));
    }
}
