//! Creation value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Creation ID value object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreationId(pub Uuid);

impl CreationId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random CreationId
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for CreationId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for CreationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of generated artifact a creation records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationKind {
    Article,
    BlogTitles,
    Image,
    BackgroundRemoval,
    ObjectRemoval,
    ResumeReview,
}

impl CreationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreationKind::Article => "article",
            CreationKind::BlogTitles => "blog_titles",
            CreationKind::Image => "image",
            CreationKind::BackgroundRemoval => "background_removal",
            CreationKind::ObjectRemoval => "object_removal",
            CreationKind::ResumeReview => "resume_review",
        }
    }

    /// Whether the content field holds a media URL rather than text.
    pub fn is_media(&self) -> bool {
        matches!(
            self,
            CreationKind::Image | CreationKind::BackgroundRemoval | CreationKind::ObjectRemoval
        )
    }
}

impl FromStr for CreationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "article" => Ok(CreationKind::Article),
            "blog_titles" => Ok(CreationKind::BlogTitles),
            "image" => Ok(CreationKind::Image),
            "background_removal" => Ok(CreationKind::BackgroundRemoval),
            "object_removal" => Ok(CreationKind::ObjectRemoval),
            "resume_review" => Ok(CreationKind::ResumeReview),
            other => Err(format!("Unknown creation kind: {}", other)),
        }
    }
}

impl fmt::Display for CreationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in [
            CreationKind::Article,
            CreationKind::BlogTitles,
            CreationKind::Image,
            CreationKind::BackgroundRemoval,
            CreationKind::ObjectRemoval,
            CreationKind::ResumeReview,
        ] {
            assert_eq!(kind.as_str().parse::<CreationKind>().unwrap(), kind);
        }
    }

    #[test]
    fn media_kinds_are_flagged() {
        assert!(CreationKind::Image.is_media());
        assert!(!CreationKind::Article.is_media());
        assert!(!CreationKind::ResumeReview.is_media());
    }
}
