//! Comments, reviews and reactions attached to an incident.

use serde::{Deserialize, Serialize};
use store::{ClientError, User, UserId};

use super::incident::IncidentId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub incident_id: Option<IncidentId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    /// Raw value from the backend; read it through [`Review::stars`].
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub incident_id: Option<IncidentId>,
}

impl Review {
    /// Rating clamped to 0..=5 for display. Missing ratings show as 0.
    pub fn stars(&self) -> u8 {
        self.rating.map_or(0, |r| r.clamp(0, 5) as u8)
    }
}

/// Payload for `POST /incidents/{id}/reviews`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewReview {
    pub rating: u8,
    pub content: String,
}

impl NewReview {
    pub fn validate(&self) -> Result<(), ClientError> {
        if !(1..=5).contains(&self.rating) {
            return Err(ClientError::validation("Rating must be between 1 and 5"));
        }
        if self.content.trim().is_empty() {
            return Err(ClientError::validation("Review text is required"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    Like,
    Share,
}

impl ReactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Share => "share",
        }
    }
}

/// What a click on a reaction button does for the current user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReactionChange {
    Add,
    Remove,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: i64,
    pub reaction_type: ReactionType,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub incident_id: Option<IncidentId>,
}

/// Per-type reaction totals embedded in an incident.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCounts {
    #[serde(default)]
    pub like: u32,
    #[serde(default)]
    pub share: u32,
}

impl ReactionCounts {
    pub fn get(&self, reaction: ReactionType) -> u32 {
        match reaction {
            ReactionType::Like => self.like,
            ReactionType::Share => self.share,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_validation() {
        let review = NewReview { rating: 5, content: "Quick response".to_string() };
        assert!(review.validate().is_ok());

        let review = NewReview { rating: 0, content: "x".to_string() };
        assert!(review.validate().unwrap_err().message.contains("between 1 and 5"));

        let review = NewReview { rating: 6, content: "x".to_string() };
        assert!(review.validate().is_err());

        let review = NewReview { rating: 3, content: " ".to_string() };
        assert_eq!(review.validate().unwrap_err().message, "Review text is required");
    }

    #[test]
    fn test_decode_reaction() {
        let reaction: Reaction = serde_json::from_str(
            r#"{"id": 1, "reaction_type": "share", "created_at": "2024-05-01T10:00:00", "user_id": 2, "incident_id": 3}"#,
        )
        .unwrap();
        assert_eq!(reaction.reaction_type, ReactionType::Share);
        assert_eq!(reaction.user_id, Some(2));
    }

    #[test]
    fn test_reaction_counts() {
        let counts: ReactionCounts = serde_json::from_str(r#"{"like": 2}"#).unwrap();
        assert_eq!(counts.get(ReactionType::Like), 2);
        assert_eq!(counts.get(ReactionType::Share), 0);
        assert_eq!(ReactionType::Like.as_str(), "like");
    }
}
