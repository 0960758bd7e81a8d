//! Reaction join records: at most one per (deed, user, type).

use serde::{Deserialize, Serialize};

/// The two reaction kinds a user can toggle on a deed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    Like,
    Inspired,
}

impl ReactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionType::Like => "like",
            ReactionType::Inspired => "inspired",
        }
    }

    /// Deed counter field this reaction type increments.
    pub fn counter_field(&self) -> &'static str {
        match self {
            ReactionType::Like => "reactionCount",
            ReactionType::Inspired => "inspiredCount",
        }
    }
}

impl std::str::FromStr for ReactionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(ReactionType::Like),
            "inspired" => Ok(ReactionType::Inspired),
            _ => Err(()),
        }
    }
}

/// Reaction document (`reactions/{deedId_userId_type}`).
///
/// Existence of the record is the sole source of truth for "has this user
/// reacted with this type to this deed".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub deed_id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
    pub created_at: String,
}
