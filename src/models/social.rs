//! Verification and follow join records.

use serde::{Deserialize, Serialize};

/// Verification document (`verifications/{deedId_verifierId}`).
///
/// At most one per pair; a user may never verify their own deed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub deed_id: String,
    pub verifier_id: String,
    pub created_at: String,
}

/// Follow document (`follows/{followerId_followingId}`).
///
/// followerId != followingId; at most one per ordered pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    pub follower_id: String,
    pub following_id: String,
    pub created_at: String,
}
