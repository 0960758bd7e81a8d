//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const DEEDS: &str = "deeds";
    /// Reaction join records (keyed by deedId_userId_type)
    pub const REACTIONS: &str = "reactions";
    /// Verification join records (keyed by deedId_verifierId)
    pub const VERIFICATIONS: &str = "verifications";
    /// Follow join records (keyed by followerId_followingId)
    pub const FOLLOWS: &str = "follows";
}
