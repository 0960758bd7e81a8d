// SPDX-License-Identifier: MIT
// Copyright 2026 Deedsie contributors

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile storage, lazy creation)
//! - Deeds (the append-only post log + counter updates)
//! - Reactions / Verifications / Follows (idempotent join records)
//! - Leaderboard queries
//!
//! Counter fields are always updated through Firestore's atomic increment
//! transform, never read-modify-write in application code. The join records
//! use create-if-absent inserts, so two concurrent identical requests cannot
//! double-create and double-increment.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Deed, Follow, Reaction, ReactionType, UserProfile, Verification};
use crate::services::reputation::{self, DeedReward};
use crate::time_utils;
use serde::{Deserialize, Serialize};

/// Leaderboard scope: which profile field the scope id matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardScope {
    Town,
    Country,
}

impl LeaderboardScope {
    pub fn field(&self) -> &'static str {
        match self {
            LeaderboardScope::Town => "townId",
            LeaderboardScope::Country => "countryCode",
        }
    }
}

/// Deterministic composite id for a reaction record.
pub fn reaction_doc_id(deed_id: &str, user_id: &str, reaction_type: ReactionType) -> String {
    format!(
        "{}_{}_{}",
        urlencoding::encode(deed_id),
        urlencoding::encode(user_id),
        reaction_type.as_str()
    )
}

/// Deterministic composite id for a verification record.
pub fn verification_doc_id(deed_id: &str, verifier_id: &str) -> String {
    format!(
        "{}_{}",
        urlencoding::encode(deed_id),
        urlencoding::encode(verifier_id)
    )
}

/// Deterministic composite id for a follow record.
pub fn follow_doc_id(follower_id: &str, following_id: &str) -> String {
    format!(
        "{}_{}",
        urlencoding::encode(follower_id),
        urlencoding::encode(following_id)
    )
}

/// Direct profile edit. Only the supplied fields are written; the counter
/// and tier fields belong to the deed-creation rule and are never part of
/// the update mask.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(flatten)]
    pub location: Option<crate::models::DeedLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_locale: Option<crate::models::Locale>,
    pub updated_at: String,
}

impl ProfileEdit {
    /// Update mask covering exactly the fields this edit carries.
    pub fn field_paths(&self) -> Vec<&'static str> {
        let mut paths = vec!["updatedAt"];
        if self.display_name.is_some() {
            paths.push("displayName");
        }
        if self.photo_url.is_some() {
            paths.push("photoUrl");
        }
        if self.location.is_some() {
            paths.extend([
                "countryCode",
                "countryName",
                "regionId",
                "regionName",
                "townId",
                "townName",
                "lat",
                "lng",
            ]);
        }
        if self.timezone.is_some() {
            paths.push("timezone");
        }
        if self.preferred_locale.is_some() {
            paths.push("preferredLocale");
        }
        paths
    }
}

/// Partial update written by the reward transaction; counter fields are
/// handled separately via increment transforms.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RewardFields {
    streak_days: u32,
    last_deed_date: String,
    current_tier: String,
    tier_level: u32,
    updated_at: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifiedFields {
    verified: bool,
    updated_at: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TouchFields {
    updated_at: String,
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// Write operations return an error; reads return empty results.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user profile by id. Returns None in offline mode.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        let Some(client) = self.client.as_ref() else {
            return Ok(None);
        };

        client
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a profile on first sign-in if none exists.
    ///
    /// Uses Firestore's conditional create so two concurrent sign-ins cannot
    /// double-create. Returns the stored profile and whether it was new.
    pub async fn create_user_if_absent(
        &self,
        user_id: &str,
        profile: &UserProfile,
    ) -> Result<(UserProfile, bool), AppError> {
        let client = self.get_client()?;

        let inserted = client
            .fluent()
            .insert()
            .into(collections::USERS)
            .document_id(user_id)
            .object(profile)
            .execute::<()>()
            .await;

        match inserted {
            Ok(()) => {
                tracing::info!(user_id, "Created user profile");
                Ok((profile.clone(), true))
            }
            Err(firestore::errors::FirestoreError::DataConflictError(_)) => {
                // Second sign-in: the creation path never overwrites.
                let existing = self
                    .get_user(user_id)
                    .await?
                    .ok_or_else(|| AppError::Database("profile vanished after conflict".into()))?;
                Ok((existing, false))
            }
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    /// Apply a direct profile edit (location, locale, display fields).
    ///
    /// Writes only the fields the edit carries, so a deed posted
    /// concurrently can never have its counters or streak rolled back by
    /// a full-document overwrite.
    pub async fn update_user(&self, user_id: &str, edit: &ProfileEdit) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(edit.field_paths())
            .in_col(collections::USERS)
            .document_id(user_id)
            .object(edit)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Deed Operations ─────────────────────────────────────────

    /// Get a deed by id. Returns None in offline mode.
    pub async fn get_deed(&self, deed_id: &str) -> Result<Option<Deed>, AppError> {
        let Some(client) = self.client.as_ref() else {
            return Ok(None);
        };

        client
            .fluent()
            .select()
            .by_id_in(collections::DEEDS)
            .obj()
            .one(deed_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a deed and apply exactly one reputation update to the creator.
    ///
    /// The deed is inserted with a server-generated id, then the profile
    /// reward is written in one commit. totalDeeds/impactScore use
    /// increment transforms and stay exact under concurrent posts; the
    /// streak and tier fields are computed from a plain read and written
    /// last-writer-wins.
    ///
    /// Fails without creating anything when no database is configured or the
    /// creator profile does not exist.
    pub async fn create_deed_with_reward(
        &self,
        deed: &Deed,
    ) -> Result<(Deed, DeedReward), AppError> {
        let client = self.get_client()?;

        // Abort before writing if the creator profile is gone.
        if self.get_user(&deed.creator_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "No profile for user {}",
                deed.creator_id
            )));
        }

        let stored: Deed = client
            .fluent()
            .insert()
            .into(collections::DEEDS)
            .generate_document_id()
            .object(deed)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let reward = self.apply_deed_reward(&deed.creator_id).await?;

        tracing::info!(
            creator_id = %deed.creator_id,
            deed_id = stored.id.as_deref().unwrap_or("<unknown>"),
            streak_days = reward.streak_days,
            "Deed created"
        );

        Ok((stored, reward))
    }

    /// Apply the reputation rule for one new deed inside a transaction.
    async fn apply_deed_reward(&self, creator_id: &str) -> Result<DeedReward, AppError> {
        let client = self.get_client()?;

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        // Plain read, not attached to the transaction: the increments
        // below stay exact either way, while the streak/tier fields are
        // best effort under same-user concurrent posts.
        let profile: UserProfile = client
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(creator_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to read profile: {}", e)))?
            .ok_or_else(|| AppError::NotFound(format!("No profile for user {}", creator_id)))?;

        let reward = reputation::deed_reward(
            profile.total_deeds,
            profile.streak_days,
            &profile.last_deed_date,
            time_utils::utc_today(),
        );

        let fields = RewardFields {
            streak_days: reward.streak_days,
            last_deed_date: reward.last_deed_date.clone(),
            current_tier: reward.tier_name.clone(),
            tier_level: reward.tier_level,
            updated_at: time_utils::now_rfc3339(),
        };

        client
            .fluent()
            .update()
            .fields([
                "streakDays",
                "lastDeedDate",
                "currentTier",
                "tierLevel",
                "updatedAt",
            ])
            .in_col(collections::USERS)
            .document_id(creator_id)
            .object(&fields)
            .transforms(|t| {
                t.fields([
                    t.field("totalDeeds").increment(1),
                    t.field("impactScore")
                        .increment(reputation::IMPACT_POINTS_PER_DEED as i64),
                ])
            })
            .add_to_transaction(&mut transaction)
            .map_err(|e| AppError::Database(format!("Failed to add reward write: {}", e)))?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        Ok(reward)
    }

    /// Global or town-scoped feed, newest first. Empty in offline mode.
    pub async fn get_deeds(&self, town_id: Option<&str>, limit: u32) -> Result<Vec<Deed>, AppError> {
        let Some(client) = self.client.as_ref() else {
            return Ok(Vec::new());
        };

        let query = client.fluent().select().from(collections::DEEDS);

        let query = match town_id {
            Some(town) if !town.is_empty() && town != "unknown" => {
                let town = town.to_string();
                query.filter(move |q| q.for_all([q.field("townId").eq(town.clone())]))
            }
            _ => query,
        };

        query
            .order_by([(
                "createdAt",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Deeds posted by one creator, newest first.
    pub async fn get_deeds_by_creator(
        &self,
        creator_id: &str,
        limit: u32,
    ) -> Result<Vec<Deed>, AppError> {
        let Some(client) = self.client.as_ref() else {
            return Ok(Vec::new());
        };

        let creator = creator_id.to_string();
        client
            .fluent()
            .select()
            .from(collections::DEEDS)
            .filter(move |q| q.for_all([q.field("creatorId").eq(creator.clone())]))
            .order_by([(
                "createdAt",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Deeds posted by any of up to 30 creators (friends feed membership
    /// filter - the Firestore "in" operator caps at 30 values).
    pub async fn get_deeds_for_creators(
        &self,
        creator_ids: &[String],
        limit: u32,
    ) -> Result<Vec<Deed>, AppError> {
        let Some(client) = self.client.as_ref() else {
            return Ok(Vec::new());
        };

        let ids = creator_ids.to_vec();
        client
            .fluent()
            .select()
            .from(collections::DEEDS)
            .filter(move |q| q.for_all([q.field("creatorId").is_in(ids.clone())]))
            .order_by([(
                "createdAt",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Reaction Operations ─────────────────────────────────────

    /// Add a reaction. Returns false (no-op) when the record already exists.
    pub async fn add_reaction(
        &self,
        deed_id: &str,
        user_id: &str,
        reaction_type: ReactionType,
    ) -> Result<bool, AppError> {
        let client = self.get_client()?;

        let reaction = Reaction {
            deed_id: deed_id.to_string(),
            user_id: user_id.to_string(),
            reaction_type,
            created_at: time_utils::now_rfc3339(),
        };

        let inserted = client
            .fluent()
            .insert()
            .into(collections::REACTIONS)
            .document_id(reaction_doc_id(deed_id, user_id, reaction_type))
            .object(&reaction)
            .execute::<()>()
            .await;

        match inserted {
            Ok(()) => {}
            Err(firestore::errors::FirestoreError::DataConflictError(_)) => {
                tracing::debug!(deed_id, user_id, "Reaction already exists (idempotent skip)");
                return Ok(false);
            }
            Err(e) => return Err(AppError::Database(e.to_string())),
        }

        self.bump_deed_counter(deed_id, reaction_type.counter_field(), 1)
            .await?;
        Ok(true)
    }

    /// Remove a reaction. Returns false (no-op) when the record is absent.
    pub async fn remove_reaction(
        &self,
        deed_id: &str,
        user_id: &str,
        reaction_type: ReactionType,
    ) -> Result<bool, AppError> {
        let client = self.get_client()?;
        let doc_id = reaction_doc_id(deed_id, user_id, reaction_type);

        let existing: Option<Reaction> = client
            .fluent()
            .select()
            .by_id_in(collections::REACTIONS)
            .obj()
            .one(&doc_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if existing.is_none() {
            return Ok(false);
        }

        client
            .fluent()
            .delete()
            .from(collections::REACTIONS)
            .document_id(&doc_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        // Counters never go below zero, even if the record and counter have
        // drifted through an out-of-band write.
        let counter_positive = self
            .get_deed(deed_id)
            .await?
            .map(|deed| match reaction_type {
                ReactionType::Like => deed.reaction_count > 0,
                ReactionType::Inspired => deed.inspired_count > 0,
            })
            .unwrap_or(false);

        if counter_positive {
            self.bump_deed_counter(deed_id, reaction_type.counter_field(), -1)
                .await?;
        }

        Ok(true)
    }

    /// Which reaction types the user has applied to a deed.
    pub async fn get_my_reactions(
        &self,
        deed_id: &str,
        user_id: &str,
    ) -> Result<Vec<ReactionType>, AppError> {
        let Some(client) = self.client.as_ref() else {
            return Ok(Vec::new());
        };

        let mut result = Vec::new();
        for reaction_type in [ReactionType::Like, ReactionType::Inspired] {
            let existing: Option<Reaction> = client
                .fluent()
                .select()
                .by_id_in(collections::REACTIONS)
                .obj()
                .one(&reaction_doc_id(deed_id, user_id, reaction_type))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

            if existing.is_some() {
                result.push(reaction_type);
            }
        }

        Ok(result)
    }

    /// Atomic counter bump on a deed, touching updatedAt in the same write.
    async fn bump_deed_counter(
        &self,
        deed_id: &str,
        field: &str,
        delta: i64,
    ) -> Result<(), AppError> {
        let client = self.get_client()?;
        let field = field.to_string();
        let touch = TouchFields {
            updated_at: time_utils::now_rfc3339(),
        };

        // Transforms only apply inside transaction or batch writes.
        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        client
            .fluent()
            .update()
            .fields(["updatedAt"])
            .in_col(collections::DEEDS)
            .document_id(deed_id)
            .object(&touch)
            .transforms(|t| t.fields([t.field(&field).increment(delta)]))
            .add_to_transaction(&mut transaction)
            .map_err(|e| AppError::Database(format!("Failed to add counter write: {}", e)))?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;
        Ok(())
    }

    // ─── Verification Operations ─────────────────────────────────

    /// Add a peer verification.
    ///
    /// Returns false without mutating anything when the verifier is the
    /// deed's creator or the pair already verified. The first success flips
    /// `verified` permanently.
    pub async fn add_verification(
        &self,
        deed_id: &str,
        verifier_id: &str,
    ) -> Result<bool, AppError> {
        let client = self.get_client()?;

        let Some(deed) = self.get_deed(deed_id).await? else {
            return Err(AppError::NotFound(format!("Deed {} not found", deed_id)));
        };

        if deed.creator_id == verifier_id {
            tracing::debug!(deed_id, verifier_id, "Self-verification rejected");
            return Ok(false);
        }

        let verification = Verification {
            deed_id: deed_id.to_string(),
            verifier_id: verifier_id.to_string(),
            created_at: time_utils::now_rfc3339(),
        };

        let inserted = client
            .fluent()
            .insert()
            .into(collections::VERIFICATIONS)
            .document_id(verification_doc_id(deed_id, verifier_id))
            .object(&verification)
            .execute::<()>()
            .await;

        match inserted {
            Ok(()) => {}
            Err(firestore::errors::FirestoreError::DataConflictError(_)) => {
                return Ok(false);
            }
            Err(e) => return Err(AppError::Database(e.to_string())),
        }

        let fields = VerifiedFields {
            verified: true,
            updated_at: time_utils::now_rfc3339(),
        };

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        client
            .fluent()
            .update()
            .fields(["verified", "updatedAt"])
            .in_col(collections::DEEDS)
            .document_id(deed_id)
            .object(&fields)
            .transforms(|t| t.fields([t.field("verificationCount").increment(1)]))
            .add_to_transaction(&mut transaction)
            .map_err(|e| AppError::Database(format!("Failed to add verified write: {}", e)))?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        Ok(true)
    }

    /// Whether the user has verified the deed.
    pub async fn has_verified(&self, deed_id: &str, user_id: &str) -> Result<bool, AppError> {
        let Some(client) = self.client.as_ref() else {
            return Ok(false);
        };

        let existing: Option<Verification> = client
            .fluent()
            .select()
            .by_id_in(collections::VERIFICATIONS)
            .obj()
            .one(&verification_doc_id(deed_id, user_id))
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(existing.is_some())
    }

    // ─── Follow Operations ───────────────────────────────────────

    /// Follow a user. No-op on self-follow or an existing record.
    pub async fn follow_user(
        &self,
        follower_id: &str,
        following_id: &str,
    ) -> Result<bool, AppError> {
        if follower_id == following_id {
            return Ok(false);
        }

        let client = self.get_client()?;

        let follow = Follow {
            follower_id: follower_id.to_string(),
            following_id: following_id.to_string(),
            created_at: time_utils::now_rfc3339(),
        };

        let inserted = client
            .fluent()
            .insert()
            .into(collections::FOLLOWS)
            .document_id(follow_doc_id(follower_id, following_id))
            .object(&follow)
            .execute::<()>()
            .await;

        match inserted {
            Ok(()) => Ok(true),
            Err(firestore::errors::FirestoreError::DataConflictError(_)) => Ok(false),
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    /// Unfollow a user. Deleting an absent record is a no-op.
    pub async fn unfollow_user(
        &self,
        follower_id: &str,
        following_id: &str,
    ) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::FOLLOWS)
            .document_id(follow_doc_id(follower_id, following_id))
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Ids of every user this user follows. No ordering guarantee.
    pub async fn get_following_ids(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        let Some(client) = self.client.as_ref() else {
            return Ok(Vec::new());
        };

        let follower = user_id.to_string();
        let follows: Vec<Follow> = client
            .fluent()
            .select()
            .from(collections::FOLLOWS)
            .filter(move |q| q.for_all([q.field("followerId").eq(follower.clone())]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(follows.into_iter().map(|f| f.following_id).collect())
    }

    /// Whether follower already follows following.
    pub async fn is_following(
        &self,
        follower_id: &str,
        following_id: &str,
    ) -> Result<bool, AppError> {
        let Some(client) = self.client.as_ref() else {
            return Ok(false);
        };

        if follower_id == following_id {
            return Ok(false);
        }

        let existing: Option<Follow> = client
            .fluent()
            .select()
            .by_id_in(collections::FOLLOWS)
            .obj()
            .one(&follow_doc_id(follower_id, following_id))
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(existing.is_some())
    }

    // ─── Leaderboard ─────────────────────────────────────────────

    /// Profiles in a scope ordered by impactScore descending.
    ///
    /// Ties share a score but not a position: Firestore appends `__name__`
    /// to every ordering, so equal scores come back in document-id order.
    pub async fn get_leaderboard(
        &self,
        scope: LeaderboardScope,
        scope_id: &str,
        limit: u32,
    ) -> Result<Vec<UserProfile>, AppError> {
        let Some(client) = self.client.as_ref() else {
            return Ok(Vec::new());
        };

        let scope_id = scope_id.to_string();
        client
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| q.for_all([q.field(scope.field()).eq(scope_id.clone())]))
            .order_by([(
                "impactScore",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
