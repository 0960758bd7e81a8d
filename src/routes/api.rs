// SPDX-License-Identifier: MIT
// Copyright 2026 Deedsie contributors

//! Authenticated endpoints: profile, deeds, reactions, verifications,
//! follows. All handlers expect [`AuthUser`] injected by the session
//! middleware.

use crate::db::firestore::ProfileEdit;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Deed, DeedLocation, DeedType, Locale, ReactionType, UserProfile};
use crate::routes::feed::DeedResponse;
use crate::time_utils;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

const MAX_DEED_CONTENT_LEN: u64 = 500;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me).put(update_me))
        .route("/api/deeds", post(create_deed))
        .route(
            "/api/deeds/{id}/reactions/{type}",
            post(add_reaction).delete(remove_reaction),
        )
        .route("/api/deeds/{id}/reactions/me", get(get_my_reactions))
        .route("/api/deeds/{id}/verifications", post(add_verification))
        .route("/api/deeds/{id}/verifications/me", get(get_my_verification))
        .route(
            "/api/follows/{id}",
            put(follow_user).delete(unfollow_user),
        )
        .route("/api/follows", get(get_following))
}

// ─── Profile ─────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user_id: String,
    #[serde(flatten)]
    pub profile: UserProfile,
}

async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>> {
    let profile = state
        .db
        .get_user(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No profile for user {}", user.user_id)))?;

    Ok(Json(ProfileResponse {
        user_id: user.user_id,
        profile,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub location: Option<DeedLocation>,
    pub timezone: Option<String>,
    pub preferred_locale: Option<Locale>,
}

/// Partial profile update. Only the supplied fields are written; counters
/// and tier fields stay untouched even when a deed lands concurrently.
async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>> {
    let mut profile = state
        .db
        .get_user(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No profile for user {}", user.user_id)))?;

    let display_name = match payload.display_name {
        Some(name) => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::BadRequest(
                    "Display name must not be empty".to_string(),
                ));
            }
            Some(name)
        }
        None => None,
    };

    let edit = ProfileEdit {
        display_name,
        photo_url: payload.photo_url,
        location: payload.location,
        timezone: payload.timezone,
        preferred_locale: payload.preferred_locale,
        updated_at: time_utils::now_rfc3339(),
    };

    state.db.update_user(&user.user_id, &edit).await?;

    tracing::info!(user_id = %user.user_id, "Profile updated");

    // Echo the edit onto the fetched profile for the response.
    if let Some(name) = edit.display_name {
        profile.display_name = name;
    }
    if let Some(url) = edit.photo_url {
        profile.photo_url = Some(url);
    }
    if let Some(location) = edit.location {
        profile.country_code = location.country_code;
        profile.country_name = location.country_name;
        profile.region_id = location.region_id;
        profile.region_name = location.region_name;
        profile.town_id = location.town_id;
        profile.town_name = location.town_name;
        profile.lat = location.lat;
        profile.lng = location.lng;
    }
    if let Some(tz) = edit.timezone {
        profile.timezone = tz;
    }
    if let Some(locale) = edit.preferred_locale {
        profile.preferred_locale = locale;
    }
    profile.updated_at = edit.updated_at;

    Ok(Json(ProfileResponse {
        user_id: user.user_id,
        profile,
    }))
}

// ─── Deeds ───────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeedRequest {
    #[validate(length(max = MAX_DEED_CONTENT_LEN, message = "Deed content is too long"))]
    pub content: String,
    #[serde(rename = "type")]
    pub deed_type: DeedType,
    /// Overrides the profile location when present.
    #[serde(default)]
    pub location: Option<DeedLocation>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeedResponse {
    pub deed: DeedResponse,
    pub streak_days: u32,
    pub current_tier: String,
    pub tier_level: u32,
}

/// Post a deed and apply the reputation reward to the creator.
async fn create_deed(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateDeedRequest>,
) -> Result<(StatusCode, Json<CreateDeedResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let content = payload.content.trim().to_string();
    if content.is_empty() {
        return Err(AppError::BadRequest(
            "Deed content must not be empty".to_string(),
        ));
    }

    let profile = state
        .db
        .get_user(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No profile for user {}", user.user_id)))?;

    let location = payload.location.unwrap_or(DeedLocation {
        country_code: profile.country_code.clone(),
        country_name: profile.country_name.clone(),
        region_id: profile.region_id.clone(),
        region_name: profile.region_name.clone(),
        town_id: profile.town_id.clone(),
        town_name: profile.town_name.clone(),
        lat: profile.lat,
        lng: profile.lng,
    });

    let deed = Deed::new(
        user.user_id.clone(),
        profile.display_name.clone(),
        profile.photo_url.clone(),
        profile.current_tier.clone(),
        content,
        payload.deed_type,
        location,
    );

    let (stored, reward) = state.db.create_deed_with_reward(&deed).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateDeedResponse {
            deed: DeedResponse::from(stored),
            streak_days: reward.streak_days,
            current_tier: reward.tier_name,
            tier_level: reward.tier_level,
        }),
    ))
}

// ─── Reactions ───────────────────────────────────────────────

/// Whether a mutation actually changed anything. Repeats are no-ops.
#[derive(Serialize)]
pub struct AppliedResponse {
    pub applied: bool,
}

fn parse_reaction_type(raw: &str) -> Result<ReactionType> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Unknown reaction type: {}", raw)))
}

async fn add_reaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((deed_id, reaction_type)): Path<(String, String)>,
) -> Result<Json<AppliedResponse>> {
    let reaction_type = parse_reaction_type(&reaction_type)?;
    let applied = state
        .db
        .add_reaction(&deed_id, &user.user_id, reaction_type)
        .await?;
    Ok(Json(AppliedResponse { applied }))
}

async fn remove_reaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((deed_id, reaction_type)): Path<(String, String)>,
) -> Result<Json<AppliedResponse>> {
    let reaction_type = parse_reaction_type(&reaction_type)?;
    let applied = state
        .db
        .remove_reaction(&deed_id, &user.user_id, reaction_type)
        .await?;
    Ok(Json(AppliedResponse { applied }))
}

#[derive(Serialize)]
pub struct MyReactionsResponse {
    pub reactions: Vec<ReactionType>,
}

async fn get_my_reactions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(deed_id): Path<String>,
) -> Result<Json<MyReactionsResponse>> {
    let reactions = state.db.get_my_reactions(&deed_id, &user.user_id).await?;
    Ok(Json(MyReactionsResponse { reactions }))
}

// ─── Verifications ───────────────────────────────────────────

async fn add_verification(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(deed_id): Path<String>,
) -> Result<Json<AppliedResponse>> {
    let applied = state.db.add_verification(&deed_id, &user.user_id).await?;
    Ok(Json(AppliedResponse { applied }))
}

#[derive(Serialize)]
pub struct MyVerificationResponse {
    pub verified: bool,
}

async fn get_my_verification(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(deed_id): Path<String>,
) -> Result<Json<MyVerificationResponse>> {
    let verified = state.db.has_verified(&deed_id, &user.user_id).await?;
    Ok(Json(MyVerificationResponse { verified }))
}

// ─── Follows ─────────────────────────────────────────────────

async fn follow_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(following_id): Path<String>,
) -> Result<Json<AppliedResponse>> {
    let applied = state.db.follow_user(&user.user_id, &following_id).await?;
    Ok(Json(AppliedResponse { applied }))
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

async fn unfollow_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(following_id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    state.db.unfollow_user(&user.user_id, &following_id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

#[derive(Serialize)]
pub struct FollowingResponse {
    pub following: Vec<String>,
}

async fn get_following(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<FollowingResponse>> {
    let following = state.db.get_following_ids(&user.user_id).await?;
    Ok(Json(FollowingResponse { following }))
}
