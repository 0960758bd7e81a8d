// SPDX-License-Identifier: MIT
// Copyright 2026 Deedsie contributors

//! Public read endpoints: deed feeds and leaderboards.

use crate::db::firestore::LeaderboardScope;
use crate::error::Result;
use crate::models::{Deed, UserProfile};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const MAX_FEED_LIMIT: u32 = 50;
const DEFAULT_FEED_LIMIT: u32 = 50;
const MAX_LEADERBOARD_LIMIT: u32 = 50;
const DEFAULT_LEADERBOARD_LIMIT: u32 = 20;
/// Firestore "in" membership filters cap at 30 values.
const MAX_FRIEND_FILTER_IDS: usize = 30;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/feed", get(get_feed))
        .route("/api/users/{id}/deeds", get(get_user_deeds))
        .route("/api/leaderboard", get(get_leaderboard))
}

/// Deed as returned by the API, with its document id inlined.
#[derive(Serialize)]
pub struct DeedResponse {
    pub id: String,
    #[serde(flatten)]
    pub deed: Deed,
}

impl From<Deed> for DeedResponse {
    fn from(deed: Deed) -> Self {
        Self {
            id: deed.id.clone().unwrap_or_default(),
            deed,
        }
    }
}

#[derive(Serialize)]
pub struct FeedResponse {
    pub deeds: Vec<DeedResponse>,
}

#[derive(Deserialize)]
struct FeedQuery {
    /// Filter to a town (townId)
    town: Option<String>,
    /// Friends feed: deeds from this user and everyone they follow
    friends_of: Option<String>,
    limit: Option<u32>,
}

/// Global, town-scoped, or friends deed feed, newest first.
async fn get_feed(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeedQuery>,
) -> Result<Json<FeedResponse>> {
    let limit = params.limit.unwrap_or(DEFAULT_FEED_LIMIT).min(MAX_FEED_LIMIT);

    let deeds = if let Some(user_id) = params.friends_of.as_deref() {
        let following = state.db.get_following_ids(user_id).await?;

        if following.is_empty() {
            // No follows yet: show the global feed instead of an empty page.
            state.db.get_deeds(None, limit).await?
        } else {
            let mut creator_ids = Vec::with_capacity(following.len() + 1);
            creator_ids.push(user_id.to_string());
            for id in following {
                if !creator_ids.contains(&id) {
                    creator_ids.push(id);
                }
            }
            creator_ids.truncate(MAX_FRIEND_FILTER_IDS);

            state.db.get_deeds_for_creators(&creator_ids, limit).await?
        }
    } else {
        state.db.get_deeds(params.town.as_deref(), limit).await?
    };

    Ok(Json(FeedResponse {
        deeds: deeds.into_iter().map(DeedResponse::from).collect(),
    }))
}

/// Deeds posted by one user, newest first.
async fn get_user_deeds(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<FeedResponse>> {
    let deeds = state
        .db
        .get_deeds_by_creator(&user_id, DEFAULT_FEED_LIMIT)
        .await?;

    Ok(Json(FeedResponse {
        deeds: deeds.into_iter().map(DeedResponse::from).collect(),
    }))
}

// ─── Leaderboard ─────────────────────────────────────────────

#[derive(Deserialize)]
struct LeaderboardQuery {
    /// "town" or "country"
    scope: String,
    /// townId or countryCode to match
    id: String,
    limit: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub current_tier: String,
    pub impact_score: u32,
    pub total_deeds: u32,
    /// 1-based position in the result
    pub rank: u32,
}

#[derive(Serialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
}

/// Assign 1-based ranks matching result position.
fn rank_entries(profiles: Vec<UserProfile>) -> Vec<LeaderboardEntry> {
    profiles
        .into_iter()
        .enumerate()
        .map(|(i, profile)| LeaderboardEntry {
            user_id: profile.id.unwrap_or_default(),
            display_name: if profile.display_name.is_empty() {
                "Anonymous".to_string()
            } else {
                profile.display_name
            },
            photo_url: profile.photo_url,
            current_tier: profile.current_tier,
            impact_score: profile.impact_score,
            total_deeds: profile.total_deeds,
            rank: i as u32 + 1,
        })
        .collect()
}

/// Town or country leaderboard by impact score.
async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>> {
    let scope = match params.scope.as_str() {
        "town" => LeaderboardScope::Town,
        "country" => LeaderboardScope::Country,
        other => {
            return Err(crate::error::AppError::BadRequest(format!(
                "Unknown leaderboard scope: {}",
                other
            )));
        }
    };

    let limit = params
        .limit
        .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
        .min(MAX_LEADERBOARD_LIMIT);

    let profiles = state.db.get_leaderboard(scope, &params.id, limit).await?;

    Ok(Json(LeaderboardResponse {
        entries: rank_entries(profiles),
    }))
}
