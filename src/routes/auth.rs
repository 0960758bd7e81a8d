// SPDX-License-Identifier: MIT
// Copyright 2026 Deedsie contributors

//! Session creation from Firebase ID tokens.
//!
//! The interactive sign-in flow lives entirely in the web client; this
//! endpoint consumes the resulting ID token, lazily creates the profile,
//! and issues the service's own session cookie.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_session_jwt, SESSION_COOKIE};
use crate::models::{DeedLocation, Locale, UserProfile};
use crate::services::IdentityError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/session", post(create_session))
        .route("/auth/logout", get(logout))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub id_token: String,
    /// Location snapshot resolved by the client via /api/geo.
    #[serde(default)]
    pub location: Option<DeedLocation>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub preferred_locale: Option<Locale>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: String,
    /// False when the profile already existed (repeat sign-in).
    pub created: bool,
    pub profile: UserProfile,
}

/// Verify an ID token, create the profile if absent, set the session cookie.
async fn create_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<SessionRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let identity = state
        .identity_verifier
        .verify_id_token(&payload.id_token)
        .await
        .map_err(|e| match e {
            IdentityError::Rejected(msg) => {
                tracing::warn!(error = %msg, "ID token rejected");
                AppError::InvalidToken
            }
            IdentityError::Transient(msg) => {
                AppError::Internal(anyhow::anyhow!("identity verification failed: {msg}"))
            }
        })?;

    let profile = UserProfile::new_signup(
        identity
            .display_name
            .unwrap_or_else(|| "Anonymous".to_string()),
        identity.email.unwrap_or_default(),
        identity.photo_url,
        payload.location,
        payload.timezone,
        payload.preferred_locale.unwrap_or_default(),
    );

    let (profile, created) = state
        .db
        .create_user_if_absent(&identity.user_id, &profile)
        .await?;

    let jwt = create_session_jwt(&identity.user_id, &state.config.session_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let cookie = Cookie::build((SESSION_COOKIE, jwt))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(30))
        .build();

    tracing::info!(user_id = %identity.user_id, created, "Session created");

    Ok((
        jar.add(cookie),
        Json(SessionResponse {
            user_id: identity.user_id,
            created,
            profile,
        }),
    ))
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Clear the session cookie.
async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (
        jar.remove(removal),
        Json(LogoutResponse { success: true }),
    )
}
