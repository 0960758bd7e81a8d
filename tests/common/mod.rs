// SPDX-License-Identifier: MIT
// Copyright 2026 Deedsie contributors

use deedsie_api::config::Config;
use deedsie_api::db::FirestoreDb;
use deedsie_api::routes::create_router;
use deedsie_api::services::{GeoService, IdentityVerifier};
use deedsie_api::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();
    let identity_verifier =
        Arc::new(IdentityVerifier::new(&config).expect("Failed to build identity verifier"));
    let geo_service = GeoService::new_mock();

    let state = Arc::new(AppState {
        config,
        db,
        identity_verifier,
        geo_service,
    });

    (create_router(state.clone()), state)
}

/// Create a valid session JWT signed with the test config's key.
#[allow(dead_code)]
pub fn test_session_jwt(user_id: &str) -> String {
    let config = Config::test_default();
    deedsie_api::middleware::auth::create_session_jwt(user_id, &config.session_signing_key)
        .expect("Failed to sign test session JWT")
}
