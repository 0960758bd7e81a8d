// SPDX-License-Identifier: MIT
// Copyright 2026 Deedsie contributors

//! Deedsie API Server
//!
//! Backend for the Deedsie kindness network: users post good deeds,
//! react to and verify each other's deeds, follow friends, and climb
//! town and country leaderboards.

use deedsie_api::{
    config::Config,
    db::FirestoreDb,
    services::{GeoService, IdentityVerifier},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Deedsie API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    let identity_verifier =
        Arc::new(IdentityVerifier::new(&config).expect("Failed to initialize identity verifier"));

    let geo_service = GeoService::new();

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        identity_verifier,
        geo_service,
    });

    // Build router
    let app = deedsie_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("deedsie_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
