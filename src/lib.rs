// SPDX-License-Identifier: MIT
// Copyright 2026 Deedsie contributors

//! Deedsie: community acts-of-kindness API.
//!
//! This crate provides the backend API for posting deeds, reacting to and
//! verifying other people's deeds, following users, and town/country
//! leaderboards, all backed by Firestore.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use std::sync::Arc;

use config::Config;
use db::FirestoreDb;
use services::{GeoService, IdentityVerifier};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub identity_verifier: Arc<IdentityVerifier>,
    pub geo_service: GeoService,
}
