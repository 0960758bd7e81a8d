// SPDX-License-Identifier: MIT
// Copyright 2026 Deedsie contributors

//! Services module - business logic layer.

pub mod geo;
pub mod identity;
pub mod reputation;

pub use geo::{GeoInfo, GeoService};
pub use identity::{IdentityError, IdentityVerifier, VerifiedIdentity};
pub use reputation::{deed_reward, next_streak, DeedReward, IMPACT_POINTS_PER_DEED};
