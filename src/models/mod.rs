// SPDX-License-Identifier: MIT
// Copyright 2026 Deedsie contributors

//! Data models for the application.
//!
//! Documents keep the camelCase field names of the production Firestore
//! collections, so this service can share data with the existing web client.

pub mod deed;
pub mod locale;
pub mod reaction;
pub mod social;
pub mod tier;
pub mod user;

pub use deed::{Deed, DeedLocation, DeedType};
pub use locale::Locale;
pub use reaction::{Reaction, ReactionType};
pub use social::{Follow, Verification};
pub use tier::{tier_for_deeds, Tier};
pub use user::UserProfile;
