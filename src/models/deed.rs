//! Deed model: a single user-authored act of kindness.

use serde::{Deserialize, Serialize};

use crate::time_utils;

/// The fixed set of deed categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeedType {
    Nearby,
    Volunteering,
    HelpingNeighbors,
    Gratitude,
    GivingBack,
    FaithHope,
    RandomKindness,
}

impl DeedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeedType::Nearby => "nearby",
            DeedType::Volunteering => "volunteering",
            DeedType::HelpingNeighbors => "helping_neighbors",
            DeedType::Gratitude => "gratitude",
            DeedType::GivingBack => "giving_back",
            DeedType::FaithHope => "faith_hope",
            DeedType::RandomKindness => "random_kindness",
        }
    }
}

/// Location snapshot denormalized onto deeds and profiles at write time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeedLocation {
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub country_name: String,
    #[serde(default)]
    pub region_id: String,
    #[serde(default)]
    pub region_name: String,
    #[serde(default)]
    pub town_id: String,
    #[serde(default)]
    pub town_name: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

/// Deed document stored in Firestore (`deeds/{id}`, server-generated id).
///
/// Creation fields are immutable; only the counters, `verified` and
/// `updatedAt` change afterwards, and only through the reaction and
/// verification rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deed {
    /// Document id, populated on reads.
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: Option<String>,
    pub creator_id: String,
    pub creator_name: String,
    pub creator_photo_url: Option<String>,
    /// Tier name snapshot at post time, never re-derived.
    pub creator_tier: String,
    pub content: String,
    #[serde(rename = "type")]
    pub deed_type: DeedType,
    pub tags: Vec<String>,
    pub country_code: String,
    pub town_id: String,
    pub town_name: String,
    pub region_id: String,
    pub region_name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub verified: bool,
    pub verification_count: u32,
    pub reaction_count: u32,
    pub inspired_count: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl Deed {
    /// Build a new deed with zeroed counters and tags = [type].
    pub fn new(
        creator_id: String,
        creator_name: String,
        creator_photo_url: Option<String>,
        creator_tier: String,
        content: String,
        deed_type: DeedType,
        location: DeedLocation,
    ) -> Self {
        let now = time_utils::now_rfc3339();
        Self {
            id: None,
            creator_id,
            creator_name,
            creator_photo_url,
            creator_tier,
            content,
            deed_type,
            tags: vec![deed_type.as_str().to_string()],
            country_code: location.country_code,
            town_id: location.town_id,
            town_name: location.town_name,
            region_id: location.region_id,
            region_name: location.region_name,
            lat: location.lat,
            lng: location.lng,
            verified: false,
            verification_count: 0,
            reaction_count: 0,
            inspired_count: 0,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
