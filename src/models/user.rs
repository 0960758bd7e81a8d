//! User profile model for storage and API.

use serde::{Deserialize, Serialize};

use crate::models::locale::Locale;
use crate::models::tier;
use crate::time_utils;

/// User profile stored in Firestore (`users/{userId}`).
///
/// `totalDeeds`, `impactScore`, `streakDays`, `lastDeedDate` and the tier
/// fields are mutated only by the deed-creation rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Document id (the userId), populated on reads.
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: Option<String>,
    pub display_name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub country_code: String,
    pub country_name: String,
    pub region_id: String,
    pub region_name: String,
    pub town_id: String,
    pub town_name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub timezone: String,
    pub preferred_locale: Locale,
    /// Lifetime deed count, >= 0
    pub total_deeds: u32,
    /// Cumulative points, +10 per deed
    pub impact_score: u32,
    /// Cached projection of `tier_for_deeds(total_deeds)`
    pub current_tier: String,
    pub tier_level: u32,
    /// Consecutive-day posting streak
    pub streak_days: u32,
    /// ISO date (`YYYY-MM-DD`) of the most recent deed, or empty
    pub last_deed_date: String,
    /// RFC3339 timestamps
    pub created_at: String,
    pub updated_at: String,
}

impl UserProfile {
    /// Build the initial profile written on first sign-in.
    pub fn new_signup(
        display_name: String,
        email: String,
        photo_url: Option<String>,
        location: Option<crate::models::DeedLocation>,
        timezone: Option<String>,
        preferred_locale: Locale,
    ) -> Self {
        let now = time_utils::now_rfc3339();
        let location = location.unwrap_or_default();
        let first_tier = tier::first();

        Self {
            id: None,
            display_name,
            email,
            photo_url,
            country_code: location.country_code,
            country_name: location.country_name,
            region_id: location.region_id,
            region_name: location.region_name,
            town_id: location.town_id,
            town_name: location.town_name,
            lat: location.lat,
            lng: location.lng,
            timezone: timezone.unwrap_or_else(|| "America/New_York".to_string()),
            preferred_locale,
            total_deeds: 0,
            impact_score: 0,
            current_tier: first_tier.name.to_string(),
            tier_level: first_tier.level,
            streak_days: 0,
            last_deed_date: String::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_signup_defaults() {
        let profile = UserProfile::new_signup(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            None,
            None,
            None,
            Locale::En,
        );

        assert_eq!(profile.total_deeds, 0);
        assert_eq!(profile.impact_score, 0);
        assert_eq!(profile.streak_days, 0);
        assert_eq!(profile.last_deed_date, "");
        assert_eq!(profile.current_tier, "First Spark");
        assert_eq!(profile.tier_level, 1);
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let profile = UserProfile::new_signup(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            None,
            None,
            None,
            Locale::En,
        );

        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("displayName").is_some());
        assert!(json.get("totalDeeds").is_some());
        assert!(json.get("lastDeedDate").is_some());
        assert!(json.get("display_name").is_none());
    }
}
