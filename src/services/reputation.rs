// SPDX-License-Identifier: MIT
// Copyright 2026 Deedsie contributors

//! Reputation rules applied at deed-creation time.
//!
//! These are pure functions over the profile's counters so the streak and
//! tier behavior can be tested without a database. The caller persists the
//! result with atomic increments inside a Firestore transaction.

use chrono::{Duration, NaiveDate};

use crate::models::tier;
use crate::time_utils::format_iso_date;

/// Points awarded per posted deed. Fixed, regardless of category.
pub const IMPACT_POINTS_PER_DEED: u32 = 10;

/// Profile delta produced by one successful deed creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeedReward {
    /// New value for `streakDays`
    pub streak_days: u32,
    /// New value for `lastDeedDate` (ISO `YYYY-MM-DD`)
    pub last_deed_date: String,
    /// Tier projection recomputed from the post-increment deed count
    pub tier_name: String,
    pub tier_level: u32,
}

/// Streak rule: unchanged on a same-day repeat, +1 when the previous deed
/// was yesterday, reset to 1 on any longer gap or a first-ever post.
pub fn next_streak(last_deed_date: &str, current_streak: u32, today: NaiveDate) -> u32 {
    let today_str = format_iso_date(today);
    let yesterday_str = format_iso_date(today - Duration::days(1));

    if last_deed_date == today_str {
        current_streak
    } else if last_deed_date == yesterday_str {
        current_streak + 1
    } else {
        1
    }
}

/// Compute the reward for a deed posted `today` against the profile's
/// pre-increment state.
pub fn deed_reward(
    total_deeds_before: u32,
    streak_days_before: u32,
    last_deed_date: &str,
    today: NaiveDate,
) -> DeedReward {
    let new_total = total_deeds_before.saturating_add(1);
    let tier = tier::tier_for_deeds(new_total);

    DeedReward {
        streak_days: next_streak(last_deed_date, streak_days_before, today),
        last_deed_date: format_iso_date(today),
        tier_name: tier.name.to_string(),
        tier_level: tier.level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_post_starts_streak() {
        assert_eq!(next_streak("", 0, day(2026, 3, 7)), 1);
    }

    #[test]
    fn test_same_day_post_keeps_streak() {
        assert_eq!(next_streak("2026-03-07", 4, day(2026, 3, 7)), 4);
    }

    #[test]
    fn test_consecutive_day_increments_streak() {
        assert_eq!(next_streak("2026-03-06", 4, day(2026, 3, 7)), 5);
    }

    #[test]
    fn test_gap_resets_streak() {
        assert_eq!(next_streak("2026-03-04", 9, day(2026, 3, 7)), 1);
        assert_eq!(next_streak("2025-12-31", 100, day(2026, 3, 7)), 1);
    }

    #[test]
    fn test_yesterday_across_month_boundary() {
        assert_eq!(next_streak("2026-02-28", 2, day(2026, 3, 1)), 3);
    }

    #[test]
    fn test_deed_reward_updates_tier_at_threshold() {
        // 4 deeds before, the 5th crosses into Kind Starter
        let reward = deed_reward(4, 1, "2026-03-06", day(2026, 3, 7));
        assert_eq!(reward.tier_name, "Kind Starter");
        assert_eq!(reward.tier_level, 2);
        assert_eq!(reward.streak_days, 2);
        assert_eq!(reward.last_deed_date, "2026-03-07");
    }

    #[test]
    fn test_deed_reward_first_deed() {
        let reward = deed_reward(0, 0, "", day(2026, 3, 7));
        assert_eq!(reward.streak_days, 1);
        assert_eq!(reward.tier_name, "First Spark");
        assert_eq!(reward.tier_level, 1);
    }
}
