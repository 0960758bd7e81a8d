// SPDX-License-Identifier: MIT
// Copyright 2026 Deedsie contributors

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running.
//! Run with FIRESTORE_EMULATOR_HOST pointing at the emulator.

use deedsie_api::db::firestore::{LeaderboardScope, ProfileEdit};
use deedsie_api::models::{Deed, DeedLocation, DeedType, Locale, ReactionType, UserProfile};

mod common;
use common::test_db;

/// Generate a unique user id for test isolation.
fn unique_user_id(prefix: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

fn test_location(town_id: &str) -> DeedLocation {
    DeedLocation {
        country_code: "US".to_string(),
        country_name: "United States".to_string(),
        region_id: "us-ca".to_string(),
        region_name: "California".to_string(),
        town_id: town_id.to_string(),
        town_name: "Testville".to_string(),
        lat: Some(37.0),
        lng: Some(-122.0),
    }
}

fn test_profile(name: &str, town_id: &str) -> UserProfile {
    UserProfile::new_signup(
        name.to_string(),
        format!("{}@example.com", name),
        None,
        Some(test_location(town_id)),
        Some("America/Los_Angeles".to_string()),
        Locale::En,
    )
}

fn test_deed(creator_id: &str, content: &str, town_id: &str) -> Deed {
    Deed::new(
        creator_id.to_string(),
        "Test User".to_string(),
        None,
        "First Spark".to_string(),
        content.to_string(),
        DeedType::Gratitude,
        test_location(town_id),
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// USER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_create_user_if_absent_is_idempotent() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id("user");

    let before = db.get_user(&user_id).await.unwrap();
    assert!(before.is_none(), "User should not exist before creation");

    let (stored, created) = db
        .create_user_if_absent(&user_id, &test_profile("ada", "town-a"))
        .await
        .unwrap();
    assert!(created);
    assert_eq!(stored.display_name, "ada");
    assert_eq!(stored.total_deeds, 0);
    assert_eq!(stored.current_tier, "First Spark");

    // Second sign-in must not reset the existing profile.
    let (again, created_again) = db
        .create_user_if_absent(&user_id, &test_profile("someone-else", "town-b"))
        .await
        .unwrap();
    assert!(!created_again);
    assert_eq!(again.display_name, "ada");
}

// ═══════════════════════════════════════════════════════════════════════════
// DEED + REWARD TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_profile_edit_preserves_reward_fields() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id("editor");
    db.create_user_if_absent(&user_id, &test_profile("editor", "town-a"))
        .await
        .unwrap();

    // A deed lands between the edit being composed and written.
    db.create_deed_with_reward(&test_deed(&user_id, "Donated books", "town-a"))
        .await
        .unwrap();

    let edit = ProfileEdit {
        timezone: Some("Europe/Berlin".to_string()),
        preferred_locale: Some(Locale::De),
        updated_at: "2026-03-07T10:00:00Z".to_string(),
        ..Default::default()
    };
    db.update_user(&user_id, &edit).await.unwrap();

    let profile = db.get_user(&user_id).await.unwrap().unwrap();
    assert_eq!(profile.timezone, "Europe/Berlin");
    assert_eq!(profile.preferred_locale, Locale::De);
    assert_eq!(profile.total_deeds, 1, "Edit must not roll back counters");
    assert_eq!(profile.impact_score, 10);
    assert_eq!(profile.streak_days, 1);
    assert!(!profile.last_deed_date.is_empty());
    assert_eq!(profile.display_name, "editor");
}

#[tokio::test]
async fn test_deed_creation_applies_reward() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id("poster");
    db.create_user_if_absent(&user_id, &test_profile("poster", "town-a"))
        .await
        .unwrap();

    let (stored, reward) = db
        .create_deed_with_reward(&test_deed(&user_id, "Planted a tree", "town-a"))
        .await
        .unwrap();

    assert!(stored.id.is_some(), "Stored deed must carry a document id");
    assert_eq!(stored.reaction_count, 0);
    assert_eq!(stored.inspired_count, 0);
    assert_eq!(stored.verification_count, 0);
    assert!(!stored.verified);
    assert_eq!(stored.tags, vec!["gratitude"]);
    assert_eq!(reward.streak_days, 1);
    assert_eq!(reward.tier_name, "First Spark");

    let profile = db.get_user(&user_id).await.unwrap().unwrap();
    assert_eq!(profile.total_deeds, 1);
    assert_eq!(profile.impact_score, 10);
    assert_eq!(profile.streak_days, 1);
    assert!(!profile.last_deed_date.is_empty());
}

#[tokio::test]
async fn test_same_day_deeds_keep_streak() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id("streaker");
    db.create_user_if_absent(&user_id, &test_profile("streaker", "town-a"))
        .await
        .unwrap();

    db.create_deed_with_reward(&test_deed(&user_id, "First deed", "town-a"))
        .await
        .unwrap();
    let (_, reward) = db
        .create_deed_with_reward(&test_deed(&user_id, "Second deed", "town-a"))
        .await
        .unwrap();

    assert_eq!(reward.streak_days, 1, "Same-day repeat keeps the streak");

    let profile = db.get_user(&user_id).await.unwrap().unwrap();
    assert_eq!(profile.total_deeds, 2);
    assert_eq!(profile.impact_score, 20);
}

#[tokio::test]
async fn test_tier_advances_at_five_deeds() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id("climber");
    db.create_user_if_absent(&user_id, &test_profile("climber", "town-a"))
        .await
        .unwrap();

    let mut last_reward = None;
    for i in 0..5 {
        let (_, reward) = db
            .create_deed_with_reward(&test_deed(&user_id, &format!("Deed {}", i), "town-a"))
            .await
            .unwrap();
        last_reward = Some(reward);
    }

    let reward = last_reward.unwrap();
    assert_eq!(reward.tier_name, "Kind Starter");
    assert_eq!(reward.tier_level, 2);

    let profile = db.get_user(&user_id).await.unwrap().unwrap();
    assert_eq!(profile.total_deeds, 5);
    assert_eq!(profile.current_tier, "Kind Starter");
}

#[tokio::test]
async fn test_deed_creation_requires_profile() {
    require_emulator!();

    let db = test_db().await;
    let ghost = unique_user_id("ghost");

    let result = db
        .create_deed_with_reward(&test_deed(&ghost, "No profile", "town-a"))
        .await;
    assert!(result.is_err(), "Deeds from unknown users must be refused");
}

// ═══════════════════════════════════════════════════════════════════════════
// REACTION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_reactions_are_idempotent() {
    require_emulator!();

    let db = test_db().await;
    let poster = unique_user_id("poster");
    let reactor = unique_user_id("reactor");
    db.create_user_if_absent(&poster, &test_profile("poster", "town-a"))
        .await
        .unwrap();

    let (deed, _) = db
        .create_deed_with_reward(&test_deed(&poster, "Shared lunch", "town-a"))
        .await
        .unwrap();
    let deed_id = deed.id.unwrap();

    assert!(db
        .add_reaction(&deed_id, &reactor, ReactionType::Like)
        .await
        .unwrap());
    assert!(
        !db.add_reaction(&deed_id, &reactor, ReactionType::Like)
            .await
            .unwrap(),
        "Repeat reaction must be a no-op"
    );

    let fetched = db.get_deed(&deed_id).await.unwrap().unwrap();
    assert_eq!(fetched.reaction_count, 1);

    let mine = db.get_my_reactions(&deed_id, &reactor).await.unwrap();
    assert_eq!(mine, vec![ReactionType::Like]);

    assert!(db
        .remove_reaction(&deed_id, &reactor, ReactionType::Like)
        .await
        .unwrap());
    assert!(
        !db.remove_reaction(&deed_id, &reactor, ReactionType::Like)
            .await
            .unwrap(),
        "Removing an absent reaction must be a no-op"
    );

    let fetched = db.get_deed(&deed_id).await.unwrap().unwrap();
    assert_eq!(fetched.reaction_count, 0, "Counter must not go negative");
}

#[tokio::test]
async fn test_reaction_types_count_independently() {
    require_emulator!();

    let db = test_db().await;
    let poster = unique_user_id("poster");
    let reactor = unique_user_id("reactor");
    db.create_user_if_absent(&poster, &test_profile("poster", "town-a"))
        .await
        .unwrap();

    let (deed, _) = db
        .create_deed_with_reward(&test_deed(&poster, "Walked a dog", "town-a"))
        .await
        .unwrap();
    let deed_id = deed.id.unwrap();

    db.add_reaction(&deed_id, &reactor, ReactionType::Like)
        .await
        .unwrap();
    db.add_reaction(&deed_id, &reactor, ReactionType::Inspired)
        .await
        .unwrap();

    let fetched = db.get_deed(&deed_id).await.unwrap().unwrap();
    assert_eq!(fetched.reaction_count, 1);
    assert_eq!(fetched.inspired_count, 1);

    let mine = db.get_my_reactions(&deed_id, &reactor).await.unwrap();
    assert_eq!(mine.len(), 2);
}

// ═══════════════════════════════════════════════════════════════════════════
// VERIFICATION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_verification_lifecycle() {
    require_emulator!();

    let db = test_db().await;
    let poster = unique_user_id("poster");
    let verifier = unique_user_id("verifier");
    db.create_user_if_absent(&poster, &test_profile("poster", "town-a"))
        .await
        .unwrap();

    let (deed, _) = db
        .create_deed_with_reward(&test_deed(&poster, "Fixed a fence", "town-a"))
        .await
        .unwrap();
    let deed_id = deed.id.unwrap();

    // Creator cannot verify their own deed.
    assert!(!db.add_verification(&deed_id, &poster).await.unwrap());
    let fetched = db.get_deed(&deed_id).await.unwrap().unwrap();
    assert!(!fetched.verified);
    assert_eq!(fetched.verification_count, 0);

    // A peer can, exactly once.
    assert!(db.add_verification(&deed_id, &verifier).await.unwrap());
    assert!(!db.add_verification(&deed_id, &verifier).await.unwrap());

    let fetched = db.get_deed(&deed_id).await.unwrap().unwrap();
    assert!(fetched.verified);
    assert_eq!(fetched.verification_count, 1);

    assert!(db.has_verified(&deed_id, &verifier).await.unwrap());
    assert!(!db.has_verified(&deed_id, &poster).await.unwrap());
}

#[tokio::test]
async fn test_verification_of_missing_deed_fails() {
    require_emulator!();

    let db = test_db().await;
    let verifier = unique_user_id("verifier");

    let result = db.add_verification("no-such-deed", &verifier).await;
    assert!(result.is_err());
}

// ═══════════════════════════════════════════════════════════════════════════
// FOLLOW TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_follow_lifecycle() {
    require_emulator!();

    let db = test_db().await;
    let alice = unique_user_id("alice");
    let bob = unique_user_id("bob");

    assert!(!db.follow_user(&alice, &alice).await.unwrap(), "Self-follow");

    assert!(db.follow_user(&alice, &bob).await.unwrap());
    assert!(!db.follow_user(&alice, &bob).await.unwrap(), "Repeat follow");

    assert!(db.is_following(&alice, &bob).await.unwrap());
    assert!(!db.is_following(&bob, &alice).await.unwrap());

    let following = db.get_following_ids(&alice).await.unwrap();
    assert_eq!(following, vec![bob.clone()]);

    db.unfollow_user(&alice, &bob).await.unwrap();
    assert!(!db.is_following(&alice, &bob).await.unwrap());
    assert!(db.get_following_ids(&alice).await.unwrap().is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// FEED + LEADERBOARD TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_feed_filters() {
    require_emulator!();

    let db = test_db().await;
    let town = unique_user_id("town");
    let here = unique_user_id("here");
    let there = unique_user_id("there");
    db.create_user_if_absent(&here, &test_profile("here", &town))
        .await
        .unwrap();
    db.create_user_if_absent(&there, &test_profile("there", "elsewhere"))
        .await
        .unwrap();

    db.create_deed_with_reward(&test_deed(&here, "Local deed", &town))
        .await
        .unwrap();
    db.create_deed_with_reward(&test_deed(&there, "Remote deed", "elsewhere"))
        .await
        .unwrap();

    let town_feed = db.get_deeds(Some(&town), 50).await.unwrap();
    assert_eq!(town_feed.len(), 1);
    assert_eq!(town_feed[0].content, "Local deed");

    let by_creator = db.get_deeds_by_creator(&here, 50).await.unwrap();
    assert_eq!(by_creator.len(), 1);

    let friends = db
        .get_deeds_for_creators(&[here.clone(), there.clone()], 50)
        .await
        .unwrap();
    assert_eq!(friends.len(), 2);
}

#[tokio::test]
async fn test_feed_is_newest_first() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id("chrono");
    db.create_user_if_absent(&user_id, &test_profile("chrono", "town-a"))
        .await
        .unwrap();

    db.create_deed_with_reward(&test_deed(&user_id, "older", "town-a"))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    db.create_deed_with_reward(&test_deed(&user_id, "newer", "town-a"))
        .await
        .unwrap();

    let feed = db.get_deeds_by_creator(&user_id, 10).await.unwrap();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].content, "newer");
    assert_eq!(feed[1].content, "older");
}

#[tokio::test]
async fn test_leaderboard_orders_by_impact() {
    require_emulator!();

    let db = test_db().await;
    let town = unique_user_id("lb-town");
    let busy = unique_user_id("busy");
    let idle = unique_user_id("idle");
    db.create_user_if_absent(&busy, &test_profile("busy", &town))
        .await
        .unwrap();
    db.create_user_if_absent(&idle, &test_profile("idle", &town))
        .await
        .unwrap();

    for i in 0..3 {
        db.create_deed_with_reward(&test_deed(&busy, &format!("Deed {}", i), &town))
            .await
            .unwrap();
    }
    db.create_deed_with_reward(&test_deed(&idle, "Only deed", &town))
        .await
        .unwrap();

    let board = db
        .get_leaderboard(LeaderboardScope::Town, &town, 10)
        .await
        .unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].display_name, "busy");
    assert_eq!(board[0].impact_score, 30);
    assert_eq!(board[1].display_name, "idle");
    assert_eq!(board[1].impact_score, 10);

    let country_board = db
        .get_leaderboard(LeaderboardScope::Country, "US", 1000)
        .await
        .unwrap();
    assert!(country_board.len() >= 2);
}
