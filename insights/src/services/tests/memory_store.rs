//! Tests for InMemoryRecordStore
//!
//! These cover the behaviours the components rely on from the managed store:
//! the rating uniqueness constraint, the status history trigger and delayed
//! profile visibility.

use std::sync::Arc;

use shared::{Collection, ProfilePatch, ProfileRecord, RecordQuery, Role, StoreError};

use super::common::{rating, test_profile_id};
use crate::services::{InMemoryRecordStore, StoreSnapshot};
use crate::traits::RecordStore;

#[tokio::test]
async fn test_duplicate_rating_is_rejected_without_write() {
    let store = InMemoryRecordStore::new();
    let talent = test_profile_id("1");
    let company = test_profile_id("2");

    store.insert_rating(rating(talent, company, 5)).await.unwrap();
    let second = store.insert_rating(rating(talent, company, 0)).await;

    assert_eq!(second, Err(StoreError::conflict("talent_id,company_id")));
    let stored = store.ratings(RecordQuery::new()).await.unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_concurrent_duplicate_inserts_store_one_row() {
    let store = Arc::new(InMemoryRecordStore::new());
    let talent = test_profile_id("3");
    let company = test_profile_id("4");

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.insert_rating(rating(talent, company, 0)).await })
        })
        .collect();

    let mut accepted = 0;
    for task in tasks {
        if task.await.unwrap().is_ok() {
            accepted += 1;
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(store.count(Collection::Ratings, RecordQuery::new()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_status_change_appends_history_event() {
    let store = InMemoryRecordStore::new();
    let profile = ProfileRecord::new(Role::Talent, "Sari").with_career_status("Job Seeker");
    let id = profile.id;
    store.put_profile(profile).await;

    let updated = store
        .update_profile(id, ProfilePatch::career_status("Employed - Full Time"))
        .await
        .unwrap();
    assert_eq!(updated.career_status.as_deref(), Some("Employed - Full Time"));

    let history = store.status_history(RecordQuery::new().eq("profile_id", id)).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].previous_status.as_deref(), Some("Job Seeker"));
    assert_eq!(history[0].career_status, "Employed - Full Time");

    // Same status again is not a change
    store
        .update_profile(id, ProfilePatch::career_status("Employed - Full Time"))
        .await
        .unwrap();
    assert_eq!(store.status_history(RecordQuery::new()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_staged_profile_becomes_visible_after_delay() {
    let store = InMemoryRecordStore::new();
    let profile = ProfileRecord::new(Role::Talent, "Budi");
    let id = profile.id;
    store.stage_profile(profile, 2).await;

    for _ in 0..2 {
        let attempt = store.update_profile(id, ProfilePatch::career_status("Job Seeker")).await;
        assert!(matches!(attempt, Err(StoreError::NotFound { .. })));
    }

    let visible = store.update_profile(id, ProfilePatch::career_status("Job Seeker")).await;
    assert!(visible.is_ok());
    assert_eq!(store.profiles(RecordQuery::new().eq("id", id)).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_profile_is_not_found() {
    let store = InMemoryRecordStore::new();
    let result = store
        .update_profile(test_profile_id("9"), ProfilePatch::career_status("Job Seeker"))
        .await;
    assert!(matches!(result, Err(StoreError::NotFound { .. })));
}

#[tokio::test]
async fn test_education_outcomes_cover_talents_with_education() {
    let store = InMemoryRecordStore::from_snapshot(StoreSnapshot {
        profiles: vec![
            ProfileRecord::new(Role::Talent, "A").with_education("Inklusi").with_career_status("Employed - Contract"),
            ProfileRecord::new(Role::Talent, "B"),
            ProfileRecord::new(Role::Company, "C").with_education("SLB"),
        ],
        ..StoreSnapshot::default()
    });

    let outcomes = store.education_outcomes().await.unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].education_model, "Inklusi");
    assert_eq!(outcomes[0].career_status.as_deref(), Some("Employed - Contract"));
}

#[tokio::test]
async fn test_count_applies_filters() {
    let store = InMemoryRecordStore::new();
    store.put_profile(ProfileRecord::new(Role::Company, "PT Maju")).await;
    store.put_profile(ProfileRecord::new(Role::Company, "CV Sejahtera")).await;
    store.put_profile(ProfileRecord::new(Role::Talent, "Dewi")).await;

    let companies = store
        .count(Collection::Profiles, RecordQuery::new().eq("role", Role::Company))
        .await
        .unwrap();
    assert_eq!(companies, 2);
}

#[tokio::test]
async fn test_snapshot_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let store = InMemoryRecordStore::new();
    store.put_profile(ProfileRecord::new(Role::Talent, "Rina").with_disability("Tunarungu")).await;
    store
        .insert_rating(rating(test_profile_id("5"), test_profile_id("6"), 1))
        .await
        .unwrap();
    let snapshot = store.snapshot().await;
    tokio::fs::write(&path, serde_json::to_string(&snapshot).unwrap()).await.unwrap();

    let loaded = InMemoryRecordStore::load_snapshot_file(&path).await.unwrap();
    assert_eq!(loaded.snapshot().await, snapshot);
}

#[tokio::test]
async fn test_missing_snapshot_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = InMemoryRecordStore::load_snapshot_file(dir.path().join("absent.json")).await;
    assert!(matches!(result, Err(crate::error::InsightsError::Io(_))));
}
