//! Test helpers and builder patterns for insights tests
//!
//! Builders seed an in-memory store; helpers create mock clocks that record the
//! delays they were asked to sleep instead of sleeping.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use insights::services::{InMemoryRecordStore, StoreSnapshot};
use insights::traits::MockClock;
use insights::{Dashboard, InsightsConfig, RetryPolicy};
use shared::{CareerStatusEvent, DimensionScores, InclusionRating, ProfileId, ProfileRecord, Role};

use super::fixtures::TestFixtures;

/// Builder for a seeded in-memory store
#[derive(Default)]
pub struct StoreBuilder {
    snapshot: StoreSnapshot,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a talent profile with optional attributes
    pub fn with_talent(
        mut self,
        name: &str,
        disability: Option<&str>,
        status: Option<&str>,
        education: Option<&str>,
    ) -> Self {
        let mut profile = ProfileRecord::new(Role::Talent, name);
        profile.disability_type = disability.map(str::to_string);
        profile.career_status = status.map(str::to_string);
        profile.education_model = education.map(str::to_string);
        self.snapshot.profiles.push(profile);
        self
    }

    pub fn with_profile(mut self, profile: ProfileRecord) -> Self {
        self.snapshot.profiles.push(profile);
        self
    }

    pub fn with_company(mut self, id: ProfileId, name: &str) -> Self {
        let mut profile = ProfileRecord::new(Role::Company, name);
        profile.id = id;
        self.snapshot.profiles.push(profile);
        self
    }

    pub fn with_rating(mut self, talent: ProfileId, company: ProfileId, scores: DimensionScores) -> Self {
        let minutes = self.snapshot.ratings.len() as i64;
        self.snapshot.ratings.push(InclusionRating {
            talent_id: talent,
            company_id: company,
            scores,
            comment: None,
            created_at: TestFixtures::minutes_after_epoch(minutes),
        });
        self
    }

    /// Append `count` status changes for `profile`, one minute apart
    pub fn with_history(mut self, profile: ProfileId, count: usize) -> Self {
        for i in 0..count {
            self.snapshot.status_history.push(CareerStatusEvent {
                profile_id: profile,
                career_status: if i % 2 == 0 {
                    TestFixtures::JOB_SEEKER.to_string()
                } else {
                    TestFixtures::EMPLOYED_CONTRACT.to_string()
                },
                previous_status: None,
                changed_at: TestFixtures::minutes_after_epoch(i as i64),
            });
        }
        self
    }

    pub fn snapshot(&self) -> &StoreSnapshot {
        &self.snapshot
    }

    pub fn build(self) -> Arc<InMemoryRecordStore> {
        Arc::new(InMemoryRecordStore::from_snapshot(self.snapshot))
    }
}

/// Common test helper functions
pub struct TestHelpers;

impl TestHelpers {
    /// A clock that records every requested delay and returns at once
    pub fn recording_clock() -> (MockClock, Arc<Mutex<Vec<Duration>>>) {
        let delays = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&delays);
        let mut clock = MockClock::new();
        clock.expect_sleep().returning(move |delay| {
            recorded.lock().unwrap().push(delay);
        });
        (clock, delays)
    }

    /// Fast retry policy for tests
    pub fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::from_millis(max_attempts, 10, 40).unwrap()
    }

    pub fn config_with_policy(policy: RetryPolicy) -> InsightsConfig {
        InsightsConfig {
            retry: policy,
            ..InsightsConfig::default()
        }
    }

    /// Dashboard over a seeded store with a recording clock
    pub fn dashboard(
        store: Arc<InMemoryRecordStore>,
        policy: RetryPolicy,
    ) -> (Dashboard<InMemoryRecordStore, MockClock>, Arc<Mutex<Vec<Duration>>>) {
        let (clock, delays) = Self::recording_clock();
        (Dashboard::new(store, clock, &Self::config_with_policy(policy)), delays)
    }
}
