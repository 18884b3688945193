//! Test fixtures and data for insights tests

use chrono::{DateTime, Duration, TimeZone, Utc};
use shared::{DimensionScores, ProfileId};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// Standard test profile IDs using proper UUID format
    pub const TALENT_1: &'static str = "550e8400-e29b-41d4-a716-446655440001";
    pub const TALENT_2: &'static str = "550e8400-e29b-41d4-a716-446655440002";
    pub const COMPANY_1: &'static str = "550e8400-e29b-41d4-a716-446655440101";
    pub const COMPANY_2: &'static str = "550e8400-e29b-41d4-a716-446655440102";

    pub const EMPLOYED_FULL_TIME: &'static str = "Employed - Full Time";
    pub const EMPLOYED_CONTRACT: &'static str = "Employed - Contract";
    pub const JOB_SEEKER: &'static str = "Job Seeker";

    pub fn talent_1() -> ProfileId {
        ProfileId::from_string(Self::TALENT_1).unwrap()
    }

    pub fn talent_2() -> ProfileId {
        ProfileId::from_string(Self::TALENT_2).unwrap()
    }

    pub fn company_1() -> ProfileId {
        ProfileId::from_string(Self::COMPANY_1).unwrap()
    }

    pub fn company_2() -> ProfileId {
        ProfileId::from_string(Self::COMPANY_2).unwrap()
    }

    /// The two ratings whose aggregate is 3, 4, 4, 4.5 and 3.875 overall
    pub fn reference_scores() -> [DimensionScores; 2] {
        [DimensionScores::new(4, 5, 3, 4), DimensionScores::new(2, 3, 5, 5)]
    }

    /// Fixed origin so ordering assertions are deterministic
    pub fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
    }

    pub fn minutes_after_epoch(minutes: i64) -> DateTime<Utc> {
        Self::epoch() + Duration::minutes(minutes)
    }
}
