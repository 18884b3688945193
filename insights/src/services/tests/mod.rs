//! Service-specific tests
//!
//! Each store implementation has its own test file; shared builders live in
//! [`common`].

mod memory_store;

pub mod common {
    use chrono::{Duration, Utc};
    use shared::{DimensionScores, InclusionRating, ProfileId};

    /// Deterministic profile ids for readable assertions
    pub fn test_profile_id(suffix: &str) -> ProfileId {
        ProfileId::from_string(&format!("550e8400-e29b-41d4-a716-44665544{:0>4}", suffix))
            .expect("Valid test profile ID")
    }

    pub fn rating(talent: ProfileId, company: ProfileId, minutes_ago: i64) -> InclusionRating {
        InclusionRating {
            talent_id: talent,
            company_id: company,
            scores: DimensionScores::new(4, 4, 3, 5),
            comment: None,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }
}
