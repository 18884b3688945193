//! Inclusion rating submission and per-company aggregation
//!
//! One rating per `(talent, company)` pair. The store's unique constraint is the
//! only guard; concurrent duplicate submissions race there and exactly one wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use shared::logging::{log_degraded, log_error};
use shared::{
    component_info, component_warn, Component, DimensionScores, InclusionRating, ProfileId, ProfileRecord,
    RecordQuery, StoreError, StoreResult,
};

use crate::core::rating::normalize_comment;
use crate::core::{RatingAggregate, ScoreBounds};
use crate::error::{InsightsError, InsightsResult};
use crate::traits::RecordStore;

/// Message surfaced to a talent who already rated the company
pub const DUPLICATE_RATING: &str = "duplicate rating";

/// A recent rating joined with the names of both parties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub company_id: ProfileId,
    pub company_name: Option<String>,
    pub reviewer_name: Option<String>,
    pub scores: DimensionScores,
    pub average: f64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct RatingAggregator<S: RecordStore> {
    store: Arc<S>,
    bounds: ScoreBounds,
}

impl<S: RecordStore> RatingAggregator<S> {
    pub fn new(store: Arc<S>, bounds: ScoreBounds) -> Self {
        Self { store, bounds }
    }

    /// Validate and store a rating.
    ///
    /// Invalid input never reaches the store. A second rating for the same pair
    /// fails with [`InsightsError::Conflict`] and leaves the first untouched.
    pub async fn submit_rating(
        &self,
        talent_id: ProfileId,
        company_id: ProfileId,
        scores: DimensionScores,
        comment: Option<String>,
    ) -> InsightsResult<()> {
        if talent_id == company_id {
            return Err(InsightsError::validation("company_id", "a profile cannot rate itself"));
        }
        self.bounds.validate(&scores)?;
        let comment = normalize_comment(comment)?;

        let rating = InclusionRating {
            talent_id,
            company_id,
            scores,
            comment,
            created_at: Utc::now(),
        };

        match self.store.insert_rating(rating).await {
            Ok(_) => {
                component_info!(Component::Ratings, company = %company_id, "📝 Stored inclusion rating");
                Ok(())
            }
            Err(StoreError::Conflict { key }) => {
                component_warn!(
                    Component::Ratings,
                    company = %company_id,
                    key = %key,
                    "Rejected duplicate rating"
                );
                Err(InsightsError::Conflict {
                    message: DUPLICATE_RATING.to_string(),
                })
            }
            Err(error) => {
                log_error(Component::Ratings, "Rating submission", &error);
                Err(error.into())
            }
        }
    }

    /// Aggregate of a company's ratings, recomputed on every call.
    ///
    /// `None` when the company has no ratings yet or the read failed.
    pub async fn compute_aggregate(&self, company_id: ProfileId) -> Option<RatingAggregate> {
        match self.store.ratings(RecordQuery::new().eq("company_id", company_id)).await {
            Ok(ratings) => RatingAggregate::from_ratings(&ratings),
            Err(error) => {
                log_degraded(Component::Ratings, "Company rating read", &error);
                None
            }
        }
    }

    /// Most recent ratings, newest first, joined with company and reviewer names
    pub async fn latest_reviews(&self, limit: usize) -> Vec<ReviewSummary> {
        if limit == 0 {
            return Vec::new();
        }
        match self.read_latest_reviews(limit).await {
            Ok(reviews) => reviews,
            Err(error) => {
                log_degraded(Component::Ratings, "Latest reviews read", &error);
                Vec::new()
            }
        }
    }

    async fn read_latest_reviews(&self, limit: usize) -> StoreResult<Vec<ReviewSummary>> {
        let ratings = self
            .store
            .ratings(RecordQuery::new().newest_first("created_at").limit(limit))
            .await?;
        if ratings.is_empty() {
            return Ok(Vec::new());
        }

        let ids: BTreeSet<ProfileId> = ratings
            .iter()
            .flat_map(|rating| [rating.talent_id, rating.company_id])
            .collect();
        let names: HashMap<ProfileId, String> = self
            .store
            .profiles(RecordQuery::new().one_of("id", ids))
            .await?
            .into_iter()
            .filter_map(|profile: ProfileRecord| profile.display_name.map(|name| (profile.id, name)))
            .collect();

        Ok(ratings
            .into_iter()
            .map(|rating| ReviewSummary {
                company_id: rating.company_id,
                company_name: names.get(&rating.company_id).cloned(),
                reviewer_name: names.get(&rating.talent_id).cloned(),
                average: rating.scores.sum() as f64 / 4.0,
                scores: rating.scores,
                comment: rating.comment,
                created_at: rating.created_at,
            })
            .collect())
    }
}
