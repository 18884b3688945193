//! Dashboard facade
//!
//! Wires every component to one injected store and clock and produces the
//! combined read-side view. Each section degrades on its own, so a failing
//! read leaves the rest of the snapshot intact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use shared::{component_info, Component, ProfileId, ProfilePatch, ProfileRecord};

use crate::components::{
    LongitudinalTracker, ProfileSync, RatingAggregator, ReviewSummary, StatisticsAggregator, StatusChange,
    TransitionCorrelationAnalyzer,
};
use crate::config::InsightsConfig;
use crate::core::{PlatformStatistics, RatingAggregate, TransitionReport};
use crate::error::InsightsResult;
use crate::traits::{Clock, RecordStore};

/// Combined view served to dashboards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub company_id: Option<ProfileId>,
    pub statistics: Option<PlatformStatistics>,
    /// Employed talents over all talents, absent when there are none
    pub employment_ratio: Option<f64>,
    pub company_rating: Option<RatingAggregate>,
    pub latest_reviews: Vec<ReviewSummary>,
    pub transition: Option<TransitionReport>,
    pub recent_history: Vec<StatusChange>,
}

pub struct Dashboard<S, C>
where
    S: RecordStore + 'static,
    C: Clock + 'static,
{
    statistics: StatisticsAggregator<S>,
    ratings: RatingAggregator<S>,
    transition: TransitionCorrelationAnalyzer<S>,
    longitudinal: LongitudinalTracker<S>,
    profile_sync: ProfileSync<S, C>,
    review_limit: usize,
    history_limit: usize,
}

impl<S, C> Dashboard<S, C>
where
    S: RecordStore + 'static,
    C: Clock + 'static,
{
    /// Create the facade with injected dependencies
    pub fn new(store: Arc<S>, clock: C, config: &InsightsConfig) -> Self {
        Self {
            statistics: StatisticsAggregator::new(Arc::clone(&store)),
            ratings: RatingAggregator::new(Arc::clone(&store), config.score_bounds),
            transition: TransitionCorrelationAnalyzer::new(Arc::clone(&store)),
            longitudinal: LongitudinalTracker::new(Arc::clone(&store)),
            profile_sync: ProfileSync::new(store, clock, config.retry),
            review_limit: config.review_limit,
            history_limit: config.history_limit,
        }
    }

    pub fn ratings(&self) -> &RatingAggregator<S> {
        &self.ratings
    }

    pub fn longitudinal(&self) -> &LongitudinalTracker<S> {
        &self.longitudinal
    }

    pub fn profile_sync(&self) -> &ProfileSync<S, C> {
        &self.profile_sync
    }

    /// Gather every section concurrently
    pub async fn snapshot(&self, company_id: Option<ProfileId>) -> DashboardSnapshot {
        let company_rating = async {
            match company_id {
                Some(id) => self.ratings.compute_aggregate(id).await,
                None => None,
            }
        };

        let (statistics, company_rating, latest_reviews, transition, recent_history) = tokio::join!(
            self.statistics.compute(),
            company_rating,
            self.ratings.latest_reviews(self.review_limit),
            self.transition.analyze(),
            self.longitudinal.recent_history(self.history_limit),
        );

        component_info!(
            Component::Dashboard,
            reviews = latest_reviews.len(),
            history = recent_history.len(),
            "📊 Dashboard snapshot assembled"
        );

        DashboardSnapshot {
            generated_at: Utc::now(),
            company_id,
            employment_ratio: statistics.as_ref().and_then(PlatformStatistics::employment_ratio),
            statistics,
            company_rating,
            latest_reviews,
            transition,
            recent_history,
        }
    }

    /// Record a career status change for a profile
    pub async fn update_career_status(&self, id: ProfileId, career_status: &str) -> InsightsResult<ProfileRecord> {
        self.profile_sync
            .sync_profile(id, ProfilePatch::career_status(career_status))
            .await
    }
}
