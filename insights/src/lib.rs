//! Analytics and consistency layer for an inclusive job board
//!
//! Platform statistics, inclusion ratings, education-to-employment correlation
//! and career status history are computed on demand from an injected record
//! store. Profile writes go through a retrying executor so that eventually
//! consistent rows converge.

pub mod components;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod error;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use components::{
    LongitudinalTracker, ProfileSync, RatingAggregator, RetryingMutationExecutor, ReviewSummary,
    StatisticsAggregator, StatusChange, TransitionCorrelationAnalyzer,
};
pub use config::InsightsConfig;
pub use crate::core::{PlatformStatistics, RatingAggregate, RetryPolicy, ScoreBounds, TransitionReport};
pub use dashboard::{Dashboard, DashboardSnapshot};
pub use error::{InsightsError, InsightsResult, Retryable};
pub use traits::{Clock, RecordStore};
