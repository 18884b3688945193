//! Store-backed insights components
//!
//! Each component is stateless and receives its store at construction. Reads
//! degrade to empty results on store failure; writes propagate typed errors.

pub mod longitudinal;
pub mod profile_sync;
pub mod ratings;
pub mod retry;
pub mod statistics;
pub mod transition;

pub use longitudinal::{LongitudinalTracker, StatusChange, MAX_HISTORY_LIMIT};
pub use profile_sync::ProfileSync;
pub use ratings::{RatingAggregator, ReviewSummary, DUPLICATE_RATING};
pub use retry::RetryingMutationExecutor;
pub use statistics::StatisticsAggregator;
pub use transition::TransitionCorrelationAnalyzer;
