//! Core business logic modules
//!
//! Pure computations with no I/O dependencies

pub mod backoff;
pub mod rating;
pub mod statistics;
pub mod transition;

// Re-export commonly used types
pub use backoff::RetryPolicy;
pub use rating::{RatingAggregate, ScoreBounds};
pub use statistics::{EmploymentRate, PlatformStatistics};
pub use transition::TransitionReport;
