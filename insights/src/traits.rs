//! Trait definitions with mockall annotations for testing
//!
//! Every component receives its store and clock through these seams, so the
//! production REST store, the in-memory store and generated mocks are
//! interchangeable.

use std::time::Duration;

use shared::{
    CareerStatusEvent, Collection, EducationOutcome, InclusionRating, ProfileId, ProfilePatch, ProfileRecord,
    RecordQuery, StoreResult,
};

/// Record store abstraction
///
/// The store is an external service. It owns uniqueness enforcement and
/// reports faults as structured [`shared::StoreError`] kinds.
#[mockall::automock]
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Filtered, ordered read of profiles
    async fn profiles(&self, query: RecordQuery) -> StoreResult<Vec<ProfileRecord>>;

    /// Filtered, ordered read of inclusion ratings
    async fn ratings(&self, query: RecordQuery) -> StoreResult<Vec<InclusionRating>>;

    /// Filtered, ordered read of the career status history
    async fn status_history(&self, query: RecordQuery) -> StoreResult<Vec<CareerStatusEvent>>;

    /// Rows of the education-to-employment view
    async fn education_outcomes(&self) -> StoreResult<Vec<EducationOutcome>>;

    /// Number of records in a collection matching the query filters
    async fn count(&self, collection: Collection, query: RecordQuery) -> StoreResult<u64>;

    /// Atomically insert a rating
    ///
    /// # Returns
    /// The stored rating, or `StoreError::Conflict` when a rating for the same
    /// `(talent_id, company_id)` pair already exists. Nothing is written on conflict.
    async fn insert_rating(&self, rating: InclusionRating) -> StoreResult<InclusionRating>;

    /// Conditionally update an existing profile
    ///
    /// # Returns
    /// The updated profile, or `StoreError::NotFound` when no row with that id
    /// is visible yet. A career status change appends a history event.
    async fn update_profile(&self, id: ProfileId, patch: ProfilePatch) -> StoreResult<ProfileRecord>;
}

/// Timer capability used between retry attempts
#[mockall::automock]
#[async_trait::async_trait]
pub trait Clock: Send + Sync {
    /// Suspend the caller for the given delay
    async fn sleep(&self, delay: Duration);
}
