//! Recent career status changes across all profiles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use shared::logging::log_degraded;
use shared::{Component, ProfileId, ProfileRecord, RecordQuery, StoreResult};

use crate::traits::RecordStore;

/// Upper bound on history entries returned by one read
pub const MAX_HISTORY_LIMIT: usize = 50;

/// A career status change joined with the owning profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub profile_id: ProfileId,
    pub display_name: Option<String>,
    pub disability_type: Option<String>,
    pub career_status: String,
    pub previous_status: Option<String>,
    pub changed_at: DateTime<Utc>,
}

pub struct LongitudinalTracker<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> LongitudinalTracker<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Newest status changes first, at most `min(limit, 50)` of them.
    ///
    /// Empty when there is no history or the store could not be read.
    pub async fn recent_history(&self, limit: usize) -> Vec<StatusChange> {
        let limit = limit.min(MAX_HISTORY_LIMIT);
        if limit == 0 {
            return Vec::new();
        }
        match self.read_history(limit).await {
            Ok(history) => history,
            Err(error) => {
                log_degraded(Component::Longitudinal, "Status history read", &error);
                Vec::new()
            }
        }
    }

    async fn read_history(&self, limit: usize) -> StoreResult<Vec<StatusChange>> {
        let mut events = self
            .store
            .status_history(RecordQuery::new().newest_first("changed_at").limit(limit))
            .await?;
        if events.is_empty() {
            return Ok(Vec::new());
        }

        // The bound and order hold even if a store ignores them
        events.sort_by(|a, b| b.changed_at.cmp(&a.changed_at));
        events.truncate(limit);

        let ids: BTreeSet<ProfileId> = events.iter().map(|event| event.profile_id).collect();
        let profiles: HashMap<ProfileId, ProfileRecord> = self
            .store
            .profiles(RecordQuery::new().one_of("id", ids))
            .await?
            .into_iter()
            .map(|profile| (profile.id, profile))
            .collect();

        Ok(events
            .into_iter()
            .map(|event| {
                let profile = profiles.get(&event.profile_id);
                StatusChange {
                    profile_id: event.profile_id,
                    display_name: profile.and_then(|p| p.display_name.clone()),
                    disability_type: profile.and_then(|p| p.disability_type.clone()),
                    career_status: event.career_status,
                    previous_status: event.previous_status,
                    changed_at: event.changed_at,
                }
            })
            .collect())
    }
}
