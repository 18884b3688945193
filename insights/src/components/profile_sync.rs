//! Profile synchronisation through the retrying executor
//!
//! A profile row is created by a trigger some time after sign-up, so the first
//! conditional update can find nothing to update. A missing row is treated as
//! transient and retried until it becomes visible or attempts run out.

use std::sync::Arc;

use shared::{component_info, Component, ProfileId, ProfilePatch, ProfileRecord, StoreError};

use crate::components::retry::RetryingMutationExecutor;
use crate::core::RetryPolicy;
use crate::error::{InsightsError, InsightsResult};
use crate::traits::{Clock, RecordStore};

pub struct ProfileSync<S: RecordStore, C: Clock> {
    store: Arc<S>,
    executor: RetryingMutationExecutor<C>,
    policy: RetryPolicy,
}

impl<S: RecordStore, C: Clock> ProfileSync<S, C> {
    pub fn new(store: Arc<S>, clock: C, policy: RetryPolicy) -> Self {
        Self {
            store,
            executor: RetryingMutationExecutor::new(clock),
            policy,
        }
    }

    /// Apply `patch` to profile `id`, retrying while the row is not yet visible
    pub async fn sync_profile(&self, id: ProfileId, patch: ProfilePatch) -> InsightsResult<ProfileRecord> {
        validate_patch(&patch)?;

        let profile = self
            .executor
            .execute(&self.policy, || {
                let store = Arc::clone(&self.store);
                let patch = patch.clone();
                async move {
                    store.update_profile(id, patch).await.map_err(|error| match error {
                        StoreError::NotFound { .. } => InsightsError::Transient {
                            message: format!("profile {id} is not visible yet"),
                        },
                        other => InsightsError::from(other),
                    })
                }
            })
            .await?;

        component_info!(Component::ProfileSync, profile = %id, "✅ Profile synced");
        Ok(profile)
    }
}

fn validate_patch(patch: &ProfilePatch) -> InsightsResult<()> {
    if patch.is_empty() {
        return Err(InsightsError::validation("patch", "no fields to update"));
    }
    let blank = |value: &Option<String>| value.as_deref().is_some_and(|v| v.trim().is_empty());
    if blank(&patch.display_name) {
        return Err(InsightsError::validation("display_name", "must not be blank"));
    }
    if blank(&patch.career_status) {
        return Err(InsightsError::validation("career_status", "must not be blank"));
    }
    Ok(())
}
