//! Demographic and employment distribution over the talent population

use std::sync::Arc;

use shared::logging::log_degraded;
use shared::{component_debug, Collection, Component, RecordQuery, Role, StoreResult};

use crate::core::PlatformStatistics;
use crate::traits::RecordStore;

pub struct StatisticsAggregator<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> StatisticsAggregator<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Current platform statistics, or `None` when the store could not be read
    pub async fn compute(&self) -> Option<PlatformStatistics> {
        match self.read_statistics().await {
            Ok(stats) => {
                component_debug!(
                    Component::Statistics,
                    talents = stats.total_talents,
                    companies = stats.total_companies,
                    "📊 Computed platform statistics"
                );
                Some(stats)
            }
            Err(error) => {
                log_degraded(Component::Statistics, "Platform statistics read", &error);
                None
            }
        }
    }

    async fn read_statistics(&self) -> StoreResult<PlatformStatistics> {
        let talents = self.store.profiles(RecordQuery::new().eq("role", Role::Talent)).await?;
        let total_companies = self
            .store
            .count(Collection::Profiles, RecordQuery::new().eq("role", Role::Company))
            .await?;
        Ok(PlatformStatistics::from_profiles(&talents, total_companies))
    }
}
