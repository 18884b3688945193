//! In-memory record store
//!
//! A faithful stand-in for the managed store: the `(talent_id, company_id)`
//! unique constraint is checked under the same write lock as the insert, a
//! career status change appends a history row the way the database trigger
//! does, and staged profiles model rows whose creating trigger has not landed.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;

use shared::{
    component_debug, CareerStatusEvent, Collection, Component, EducationOutcome, InclusionRating, ProfileId,
    ProfilePatch, ProfileRecord, Record, RecordQuery, Role, StoreError, StoreResult,
};

use crate::error::InsightsResult;
use crate::traits::RecordStore;

/// Serialized contents of a store, used to seed offline reports and tests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub profiles: Vec<ProfileRecord>,
    #[serde(default)]
    pub ratings: Vec<InclusionRating>,
    #[serde(default)]
    pub status_history: Vec<CareerStatusEvent>,
}

/// A profile that exists but is not visible yet
#[derive(Debug, Clone)]
struct StagedProfile {
    record: ProfileRecord,
    hidden_for: u32,
}

#[derive(Debug, Default)]
struct Tables {
    profiles: Vec<ProfileRecord>,
    ratings: Vec<InclusionRating>,
    status_history: Vec<CareerStatusEvent>,
    staged: HashMap<ProfileId, StagedProfile>,
}

#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    tables: RwLock<Tables>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            tables: RwLock::new(Tables {
                profiles: snapshot.profiles,
                ratings: snapshot.ratings,
                status_history: snapshot.status_history,
                staged: HashMap::new(),
            }),
        }
    }

    /// Read a JSON [`StoreSnapshot`] from disk
    pub async fn load_snapshot_file(path: impl AsRef<Path>) -> InsightsResult<Self> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let snapshot: StoreSnapshot = serde_json::from_str(&raw)?;
        component_debug!(
            Component::Store,
            profiles = snapshot.profiles.len(),
            ratings = snapshot.ratings.len(),
            "📂 Loaded store snapshot from {}",
            path.as_ref().display()
        );
        Ok(Self::from_snapshot(snapshot))
    }

    /// Export the visible contents
    pub async fn snapshot(&self) -> StoreSnapshot {
        let tables = self.tables.read().await;
        StoreSnapshot {
            profiles: tables.profiles.clone(),
            ratings: tables.ratings.clone(),
            status_history: tables.status_history.clone(),
        }
    }

    /// Insert or replace a profile by id
    pub async fn put_profile(&self, profile: ProfileRecord) {
        let mut tables = self.tables.write().await;
        match tables.profiles.iter_mut().find(|existing| existing.id == profile.id) {
            Some(existing) => *existing = profile,
            None => tables.profiles.push(profile),
        }
    }

    /// Register a profile that stays invisible for the next `hidden_for` update attempts
    pub async fn stage_profile(&self, profile: ProfileRecord, hidden_for: u32) {
        let mut tables = self.tables.write().await;
        tables.staged.insert(
            profile.id,
            StagedProfile {
                record: profile,
                hidden_for,
            },
        );
    }

    fn select<R: Record>(rows: &[R], query: &RecordQuery) -> Vec<R> {
        query.apply(rows)
    }
}

impl Tables {
    /// Promote a staged profile once its visibility delay has elapsed
    fn reveal_staged(&mut self, id: ProfileId) {
        let visible = match self.staged.get_mut(&id) {
            Some(staged) if staged.hidden_for == 0 => true,
            Some(staged) => {
                staged.hidden_for -= 1;
                false
            }
            None => false,
        };
        if visible {
            if let Some(staged) = self.staged.remove(&id) {
                self.profiles.push(staged.record);
            }
        }
    }
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn profiles(&self, query: RecordQuery) -> StoreResult<Vec<ProfileRecord>> {
        Ok(Self::select(&self.tables.read().await.profiles, &query))
    }

    async fn ratings(&self, query: RecordQuery) -> StoreResult<Vec<InclusionRating>> {
        Ok(Self::select(&self.tables.read().await.ratings, &query))
    }

    async fn status_history(&self, query: RecordQuery) -> StoreResult<Vec<CareerStatusEvent>> {
        Ok(Self::select(&self.tables.read().await.status_history, &query))
    }

    async fn education_outcomes(&self) -> StoreResult<Vec<EducationOutcome>> {
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .iter()
            .filter(|profile| profile.role == Role::Talent)
            .filter_map(|profile| {
                profile.education_model.as_ref().map(|model| EducationOutcome {
                    profile_id: profile.id,
                    education_model: model.clone(),
                    career_status: profile.career_status.clone(),
                })
            })
            .collect())
    }

    async fn count(&self, collection: Collection, query: RecordQuery) -> StoreResult<u64> {
        let tables = self.tables.read().await;
        let count = match collection {
            Collection::Profiles => tables.profiles.iter().filter(|row| query.matches(*row)).count(),
            Collection::Ratings => tables.ratings.iter().filter(|row| query.matches(*row)).count(),
            Collection::StatusHistory => tables.status_history.iter().filter(|row| query.matches(*row)).count(),
            Collection::EducationOutcomes => {
                drop(tables);
                let rows = self.education_outcomes().await?;
                rows.iter().filter(|row| query.matches(*row)).count()
            }
        };
        Ok(count as u64)
    }

    async fn insert_rating(&self, rating: InclusionRating) -> StoreResult<InclusionRating> {
        let mut tables = self.tables.write().await;
        let duplicate = tables
            .ratings
            .iter()
            .any(|existing| existing.talent_id == rating.talent_id && existing.company_id == rating.company_id);
        if duplicate {
            return Err(StoreError::conflict("talent_id,company_id"));
        }
        tables.ratings.push(rating.clone());
        Ok(rating)
    }

    async fn update_profile(&self, id: ProfileId, patch: ProfilePatch) -> StoreResult<ProfileRecord> {
        let mut tables = self.tables.write().await;
        tables.reveal_staged(id);

        let now = Utc::now();
        let Some(profile) = tables.profiles.iter_mut().find(|profile| profile.id == id) else {
            return Err(StoreError::not_found(Collection::Profiles, id.to_string()));
        };
        let change = patch.apply_to(profile, now);
        let updated = profile.clone();

        if let Some((previous_status, career_status)) = change {
            tables.status_history.push(CareerStatusEvent {
                profile_id: id,
                career_status,
                previous_status,
                changed_at: now,
            });
        }
        Ok(updated)
    }
}
