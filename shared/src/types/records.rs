//! Record schemas owned by the record store
//!
//! Each record kind is an explicit struct. The [`Record`] trait exposes fields by
//! column name so filters and orderings can be evaluated without a query engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ProfileId, Role};
use crate::query::{Collection, FieldValue};

/// Column-level access to a stored record
pub trait Record: Clone {
    /// Collection the record lives in
    const COLLECTION: Collection;

    /// Value of a column, `None` when the column is absent or null
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// A talent, company, government or campus account profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: ProfileId,
    pub role: Role,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub disability_type: Option<String>,
    #[serde(default)]
    pub career_status: Option<String>,
    #[serde(default)]
    pub education_model: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRecord {
    pub fn new(role: Role, display_name: impl Into<String>) -> Self {
        Self {
            id: ProfileId::new(),
            role,
            display_name: Some(display_name.into()),
            disability_type: None,
            career_status: None,
            education_model: None,
            updated_at: Utc::now(),
        }
    }

    pub fn with_disability(mut self, disability_type: impl Into<String>) -> Self {
        self.disability_type = Some(disability_type.into());
        self
    }

    pub fn with_career_status(mut self, career_status: impl Into<String>) -> Self {
        self.career_status = Some(career_status.into());
        self
    }

    pub fn with_education(mut self, education_model: impl Into<String>) -> Self {
        self.education_model = Some(education_model.into());
        self
    }
}

impl Record for ProfileRecord {
    const COLLECTION: Collection = Collection::Profiles;

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.into()),
            "role" => Some(self.role.into()),
            "display_name" => self.display_name.as_deref().map(FieldValue::from),
            "disability_type" => self.disability_type.as_deref().map(FieldValue::from),
            "career_status" => self.career_status.as_deref().map(FieldValue::from),
            "education_model" => self.education_model.as_deref().map(FieldValue::from),
            "updated_at" => Some(self.updated_at.into()),
            _ => None,
        }
    }
}

/// Partial profile update applied by a conditional update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disability_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_model: Option<String>,
}

impl ProfilePatch {
    pub fn career_status(status: impl Into<String>) -> Self {
        Self {
            career_status: Some(status.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.disability_type.is_none()
            && self.career_status.is_none()
            && self.education_model.is_none()
    }

    /// Apply the patch in place.
    ///
    /// Returns the status change as `(previous, current)` when the career status
    /// actually changed, which is what the history trigger records.
    pub fn apply_to(&self, profile: &mut ProfileRecord, now: DateTime<Utc>) -> Option<(Option<String>, String)> {
        if let Some(name) = &self.display_name {
            profile.display_name = Some(name.clone());
        }
        if let Some(disability) = &self.disability_type {
            profile.disability_type = Some(disability.clone());
        }
        if let Some(education) = &self.education_model {
            profile.education_model = Some(education.clone());
        }
        profile.updated_at = now;

        let status = self.career_status.as_ref()?;
        if profile.career_status.as_ref() == Some(status) {
            return None;
        }
        let previous = profile.career_status.replace(status.clone());
        Some((previous, status.clone()))
    }
}

/// Four-dimension inclusion score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub accessibility: i32,
    pub culture: i32,
    pub management: i32,
    pub onboarding: i32,
}

impl DimensionScores {
    pub fn new(accessibility: i32, culture: i32, management: i32, onboarding: i32) -> Self {
        Self {
            accessibility,
            culture,
            management,
            onboarding,
        }
    }

    /// Dimension names paired with their scores, in declaration order
    pub fn named(&self) -> [(&'static str, i32); 4] {
        [
            ("accessibility", self.accessibility),
            ("culture", self.culture),
            ("management", self.management),
            ("onboarding", self.onboarding),
        ]
    }

    pub fn sum(&self) -> i64 {
        self.named().iter().map(|(_, score)| i64::from(*score)).sum()
    }
}

/// An anonymous inclusion rating a talent gives a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InclusionRating {
    pub talent_id: ProfileId,
    pub company_id: ProfileId,
    #[serde(flatten)]
    pub scores: DimensionScores,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Record for InclusionRating {
    const COLLECTION: Collection = Collection::Ratings;

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "talent_id" => Some(self.talent_id.into()),
            "company_id" => Some(self.company_id.into()),
            "accessibility" => Some(self.scores.accessibility.into()),
            "culture" => Some(self.scores.culture.into()),
            "management" => Some(self.scores.management.into()),
            "onboarding" => Some(self.scores.onboarding.into()),
            "comment" => self.comment.as_deref().map(FieldValue::from),
            "created_at" => Some(self.created_at.into()),
            _ => None,
        }
    }
}

/// One append-only entry of a profile's career status history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerStatusEvent {
    pub profile_id: ProfileId,
    pub career_status: String,
    #[serde(default)]
    pub previous_status: Option<String>,
    pub changed_at: DateTime<Utc>,
}

impl Record for CareerStatusEvent {
    const COLLECTION: Collection = Collection::StatusHistory;

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "profile_id" => Some(self.profile_id.into()),
            "career_status" => Some(self.career_status.as_str().into()),
            "previous_status" => self.previous_status.as_deref().map(FieldValue::from),
            "changed_at" => Some(self.changed_at.into()),
            _ => None,
        }
    }
}

/// Row of the education-to-employment view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationOutcome {
    pub profile_id: ProfileId,
    pub education_model: String,
    #[serde(default)]
    pub career_status: Option<String>,
}

impl Record for EducationOutcome {
    const COLLECTION: Collection = Collection::EducationOutcomes;

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "profile_id" => Some(self.profile_id.into()),
            "education_model" => Some(self.education_model.as_str().into()),
            "career_status" => self.career_status.as_deref().map(FieldValue::from),
            _ => None,
        }
    }
}
