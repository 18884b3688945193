//! Core types used throughout the insights system

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::errors::SharedError;

pub mod records;

pub use records::*;

/// Substring that marks every status in the employed family ("Employed - Full Time", ...)
pub const EMPLOYED_MARKER: &str = "Employed";

/// Exact career status of an active job seeker
pub const JOB_SEEKER_STATUS: &str = "Job Seeker";

/// Bucket used when a talent has not declared a disability type
pub const UNIDENTIFIED_DISABILITY: &str = "Unidentified";

/// Mainstream inclusive education pathway
pub const EDUCATION_INKLUSI: &str = "Inklusi";

/// Special-needs school pathway
pub const EDUCATION_SLB: &str = "SLB";

/// Whether a free-form career status belongs to the employed family
pub fn is_employed_status(status: &str) -> bool {
    status.contains(EMPLOYED_MARKER)
}

/// Whether a free-form career status is exactly the job seeker status
pub fn is_seeking_status(status: &str) -> bool {
    status == JOB_SEEKER_STATUS
}

/// Unique identifier for any profile (talents and companies alike)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(Uuid);

impl ProfileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, SharedError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| SharedError::InvalidUuid { input: s.to_string() })
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ProfileId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProfileId {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

/// Account role of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Talent,
    Company,
    Government,
    CampusPartner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Talent => "talent",
            Role::Company => "company",
            Role::Government => "government",
            Role::CampusPartner => "campus_partner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "talent" => Ok(Role::Talent),
            "company" => Ok(Role::Company),
            "government" => Ok(Role::Government),
            "campus_partner" | "campus-partner" => Ok(Role::CampusPartner),
            _ => Err(SharedError::InvalidRole { input: s.to_string() }),
        }
    }
}

/// Insights component emitting a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Statistics,
    Ratings,
    Transition,
    Longitudinal,
    Retry,
    ProfileSync,
    Store,
    Dashboard,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Statistics => write!(f, "statistics"),
            Component::Ratings => write!(f, "ratings"),
            Component::Transition => write!(f, "transition"),
            Component::Longitudinal => write!(f, "longitudinal"),
            Component::Retry => write!(f, "retry"),
            Component::ProfileSync => write!(f, "profile_sync"),
            Component::Store => write!(f, "store"),
            Component::Dashboard => write!(f, "dashboard"),
        }
    }
}
