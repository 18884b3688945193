//! Talent population statistics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use shared::{is_employed_status, is_seeking_status, ProfileRecord, Role, UNIDENTIFIED_DISABILITY};

/// Employed and seeking counts. The buckets are independent tallies, not a partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentRate {
    pub employed: u64,
    pub seeking: u64,
}

/// Aggregate statistics over the talent population
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformStatistics {
    pub total_talents: u64,
    pub total_companies: u64,
    pub disability_distribution: BTreeMap<String, u64>,
    pub employment_rate: EmploymentRate,
}

impl PlatformStatistics {
    /// Tally a profile projection.
    ///
    /// Only talent rows count toward the talent metrics, whatever else the
    /// projection contains.
    pub fn from_profiles<'a, I>(profiles: I, total_companies: u64) -> Self
    where
        I: IntoIterator<Item = &'a ProfileRecord>,
    {
        let mut stats = Self {
            total_companies,
            ..Self::default()
        };

        for profile in profiles.into_iter().filter(|p| p.role == Role::Talent) {
            stats.total_talents += 1;

            let bucket = profile
                .disability_type
                .as_deref()
                .filter(|disability| !disability.trim().is_empty())
                .unwrap_or(UNIDENTIFIED_DISABILITY)
                .to_string();
            *stats.disability_distribution.entry(bucket).or_insert(0) += 1;

            if let Some(status) = profile.career_status.as_deref() {
                if is_employed_status(status) {
                    stats.employment_rate.employed += 1;
                }
                if is_seeking_status(status) {
                    stats.employment_rate.seeking += 1;
                }
            }
        }

        stats
    }

    /// Share of talents in the employed family
    pub fn employment_ratio(&self) -> Option<f64> {
        if self.total_talents == 0 {
            return None;
        }
        Some(self.employment_rate.employed as f64 / self.total_talents as f64)
    }
}
