//! Inclusion rating validation and aggregation

use serde::{Deserialize, Serialize};

use shared::{DimensionScores, InclusionRating};

use crate::error::{InsightsError, InsightsResult};

/// Longest anonymous comment accepted with a rating
pub const MAX_COMMENT_CHARS: usize = 1_000;

/// Inclusive bound every dimension score must fall within
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBounds {
    pub min: i32,
    pub max: i32,
}

impl ScoreBounds {
    pub fn new(min: i32, max: i32) -> InsightsResult<Self> {
        if min > max {
            return Err(InsightsError::config("score_bounds", format!("{min}..={max}")));
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, score: i32) -> bool {
        (self.min..=self.max).contains(&score)
    }

    /// Reject the first dimension outside the bound
    pub fn validate(&self, scores: &DimensionScores) -> InsightsResult<()> {
        for (dimension, score) in scores.named() {
            if !self.contains(score) {
                return Err(InsightsError::validation(
                    dimension,
                    format!("score {score} outside {}..={}", self.min, self.max),
                ));
            }
        }
        Ok(())
    }
}

impl Default for ScoreBounds {
    fn default() -> Self {
        Self { min: 1, max: 5 }
    }
}

/// Trim a comment; blank comments become absent
pub fn normalize_comment(comment: Option<String>) -> InsightsResult<Option<String>> {
    let Some(comment) = comment else {
        return Ok(None);
    };
    let trimmed = comment.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let length = trimmed.chars().count();
    if length > MAX_COMMENT_CHARS {
        return Err(InsightsError::validation(
            "comment",
            format!("{length} characters exceeds {MAX_COMMENT_CHARS}"),
        ));
    }
    Ok(Some(trimmed.to_string()))
}

/// Derived per-company rating summary, never stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingAggregate {
    pub count: u64,
    pub accessibility: f64,
    pub culture: f64,
    pub management: f64,
    pub onboarding: f64,
    pub total_avg: f64,
}

impl RatingAggregate {
    /// Aggregate a company's ratings. `None` when there are none.
    ///
    /// `total_avg` is the flat mean over all `4 × count` individual scores.
    pub fn from_ratings(ratings: &[InclusionRating]) -> Option<Self> {
        if ratings.is_empty() {
            return None;
        }

        let mut sums = [0i64; 4];
        let mut all_scores = 0i64;
        for rating in ratings {
            for (slot, (_, score)) in sums.iter_mut().zip(rating.scores.named()) {
                *slot += i64::from(score);
                all_scores += i64::from(score);
            }
        }

        let count = ratings.len() as f64;
        Some(Self {
            count: ratings.len() as u64,
            accessibility: sums[0] as f64 / count,
            culture: sums[1] as f64 / count,
            management: sums[2] as f64 / count,
            onboarding: sums[3] as f64 / count,
            total_avg: all_scores as f64 / (4.0 * count),
        })
    }
}
