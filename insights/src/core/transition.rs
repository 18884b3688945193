//! Education pathway to employment outcome summary

use serde::{Deserialize, Serialize};

use shared::{is_employed_status, EducationOutcome, EDUCATION_INKLUSI, EDUCATION_SLB};

/// Employed graduates counted per education model, plus the rows they came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionReport {
    pub raw: Vec<EducationOutcome>,
    pub inklusi_employed: u64,
    pub slb_employed: u64,
    pub narrative: String,
}

impl TransitionReport {
    pub fn from_outcomes(raw: Vec<EducationOutcome>) -> Self {
        let employed_in = |model: &str| {
            raw.iter()
                .filter(|row| row.education_model == model)
                .filter(|row| row.career_status.as_deref().is_some_and(is_employed_status))
                .count() as u64
        };
        let inklusi_employed = employed_in(EDUCATION_INKLUSI);
        let slb_employed = employed_in(EDUCATION_SLB);

        Self {
            narrative: narrative(inklusi_employed, slb_employed),
            raw,
            inklusi_employed,
            slb_employed,
        }
    }
}

/// Both buckets always appear, zero included
pub fn narrative(inklusi_employed: u64, slb_employed: u64) -> String {
    format!(
        "Employed graduates by education pathway: {inklusi_employed} from inclusive schools ({EDUCATION_INKLUSI}) \
         and {slb_employed} from special-needs schools ({EDUCATION_SLB})."
    )
}
