//! Education pathway vs employment outcome correlation

use std::sync::Arc;

use shared::logging::log_degraded;
use shared::{component_debug, Component};

use crate::core::TransitionReport;
use crate::traits::RecordStore;

pub struct TransitionCorrelationAnalyzer<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> TransitionCorrelationAnalyzer<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Count employed graduates per education model over the outcome view
    pub async fn analyze(&self) -> Option<TransitionReport> {
        match self.store.education_outcomes().await {
            Ok(rows) => {
                let report = TransitionReport::from_outcomes(rows);
                component_debug!(
                    Component::Transition,
                    inklusi = report.inklusi_employed,
                    slb = report.slb_employed,
                    "🎓 {}",
                    report.narrative
                );
                Some(report)
            }
            Err(error) => {
                log_degraded(Component::Transition, "Education outcome read", &error);
                None
            }
        }
    }
}
