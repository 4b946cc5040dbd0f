use std::collections::HashMap;

use consult_types::PriorResult;
use uuid::Uuid;

/// Read-only access to a patient's completed prior results
pub trait PriorResults: Send + Sync {
    /// Results in completion order, most recent last
    fn prior_results(&self, patient_id: Uuid) -> Vec<PriorResult>;
}

/// In-memory prior-result store for testing and development
#[derive(Default)]
pub struct InMemoryPriorResults {
    by_patient: HashMap<Uuid, Vec<PriorResult>>,
}

impl InMemoryPriorResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_result(&mut self, patient_id: Uuid, result: PriorResult) {
        self.by_patient.entry(patient_id).or_default().push(result);
    }
}

impl PriorResults for InMemoryPriorResults {
    fn prior_results(&self, patient_id: Uuid) -> Vec<PriorResult> {
        self.by_patient.get(&patient_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use consult_types::ServiceCategory;

    #[test]
    fn results_are_scoped_to_the_patient() {
        let mut store = InMemoryPriorResults::new();
        let patient = Uuid::new_v4();
        store.record_result(
            patient,
            PriorResult {
                item_id: "LAB-FBC".to_string(),
                name: "Full Blood Count".to_string(),
                category: ServiceCategory::Lab,
                completed_at: Utc::now(),
                outcome_summary: "Within normal limits".to_string(),
                drug_class: None,
            },
        );

        assert_eq!(store.prior_results(patient).len(), 1);
        assert!(store.prior_results(Uuid::new_v4()).is_empty());
    }
}
