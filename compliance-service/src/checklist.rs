use consult_types::{ConsultationDiagnosis, ConsultationLabOrder, ConsultationPrescriptionItem};
use serde::{Deserialize, Serialize};

/// Provider-independent structural completeness checks. A failing item
/// risks claim rejection, so it is shown as a warning at review time,
/// but it never blocks finalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplianceChecklist {
    pub primary_diagnosis_present: bool,
    pub lab_order_present: bool,
    pub prescriptions_complete: bool,
    pub treatment_plan_present: bool,
}

impl ComplianceChecklist {
    pub fn build(
        diagnoses: &[ConsultationDiagnosis],
        lab_orders: &[ConsultationLabOrder],
        prescriptions: &[ConsultationPrescriptionItem],
        treatment_plan: &str,
    ) -> Self {
        Self {
            primary_diagnosis_present: diagnoses.iter().any(|d| d.is_primary),
            lab_order_present: !lab_orders.is_empty(),
            prescriptions_complete: prescriptions.iter().all(prescription_complete),
            treatment_plan_present: !treatment_plan.trim().is_empty(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.primary_diagnosis_present
            && self.lab_order_present
            && self.prescriptions_complete
            && self.treatment_plan_present
    }
}

fn prescription_complete(item: &ConsultationPrescriptionItem) -> bool {
    !item.drug_name.trim().is_empty()
        && !item.dosage.trim().is_empty()
        && !item.frequency.trim().is_empty()
        && !item.duration.trim().is_empty()
        && item.quantity > 0
}
