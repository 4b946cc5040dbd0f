use compliance_service::{ComplianceChecklist, HmoAlertResult, JustificationTrigger};
use consult_types::{
    ConsultationDiagnosis, ConsultationLabOrder, ConsultationPrescriptionItem, FollowUpPlan,
};
use pricing_service::FinancialSummary;
use serde::{Deserialize, Serialize};

/// Compliance view of the in-progress consultation: payer rule alerts
/// plus the structural checklist. Warnings only, never a gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub alerts: Vec<HmoAlertResult>,
    pub checklist: ComplianceChecklist,
}

/// Confirmation summary assembled once a consultation reaches review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizeSummary {
    pub diagnoses: Vec<ConsultationDiagnosis>,
    pub lab_orders: Vec<ConsultationLabOrder>,
    pub prescriptions: Vec<ConsultationPrescriptionItem>,
    pub financials: FinancialSummary,
    pub checklist: ComplianceChecklist,
    /// Provider rules currently failing; shown at review, not blocking
    pub failing_rules: Vec<HmoAlertResult>,
    pub treatment_plan: String,
    pub follow_up: FollowUpPlan,
}

/// Result of attempting to finalize. Only unresolved justification
/// triggers block; the first one in detection order is surfaced for
/// resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FinalizeOutcome {
    Blocked {
        trigger: JustificationTrigger,
        unresolved_count: usize,
    },
    Ready {
        summary: Box<FinalizeSummary>,
    },
}

impl FinalizeOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, FinalizeOutcome::Blocked { .. })
    }
}
