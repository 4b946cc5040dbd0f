use std::collections::HashSet;

use consult_types::{
    BundleDeselectionRecord, ConsultationDiagnosis, ConsultationLabOrder,
    ConsultationPrescriptionItem, FollowUpPlan, JustificationEntry, PayerContext, VitalSigns,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ConsultationError, ConsultationResult};

/// Lifecycle of a consultation editing session. `Finalized` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationStatus {
    Draft,
    ReadyToReview,
    Finalized,
}

/// Aggregate root for one in-progress encounter. Edited by exactly one
/// clinician session at a time; discarded or handed to the persistence
/// collaborator on finalize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationFormData {
    pub patient_id: Uuid,
    pub clinician_id: Uuid,
    pub payer: PayerContext,
    pub diagnoses: Vec<ConsultationDiagnosis>,
    pub lab_orders: Vec<ConsultationLabOrder>,
    pub prescriptions: Vec<ConsultationPrescriptionItem>,
    pub vitals: VitalSigns,
    pub justifications: Vec<JustificationEntry>,
    pub treatment_plan: String,
    pub follow_up: FollowUpPlan,
    /// Bundles the clinician dismissed this session; cleared on reset
    pub dismissed_bundles: HashSet<String>,
    /// Append-only audit trail of partial bundle acceptances
    pub deselections: Vec<BundleDeselectionRecord>,
    pub status: ConsultationStatus,
}

impl ConsultationFormData {
    pub fn new(patient_id: Uuid, clinician_id: Uuid, payer: PayerContext) -> Self {
        Self {
            patient_id,
            clinician_id,
            payer,
            diagnoses: Vec::new(),
            lab_orders: Vec::new(),
            prescriptions: Vec::new(),
            vitals: VitalSigns::default(),
            justifications: Vec::new(),
            treatment_plan: String::new(),
            follow_up: FollowUpPlan::default(),
            dismissed_bundles: HashSet::new(),
            deselections: Vec::new(),
            status: ConsultationStatus::Draft,
        }
    }

    pub(crate) fn ensure_editable(&self) -> ConsultationResult<()> {
        if self.status == ConsultationStatus::Finalized {
            return Err(ConsultationError::InvalidState(
                "consultation is finalized and can no longer be edited".to_string(),
            ));
        }
        Ok(())
    }

    /// Any edit invalidates a pending review summary
    pub(crate) fn mark_edited(&mut self) {
        if self.status == ConsultationStatus::ReadyToReview {
            self.status = ConsultationStatus::Draft;
        }
    }

    /// Add or update a diagnosis by code. Marking a diagnosis primary
    /// demotes the previous primary, so at most one is primary at a time.
    pub fn add_diagnosis(&mut self, diagnosis: ConsultationDiagnosis) -> ConsultationResult<()> {
        self.ensure_editable()?;
        if diagnosis.is_primary {
            for existing in &mut self.diagnoses {
                existing.is_primary = false;
            }
        }
        match self
            .diagnoses
            .iter_mut()
            .find(|d| d.code.eq_ignore_ascii_case(&diagnosis.code))
        {
            Some(existing) => *existing = diagnosis,
            None => self.diagnoses.push(diagnosis),
        }
        self.mark_edited();
        Ok(())
    }

    pub fn remove_diagnosis(&mut self, code: &str) -> ConsultationResult<bool> {
        self.ensure_editable()?;
        let before = self.diagnoses.len();
        self.diagnoses.retain(|d| !d.code.eq_ignore_ascii_case(code));
        let removed = self.diagnoses.len() != before;
        if removed {
            self.mark_edited();
        }
        Ok(removed)
    }

    /// Add a lab order; a second order for the same test code is skipped
    pub fn add_lab_order(&mut self, order: ConsultationLabOrder) -> ConsultationResult<()> {
        self.ensure_editable()?;
        if self
            .lab_orders
            .iter()
            .any(|o| o.item_id.eq_ignore_ascii_case(&order.item_id))
        {
            return Ok(());
        }
        self.lab_orders.push(order);
        self.mark_edited();
        Ok(())
    }

    pub fn remove_lab_order(&mut self, item_id: &str) -> ConsultationResult<bool> {
        self.ensure_editable()?;
        let before = self.lab_orders.len();
        self.lab_orders
            .retain(|o| !o.item_id.eq_ignore_ascii_case(item_id));
        let removed = self.lab_orders.len() != before;
        if removed {
            self.mark_edited();
        }
        Ok(removed)
    }

    /// Add a prescription; a second line for the same drug name is skipped
    pub fn add_prescription(
        &mut self,
        item: ConsultationPrescriptionItem,
    ) -> ConsultationResult<()> {
        self.ensure_editable()?;
        if self
            .prescriptions
            .iter()
            .any(|p| p.drug_name.eq_ignore_ascii_case(&item.drug_name))
        {
            return Ok(());
        }
        self.prescriptions.push(item);
        self.mark_edited();
        Ok(())
    }

    pub fn remove_prescription(&mut self, drug_name: &str) -> ConsultationResult<bool> {
        self.ensure_editable()?;
        let before = self.prescriptions.len();
        self.prescriptions
            .retain(|p| !p.drug_name.eq_ignore_ascii_case(drug_name));
        let removed = self.prescriptions.len() != before;
        if removed {
            self.mark_edited();
        }
        Ok(removed)
    }

    /// Justification entries are append-only; a new entry for the same
    /// trigger supersedes older ones at evaluation time by length check
    pub fn add_justification(&mut self, entry: JustificationEntry) -> ConsultationResult<()> {
        self.ensure_editable()?;
        self.justifications.push(entry);
        self.mark_edited();
        Ok(())
    }

    pub fn set_treatment_plan(&mut self, plan: impl Into<String>) -> ConsultationResult<()> {
        self.ensure_editable()?;
        self.treatment_plan = plan.into();
        self.mark_edited();
        Ok(())
    }

    pub fn set_vitals(&mut self, vitals: VitalSigns) -> ConsultationResult<()> {
        self.ensure_editable()?;
        self.vitals = vitals;
        self.mark_edited();
        Ok(())
    }

    pub fn set_follow_up(&mut self, follow_up: FollowUpPlan) -> ConsultationResult<()> {
        self.ensure_editable()?;
        self.follow_up = follow_up;
        self.mark_edited();
        Ok(())
    }

    /// Suppress a bundle suggestion for the rest of this session
    pub fn dismiss_bundle(&mut self, bundle_id: impl Into<String>) -> ConsultationResult<()> {
        self.ensure_editable()?;
        self.dismissed_bundles.insert(bundle_id.into());
        Ok(())
    }

    pub fn reset_bundle_dismissals(&mut self) {
        self.dismissed_bundles.clear();
    }
}
