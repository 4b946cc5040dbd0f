use std::sync::Arc;

use catalog_service::{BundleCatalog, PayerContracts, PriorResults, ServiceCatalog};
use chrono::Utc;
use compliance_service::{
    ComplianceChecklist, ComplianceRuleSource, DetectorConfig, HmoComplianceEvaluator,
    JustificationDetector, TriggerReport,
};
use consult_types::BundleDeselectionRecord;
use pricing_service::{aggregate, FinancialSummary, OrderLine, PriceResolver, ResolvedPrice};
use protocol_service::{apply_bundle, BundleMatcher, BundleSelection, BundleSuggestion};
use tracing::info;

use crate::error::{ConsultationError, ConsultationResult};
use crate::form::{ConsultationFormData, ConsultationStatus};
use crate::gate::{ComplianceReport, FinalizeOutcome, FinalizeSummary};

/// Composes the pricing, protocol, and compliance services over one
/// consultation form. Every method derives its output from the current
/// form snapshot; nothing is cached between calls.
pub struct ConsultationService {
    resolver: PriceResolver,
    matcher: BundleMatcher,
    detector: JustificationDetector,
    evaluator: HmoComplianceEvaluator,
    prior_results: Arc<dyn PriorResults>,
}

impl ConsultationService {
    pub fn new(
        catalog: Arc<dyn ServiceCatalog>,
        contracts: Arc<dyn PayerContracts>,
        bundles: Arc<dyn BundleCatalog>,
        rules: Arc<dyn ComplianceRuleSource>,
        prior_results: Arc<dyn PriorResults>,
        detector_config: DetectorConfig,
    ) -> Self {
        Self {
            resolver: PriceResolver::new(catalog, contracts),
            matcher: BundleMatcher::new(bundles),
            detector: JustificationDetector::new(detector_config),
            evaluator: HmoComplianceEvaluator::new(rules),
            prior_results,
        }
    }

    /// One resolved price per ordered item, labs then prescriptions
    pub fn resolve_prices(&self, form: &ConsultationFormData) -> Vec<ResolvedPrice> {
        let lines = OrderLine::collect(&form.lab_orders, &form.prescriptions);
        self.resolver.resolve_prices(&lines, &form.payer)
    }

    pub fn financial_summary(&self, form: &ConsultationFormData) -> FinancialSummary {
        aggregate(&self.resolve_prices(form), &form.payer)
    }

    pub fn suggest_bundles(&self, form: &ConsultationFormData) -> Vec<BundleSuggestion> {
        self.matcher.suggest(
            &form.diagnoses,
            &form.lab_orders,
            &form.prescriptions,
            &form.dismissed_bundles,
        )
    }

    /// Apply a bundle with the given selection. Records the deselection
    /// audit entry on the form when the acceptance was partial.
    pub fn apply_bundle(
        &self,
        form: &mut ConsultationFormData,
        bundle_id: &str,
        selection: &BundleSelection,
    ) -> ConsultationResult<Option<BundleDeselectionRecord>> {
        form.ensure_editable()?;
        let bundle = self.matcher.find_bundle(bundle_id).ok_or_else(|| {
            ConsultationError::Validation(format!("unknown protocol bundle: {bundle_id}"))
        })?;
        let record = apply_bundle(
            &bundle,
            selection,
            &mut form.lab_orders,
            &mut form.prescriptions,
            form.clinician_id,
            Utc::now(),
        );
        if let Some(record) = &record {
            form.deselections.push(record.clone());
        }
        if !selection.is_empty() {
            form.mark_edited();
        }
        Ok(record)
    }

    /// Re-derive the active justification triggers and join them against
    /// the form's written justifications
    pub fn detect_triggers(&self, form: &ConsultationFormData) -> TriggerReport {
        let prices = self.resolve_prices(form);
        let prior = self.prior_results.prior_results(form.patient_id);
        self.detector.detect(
            &form.lab_orders,
            &form.prescriptions,
            &prices,
            &prior,
            &form.justifications,
            Utc::now(),
        )
    }

    /// Payer rule alerts (empty for non-HMO payers) plus the structural
    /// checklist
    pub fn evaluate_compliance(&self, form: &ConsultationFormData) -> ComplianceReport {
        let alerts = match form.payer.hmo_provider() {
            Some(provider_id) => {
                self.evaluator
                    .evaluate(provider_id, &form.diagnoses, &form.vitals, &form.lab_orders)
            }
            None => Vec::new(),
        };
        let checklist = ComplianceChecklist::build(
            &form.diagnoses,
            &form.lab_orders,
            &form.prescriptions,
            &form.treatment_plan,
        );
        ComplianceReport { alerts, checklist }
    }

    /// Move the consultation towards review. Unresolved justification
    /// triggers block deterministically on the first one in detection
    /// order; compliance failures are carried into the summary but never
    /// block.
    pub fn attempt_finalize(
        &self,
        form: &mut ConsultationFormData,
    ) -> ConsultationResult<FinalizeOutcome> {
        if form.status == ConsultationStatus::Finalized {
            return Err(ConsultationError::InvalidState(
                "consultation is already finalized".to_string(),
            ));
        }

        let report = self.detect_triggers(form);
        if let Some(trigger) = report.first_unresolved() {
            form.status = ConsultationStatus::Draft;
            return Ok(FinalizeOutcome::Blocked {
                trigger: trigger.clone(),
                unresolved_count: report.unresolved_count,
            });
        }

        let compliance = self.evaluate_compliance(form);
        let failing_rules = compliance
            .alerts
            .iter()
            .filter(|alert| !alert.passed)
            .cloned()
            .collect();
        let summary = FinalizeSummary {
            diagnoses: form.diagnoses.clone(),
            lab_orders: form.lab_orders.clone(),
            prescriptions: form.prescriptions.clone(),
            financials: self.financial_summary(form),
            checklist: compliance.checklist,
            failing_rules,
            treatment_plan: form.treatment_plan.clone(),
            follow_up: form.follow_up.clone(),
        };
        form.status = ConsultationStatus::ReadyToReview;
        Ok(FinalizeOutcome::Ready {
            summary: Box::new(summary),
        })
    }

    /// Lock the consultation. Only legal from review; re-checks the
    /// trigger join in case a justification was removed since.
    pub fn confirm_finalize(&self, form: &mut ConsultationFormData) -> ConsultationResult<()> {
        if form.status != ConsultationStatus::ReadyToReview {
            return Err(ConsultationError::InvalidState(
                "consultation is not ready for review".to_string(),
            ));
        }
        let report = self.detect_triggers(form);
        if report.unresolved_count > 0 {
            form.status = ConsultationStatus::Draft;
            return Err(ConsultationError::Validation(format!(
                "{} unresolved justification trigger(s) remain",
                report.unresolved_count
            )));
        }
        form.status = ConsultationStatus::Finalized;
        info!(
            patient_id = %form.patient_id,
            lab_orders = form.lab_orders.len(),
            prescriptions = form.prescriptions.len(),
            "consultation finalized"
        );
        Ok(())
    }
}
