use std::collections::HashSet;
use std::sync::Arc;

use catalog_service::BundleCatalog;
use consult_types::{
    ConsultationDiagnosis, ConsultationLabOrder, ConsultationPrescriptionItem, ProtocolBundle,
};

use crate::models::BundleSuggestion;

/// Proposes protocol bundles for the current diagnoses and filters out
/// bundles already fully ordered or dismissed this session
pub struct BundleMatcher {
    catalog: Arc<dyn BundleCatalog>,
}

impl BundleMatcher {
    pub fn new(catalog: Arc<dyn BundleCatalog>) -> Self {
        Self { catalog }
    }

    pub fn find_bundle(&self, bundle_id: &str) -> Option<ProtocolBundle> {
        self.catalog.find_bundle(bundle_id)
    }

    /// A bundle is suggested when one of its diagnosis codes matches a
    /// current diagnosis and at least one constituent is not yet ordered.
    /// Dismissed bundles stay suppressed until the session resets.
    pub fn suggest(
        &self,
        diagnoses: &[ConsultationDiagnosis],
        lab_orders: &[ConsultationLabOrder],
        prescriptions: &[ConsultationPrescriptionItem],
        dismissed: &HashSet<String>,
    ) -> Vec<BundleSuggestion> {
        self.catalog
            .list_bundles()
            .into_iter()
            .filter(|bundle| !dismissed.contains(&bundle.id))
            .filter(|bundle| diagnosis_match(bundle, diagnoses))
            .filter_map(|bundle| {
                let missing_tests: Vec<_> = bundle
                    .lab_tests
                    .iter()
                    .filter(|test| !has_lab_order(lab_orders, &test.code))
                    .cloned()
                    .collect();
                let missing_medications: Vec<_> = bundle
                    .medications
                    .iter()
                    .filter(|med| !has_prescription(prescriptions, &med.name))
                    .cloned()
                    .collect();
                // Fully subsumed by existing orders: nothing to offer
                if missing_tests.is_empty() && missing_medications.is_empty() {
                    return None;
                }
                Some(BundleSuggestion {
                    bundle,
                    missing_tests,
                    missing_medications,
                })
            })
            .collect()
    }
}

fn diagnosis_match(bundle: &ProtocolBundle, diagnoses: &[ConsultationDiagnosis]) -> bool {
    bundle.diagnosis_codes.iter().any(|code| {
        diagnoses
            .iter()
            .any(|diagnosis| diagnosis.code.eq_ignore_ascii_case(code))
    })
}

pub(crate) fn has_lab_order(lab_orders: &[ConsultationLabOrder], code: &str) -> bool {
    lab_orders
        .iter()
        .any(|order| order.item_id.eq_ignore_ascii_case(code))
}

pub(crate) fn has_prescription(
    prescriptions: &[ConsultationPrescriptionItem],
    drug_name: &str,
) -> bool {
    prescriptions
        .iter()
        .any(|item| item.drug_name.eq_ignore_ascii_case(drug_name))
}
