use chrono::{DateTime, Utc};
use consult_types::{
    BundleDeselectionRecord, ConsultationLabOrder, ConsultationPrescriptionItem, OrderPriority,
    ProtocolBundle,
};
use uuid::Uuid;

use crate::matcher::{has_lab_order, has_prescription};
use crate::models::BundleSelection;

/// Copy the selected bundle constituents into the order lists, skipping
/// items already present by test code / drug name.
///
/// Returns a deselection audit record only when at least one constituent
/// was excluded. A full acceptance produces no record; an empty selection
/// is a no-op and produces neither orders nor a record.
pub fn apply_bundle(
    bundle: &ProtocolBundle,
    selection: &BundleSelection,
    lab_orders: &mut Vec<ConsultationLabOrder>,
    prescriptions: &mut Vec<ConsultationPrescriptionItem>,
    clinician_id: Uuid,
    now: DateTime<Utc>,
) -> Option<BundleDeselectionRecord> {
    if selection.is_empty() {
        return None;
    }

    for test in &bundle.lab_tests {
        if selection.includes_test(&test.code) && !has_lab_order(lab_orders, &test.code) {
            lab_orders.push(ConsultationLabOrder {
                item_id: test.code.clone(),
                name: test.name.clone(),
                priority: OrderPriority::Routine,
                notes: None,
                listed_price: None,
            });
        }
    }
    for medication in &bundle.medications {
        if selection.includes_drug(&medication.name)
            && !has_prescription(prescriptions, &medication.name)
        {
            prescriptions.push(ConsultationPrescriptionItem {
                item_id: medication.item_id.clone(),
                drug_name: medication.name.clone(),
                dosage: medication.dosage.clone(),
                frequency: medication.frequency.clone(),
                duration: medication.duration.clone(),
                quantity: medication.quantity,
                drug_class: None,
                listed_price: None,
            });
        }
    }

    let excluded_tests: Vec<String> = bundle
        .lab_tests
        .iter()
        .filter(|test| !selection.includes_test(&test.code))
        .map(|test| test.code.clone())
        .collect();
    let excluded_drugs: Vec<String> = bundle
        .medications
        .iter()
        .filter(|medication| !selection.includes_drug(&medication.name))
        .map(|medication| medication.name.clone())
        .collect();

    if excluded_tests.is_empty() && excluded_drugs.is_empty() {
        return None;
    }
    Some(BundleDeselectionRecord::new(
        bundle.id.clone(),
        excluded_tests,
        excluded_drugs,
        clinician_id,
        now,
    ))
}
