//! Consultation Workflow Tests
//!
//! These tests walk realistic encounter scenarios end to end:
//! 1. Cash patient with a single lab order
//! 2. HMO patient: bundle suggestion, partial acceptance, high-value
//!    justification gating, compliance warnings, finalize
//! 3. Removing an order clears its justification requirement
//! 4. Partial coverage without copay terms is flagged for review
//! 5. Confirming is only legal after a successful finalize attempt

use std::sync::Arc;

use catalog_service::{
    InMemoryBundleCatalog, InMemoryPayerContracts, InMemoryPriorResults, InMemoryServiceCatalog,
};
use chrono::{Duration, Utc};
use compliance_service::{
    DetectorConfig, InMemoryRuleSource, ProviderRule, RuleCheck, RuleSeverity, VitalField,
};
use consult_types::*;
use consultation_service::*;
use protocol_service::BundleSelection;
use rust_decimal_macros::dec;
use uuid::Uuid;

const HMO: &str = "hmo-reliance";

fn catalog_item(id: &str, name: &str, category: ServiceCategory, price: rust_decimal::Decimal) -> ServiceCatalogItem {
    ServiceCatalogItem {
        id: id.to_string(),
        name: name.to_string(),
        category,
        cash_price: price,
        active: true,
    }
}

fn build_stack(prior: Vec<(Uuid, PriorResult)>) -> ConsultationService {
    let mut catalog = InMemoryServiceCatalog::new();
    for item in [
        catalog_item("LAB-LIPID", "Lipid Panel", ServiceCategory::Lab, dec!(5000)),
        catalog_item("LAB-EUC", "Electrolytes, Urea, Creatinine", ServiceCategory::Lab, dec!(3000)),
        catalog_item("LAB-FBC", "Full Blood Count", ServiceCategory::Lab, dec!(2000)),
        catalog_item("LAB-MRI", "MRI Brain", ServiceCategory::Lab, dec!(50000)),
        catalog_item("PHM-AMLO", "Amlodipine", ServiceCategory::Pharmacy, dec!(1200)),
    ] {
        catalog.register_item(item).unwrap();
    }

    let mut contracts = InMemoryPayerContracts::new();
    contracts
        .register_contract(PayerContract {
            payer_id: HMO.to_string(),
            item_id: "LAB-LIPID".to_string(),
            negotiated_price: dec!(3000),
            coverage: CoverageStatus::Partial,
            copay: None,
        })
        .unwrap();
    contracts
        .register_contract(PayerContract {
            payer_id: HMO.to_string(),
            item_id: "LAB-EUC".to_string(),
            negotiated_price: dec!(2500),
            coverage: CoverageStatus::Covered,
            copay: None,
        })
        .unwrap();

    let mut bundles = InMemoryBundleCatalog::new();
    bundles
        .register_bundle(ProtocolBundle {
            id: "bdl-htn".to_string(),
            name: "Hypertension Workup".to_string(),
            diagnosis_codes: vec!["I10".to_string()],
            lab_tests: vec![
                BundleLabTest {
                    code: "LAB-LIPID".to_string(),
                    name: "Lipid Panel".to_string(),
                },
                BundleLabTest {
                    code: "LAB-EUC".to_string(),
                    name: "Electrolytes, Urea, Creatinine".to_string(),
                },
            ],
            medications: vec![BundleMedication {
                item_id: "PHM-AMLO".to_string(),
                name: "Amlodipine".to_string(),
                dosage: "5mg".to_string(),
                frequency: "Once daily".to_string(),
                duration: "30 days".to_string(),
                quantity: 30,
            }],
        })
        .unwrap();

    let mut rules = InMemoryRuleSource::new();
    rules.register_rule(
        HMO,
        ProviderRule {
            id: "rel-primary-dx".to_string(),
            description: "A primary diagnosis must be coded".to_string(),
            severity: RuleSeverity::Critical,
            message: "Claims without a primary diagnosis are rejected".to_string(),
            check: RuleCheck::PrimaryDiagnosisRequired,
        },
    );
    rules.register_rule(
        HMO,
        ProviderRule {
            id: "rel-bp-recorded".to_string(),
            description: "Systolic blood pressure must be recorded".to_string(),
            severity: RuleSeverity::Warning,
            message: "Record vitals before claim submission".to_string(),
            check: RuleCheck::VitalRecorded {
                vital: VitalField::SystolicBp,
            },
        },
    );

    let mut prior_store = InMemoryPriorResults::new();
    for (patient_id, result) in prior {
        prior_store.record_result(patient_id, result);
    }

    ConsultationService::new(
        Arc::new(catalog),
        Arc::new(contracts),
        Arc::new(bundles),
        Arc::new(rules),
        Arc::new(prior_store),
        DetectorConfig::default(),
    )
}

fn lab_order(code: &str, name: &str) -> ConsultationLabOrder {
    ConsultationLabOrder {
        item_id: code.to_string(),
        name: name.to_string(),
        priority: OrderPriority::Routine,
        notes: None,
        listed_price: None,
    }
}

// ============================================================================
// TEST 1: Cash patient, one lab order
// ============================================================================

#[test]
fn cash_patient_single_lab_order() {
    let service = build_stack(vec![]);
    let mut form =
        ConsultationFormData::new(Uuid::new_v4(), Uuid::new_v4(), PayerContext::Cash);
    form.add_lab_order(lab_order("LAB-LIPID", "Lipid Panel"))
        .unwrap();

    let prices = service.resolve_prices(&form);
    assert_eq!(prices.len(), 1);
    assert_eq!(prices[0].payer_price, dec!(5000));
    assert_eq!(prices[0].standard_price, dec!(5000));

    let summary = service.financial_summary(&form);
    assert_eq!(summary.lab_total, dec!(5000));
    assert_eq!(summary.grand_total, dec!(5000));
    assert_eq!(summary.patient_total, dec!(5000));
    assert_eq!(summary.hmo_total, dec!(0));
}

// ============================================================================
// TEST 2: HMO encounter end to end
// ============================================================================

#[test]
fn hmo_encounter_end_to_end() {
    let service = build_stack(vec![]);
    let payer = PayerContext::Hmo {
        provider_id: HMO.to_string(),
    };
    let mut form = ConsultationFormData::new(Uuid::new_v4(), Uuid::new_v4(), payer);

    // Diagnose hypertension; the workup bundle is suggested
    form.add_diagnosis(ConsultationDiagnosis {
        code: "I10".to_string(),
        description: "Essential hypertension".to_string(),
        is_primary: true,
    })
    .unwrap();
    let suggestions = service.suggest_bundles(&form);
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].bundle.id, "bdl-htn");

    // Accept the bundle without the medication: one deselection record
    let selection = BundleSelection {
        test_codes: vec!["LAB-LIPID".to_string(), "LAB-EUC".to_string()],
        drug_names: vec![],
    };
    let record = service
        .apply_bundle(&mut form, "bdl-htn", &selection)
        .unwrap()
        .unwrap();
    assert_eq!(record.excluded_drugs, vec!["Amlodipine".to_string()]);
    assert!(record.excluded_tests.is_empty());
    assert_eq!(form.lab_orders.len(), 2);
    assert_eq!(form.deselections.len(), 1);

    // The fully/partially ordered bundle is no longer suggested in full;
    // only the medication remains missing
    let suggestions = service.suggest_bundles(&form);
    assert_eq!(suggestions.len(), 1);
    assert!(suggestions[0].missing_tests.is_empty());
    form.dismiss_bundle("bdl-htn").unwrap();
    assert!(service.suggest_bundles(&form).is_empty());

    // A high-value order blocks finalization
    form.add_lab_order(lab_order("LAB-MRI", "MRI Brain")).unwrap();
    form.set_treatment_plan("Lifestyle counselling, review in 4 weeks")
        .unwrap();
    let outcome = service.attempt_finalize(&mut form).unwrap();
    let trigger_id = match &outcome {
        FinalizeOutcome::Blocked {
            trigger,
            unresolved_count,
        } => {
            assert_eq!(*unresolved_count, 1);
            assert_eq!(trigger.id, "high_value:LAB-MRI");
            trigger.id.clone()
        }
        FinalizeOutcome::Ready { .. } => panic!("high-value order must block finalization"),
    };
    assert_eq!(form.status, ConsultationStatus::Draft);

    // A justification under the minimum length does not resolve it
    form.add_justification(JustificationEntry {
        trigger_id: trigger_id.clone(),
        trigger_type: TriggerType::HighValue,
        trigger_description: String::new(),
        justification_text: "needed".to_string(),
        item_id: "LAB-MRI".to_string(),
        item_name: "MRI Brain".to_string(),
        created_at: Utc::now(),
    })
    .unwrap();
    assert!(service.attempt_finalize(&mut form).unwrap().is_blocked());

    // A proper justification unblocks; compliance failures are shown but
    // do not gate
    form.add_justification(JustificationEntry {
        trigger_id,
        trigger_type: TriggerType::HighValue,
        trigger_description: String::new(),
        justification_text: "New focal neurological deficit on examination warrants urgent imaging"
            .to_string(),
        item_id: "LAB-MRI".to_string(),
        item_name: "MRI Brain".to_string(),
        created_at: Utc::now(),
    })
    .unwrap();
    let outcome = service.attempt_finalize(&mut form).unwrap();
    match &outcome {
        FinalizeOutcome::Ready { summary } => {
            // vitals were never recorded: the provider rule fails, claim
            // risk is surfaced, the action stays enabled
            assert!(summary
                .failing_rules
                .iter()
                .any(|alert| alert.rule_id == "rel-bp-recorded"));
            assert!(summary.checklist.primary_diagnosis_present);
            assert_eq!(summary.financials.grand_total, summary.financials.lab_total);
        }
        FinalizeOutcome::Blocked { .. } => panic!("all triggers are resolved"),
    }
    assert_eq!(form.status, ConsultationStatus::ReadyToReview);

    service.confirm_finalize(&mut form).unwrap();
    assert_eq!(form.status, ConsultationStatus::Finalized);

    // Terminal: no more edits, no second finalize
    assert!(form.add_lab_order(lab_order("LAB-FBC", "Full Blood Count")).is_err());
    assert!(service.attempt_finalize(&mut form).is_err());
}

// ============================================================================
// TEST 3: Removing the order removes the trigger
// ============================================================================

#[test]
fn removing_the_order_clears_its_trigger() {
    let patient_id = Uuid::new_v4();
    let service = build_stack(vec![(
        patient_id,
        PriorResult {
            item_id: "LAB-FBC".to_string(),
            name: "Full Blood Count".to_string(),
            category: ServiceCategory::Lab,
            completed_at: Utc::now() - Duration::days(7),
            outcome_summary: "Within normal limits".to_string(),
            drug_class: None,
        },
    )]);
    let mut form = ConsultationFormData::new(patient_id, Uuid::new_v4(), PayerContext::Cash);
    form.add_lab_order(lab_order("LAB-FBC", "Full Blood Count"))
        .unwrap();

    let report = service.detect_triggers(&form);
    assert_eq!(report.unresolved_count, 1);
    assert_eq!(report.triggers[0].trigger.id, "conflict:LAB-FBC");

    assert!(form.remove_lab_order("LAB-FBC").unwrap());
    let report = service.detect_triggers(&form);
    assert_eq!(report.unresolved_count, 0);
    assert!(!service.attempt_finalize(&mut form).unwrap().is_blocked());
}

// ============================================================================
// TEST 4: Partial coverage without copay terms is flagged
// ============================================================================

#[test]
fn partial_coverage_without_copay_terms_is_flagged() {
    let service = build_stack(vec![]);
    let payer = PayerContext::Hmo {
        provider_id: HMO.to_string(),
    };
    let mut form = ConsultationFormData::new(Uuid::new_v4(), Uuid::new_v4(), payer);
    form.add_lab_order(lab_order("LAB-LIPID", "Lipid Panel"))
        .unwrap();

    let prices = service.resolve_prices(&form);
    assert_eq!(prices[0].payer_price, dec!(3000));
    assert_eq!(prices[0].coverage, CoverageStatus::Partial);

    let summary = service.financial_summary(&form);
    // ambiguity resolves to patient-liable, not silently to zero
    assert_eq!(summary.patient_total, dec!(3000));
    assert_eq!(summary.hmo_total, dec!(0));
    assert_eq!(summary.review_notes.len(), 1);
}

// ============================================================================
// TEST 5: Confirm is only legal from review
// ============================================================================

#[test]
fn confirm_requires_a_prior_successful_attempt() {
    let service = build_stack(vec![]);
    let mut form =
        ConsultationFormData::new(Uuid::new_v4(), Uuid::new_v4(), PayerContext::Cash);
    let err = service.confirm_finalize(&mut form).unwrap_err();
    assert!(matches!(err, ConsultationError::InvalidState(_)));
}
