use std::collections::HashMap;
use std::sync::Arc;

use consult_types::{ConsultationDiagnosis, ConsultationLabOrder, VitalSigns};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Vital-sign field a rule can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalField {
    SystolicBp,
    DiastolicBp,
    TemperatureC,
    PulseBpm,
    RespiratoryRate,
    WeightKg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSeverity {
    Info,
    Warning,
    Critical,
}

/// Structural predicate a payer rule evaluates. Rules are data: adding a
/// payer requirement means adding a row with one of these conditions,
/// never touching the evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum RuleCheck {
    PrimaryDiagnosisRequired,
    DiagnosisPresent { code: String },
    /// Conditioned requirement: when the diagnosis is present, the named
    /// lab must be ordered. Vacuously passes when the diagnosis is absent.
    DiagnosisRequiresLab { diagnosis_code: String, test_code: String },
    MinLabOrders { min: usize },
    MaxLabOrders { max: usize },
    VitalRecorded { vital: VitalField },
    VitalAtMost { vital: VitalField, max: Decimal },
}

/// Payer-authored domain rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRule {
    pub id: String,
    pub description: String,
    pub severity: RuleSeverity,
    pub message: String,
    pub check: RuleCheck,
}

/// Outcome of evaluating one provider rule, with the observed value
/// carried for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HmoAlertResult {
    pub rule_id: String,
    pub description: String,
    pub severity: RuleSeverity,
    pub message: String,
    pub passed: bool,
    pub actual: serde_json::Value,
}

/// Source of provider-authored rules, keyed by payer id
pub trait ComplianceRuleSource: Send + Sync {
    fn list_rules(&self, payer_id: &str) -> Vec<ProviderRule>;
}

/// In-memory rule table for testing and development
#[derive(Default)]
pub struct InMemoryRuleSource {
    by_payer: HashMap<String, Vec<ProviderRule>>,
}

impl InMemoryRuleSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_rule(&mut self, payer_id: impl Into<String>, rule: ProviderRule) {
        self.by_payer.entry(payer_id.into()).or_default().push(rule);
    }
}

impl ComplianceRuleSource for InMemoryRuleSource {
    fn list_rules(&self, payer_id: &str) -> Vec<ProviderRule> {
        self.by_payer.get(payer_id).cloned().unwrap_or_default()
    }
}

/// Evaluates a payer's rule set against the in-progress consultation.
/// Results warn; they never gate finalization on their own.
pub struct HmoComplianceEvaluator {
    source: Arc<dyn ComplianceRuleSource>,
}

impl HmoComplianceEvaluator {
    pub fn new(source: Arc<dyn ComplianceRuleSource>) -> Self {
        Self { source }
    }

    pub fn evaluate(
        &self,
        payer_id: &str,
        diagnoses: &[ConsultationDiagnosis],
        vitals: &VitalSigns,
        lab_orders: &[ConsultationLabOrder],
    ) -> Vec<HmoAlertResult> {
        self.source
            .list_rules(payer_id)
            .into_iter()
            .map(|rule| {
                let (passed, actual) = evaluate_check(&rule.check, diagnoses, vitals, lab_orders);
                HmoAlertResult {
                    rule_id: rule.id,
                    description: rule.description,
                    severity: rule.severity,
                    message: rule.message,
                    passed,
                    actual,
                }
            })
            .collect()
    }
}

fn evaluate_check(
    check: &RuleCheck,
    diagnoses: &[ConsultationDiagnosis],
    vitals: &VitalSigns,
    lab_orders: &[ConsultationLabOrder],
) -> (bool, serde_json::Value) {
    match check {
        RuleCheck::PrimaryDiagnosisRequired => {
            let primary: Vec<&str> = diagnoses
                .iter()
                .filter(|d| d.is_primary)
                .map(|d| d.code.as_str())
                .collect();
            (!primary.is_empty(), json!(primary))
        }
        RuleCheck::DiagnosisPresent { code } => {
            let codes: Vec<&str> = diagnoses.iter().map(|d| d.code.as_str()).collect();
            let present = codes.iter().any(|c| c.eq_ignore_ascii_case(code));
            (present, json!(codes))
        }
        RuleCheck::DiagnosisRequiresLab {
            diagnosis_code,
            test_code,
        } => {
            let diagnosed = diagnoses
                .iter()
                .any(|d| d.code.eq_ignore_ascii_case(diagnosis_code));
            if !diagnosed {
                return (true, json!({ "diagnosis_present": false }));
            }
            let ordered = lab_orders
                .iter()
                .any(|o| o.item_id.eq_ignore_ascii_case(test_code));
            (
                ordered,
                json!({ "diagnosis_present": true, "test_ordered": ordered }),
            )
        }
        RuleCheck::MinLabOrders { min } => (lab_orders.len() >= *min, json!(lab_orders.len())),
        RuleCheck::MaxLabOrders { max } => (lab_orders.len() <= *max, json!(lab_orders.len())),
        RuleCheck::VitalRecorded { vital } => {
            let value = vital_value(vitals, *vital);
            (value.is_some(), json!(value.map(|v| v.to_string())))
        }
        RuleCheck::VitalAtMost { vital, max } => {
            let value = vital_value(vitals, *vital);
            let passed = value.map_or(false, |v| v <= *max);
            (passed, json!(value.map(|v| v.to_string())))
        }
    }
}

fn vital_value(vitals: &VitalSigns, field: VitalField) -> Option<Decimal> {
    match field {
        VitalField::SystolicBp => vitals.systolic_bp.map(Decimal::from),
        VitalField::DiastolicBp => vitals.diastolic_bp.map(Decimal::from),
        VitalField::TemperatureC => vitals.temperature_c,
        VitalField::PulseBpm => vitals.pulse_bpm.map(Decimal::from),
        VitalField::RespiratoryRate => vitals.respiratory_rate.map(Decimal::from),
        VitalField::WeightKg => vitals.weight_kg,
    }
}
