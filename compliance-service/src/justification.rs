use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use consult_types::{
    ConsultationLabOrder, ConsultationPrescriptionItem, JustificationEntry, PriorResult,
    ServiceCategory, TriggerType,
};
use pricing_service::ResolvedPrice;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tuning knobs for trigger detection
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Minimum characters for a justification entry to resolve a trigger
    pub min_justification_chars: usize,
    /// How far back a completed result can be and still conflict with a
    /// re-ordered item
    pub conflict_lookback_days: i64,
    /// Per-category payer-price thresholds; categories without an entry
    /// never raise a high-value trigger
    pub high_value_thresholds: HashMap<ServiceCategory, Decimal>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        let mut thresholds = HashMap::new();
        thresholds.insert(ServiceCategory::Lab, Decimal::from(20_000));
        thresholds.insert(ServiceCategory::Pharmacy, Decimal::from(30_000));
        thresholds.insert(ServiceCategory::Procedure, Decimal::from(100_000));
        thresholds.insert(ServiceCategory::Admission, Decimal::from(150_000));
        Self {
            min_justification_chars: 30,
            conflict_lookback_days: 30,
            high_value_thresholds: thresholds,
        }
    }
}

/// A condition requiring a written clinical rationale before finalization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JustificationTrigger {
    /// Deterministic join of kind and item identity, stable across
    /// recomputation so written justifications keep matching
    pub id: String,
    pub trigger_type: TriggerType,
    pub description: String,
    pub item_id: String,
    pub item_name: String,
}

/// One trigger joined against the existing justification entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerEvaluation {
    pub trigger: JustificationTrigger,
    pub resolved: bool,
}

/// All currently-active triggers, in detection order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerReport {
    pub triggers: Vec<TriggerEvaluation>,
    pub unresolved_count: usize,
}

impl TriggerReport {
    /// First unresolved trigger in detection order
    pub fn first_unresolved(&self) -> Option<&JustificationTrigger> {
        self.triggers
            .iter()
            .find(|evaluation| !evaluation.resolved)
            .map(|evaluation| &evaluation.trigger)
    }
}

/// Scans orders against prior results and price thresholds. Triggers are
/// never persisted; they are re-derived from the current snapshot, so
/// removing an order also removes its trigger.
pub struct JustificationDetector {
    config: DetectorConfig,
}

impl JustificationDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn detect(
        &self,
        lab_orders: &[ConsultationLabOrder],
        prescriptions: &[ConsultationPrescriptionItem],
        prices: &[ResolvedPrice],
        prior_results: &[PriorResult],
        entries: &[JustificationEntry],
        now: DateTime<Utc>,
    ) -> TriggerReport {
        let mut triggers = Vec::new();

        for order in lab_orders {
            let trigger = self
                .lab_conflict(order, prior_results, now)
                .or_else(|| self.high_value(&order.item_id, &order.name, prices));
            triggers.extend(trigger);
        }
        for item in prescriptions {
            let trigger = self
                .drug_conflict(item, prior_results)
                .or_else(|| self.high_value(&item.item_id, &item.drug_name, prices));
            triggers.extend(trigger);
        }

        let evaluations: Vec<TriggerEvaluation> = triggers
            .into_iter()
            .map(|trigger| {
                let resolved = is_resolved(&trigger, entries, self.config.min_justification_chars);
                TriggerEvaluation { trigger, resolved }
            })
            .collect();
        let unresolved_count = evaluations.iter().filter(|e| !e.resolved).count();
        debug!(
            total = evaluations.len(),
            unresolved = unresolved_count,
            "justification triggers recomputed"
        );
        TriggerReport {
            triggers: evaluations,
            unresolved_count,
        }
    }

    /// Re-ordering a test completed within the lookback window
    fn lab_conflict(
        &self,
        order: &ConsultationLabOrder,
        prior_results: &[PriorResult],
        now: DateTime<Utc>,
    ) -> Option<JustificationTrigger> {
        let lookback = Duration::days(self.config.conflict_lookback_days);
        let recent = prior_results.iter().find(|result| {
            result.item_id.eq_ignore_ascii_case(&order.item_id)
                && now.signed_duration_since(result.completed_at) <= lookback
        })?;
        Some(JustificationTrigger {
            id: trigger_id(TriggerType::Conflict, &order.item_id),
            trigger_type: TriggerType::Conflict,
            description: format!(
                "{} was completed on {}: {}",
                recent.name,
                recent.completed_at.format("%Y-%m-%d"),
                recent.outcome_summary
            ),
            item_id: order.item_id.clone(),
            item_name: order.name.clone(),
        })
    }

    /// A drug that duplicates a prior pharmacy record by identity, or
    /// shares its therapeutic class. Structural match only; the clinician
    /// judges the clinical significance.
    fn drug_conflict(
        &self,
        item: &ConsultationPrescriptionItem,
        prior_results: &[PriorResult],
    ) -> Option<JustificationTrigger> {
        let matched = prior_results
            .iter()
            .filter(|result| result.category == ServiceCategory::Pharmacy)
            .find(|result| {
                result.item_id.eq_ignore_ascii_case(&item.item_id)
                    || same_drug_class(result.drug_class.as_deref(), item.drug_class.as_deref())
            })?;
        Some(JustificationTrigger {
            id: trigger_id(TriggerType::Conflict, &item.item_id),
            trigger_type: TriggerType::Conflict,
            description: format!(
                "{} overlaps with {} ({})",
                item.drug_name, matched.name, matched.outcome_summary
            ),
            item_id: item.item_id.clone(),
            item_name: item.drug_name.clone(),
        })
    }

    fn high_value(
        &self,
        item_id: &str,
        item_name: &str,
        prices: &[ResolvedPrice],
    ) -> Option<JustificationTrigger> {
        let price = prices.iter().find(|p| p.item_id == item_id)?;
        let threshold = self.config.high_value_thresholds.get(&price.category)?;
        if price.payer_price <= *threshold {
            return None;
        }
        Some(JustificationTrigger {
            id: trigger_id(TriggerType::HighValue, item_id),
            trigger_type: TriggerType::HighValue,
            description: format!(
                "{} resolves to {} which exceeds the high-value threshold of {}",
                item_name, price.payer_price, threshold
            ),
            item_id: item_id.to_string(),
            item_name: item_name.to_string(),
        })
    }
}

fn trigger_id(trigger_type: TriggerType, item_id: &str) -> String {
    match trigger_type {
        TriggerType::Conflict => format!("conflict:{item_id}"),
        TriggerType::HighValue => format!("high_value:{item_id}"),
    }
}

fn same_drug_class(prior: Option<&str>, ordered: Option<&str>) -> bool {
    match (prior, ordered) {
        (Some(a), Some(b)) => !a.is_empty() && a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

/// A trigger is resolved iff an entry matches its id and carries enough
/// free text. The join happens here, at evaluation time, never stored.
fn is_resolved(
    trigger: &JustificationTrigger,
    entries: &[JustificationEntry],
    min_chars: usize,
) -> bool {
    entries.iter().any(|entry| {
        entry.trigger_id == trigger.id && entry.justification_text.chars().count() >= min_chars
    })
}
