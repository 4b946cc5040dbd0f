use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why an ordered item requires a written clinical rationale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    Conflict,
    HighValue,
}

/// Clinician-authored rationale for a justification trigger. Entries
/// persist independently of triggers; whether an entry resolves a trigger
/// is decided by id + minimum-length join at evaluation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JustificationEntry {
    pub trigger_id: String,
    pub trigger_type: TriggerType,
    pub trigger_description: String,
    pub justification_text: String,
    pub item_id: String,
    pub item_name: String,
    pub created_at: DateTime<Utc>,
}

/// Audit record of what a clinician excluded when partially accepting a
/// protocol bundle. Append-only, never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleDeselectionRecord {
    pub id: Uuid,
    pub bundle_id: String,
    pub excluded_tests: Vec<String>,
    pub excluded_drugs: Vec<String>,
    pub recorded_at: DateTime<Utc>,
    pub clinician_id: Uuid,
}

impl BundleDeselectionRecord {
    pub fn new(
        bundle_id: impl Into<String>,
        excluded_tests: Vec<String>,
        excluded_drugs: Vec<String>,
        clinician_id: Uuid,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            bundle_id: bundle_id.into(),
            excluded_tests,
            excluded_drugs,
            recorded_at,
            clinician_id,
        }
    }
}
