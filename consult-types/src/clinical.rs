use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// ICD-style diagnosis attached to a consultation. At most one diagnosis
/// in a consultation's set is primary; the form aggregate enforces this
/// by demoting the previous primary when a new one is marked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationDiagnosis {
    pub code: String,
    pub description: String,
    pub is_primary: bool,
}

/// Clinical urgency of an ordered test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderPriority {
    Routine,
    Urgent,
    Stat,
}

/// Lab test ordered during the encounter. Removable until finalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationLabOrder {
    pub item_id: String,
    pub name: String,
    pub priority: OrderPriority,
    pub notes: Option<String>,
    /// Catalog price shown at order entry; used as the pricing fallback
    /// when the catalog no longer knows the item
    pub listed_price: Option<Decimal>,
}

/// Prescription line created during the encounter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationPrescriptionItem {
    pub item_id: String,
    pub drug_name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub quantity: u32,
    /// Therapeutic class used for structural conflict matching
    pub drug_class: Option<String>,
    pub listed_price: Option<Decimal>,
}

/// Vitals captured for the encounter, all optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VitalSigns {
    pub systolic_bp: Option<u32>,
    pub diastolic_bp: Option<u32>,
    pub temperature_c: Option<Decimal>,
    pub pulse_bpm: Option<u32>,
    pub respiratory_rate: Option<u32>,
    pub weight_kg: Option<Decimal>,
}

/// Follow-up plan captured on the consultation form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FollowUpPlan {
    pub date: Option<NaiveDate>,
    pub instructions: Option<String>,
}
