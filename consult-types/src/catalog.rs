use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::payer::{CopayTerms, CoverageStatus};

/// Billing category of a catalog service item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Lab,
    Pharmacy,
    Consultation,
    Procedure,
    Admission,
    Other,
}

/// Canonical service item (lab test, drug, procedure) with its cash price.
/// Immutable reference data owned by the catalog collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCatalogItem {
    pub id: String,
    pub name: String,
    pub category: ServiceCategory,
    pub cash_price: Decimal,
    pub active: bool,
}

/// Negotiated terms for one (payer, item) pair. Absence of a contract
/// implies cash pricing and a `not_covered` classification for HMO payers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayerContract {
    pub payer_id: String,
    pub item_id: String,
    pub negotiated_price: Decimal,
    pub coverage: CoverageStatus,
    pub copay: Option<CopayTerms>,
}

/// Lab-test constituent of a protocol bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleLabTest {
    pub code: String,
    pub name: String,
}

/// Medication constituent of a protocol bundle, with default
/// prescribing parameters copied onto the order when applied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleMedication {
    pub item_id: String,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub quantity: u32,
}

/// Diagnosis-linked set of standard lab tests and medications offered
/// as a one-click order set. Static reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolBundle {
    pub id: String,
    pub name: String,
    pub diagnosis_codes: Vec<String>,
    pub lab_tests: Vec<BundleLabTest>,
    pub medications: Vec<BundleMedication>,
}

/// Completed prior result (or dispensed medication record) for a patient,
/// as supplied by the results collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorResult {
    pub item_id: String,
    pub name: String,
    pub category: ServiceCategory,
    pub completed_at: DateTime<Utc>,
    pub outcome_summary: String,
    /// Therapeutic class, present on pharmacy records only
    pub drug_class: Option<String>,
}
