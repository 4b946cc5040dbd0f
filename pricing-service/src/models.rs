use consult_types::{
    ConsultationLabOrder, ConsultationPrescriptionItem, CopayTerms, CoverageStatus, ServiceCategory,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payer-agnostic view of one ordered item, the resolver's input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: String,
    pub name: String,
    pub category: ServiceCategory,
    /// Price shown at order entry, the fallback when the catalog no
    /// longer knows the item
    pub listed_price: Option<Decimal>,
}

impl OrderLine {
    pub fn from_lab(order: &ConsultationLabOrder) -> Self {
        Self {
            item_id: order.item_id.clone(),
            name: order.name.clone(),
            category: ServiceCategory::Lab,
            listed_price: order.listed_price,
        }
    }

    pub fn from_prescription(item: &ConsultationPrescriptionItem) -> Self {
        Self {
            item_id: item.item_id.clone(),
            name: item.drug_name.clone(),
            category: ServiceCategory::Pharmacy,
            listed_price: item.listed_price,
        }
    }

    /// All order lines of a consultation, labs first in order-entry order
    pub fn collect(
        labs: &[ConsultationLabOrder],
        prescriptions: &[ConsultationPrescriptionItem],
    ) -> Vec<OrderLine> {
        labs.iter()
            .map(Self::from_lab)
            .chain(prescriptions.iter().map(Self::from_prescription))
            .collect()
    }
}

/// Resolved price and coverage classification for one ordered item.
/// Derived, recomputed on every order/payer change; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedPrice {
    pub item_id: String,
    pub item_name: String,
    pub category: ServiceCategory,
    /// Cash (list) price
    pub standard_price: Decimal,
    /// What the responsible payer is actually charged
    pub payer_price: Decimal,
    pub coverage: CoverageStatus,
    /// Patient-share terms from the contract, for partially covered items
    pub copay: Option<CopayTerms>,
}

/// Payer-split financial totals for one consultation's orders.
/// `grand_total` is built as the sum of the category buckets, so the
/// category invariant holds by construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub lab_total: Decimal,
    pub pharmacy_total: Decimal,
    pub other_total: Decimal,
    pub grand_total: Decimal,
    pub patient_total: Decimal,
    pub hmo_total: Decimal,
    /// Operator-facing notes, e.g. partial coverage with no copay terms
    pub review_notes: Vec<String>,
}
