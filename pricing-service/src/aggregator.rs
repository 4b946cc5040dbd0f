use consult_types::{CopayTerms, CoverageStatus, PayerContext, ServiceCategory};
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{FinancialSummary, ResolvedPrice};

/// Fold resolved prices into category subtotals and a payer-split grand
/// total. Totals use the payer price, not the list price. An empty input
/// yields an all-zero summary.
pub fn aggregate(prices: &[ResolvedPrice], payer: &PayerContext) -> FinancialSummary {
    let mut summary = FinancialSummary::default();
    if prices.is_empty() {
        return summary;
    }

    for price in prices {
        match price.category {
            ServiceCategory::Lab => summary.lab_total += price.payer_price,
            ServiceCategory::Pharmacy => summary.pharmacy_total += price.payer_price,
            _ => summary.other_total += price.payer_price,
        }
        if payer.is_hmo() {
            summary.patient_total += patient_share(price, &mut summary.review_notes);
        }
    }

    summary.grand_total = summary.lab_total + summary.pharmacy_total + summary.other_total;
    if payer.is_hmo() {
        summary.hmo_total = summary.grand_total - summary.patient_total;
    } else {
        summary.patient_total = summary.grand_total;
        summary.hmo_total = Decimal::ZERO;
    }
    summary
}

/// Patient-liable portion of one resolved item under an HMO payer
fn patient_share(price: &ResolvedPrice, review_notes: &mut Vec<String>) -> Decimal {
    match price.coverage {
        CoverageStatus::Covered => Decimal::ZERO,
        CoverageStatus::NotCovered => price.payer_price,
        CoverageStatus::Partial => match price.copay {
            Some(CopayTerms::Fraction { rate }) => price.payer_price * rate,
            Some(CopayTerms::Fixed { amount }) => amount.min(price.payer_price),
            None => {
                // Contract declares partial coverage without copay terms;
                // treat the full payer price as patient-liable and flag
                // the gap for operator review rather than defaulting to 0.
                warn!(
                    item_id = %price.item_id,
                    "partial coverage with no copay terms, treating full payer price as patient-liable"
                );
                review_notes.push(format!(
                    "{}: partial coverage with no copay terms; full payer price treated as patient-liable",
                    price.item_name
                ));
                price.payer_price
            }
        },
    }
}
