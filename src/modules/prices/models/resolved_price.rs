use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::Currency;
use crate::modules::prices::models::PriceCandidate;

/// The winning candidate's price for one resolution call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPrice {
    pub amount: Decimal,
    pub currency: Currency,
    pub source_candidate_id: String,
    /// Number of scope dimensions the winner explicitly matched (0-4)
    pub specificity_score: u8,
    pub compare_at_amount: Option<Decimal>,
}

impl ResolvedPrice {
    pub fn from_candidate(candidate: &PriceCandidate, specificity_score: u8) -> Self {
        Self {
            amount: candidate.amount,
            currency: candidate.currency,
            source_candidate_id: candidate.id.clone(),
            specificity_score,
            compare_at_amount: candidate.compare_at_amount,
        }
    }

    pub fn is_on_sale(&self) -> bool {
        self.compare_at_amount
            .map_or(false, |compare_at| compare_at > self.amount)
    }
}
