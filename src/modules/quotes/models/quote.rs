use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Currency, Result};
use crate::modules::prices::models::{PriceCandidate, PriceContextInput, ResolvedPrice};
use crate::modules::taxes::models::{TaxBreakdown, TaxLine, TaxLocation, TaxRule};

/// Final price and tax answer for one line item
///
/// Amounts are per unit. `line_amount` is only present when the caller asked
/// for a line total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub variant_id: String,
    pub unit_amount: Decimal,
    pub currency: Currency,
    pub tax_lines: Vec<TaxLine>,
    pub total_tax: Decimal,
    pub tax_inclusive_total: Decimal,
    /// Unit amount minus inclusive tax lines
    pub net_amount: Decimal,
    pub compare_at_amount: Option<Decimal>,
    pub source_candidate_id: String,
    pub specificity_score: u8,
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_amount: Option<Decimal>,
}

impl Quote {
    pub fn compose(
        variant_id: impl Into<String>,
        price: ResolvedPrice,
        taxes: TaxBreakdown,
        quantity: i32,
    ) -> Self {
        Self {
            variant_id: variant_id.into(),
            unit_amount: price.amount,
            currency: price.currency,
            tax_lines: taxes.tax_lines,
            total_tax: taxes.total_tax,
            tax_inclusive_total: taxes.tax_inclusive_total,
            net_amount: taxes.net_amount,
            compare_at_amount: price.compare_at_amount,
            source_candidate_id: price.source_candidate_id,
            specificity_score: price.specificity_score,
            quantity,
            line_amount: None,
        }
    }

    /// Extend the unit amount by the quoted quantity, rounded to the currency
    pub fn with_line_total(mut self) -> Result<Self> {
        let line = self
            .unit_amount
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| AppError::amount_overflow("line total"))?;
        self.line_amount = Some(self.currency.round(line));
        Ok(self)
    }

    pub fn inclusive_lines(&self) -> impl Iterator<Item = &TaxLine> {
        self.tax_lines.iter().filter(|line| line.is_inclusive)
    }
}

/// Quote request resolved against the configured stores
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub variant_id: String,
    pub context: PriceContextInput,
    pub location: TaxLocation,
    #[serde(default)]
    pub product_categories: Vec<String>,
    #[serde(default)]
    pub line_total: bool,
}

/// Stateless quote request carrying its own candidates and rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateQuoteRequest {
    pub variant_id: String,
    pub context: PriceContextInput,
    pub location: TaxLocation,
    #[serde(default)]
    pub product_categories: Vec<String>,
    #[serde(default)]
    pub line_total: bool,
    pub candidates: Vec<PriceCandidate>,
    #[serde(default)]
    pub rules: Vec<TaxRule>,
}
