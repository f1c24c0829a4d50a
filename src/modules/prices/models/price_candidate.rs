// PriceCandidate: one configured price record considered during resolution.
//
// Scope fields left as None apply to every value of that dimension. The four
// scored dimensions are site, channel, customer group and catalog; market is
// filtered for compatibility but never scored.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Currency, Result};
use crate::modules::prices::models::PriceContext;

fn default_min_quantity() -> i32 {
    1
}

/// Snapshot of a price record read from the candidate store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceCandidate {
    pub id: String,
    pub variant_id: String,
    #[serde(default)]
    pub market_id: Option<String>,
    #[serde(default)]
    pub site_id: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub customer_group_id: Option<String>,
    #[serde(default)]
    pub catalog_id: Option<String>,
    pub currency: Currency,
    pub amount: Decimal,
    #[serde(default)]
    pub compare_at_amount: Option<Decimal>,
    #[serde(default = "default_min_quantity")]
    pub min_quantity: i32,
    /// None means unbounded
    #[serde(default)]
    pub max_quantity: Option<i32>,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    /// Higher wins
    #[serde(default)]
    pub priority: i32,
    pub created_at: DateTime<Utc>,
    /// Carried through untouched
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

impl PriceCandidate {
    /// Create an unscoped, unbounded candidate
    pub fn new(
        id: impl Into<String>,
        variant_id: impl Into<String>,
        currency: Currency,
        amount: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            variant_id: variant_id.into(),
            market_id: None,
            site_id: None,
            channel_id: None,
            customer_group_id: None,
            catalog_id: None,
            currency,
            amount,
            compare_at_amount: None,
            min_quantity: 1,
            max_quantity: None,
            starts_at: None,
            ends_at: None,
            priority: 0,
            created_at,
            annotations: BTreeMap::new(),
        }
    }

    /// Check the record's own invariants
    pub fn validate(&self) -> Result<()> {
        self.currency
            .validate_amount(self.amount)
            .map_err(|e| AppError::invalid_context(format!("Price candidate {}: {}", self.id, e)))?;

        if let Some(compare_at) = self.compare_at_amount {
            self.currency.validate_amount(compare_at).map_err(|e| {
                AppError::invalid_context(format!(
                    "Price candidate {} compare-at amount: {}",
                    self.id, e
                ))
            })?;
        }

        if self.min_quantity < 1 {
            return Err(AppError::invalid_context(format!(
                "Price candidate {} has min quantity below 1: {}",
                self.id, self.min_quantity
            )));
        }

        if let Some(max) = self.max_quantity {
            if self.min_quantity > max {
                return Err(AppError::invalid_context(format!(
                    "Price candidate {} has min quantity {} above max quantity {}",
                    self.id, self.min_quantity, max
                )));
            }
        }

        if let (Some(starts_at), Some(ends_at)) = (self.starts_at, self.ends_at) {
            if starts_at > ends_at {
                return Err(AppError::invalid_context(format!(
                    "Price candidate {} starts after it ends",
                    self.id
                )));
            }
        }

        Ok(())
    }

    /// Validity window check, both bounds inclusive
    pub fn is_active_at(&self, as_of: DateTime<Utc>) -> bool {
        self.starts_at.map_or(true, |starts_at| starts_at <= as_of)
            && self.ends_at.map_or(true, |ends_at| as_of <= ends_at)
    }

    /// Quantity tier check, both bounds inclusive
    pub fn covers_quantity(&self, quantity: i32) -> bool {
        self.min_quantity <= quantity && self.max_quantity.map_or(true, |max| quantity <= max)
    }

    /// Specificity of this candidate for the context's scope, or None when
    /// any scope field conflicts with the context
    pub fn scope_specificity(&self, context: &PriceContext) -> Option<u8> {
        scope_dimension(&self.market_id, &context.market_id)?;

        let dimensions = [
            scope_dimension(&self.site_id, &context.site_id)?,
            scope_dimension(&self.channel_id, &context.channel_id)?,
            scope_dimension(&self.customer_group_id, &context.customer_group_id)?,
            scope_dimension(&self.catalog_id, &context.catalog_id)?,
        ];

        Some(dimensions.iter().sum())
    }

    /// A compare-at amount above the charged amount marks a sale price
    pub fn is_on_sale(&self) -> bool {
        self.compare_at_amount
            .map_or(false, |compare_at| compare_at > self.amount)
    }
}

/// Open scope matches anything for zero points; a set scope must equal the
/// context's value and earns one point
fn scope_dimension(scope: &Option<String>, wanted: &Option<String>) -> Option<u8> {
    match (scope, wanted) {
        (None, _) => Some(0),
        (Some(scope), Some(wanted)) if scope == wanted => Some(1),
        _ => None,
    }
}
