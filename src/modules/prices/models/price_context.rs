// PriceContext: the purchasing situation a price is resolved for.
//
// Built per request and never persisted. Scope identifiers are opaque strings
// so the engine stays agnostic of how the surrounding system keys markets,
// sites, channels, customer groups and catalogs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Clock, Currency, Result};

/// Immutable purchasing context used to select among price candidates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceContext {
    pub market_id: Option<String>,
    pub site_id: Option<String>,
    pub channel_id: Option<String>,
    pub customer_group_id: Option<String>,
    pub catalog_id: Option<String>,
    pub currency: Currency,
    pub quantity: i32,
    pub as_of: DateTime<Utc>,
}

impl PriceContext {
    /// Create an unscoped context after validating quantity
    pub fn new(currency: Currency, quantity: i32, as_of: DateTime<Utc>) -> Result<Self> {
        let context = Self {
            market_id: None,
            site_id: None,
            channel_id: None,
            customer_group_id: None,
            catalog_id: None,
            currency,
            quantity,
            as_of,
        };
        context.validate()?;
        Ok(context)
    }

    pub fn with_market(mut self, market_id: impl Into<String>) -> Self {
        self.market_id = Some(market_id.into());
        self
    }

    pub fn with_site(mut self, site_id: impl Into<String>) -> Self {
        self.site_id = Some(site_id.into());
        self
    }

    pub fn with_channel(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }

    pub fn with_customer_group(mut self, customer_group_id: impl Into<String>) -> Self {
        self.customer_group_id = Some(customer_group_id.into());
        self
    }

    pub fn with_catalog(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    /// Quantity must be at least one
    pub fn validate(&self) -> Result<()> {
        if self.quantity < 1 {
            return Err(AppError::invalid_context(format!(
                "Quantity must be at least 1, got: {}",
                self.quantity
            )));
        }

        Ok(())
    }
}

/// Wire shape of a context before validation
///
/// Every field is optional here so that a missing currency or quantity is
/// reported as an invalid context instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceContextInput {
    pub market_id: Option<String>,
    pub site_id: Option<String>,
    pub channel_id: Option<String>,
    pub customer_group_id: Option<String>,
    pub catalog_id: Option<String>,
    pub currency: Option<String>,
    pub quantity: Option<i32>,
    pub as_of: Option<DateTime<Utc>>,
}

impl PriceContextInput {
    /// Validate the input and fill `as_of` from the clock when absent
    pub fn into_context(self, clock: &dyn Clock, max_quantity: i32) -> Result<PriceContext> {
        let currency = self
            .currency
            .as_deref()
            .filter(|code| !code.trim().is_empty())
            .ok_or_else(|| AppError::invalid_context("Currency is required"))?
            .parse::<Currency>()
            .map_err(AppError::invalid_context)?;

        let quantity = self.quantity.unwrap_or(1);
        if quantity > max_quantity {
            return Err(AppError::invalid_context(format!(
                "Quantity {} exceeds the maximum of {}",
                quantity, max_quantity
            )));
        }

        let context = PriceContext {
            market_id: self.market_id,
            site_id: self.site_id,
            channel_id: self.channel_id,
            customer_group_id: self.customer_group_id,
            catalog_id: self.catalog_id,
            currency,
            quantity,
            as_of: self.as_of.unwrap_or_else(|| clock.now()),
        };
        context.validate()?;

        Ok(context)
    }
}
