use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

/// Pricing engine settings
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// YAML or JSON catalog seeding the in-memory stores
    pub data_path: Option<String>,
    /// Largest quantity accepted in a price context
    pub max_quantity: i32,
}

impl PricingConfig {
    pub fn from_env() -> Result<Self> {
        Ok(PricingConfig {
            data_path: env::var("PRICING_DATA_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty()),
            max_quantity: env::var("PRICING_MAX_QUANTITY")
                .unwrap_or_else(|_| "1000000".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid PRICING_MAX_QUANTITY".to_string())
                })?,
        })
    }
}
