use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::core::Result;
use crate::modules::prices::models::PriceCandidate;
use crate::modules::taxes::models::TaxRule;

/// Price and tax records seeded into the in-memory stores at startup
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingCatalog {
    #[serde(default, alias = "price_candidates")]
    pub price_candidates: Vec<PriceCandidate>,
    #[serde(default, alias = "tax_rules")]
    pub tax_rules: Vec<TaxRule>,
}

impl PricingCatalog {
    /// Read a catalog file; `.yaml`/`.yml` parse as YAML, anything else as JSON
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| {
                ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml")
            });

        let catalog = if is_yaml {
            Self::from_yaml(&raw)?
        } else {
            Self::from_json(&raw)?
        };

        info!(
            path = %path.display(),
            price_candidates = catalog.price_candidates.len(),
            tax_rules = catalog.tax_rules.len(),
            "Loaded pricing catalog"
        );

        Ok(catalog)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        let catalog: Self = serde_yaml::from_str(raw)?;
        catalog.report_invalid();
        Ok(catalog)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(raw)?;
        catalog.report_invalid();
        Ok(catalog)
    }

    /// Malformed records stay in the catalog; the engine skips them at resolution time
    fn report_invalid(&self) {
        for candidate in &self.price_candidates {
            if let Err(err) = candidate.validate() {
                warn!("Catalog contains malformed price candidate: {}", err);
            }
        }
        for rule in &self.tax_rules {
            if let Err(err) = rule.validate() {
                warn!("Catalog contains malformed tax rule: {}", err);
            }
        }
    }
}
