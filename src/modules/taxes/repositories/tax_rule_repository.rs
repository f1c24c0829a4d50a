use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::Result;
use crate::modules::taxes::models::TaxRule;

/// Store of tax rate definitions
///
/// `find_by_country` is a coarse pre-filter; the calculator re-checks every
/// restriction precisely.
#[async_trait]
pub trait TaxRuleRepository: Send + Sync {
    /// Rules that may apply in a country, including unrestricted ones
    async fn find_by_country(&self, country_code: &str) -> Result<Vec<TaxRule>>;

    /// Number of stored rules
    async fn count(&self) -> Result<usize>;
}

/// Rule store held in memory, seeded from the pricing catalog
#[derive(Default)]
pub struct InMemoryTaxRuleRepository {
    rules: RwLock<Vec<TaxRule>>,
}

impl InMemoryTaxRuleRepository {
    pub fn new(rules: Vec<TaxRule>) -> Self {
        Self {
            rules: RwLock::new(rules),
        }
    }
}

#[async_trait]
impl TaxRuleRepository for InMemoryTaxRuleRepository {
    async fn find_by_country(&self, country_code: &str) -> Result<Vec<TaxRule>> {
        let rules = self.rules.read().await;
        Ok(rules
            .iter()
            .filter(|rule| rule.matches_country(country_code))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.rules.read().await.len())
    }
}
