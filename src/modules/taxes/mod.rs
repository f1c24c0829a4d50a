pub mod models;
pub mod repositories;
pub mod services;

pub use models::{TaxBreakdown, TaxLine, TaxLocation, TaxRule, TaxType};
pub use repositories::{InMemoryTaxRuleRepository, TaxRuleRepository};
pub use services::TaxCalculator;
