pub mod tax_rule_repository;

pub use tax_rule_repository::{InMemoryTaxRuleRepository, TaxRuleRepository};
