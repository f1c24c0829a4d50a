pub mod tax_line;
pub mod tax_rule;

pub use tax_line::{TaxBreakdown, TaxLine};
pub use tax_rule::{TaxLocation, TaxRule, TaxType};
