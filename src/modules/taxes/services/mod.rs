pub mod postcode;
pub mod tax_calculator;

pub use postcode::PostcodePattern;
pub use tax_calculator::TaxCalculator;
