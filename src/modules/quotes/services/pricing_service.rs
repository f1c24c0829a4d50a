use tracing::debug;

use crate::core::Result;
use crate::modules::prices::models::{PriceCandidate, PriceContext};
use crate::modules::prices::services::PriceResolver;
use crate::modules::quotes::models::Quote;
use crate::modules::taxes::models::{TaxLocation, TaxRule};
use crate::modules::taxes::services::TaxCalculator;

/// PricingService composes price resolution and tax calculation into a quote
///
/// Pure: no I/O, no shared state. Safe to call from any number of threads.
#[derive(Default)]
pub struct PricingService {
    resolver: PriceResolver,
    calculator: TaxCalculator,
}

impl PricingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quote one unit of a variant
    ///
    /// Tax is computed on the resolved unit amount at the context's `as_of`.
    /// A missing price is returned as `NotFound` with no partial quote;
    /// amounts too large to tax are `InvalidContext`.
    pub fn quote(
        &self,
        variant_id: &str,
        candidates: &[PriceCandidate],
        rules: &[TaxRule],
        context: &PriceContext,
        location: &TaxLocation,
        product_categories: &[String],
    ) -> Result<Quote> {
        let price = self.resolver.resolve(variant_id, candidates, context)?;

        let taxes = self.calculator.calculate(
            price.amount,
            price.currency,
            location,
            product_categories,
            rules,
            context.as_of,
        )?;

        debug!(
            variant_id = %variant_id,
            unit_amount = %price.amount,
            total_tax = %taxes.total_tax,
            tax_lines = taxes.tax_lines.len(),
            "Composed quote"
        );

        Ok(Quote::compose(variant_id, price, taxes, context.quantity))
    }
}
