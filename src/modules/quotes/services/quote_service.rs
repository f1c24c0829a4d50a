use std::sync::Arc;

use tracing::{info, instrument};

use crate::core::{AppError, Clock, Result};
use crate::modules::prices::models::{PriceContext, PriceContextInput};
use crate::modules::prices::repositories::PriceCandidateRepository;
use crate::modules::quotes::models::{EvaluateQuoteRequest, Quote, QuoteRequest};
use crate::modules::quotes::services::PricingService;
use crate::modules::taxes::models::TaxLocation;
use crate::modules::taxes::repositories::TaxRuleRepository;

/// Store counts reported by the readiness probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStatus {
    pub price_candidates: usize,
    pub tax_rules: usize,
}

/// Service for quote requests arriving at the adapter
///
/// Loads candidates and rules from the stores, fills `as_of` from the clock,
/// then hands everything to the pure `PricingService`. Suspension only ever
/// happens in the store lookups.
pub struct QuoteService {
    candidate_repo: Arc<dyn PriceCandidateRepository>,
    tax_rule_repo: Arc<dyn TaxRuleRepository>,
    clock: Arc<dyn Clock>,
    pricing: PricingService,
    max_quantity: i32,
}

impl QuoteService {
    pub fn new(
        candidate_repo: Arc<dyn PriceCandidateRepository>,
        tax_rule_repo: Arc<dyn TaxRuleRepository>,
        clock: Arc<dyn Clock>,
        max_quantity: i32,
    ) -> Self {
        Self {
            candidate_repo,
            tax_rule_repo,
            clock,
            pricing: PricingService::new(),
            max_quantity,
        }
    }

    /// Quote a variant using the configured stores
    #[instrument(skip(self, request), fields(variant_id = %request.variant_id))]
    pub async fn quote(&self, request: QuoteRequest) -> Result<Quote> {
        let context = self.build_context(request.context)?;
        validate_location(&request.location)?;

        let candidates = self
            .candidate_repo
            .find_by_variant(&request.variant_id)
            .await?;
        let rules = self
            .tax_rule_repo
            .find_by_country(&request.location.country_code)
            .await?;

        let quote = self.pricing.quote(
            &request.variant_id,
            &candidates,
            &rules,
            &context,
            &request.location,
            &request.product_categories,
        )?;

        info!(
            unit_amount = %quote.currency.format_amount(quote.unit_amount),
            total_tax = %quote.currency.format_amount(quote.total_tax),
            "Quote issued"
        );

        finish(quote, request.line_total)
    }

    /// Quote a variant against candidates and rules supplied by the caller
    #[instrument(skip(self, request), fields(variant_id = %request.variant_id))]
    pub fn evaluate(&self, request: EvaluateQuoteRequest) -> Result<Quote> {
        let context = self.build_context(request.context)?;
        validate_location(&request.location)?;

        let quote = self.pricing.quote(
            &request.variant_id,
            &request.candidates,
            &request.rules,
            &context,
            &request.location,
            &request.product_categories,
        )?;

        finish(quote, request.line_total)
    }

    /// Probe both stores
    pub async fn store_status(&self) -> Result<StoreStatus> {
        Ok(StoreStatus {
            price_candidates: self.candidate_repo.count().await?,
            tax_rules: self.tax_rule_repo.count().await?,
        })
    }

    fn build_context(&self, input: PriceContextInput) -> Result<PriceContext> {
        input.into_context(self.clock.as_ref(), self.max_quantity)
    }
}

fn validate_location(location: &TaxLocation) -> Result<()> {
    if location.country_code.trim().is_empty() {
        return Err(AppError::invalid_context("Country code is required"));
    }
    Ok(())
}

fn finish(quote: Quote, line_total: bool) -> Result<Quote> {
    if line_total {
        quote.with_line_total()
    } else {
        Ok(quote)
    }
}
