use std::cmp::Ordering;

use tracing::{debug, trace, warn};

use crate::core::{AppError, Result};
use crate::modules::prices::models::{PriceCandidate, PriceContext, ResolvedPrice};

/// An eligible candidate together with its specificity score
#[derive(Debug, Clone, Copy)]
pub struct RankedCandidate<'a> {
    pub candidate: &'a PriceCandidate,
    pub specificity: u8,
}

/// PriceResolver selects the single winning price candidate for a context
///
/// Pure and stateless: it reads the candidate slice and the context, and
/// never mutates either.
pub struct PriceResolver;

impl PriceResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the effective unit price for a variant
    ///
    /// Filters candidates on variant, currency, validity window, quantity
    /// tier and scope compatibility, then picks the top-ranked survivor.
    ///
    /// # Errors
    /// * `InvalidContext` - the context itself is malformed
    /// * `NotFound` - no candidate survives filtering
    pub fn resolve(
        &self,
        variant_id: &str,
        candidates: &[PriceCandidate],
        context: &PriceContext,
    ) -> Result<ResolvedPrice> {
        context.validate()?;

        let ranked = self.rank(variant_id, candidates, context);

        let winner = ranked.first().ok_or_else(|| {
            AppError::not_found(format!(
                "No price for variant {} in {} at quantity {}",
                variant_id, context.currency, context.quantity
            ))
        })?;

        debug!(
            variant_id = %variant_id,
            eligible = ranked.len(),
            candidate_id = %winner.candidate.id,
            specificity = winner.specificity,
            amount = %winner.candidate.amount,
            "Resolved price"
        );

        Ok(ResolvedPrice::from_candidate(
            winner.candidate,
            winner.specificity,
        ))
    }

    /// Every eligible candidate, best first
    ///
    /// Ordered by specificity descending, then priority descending, then
    /// creation time descending. Candidate id ascending is the last resort
    /// so the order is total for any input.
    pub fn rank<'a>(
        &self,
        variant_id: &str,
        candidates: &'a [PriceCandidate],
        context: &PriceContext,
    ) -> Vec<RankedCandidate<'a>> {
        let mut ranked: Vec<RankedCandidate<'a>> = candidates
            .iter()
            .filter_map(|candidate| {
                self.specificity(variant_id, candidate, context)
                    .map(|specificity| RankedCandidate {
                        candidate,
                        specificity,
                    })
            })
            .collect();

        ranked.sort_by(compare_ranked);
        ranked
    }

    /// Specificity of a candidate, or None when it is filtered out
    pub fn specificity(
        &self,
        variant_id: &str,
        candidate: &PriceCandidate,
        context: &PriceContext,
    ) -> Option<u8> {
        if candidate.variant_id != variant_id {
            return None;
        }

        if let Err(err) = candidate.validate() {
            warn!(candidate_id = %candidate.id, "Skipping malformed price candidate: {}", err);
            return None;
        }

        if candidate.currency != context.currency {
            trace!(candidate_id = %candidate.id, "Currency mismatch");
            return None;
        }

        if !candidate.is_active_at(context.as_of) {
            trace!(candidate_id = %candidate.id, "Outside validity window");
            return None;
        }

        if !candidate.covers_quantity(context.quantity) {
            trace!(candidate_id = %candidate.id, quantity = context.quantity, "Outside quantity tier");
            return None;
        }

        let specificity = candidate.scope_specificity(context);
        if specificity.is_none() {
            trace!(candidate_id = %candidate.id, "Scope conflicts with context");
        }
        specificity
    }
}

impl Default for PriceResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn compare_ranked(a: &RankedCandidate<'_>, b: &RankedCandidate<'_>) -> Ordering {
    b.specificity
        .cmp(&a.specificity)
        .then_with(|| b.candidate.priority.cmp(&a.candidate.priority))
        .then_with(|| b.candidate.created_at.cmp(&a.candidate.created_at))
        .then_with(|| a.candidate.id.cmp(&b.candidate.id))
}
