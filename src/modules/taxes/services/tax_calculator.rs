use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, trace, warn};

use crate::core::{AppError, Currency, Result};
use crate::modules::taxes::models::{TaxBreakdown, TaxLine, TaxLocation, TaxRule, TaxType};

/// TaxCalculator turns a base amount and a set of tax rules into an
/// ordered, compounded breakdown
///
/// A location with no applicable rule is simply untaxed. The only failure is
/// an amount too large for decimal arithmetic.
pub struct TaxCalculator;

impl TaxCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Calculate the tax breakdown for a base amount
    ///
    /// Rules are filtered to those applicable at `as_of` for the location,
    /// categories and amount, then applied in ascending priority. Percentage
    /// rules tax the original base unless compound, in which case they tax
    /// the running amount. Each line is rounded half-up to the currency's
    /// minor unit, and compound lines raise the running amount for the rules
    /// after them. Overflow is `InvalidContext`.
    pub fn calculate(
        &self,
        base_amount: Decimal,
        currency: Currency,
        location: &TaxLocation,
        product_categories: &[String],
        rules: &[TaxRule],
        as_of: DateTime<Utc>,
    ) -> Result<TaxBreakdown> {
        let applicable =
            self.applicable_rules(base_amount, location, product_categories, rules, as_of);

        if applicable.is_empty() {
            debug!(
                country = %location.country_code,
                "No tax rules apply, amount is untaxed"
            );
            return Ok(TaxBreakdown::untaxed(base_amount));
        }

        let mut running_amount = base_amount;
        let mut tax_lines = Vec::with_capacity(applicable.len());

        for rule in applicable {
            let (base, raw_amount) = match rule.tax_type {
                TaxType::Percentage => {
                    let base = if rule.is_compound {
                        running_amount
                    } else {
                        base_amount
                    };
                    let raw = base
                        .checked_mul(rule.rate)
                        .ok_or_else(|| AppError::amount_overflow("percentage tax"))?;
                    (base, raw)
                }
                TaxType::Fixed => (rule.rate, rule.rate),
            };
            let amount = currency.round(raw_amount);

            if rule.is_compound {
                running_amount = running_amount
                    .checked_add(amount)
                    .ok_or_else(|| AppError::amount_overflow("compound running amount"))?;
            }

            debug!(
                rule_id = %rule.id,
                rate = %rule.rate,
                base = %base,
                amount = %amount,
                compound = rule.is_compound,
                inclusive = rule.is_inclusive,
                "Applied tax rule"
            );

            tax_lines.push(TaxLine::from_rule(rule, base, amount));
        }

        TaxBreakdown::from_lines(base_amount, tax_lines)
    }

    /// Rules that apply to this sale, in application order
    ///
    /// Sorting is stable, so rules sharing a priority keep their input order.
    pub fn applicable_rules<'a>(
        &self,
        base_amount: Decimal,
        location: &TaxLocation,
        product_categories: &[String],
        rules: &'a [TaxRule],
        as_of: DateTime<Utc>,
    ) -> Vec<&'a TaxRule> {
        let mut applicable: Vec<&TaxRule> = rules
            .iter()
            .filter(|rule| self.applies(rule, base_amount, location, product_categories, as_of))
            .collect();

        applicable.sort_by_key(|rule| rule.priority);
        applicable
    }

    fn applies(
        &self,
        rule: &TaxRule,
        base_amount: Decimal,
        location: &TaxLocation,
        product_categories: &[String],
        as_of: DateTime<Utc>,
    ) -> bool {
        if let Err(err) = rule.validate() {
            warn!(rule_id = %rule.id, "Skipping malformed tax rule: {}", err);
            return false;
        }

        let skip_reason = if !rule.is_active_at(as_of) {
            Some("outside validity window")
        } else if !rule.matches_country(&location.country_code) {
            Some("country mismatch")
        } else if !rule.matches_state(location.state_code.as_deref()) {
            Some("state mismatch")
        } else if !rule.matches_postcode(location.postcode.as_deref()) {
            Some("postcode mismatch")
        } else if !rule.matches_categories(product_categories) {
            Some("category mismatch")
        } else if !rule.covers_amount(base_amount) {
            Some("amount outside thresholds")
        } else {
            None
        };

        match skip_reason {
            Some(reason) => {
                trace!(rule_id = %rule.id, reason, "Skipped tax rule");
                false
            }
            None => true,
        }
    }
}

impl Default for TaxCalculator {
    fn default() -> Self {
        Self::new()
    }
}
