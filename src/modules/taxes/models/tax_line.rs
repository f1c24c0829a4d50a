use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};
use crate::modules::taxes::models::{TaxRule, TaxType};

/// One applied tax rule and the amount it produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxLine {
    pub rule_id: String,
    pub name: String,
    pub code: String,
    pub rate: Decimal,
    #[serde(rename = "type")]
    pub tax_type: TaxType,
    /// Amount the rate was applied to; equals the rate itself for fixed rules
    pub base: Decimal,
    pub amount: Decimal,
    pub is_inclusive: bool,
    pub is_compound: bool,
}

impl TaxLine {
    pub fn from_rule(rule: &TaxRule, base: Decimal, amount: Decimal) -> Self {
        Self {
            rule_id: rule.id.clone(),
            name: rule.name.clone(),
            code: rule.code.clone(),
            rate: rule.rate,
            tax_type: rule.tax_type,
            base,
            amount,
            is_inclusive: rule.is_inclusive,
            is_compound: rule.is_compound,
        }
    }
}

/// Ordered tax lines plus the totals derived from them
///
/// Inclusive lines are already contained in the base amount, so only
/// exclusive lines raise `tax_inclusive_total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub tax_lines: Vec<TaxLine>,
    pub total_tax: Decimal,
    pub inclusive_tax: Decimal,
    pub exclusive_tax: Decimal,
    pub tax_inclusive_total: Decimal,
    /// Base minus the sum of inclusive line amounts. Inclusive lines are
    /// `base × rate` like any other, so this is not a tax-extracted net:
    /// 122 under a 22% inclusive rule leaves 95.16.
    pub net_amount: Decimal,
}

impl TaxBreakdown {
    /// Breakdown for an untaxed amount
    pub fn untaxed(base_amount: Decimal) -> Self {
        Self {
            tax_lines: Vec::new(),
            total_tax: Decimal::ZERO,
            inclusive_tax: Decimal::ZERO,
            exclusive_tax: Decimal::ZERO,
            tax_inclusive_total: base_amount,
            net_amount: base_amount,
        }
    }

    /// Sum the lines into totals; overflow is reported, never wrapped
    pub fn from_lines(base_amount: Decimal, tax_lines: Vec<TaxLine>) -> Result<Self> {
        let mut inclusive_tax = Decimal::ZERO;
        let mut exclusive_tax = Decimal::ZERO;
        for line in &tax_lines {
            let total = if line.is_inclusive {
                &mut inclusive_tax
            } else {
                &mut exclusive_tax
            };
            *total = total
                .checked_add(line.amount)
                .ok_or_else(|| AppError::amount_overflow("tax total"))?;
        }

        let total_tax = inclusive_tax
            .checked_add(exclusive_tax)
            .ok_or_else(|| AppError::amount_overflow("tax total"))?;
        let tax_inclusive_total = base_amount
            .checked_add(exclusive_tax)
            .ok_or_else(|| AppError::amount_overflow("tax-inclusive total"))?;
        let net_amount = base_amount
            .checked_sub(inclusive_tax)
            .ok_or_else(|| AppError::amount_overflow("net amount"))?;

        Ok(Self {
            tax_lines,
            total_tax,
            inclusive_tax,
            exclusive_tax,
            tax_inclusive_total,
            net_amount,
        })
    }

    pub fn is_untaxed(&self) -> bool {
        self.tax_lines.is_empty()
    }
}
