// TaxRule: one tax rate definition read from the rule store.
//
// Percentage rules carry a fraction (0.22 for 22%); fixed rules carry an
// absolute amount in the quote currency. Empty country/state/postcode/category
// lists mean the rule is not restricted on that axis.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};
use crate::modules::taxes::services::postcode::PostcodePattern;

/// How a rule's `rate` is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxType {
    Percentage,
    Fixed,
}

/// Where the taxable sale happens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxLocation {
    pub country_code: String,
    #[serde(default)]
    pub state_code: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
}

impl TaxLocation {
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            state_code: None,
            postcode: None,
        }
    }

    pub fn with_state(mut self, state_code: impl Into<String>) -> Self {
        self.state_code = Some(state_code.into());
        self
    }

    pub fn with_postcode(mut self, postcode: impl Into<String>) -> Self {
        self.postcode = Some(postcode.into());
        self
    }
}

/// Tax rate definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRule {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    pub rate: Decimal,
    #[serde(rename = "type")]
    pub tax_type: TaxType,
    #[serde(default)]
    pub is_compound: bool,
    #[serde(default)]
    pub is_inclusive: bool,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub states: Vec<String>,
    /// Compiled when the rule is read
    #[serde(default)]
    pub postcode_patterns: Vec<PostcodePattern>,
    #[serde(default)]
    pub product_categories: Vec<String>,
    #[serde(default)]
    pub min_amount: Option<Decimal>,
    #[serde(default)]
    pub max_amount: Option<Decimal>,
    /// Lower numbers apply first
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

impl TaxRule {
    /// Unrestricted rule applying everywhere, always
    pub fn new(id: impl Into<String>, rate: Decimal, tax_type: TaxType) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            code: id.to_uppercase(),
            id,
            rate,
            tax_type,
            is_compound: false,
            is_inclusive: false,
            countries: Vec::new(),
            states: Vec::new(),
            postcode_patterns: Vec::new(),
            product_categories: Vec::new(),
            min_amount: None,
            max_amount: None,
            priority: 0,
            starts_at: None,
            ends_at: None,
            annotations: BTreeMap::new(),
        }
    }

    pub fn percentage(id: impl Into<String>, rate: Decimal) -> Self {
        Self::new(id, rate, TaxType::Percentage)
    }

    pub fn fixed(id: impl Into<String>, amount: Decimal) -> Self {
        Self::new(id, amount, TaxType::Fixed)
    }

    /// Restrict the rule to postcodes matching any of the glob patterns
    pub fn with_postcode_patterns(mut self, patterns: &[&str]) -> Result<Self> {
        self.postcode_patterns = patterns
            .iter()
            .map(|raw| PostcodePattern::parse(raw))
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// Validate the rule's own invariants
    /// Rates and fixed amounts are non-negative; percentages may exceed 1.0
    pub fn validate(&self) -> Result<()> {
        if self.rate < Decimal::ZERO {
            return Err(AppError::invalid_context(format!(
                "Tax rule {} has a negative rate",
                self.id
            )));
        }

        if let (Some(min), Some(max)) = (self.min_amount, self.max_amount) {
            if min > max {
                return Err(AppError::invalid_context(format!(
                    "Tax rule {} has min amount {} above max amount {}",
                    self.id, min, max
                )));
            }
        }

        if let (Some(starts_at), Some(ends_at)) = (self.starts_at, self.ends_at) {
            if starts_at > ends_at {
                return Err(AppError::invalid_context(format!(
                    "Tax rule {} starts after it ends",
                    self.id
                )));
            }
        }

        Ok(())
    }

    pub fn is_active_at(&self, as_of: DateTime<Utc>) -> bool {
        self.starts_at.map_or(true, |starts_at| starts_at <= as_of)
            && self.ends_at.map_or(true, |ends_at| as_of <= ends_at)
    }

    pub fn matches_country(&self, country_code: &str) -> bool {
        self.countries.is_empty()
            || self
                .countries
                .iter()
                .any(|c| c.trim().eq_ignore_ascii_case(country_code.trim()))
    }

    /// A rule declaring states needs a location state among them
    pub fn matches_state(&self, state_code: Option<&str>) -> bool {
        if self.states.is_empty() {
            return true;
        }

        state_code.map_or(false, |state| {
            self.states
                .iter()
                .any(|s| s.trim().eq_ignore_ascii_case(state.trim()))
        })
    }

    /// A rule declaring postcode patterns needs a location postcode matching one
    pub fn matches_postcode(&self, postcode: Option<&str>) -> bool {
        if self.postcode_patterns.is_empty() {
            return true;
        }

        postcode.map_or(false, |postcode| {
            self.postcode_patterns
                .iter()
                .any(|pattern| pattern.matches(postcode))
        })
    }

    /// A rule restricted to categories needs at least one in common
    pub fn matches_categories(&self, product_categories: &[String]) -> bool {
        self.product_categories.is_empty()
            || self
                .product_categories
                .iter()
                .any(|category| product_categories.contains(category))
    }

    pub fn covers_amount(&self, base_amount: Decimal) -> bool {
        self.min_amount.map_or(true, |min| min <= base_amount)
            && self.max_amount.map_or(true, |max| base_amount <= max)
    }
}
