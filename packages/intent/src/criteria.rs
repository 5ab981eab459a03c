//! Filter criteria and assistant action types.
//!
//! These shapes travel over the wire between the extractor, the model and
//! the storefront, so the serde names stay camelCase.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort key accepted by catalog queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Name,
    Price,
    Stock,
    Category,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Name => "name",
            SortBy::Price => "price",
            SortBy::Stock => "stock",
            SortBy::Category => "category",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortBy::Name),
            "price" => Ok(SortBy::Price),
            "stock" => Ok(SortBy::Stock),
            "category" => Ok(SortBy::Category),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

/// Sort direction accepted by catalog queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// Catalog filter set as the storefront understands it.
///
/// Price bounds stay as strings: the empty string means "no bound" and the
/// UI echoes whatever it was given back into its inputs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub search: String,
    pub category: String,
    pub min_price: String,
    pub max_price: String,
    pub in_stock: bool,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl FilterCriteria {
    /// Lower price bound, when one is set and parses to a finite number.
    pub fn min_price_value(&self) -> Option<f64> {
        parse_price(&self.min_price)
    }

    /// Upper price bound, when one is set and parses to a finite number.
    pub fn max_price_value(&self) -> Option<f64> {
        parse_price(&self.max_price)
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Instruction the assistant hands back to the storefront UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssistantAction {
    /// Apply a filter set and optionally open the filter panel.
    ApplyFilters {
        filters: FilterCriteria,
        #[serde(rename = "openFilters")]
        open_filters: bool,
    },
    /// Navigate to a single product page.
    OpenProduct { id: String },
}
