//! Data contracts for the tax backend.
//!
//! # Design
//! These mirror the backend's JSON schema; the mock-server crate defines its
//! own copies so integration tests catch drift between the two. Numbers are
//! `f64` so values pass through exactly as the backend sent them.

use serde::{Deserialize, Serialize};

/// Input to `POST /tax/calculate`. Sent as-is; the client does not check that
/// `income` is non-negative or that `tax_year` is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCalculationRequest {
    pub income: f64,
    pub tax_year: String,
}

impl TaxCalculationRequest {
    pub fn new(income: f64, tax_year: impl Into<String>) -> Self {
        Self {
            income,
            tax_year: tax_year.into(),
        }
    }
}

/// Result of a tax calculation, computed entirely by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCalculationResponse {
    pub gross_income: f64,
    pub income_tax: f64,
    pub medicare_levy: f64,
    pub total_tax: f64,
    pub net_income: f64,
    pub effective_tax_rate: f64,
    pub tax_year: String,
}

/// One row of a rate table: income in `min..=max` is taxed at `rate` on the
/// amount above the bracket threshold, plus the cumulative `base`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min: f64,
    pub max: f64,
    pub rate: f64,
    pub base: f64,
}

/// Rate table for one tax year. `brackets` keep the backend's order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRatesResponse {
    pub year: String,
    pub medicare_levy: f64,
    pub brackets: Vec<TaxBracket>,
}
