use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::debug;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Bracket {
    pub min: f64,
    pub max: f64,
    pub rate: f64,
    pub base: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRates {
    pub year: String,
    pub medicare_levy: f64,
    pub brackets: Vec<Bracket>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    pub income: f64,
    pub tax_year: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub gross_income: f64,
    pub income_tax: f64,
    pub medicare_levy: f64,
    pub total_tax: f64,
    pub net_income: f64,
    pub effective_tax_rate: f64,
    pub tax_year: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

/// Rate tables keyed by tax year. Read-only once the router is built.
pub type Tables = Arc<BTreeMap<String, TaxRates>>;

const MEDICARE_LEVY: f64 = 0.02;

/// `max` of the open-ended top bracket. Kept a plain number so the wire type
/// matches every other bracket.
pub const TOP_BRACKET_MAX: f64 = 1_000_000_000_000.0;

/// Australian resident rates for the years the mock serves.
pub fn tax_tables() -> BTreeMap<String, TaxRates> {
    let table = |year: &str, rows: &[(f64, f64, f64, f64)]| TaxRates {
        year: year.to_string(),
        medicare_levy: MEDICARE_LEVY,
        brackets: rows
            .iter()
            .map(|&(min, max, rate, base)| Bracket { min, max, rate, base })
            .collect(),
    };
    [
        table(
            "2023-2024",
            &[
                (0.0, 18200.0, 0.0, 0.0),
                (18201.0, 45000.0, 0.19, 0.0),
                (45001.0, 120000.0, 0.325, 5092.0),
                (120001.0, 180000.0, 0.37, 29467.0),
                (180001.0, TOP_BRACKET_MAX, 0.45, 51667.0),
            ],
        ),
        table(
            "2024-2025",
            &[
                (0.0, 18200.0, 0.0, 0.0),
                (18201.0, 45000.0, 0.16, 0.0),
                (45001.0, 135000.0, 0.30, 4288.0),
                (135001.0, 190000.0, 0.37, 31288.0),
                (190001.0, TOP_BRACKET_MAX, 0.45, 51638.0),
            ],
        ),
    ]
    .into_iter()
    .map(|rates| (rates.year.clone(), rates))
    .collect()
}

pub fn app() -> Router {
    let tables: Tables = Arc::new(tax_tables());
    Router::new()
        .route("/tax/years", get(list_years))
        .route("/tax/rates/{year}", get(get_rates))
        .route("/tax/calculate", post(calculate))
        .with_state(tables)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Apply a rate table to `income`. Brackets must be ascending by `min`.
pub fn calculate_for(rates: &TaxRates, income: f64) -> CalculationResult {
    let income_tax = rates
        .brackets
        .iter()
        .rev()
        .find(|b| b.min <= income)
        .map(|b| {
            let threshold = if b.min > 0.0 { b.min - 1.0 } else { 0.0 };
            b.base + (income - threshold) * b.rate
        })
        .unwrap_or(0.0);
    let income_tax = round_to(income_tax, 2);
    let medicare_levy = round_to(income * rates.medicare_levy, 2);
    let total_tax = round_to(income_tax + medicare_levy, 2);
    let effective_tax_rate = if income > 0.0 {
        round_to(total_tax / income, 4)
    } else {
        0.0
    };
    CalculationResult {
        gross_income: income,
        income_tax,
        medicare_levy,
        total_tax,
        net_income: round_to(income - total_tax, 2),
        effective_tax_rate,
        tax_year: rates.year.clone(),
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorBody { error: message.into() }))
}

fn unknown_year(year: &str) -> ApiError {
    error(StatusCode::NOT_FOUND, format!("unknown tax year: {year}"))
}

async fn list_years(State(tables): State<Tables>) -> Json<Vec<String>> {
    Json(tables.keys().cloned().collect())
}

async fn get_rates(
    State(tables): State<Tables>,
    Path(year): Path<String>,
) -> Result<Json<TaxRates>, ApiError> {
    tables.get(&year).cloned().map(Json).ok_or_else(|| unknown_year(&year))
}

async fn calculate(
    State(tables): State<Tables>,
    Json(input): Json<CalculationRequest>,
) -> Result<Json<CalculationResult>, ApiError> {
    if !input.income.is_finite() || input.income < 0.0 {
        return Err(error(StatusCode::BAD_REQUEST, "income must be a non-negative number"));
    }
    let rates = tables.get(&input.tax_year).ok_or_else(|| unknown_year(&input.tax_year))?;
    let result = calculate_for(rates, input.income);
    debug!(income = input.income, tax_year = %input.tax_year, total_tax = result.total_tax, "calculated");
    Ok(Json(result))
}
