//! Stateless request builder and response parser for the tax backend.
//!
//! # Design
//! `TaxApi` holds only a `base_url`. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. `TaxServiceClient` wires the two together through a
//! `Transport`; tests can drive either half on its own.

use serde::de::DeserializeOwned;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{TaxCalculationRequest, TaxCalculationResponse, TaxRatesResponse};

pub const YEARS_PATH: &str = "/tax/years";
pub const CALCULATE_PATH: &str = "/tax/calculate";
pub const RATES_PATH: &str = "/tax/rates";

/// Builds requests for and parses responses from the tax backend without
/// touching the network.
#[derive(Debug, Clone)]
pub struct TaxApi {
    base_url: String,
}

impl TaxApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get_available_tax_years(&self) -> HttpRequest {
        self.request(HttpMethod::Get, YEARS_PATH.to_string(), None)
    }

    pub fn build_calculate_tax(&self, input: &TaxCalculationRequest) -> Result<HttpRequest, TransportError> {
        let body = serde_json::to_string(input).map_err(|e| TransportError::Encode(e.to_string()))?;
        Ok(self.request(HttpMethod::Post, CALCULATE_PATH.to_string(), Some(body)))
    }

    /// The year goes into the path exactly as given. Characters such as `/`,
    /// `?` or spaces are not escaped here.
    pub fn build_get_tax_rates(&self, tax_year: &str) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{RATES_PATH}/{tax_year}"), None)
    }

    pub fn parse_get_available_tax_years(&self, response: HttpResponse) -> Result<Vec<String>, TransportError> {
        parse_json(response)
    }

    pub fn parse_calculate_tax(&self, response: HttpResponse) -> Result<TaxCalculationResponse, TransportError> {
        parse_json(response)
    }

    pub fn parse_get_tax_rates(&self, response: HttpResponse) -> Result<TaxRatesResponse, TransportError> {
        parse_json(response)
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        }
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, TransportError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| TransportError::Decode(e.to_string()))
}

/// Map any non-2xx status to `TransportError::Status`.
fn check_status(response: &HttpResponse) -> Result<(), TransportError> {
    if response.is_success() {
        return Ok(());
    }
    Err(TransportError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}
