//! Async façade over `TaxApi` and an injected `Transport`.
//!
//! Each operation is exactly one round-trip: build the request, execute it,
//! parse the response. Failures are logged with the operation name and then
//! returned unchanged. Nothing is retried, cached or validated locally.

use tracing::{debug, error};

use crate::api::TaxApi;
use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::transport::Transport;
use crate::types::{TaxCalculationRequest, TaxCalculationResponse, TaxRatesResponse};

/// Stateless client for the tax backend.
///
/// Holds the request builder and the transport; neither is mutated after
/// construction, so one client can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct TaxServiceClient<T> {
    api: TaxApi,
    transport: T,
}

impl<T: Transport> TaxServiceClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            api: TaxApi::new(base_url),
            transport,
        }
    }

    /// Build from a validated `ClientConfig`.
    pub fn from_config(config: &ClientConfig, transport: T) -> Self {
        Self::new(&config.base_url, transport)
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }

    pub async fn get_available_tax_years(&self) -> Result<Vec<String>, TransportError> {
        let result: Result<Vec<String>, TransportError> = async {
            let response = self.transport.execute(self.api.build_get_available_tax_years()).await?;
            self.api.parse_get_available_tax_years(response)
        }
        .await;
        result.inspect_err(|e| error!(operation = "get_available_tax_years", error = %e, "error fetching tax years"))
    }

    pub async fn calculate_tax(&self, input: &TaxCalculationRequest) -> Result<TaxCalculationResponse, TransportError> {
        let result: Result<TaxCalculationResponse, TransportError> = async {
            let request = self.api.build_calculate_tax(input)?;
            let response = self.transport.execute(request).await?;
            self.api.parse_calculate_tax(response)
        }
        .await;
        match &result {
            Ok(calculation) => debug!(operation = "calculate_tax", ?calculation, "tax calculation response"),
            Err(e) => error!(operation = "calculate_tax", error = %e, "error calculating tax"),
        }
        result
    }

    pub async fn get_tax_rates(&self, tax_year: &str) -> Result<TaxRatesResponse, TransportError> {
        let result: Result<TaxRatesResponse, TransportError> = async {
            let response = self.transport.execute(self.api.build_get_tax_rates(tax_year)).await?;
            self.api.parse_get_tax_rates(response)
        }
        .await;
        result.inspect_err(|e| error!(operation = "get_tax_rates", tax_year, error = %e, "error fetching tax rates"))
    }
}
