//! Async client for the tax-calculation backend.
//!
//! # Overview
//! Lists the available tax years, submits income for calculation and fetches
//! bracket tables. The backend owns every tax rule; this crate only moves
//! JSON across the wire.
//!
//! # Design
//! - `TaxApi` builds `HttpRequest` values and parses `HttpResponse` values
//!   without I/O, so the wire contract is testable on its own.
//! - `TaxServiceClient` pairs a `TaxApi` with an injected `Transport` and
//!   performs exactly one round-trip per call. It has no mutable state.
//! - All failures surface as `TransportError` after a `tracing` event naming
//!   the failed operation.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod transport;
pub mod types;

pub use api::TaxApi;
pub use client::TaxServiceClient;
pub use config::ClientConfig;
pub use error::{ConfigError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
pub use types::{TaxBracket, TaxCalculationRequest, TaxCalculationResponse, TaxRatesResponse};
