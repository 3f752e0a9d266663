//! Error types for the tax service client.
//!
//! # Design
//! Every failure of a client operation is a `TransportError`. Variants keep
//! network failures apart from non-2xx statuses so callers can tell an
//! unreachable backend from a rejected request, but nothing in the client
//! recovers from either.

use thiserror::Error;

/// Errors returned by `TaxServiceClient` operations and `Transport`s.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The round-trip did not complete: connection refused, DNS failure,
    /// timeout, or the body could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON shape.
    #[error("deserialization failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Encode(String),
}

impl TransportError {
    /// Status code for `Status` errors, `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while loading `ClientConfig` at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),

    #[error("environment variable {var}={value:?} is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_exposed_only_for_status_errors() {
        let err = TransportError::Status {
            status: 503,
            body: "down".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "HTTP 503: down");
        assert_eq!(TransportError::Network("refused".into()).status(), None);
    }
}
