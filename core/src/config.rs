//! Process configuration read once at startup.

use crate::error::ConfigError;

pub const BASE_URL_VAR: &str = "TAX_API_BASE_URL";

/// Settings the client needs before it can issue any request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        validate_base_url(&base_url)?;
        Ok(Self { base_url })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// An explicit base URL (e.g. a command-line flag) wins over the lookup.
    pub fn resolve<F>(explicit: Option<String>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match explicit {
            Some(base_url) => Self::new(base_url),
            None => Self::from_lookup(lookup),
        }
    }

    /// Load from an arbitrary key lookup so callers and tests need not touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR).ok_or(ConfigError::Missing(BASE_URL_VAR))?;
        Self::new(base_url)
    }
}

fn validate_base_url(value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &'static str| ConfigError::Invalid {
        var: BASE_URL_VAR,
        value: value.to_string(),
        reason,
    };
    if value.trim().is_empty() {
        return Err(invalid("must not be empty"));
    }
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(invalid("must start with http:// or https://"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(value: Option<&'static str>) -> impl Fn(&str) -> Option<String> {
        move |key| {
            assert_eq!(key, BASE_URL_VAR);
            value.map(str::to_string)
        }
    }

    #[test]
    fn reads_base_url() {
        let config = ClientConfig::from_lookup(lookup(Some("https://tax.example.com/api"))).unwrap();
        assert_eq!(config.base_url, "https://tax.example.com/api");
    }

    #[test]
    fn missing_base_url_is_an_error() {
        let err = ClientConfig::from_lookup(lookup(None)).unwrap_err();
        assert_eq!(err, ConfigError::Missing(BASE_URL_VAR));
    }

    #[test]
    fn empty_base_url_is_invalid() {
        let err = ClientConfig::from_lookup(lookup(Some("  "))).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { reason: "must not be empty", .. }));
    }

    #[test]
    fn explicit_base_url_wins_over_lookup() {
        let config = ClientConfig::resolve(
            Some("http://flag.test".to_string()),
            lookup(Some("http://env.test")),
        )
        .unwrap();
        assert_eq!(config.base_url, "http://flag.test");
    }

    #[test]
    fn lookup_is_used_without_explicit_base_url() {
        let config = ClientConfig::resolve(None, lookup(Some("http://env.test"))).unwrap();
        assert_eq!(config.base_url, "http://env.test");
    }

    #[test]
    fn neither_explicit_nor_lookup_is_missing() {
        let err = ClientConfig::resolve(None, lookup(None)).unwrap_err();
        assert_eq!(err, ConfigError::Missing(BASE_URL_VAR));
    }

    #[test]
    fn explicit_base_url_is_validated() {
        let err = ClientConfig::resolve(Some("ftp://flag.test".to_string()), lookup(Some("http://env.test")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn from_env_reads_process_environment() {
        // The only test in the crate that touches this variable.
        std::env::set_var(BASE_URL_VAR, "http://from-env.test");
        let config = ClientConfig::from_env();
        std::env::remove_var(BASE_URL_VAR);
        assert_eq!(config.unwrap().base_url, "http://from-env.test");
    }

    #[test]
    fn base_url_needs_http_scheme() {
        let err = ClientConfig::new("localhost:3000").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().contains("localhost:3000"));
    }
}
