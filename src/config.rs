use std::env;
use std::time::Duration;

use crate::constants::{CLIMATE_API_BASE, DEFAULT_TIMEOUT_SECS, GEOCODING_API_BASE, SDG_API_BASE};

/// Endpoints and HTTP settings handed to every client at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub geocoding_api_base: String,
    pub climate_api_base: String,
    pub sdg_api_base: String,
    pub proxy: Option<String>,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_api_base: GEOCODING_API_BASE.to_string(),
            climate_api_base: CLIMATE_API_BASE.to_string(),
            sdg_api_base: SDG_API_BASE.to_string(),
            proxy: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Reads overrides from the process environment. Unset variables keep
    /// the production defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            geocoding_api_base: non_empty("GEOCODING_API_BASE")
                .unwrap_or(defaults.geocoding_api_base),
            climate_api_base: non_empty("CLIMATE_API_BASE").unwrap_or(defaults.climate_api_base),
            sdg_api_base: non_empty("SDG_API_BASE").unwrap_or(defaults.sdg_api_base),
            proxy: non_empty("HTTP_PROXY_URL"),
            request_timeout: non_empty("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup(&[
            ("CLIMATE_API_BASE", "http://localhost:8080/v1"),
            ("HTTP_PROXY_URL", "http://proxy:3128"),
            ("REQUEST_TIMEOUT_SECS", "5"),
        ]));

        assert_eq!(config.climate_api_base, "http://localhost:8080/v1");
        assert_eq!(config.geocoding_api_base, GEOCODING_API_BASE);
        assert_eq!(config.proxy.as_deref(), Some("http://proxy:3128"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn unparseable_timeout_falls_back() {
        let config = Config::from_lookup(lookup(&[
            ("REQUEST_TIMEOUT_SECS", "soon"),
            ("HTTP_PROXY_URL", "  "),
        ]));
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.proxy, None);
    }
}
