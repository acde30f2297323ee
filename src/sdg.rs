use futures::future::join_all;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::Config;
use crate::constants::{SDG11_INDICATORS, SDG_PAGE_SIZE, SDG_PERIOD_END, SDG_PERIOD_START};
use crate::error::{FetchError, Result};
use crate::http::{build_client, get_json};
use crate::models::SdgDataPage;

/// Goal 11 observations per indicator code, with per-indicator failures kept
/// apart so one broken indicator does not hide the rest.
#[derive(Debug, Default, Serialize)]
pub struct SdgReport {
    pub country_code: String,
    pub data: BTreeMap<String, Vec<Value>>,
    pub errors: BTreeMap<String, String>,
}

/// Client for the UN Statistics SDG API
#[derive(Clone)]
pub struct SdgClient {
    client: Client,
    api_base: String,
}

impl SdgClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            api_base: config.sdg_api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches every Goal 11 indicator for a UN M49 area code
    pub async fn fetch_goal11(&self, country_code: &str) -> Result<SdgReport> {
        let country_code = validate_country_code(country_code)?;

        let fetches = SDG11_INDICATORS
            .iter()
            .map(|&indicator| async move {
                (indicator, self.fetch_indicator(indicator, country_code).await)
            });

        let mut report = SdgReport {
            country_code: country_code.to_string(),
            ..Default::default()
        };
        for (indicator, result) in join_all(fetches).await {
            match result {
                Ok(observations) => {
                    report.data.insert(indicator.to_string(), observations);
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch SDG indicator {}: {}", indicator, e);
                    report.errors.insert(indicator.to_string(), e.to_string());
                }
            }
        }
        Ok(report)
    }

    /// Reads every page of one indicator's observations
    pub async fn fetch_indicator(&self, indicator: &str, country_code: &str) -> Result<Vec<Value>> {
        let url = format!("{}/Indicator/Data", self.api_base);
        let mut observations = Vec::new();
        let mut page = 1;

        loop {
            let query = [
                ("indicator", indicator.to_string()),
                ("areaCode", country_code.to_string()),
                ("timePeriodStart", SDG_PERIOD_START.to_string()),
                ("timePeriodEnd", SDG_PERIOD_END.to_string()),
                ("pageSize", SDG_PAGE_SIZE.to_string()),
                ("page", page.to_string()),
            ];
            let response = get_json::<SdgDataPage>(&self.client, &url, &query).await?;
            observations.extend(response.data);

            if page >= response.total_pages {
                break;
            }
            page += 1;
        }

        tracing::debug!(
            "SDG {} for area {}: {} observations",
            indicator,
            country_code,
            observations.len()
        );
        Ok(observations)
    }
}

fn validate_country_code(code: &str) -> Result<&str> {
    let code = code.trim();
    if (1..=3).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(code)
    } else {
        Err(FetchError::InvalidInput(format!(
            "'{}' is not a UN M49 area code",
            code
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_m49_codes() {
        assert_eq!(validate_country_code("250").unwrap(), "250");
        assert_eq!(validate_country_code(" 1 ").unwrap(), "1");
    }

    #[test]
    fn rejects_non_numeric_codes() {
        for code in ["", "FR", "2500", "25a"] {
            let err = validate_country_code(code).unwrap_err();
            assert!(err.is_client_error(), "{code}");
        }
    }

    #[tokio::test]
    async fn invalid_code_fails_before_any_request() {
        let config = Config {
            sdg_api_base: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        };
        let client = SdgClient::new(&config).unwrap();

        let err = client.fetch_goal11("France").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidInput(_)));
    }
}
