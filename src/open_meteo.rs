use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::Config;
use crate::error::{FetchError, Result};
use crate::fetcher::{SeriesFetcher, SeriesQuery, YearSeries};
use crate::http::{build_client, get_json};
use crate::indicators::DailySeries;
use crate::models::{ClimateResponse, GeocodingResponse, GeocodingResult};

/// CMIP6 daily series from the Open-Meteo climate API
#[derive(Clone)]
pub struct OpenMeteoClimate {
    client: Client,
    geocoding_api_base: String,
    climate_api_base: String,
}

impl OpenMeteoClimate {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            geocoding_api_base: config.geocoding_api_base.trim_end_matches('/').to_string(),
            climate_api_base: config.climate_api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Resolves a place name to coordinates, preferring a result in `country`
    pub async fn geocode(&self, name: &str, country: Option<&str>) -> Result<GeocodingResult> {
        let url = format!("{}/search", self.geocoding_api_base);
        let count = if country.is_some() { 10 } else { 1 };
        let query = [
            ("name", name.to_string()),
            ("count", count.to_string()),
            ("format", "json".to_string()),
        ];

        let response = get_json::<GeocodingResponse>(&self.client, &url, &query).await?;
        pick_location(response.results, country)
            .ok_or_else(|| FetchError::LocationNotFound(name.to_string()))
    }
}

fn pick_location(results: Vec<GeocodingResult>, country: Option<&str>) -> Option<GeocodingResult> {
    let preferred = country.and_then(|wanted| {
        results.iter().find(|r| {
            r.country
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(wanted.trim()))
        })
    });
    preferred.or(results.first()).cloned()
}

#[async_trait]
impl SeriesFetcher for OpenMeteoClimate {
    async fn resolve(&self, query: &SeriesQuery) -> Result<SeriesQuery> {
        if query.coordinates.is_some() {
            return Ok(query.clone());
        }

        let location = self
            .geocode(&query.location_name, query.country.as_deref())
            .await?;
        tracing::debug!(
            "Resolved '{}' to {:.4}, {:.4}",
            location.name,
            location.latitude,
            location.longitude
        );

        Ok(query
            .clone()
            .with_coordinates(location.latitude, location.longitude))
    }

    async fn fetch_year(&self, query: &SeriesQuery, year: i32) -> Result<YearSeries> {
        if query.models.is_empty() || query.variables.is_empty() {
            return Err(FetchError::InvalidInput(
                "at least one model and one daily variable are required".to_string(),
            ));
        }

        let Some(coordinates) = self.resolve(query).await?.coordinates else {
            return Err(FetchError::LocationNotFound(query.location_name.clone()));
        };

        let url = format!("{}/climate", self.climate_api_base);
        let params = [
            ("latitude", coordinates.latitude.to_string()),
            ("longitude", coordinates.longitude.to_string()),
            ("start_date", format!("{year:04}-01-01")),
            ("end_date", format!("{year:04}-12-31")),
            ("models", query.models.join(",")),
            ("daily", query.variables.join(",")),
            ("temperature_unit", "celsius".to_string()),
            ("wind_speed_unit", "kmh".to_string()),
            ("precipitation_unit", "mm".to_string()),
            ("timeformat", "iso8601".to_string()),
        ];

        let response = get_json::<ClimateResponse>(&self.client, &url, &params).await?;
        let series = partition_daily(&response.daily, query);
        if series.is_empty() {
            return Err(FetchError::NoData { year });
        }
        Ok(series)
    }
}

/// Splits the `daily` object into per-model, per-variable series.
///
/// Keys look like `<variable>_<model>`; a bare `<variable>` key belongs to
/// the single requested model.
pub fn partition_daily(daily: &BTreeMap<String, Value>, query: &SeriesQuery) -> YearSeries {
    let mut series = YearSeries::new();

    for (key, values) in daily {
        if key == "time" {
            continue;
        }
        let Some((variable, model)) = split_key(key, query) else {
            tracing::debug!("Ignoring unrecognised daily key '{}'", key);
            continue;
        };
        let Some(values) = values.as_array() else {
            continue;
        };

        series
            .entry(model.to_string())
            .or_default()
            .insert(variable.to_string(), parse_series(values));
    }

    series
}

fn split_key<'a>(key: &'a str, query: &'a SeriesQuery) -> Option<(&'a str, &'a str)> {
    let variable = query
        .variables
        .iter()
        .filter(|v| {
            key.strip_prefix(v.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('_'))
        })
        .max_by_key(|v| v.len())?;

    if key == variable.as_str() {
        match query.models.as_slice() {
            [only] => Some((variable.as_str(), only.as_str())),
            _ => None,
        }
    } else {
        let model = &key[variable.len() + 1..];
        (!model.is_empty()).then_some((variable.as_str(), model))
    }
}

fn parse_series(values: &[Value]) -> DailySeries {
    values
        .iter()
        .map(|v| v.as_f64().filter(|x| x.is_finite()))
        .collect()
}
