use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::constants::{CMIP6_MODELS, DEFAULT_DAILY_VARIABLES};
use crate::error::Result;
use crate::indicators::DailySeries;

/// Daily series of one model, keyed by variable name
pub type ModelSeries = BTreeMap<String, DailySeries>;

/// Daily series of every model for one year, keyed by model identifier
pub type YearSeries = BTreeMap<String, ModelSeries>;

/// Resolved position of a named location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// What to fetch: a location plus the model and variable selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesQuery {
    pub location_name: String,
    pub country: Option<String>,
    /// Set once the location has been resolved; fetchers skip geocoding then
    pub coordinates: Option<Coordinates>,
    pub models: Vec<String>,
    pub variables: Vec<String>,
}

impl SeriesQuery {
    /// Queries every CMIP6 model for the default daily variables
    pub fn new(location_name: impl Into<String>) -> Self {
        Self {
            location_name: location_name.into(),
            country: None,
            coordinates: None,
            models: CMIP6_MODELS.iter().map(|m| m.to_string()).collect(),
            variables: DEFAULT_DAILY_VARIABLES.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(Coordinates {
            latitude,
            longitude,
        });
        self
    }

    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_variables<I, S>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variables = variables.into_iter().map(Into::into).collect();
        self
    }
}

/// Source of daily model series for a single calendar year.
///
/// Each returned series covers every day of the year in order; missing
/// readings are `None` at their day position, never omitted.
#[async_trait]
pub trait SeriesFetcher: Send + Sync {
    /// Resolves whatever the query needs once per report, before the
    /// per-year fetches run.
    async fn resolve(&self, query: &SeriesQuery) -> Result<SeriesQuery> {
        Ok(query.clone())
    }

    async fn fetch_year(&self, query: &SeriesQuery, year: i32) -> Result<YearSeries>;
}
