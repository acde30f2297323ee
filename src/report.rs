//! Fetch-and-reduce across the reference years.

use futures::future::join_all;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::constants::REFERENCE_YEARS;
use crate::error::FetchError;
use crate::fetcher::{ModelSeries, SeriesFetcher, SeriesQuery, YearSeries};
use crate::indicators::{indicators_for, IndicatorSet, Variable};

/// Indicator sets of every model for one year
pub type YearlyModelReport = BTreeMap<String, IndicatorSet>;

/// Result of one year's fetch. A failed year carries its error instead of
/// indicators, so it can never be mistaken for a year of all-zero values.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum YearOutcome {
    Report(YearlyModelReport),
    Failed {
        #[serde(serialize_with = "error_message")]
        error: FetchError,
    },
}

impl YearOutcome {
    pub fn report(&self) -> Option<&YearlyModelReport> {
        match self {
            YearOutcome::Report(report) => Some(report),
            YearOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            YearOutcome::Report(_) => None,
            YearOutcome::Failed { error } => Some(error),
        }
    }
}

fn error_message<S: Serializer>(error: &FetchError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct ClimateReport {
    pub years: BTreeMap<i32, YearOutcome>,
}

impl ClimateReport {
    pub fn year(&self, year: i32) -> Option<&YearOutcome> {
        self.years.get(&year)
    }

    pub fn all_failed(&self) -> bool {
        !self.years.is_empty() && self.years.values().all(|o| o.error().is_some())
    }
}

/// Reduces one model's series into its indicator set. Variables the engine
/// does not use are ignored; missing engine variables simply leave their
/// indicators out.
pub fn reduce_model(series: &ModelSeries) -> IndicatorSet {
    let mut indicators = IndicatorSet::new();
    for (name, values) in series {
        if let Some(variable) = Variable::from_api_name(name) {
            indicators.extend(indicators_for(variable, values));
        }
    }
    indicators
}

/// Reduces every model of a year. Each model present yields exactly one set.
pub fn reduce_year(series: &YearSeries) -> YearlyModelReport {
    series
        .iter()
        .map(|(model, model_series)| (model.clone(), reduce_model(model_series)))
        .collect()
}

/// Builds the report for the fixed reference years.
pub async fn build_climate_report<F>(fetcher: &F, query: &SeriesQuery) -> ClimateReport
where
    F: SeriesFetcher + ?Sized,
{
    build_climate_report_for_years(fetcher, query, &REFERENCE_YEARS).await
}

/// Resolves the query once, then fetches all `years` concurrently and
/// reduces each independently. One year's failure does not affect the others.
pub async fn build_climate_report_for_years<F>(
    fetcher: &F,
    query: &SeriesQuery,
    years: &[i32],
) -> ClimateReport
where
    F: SeriesFetcher + ?Sized,
{
    let resolved = match fetcher.resolve(query).await {
        Ok(resolved) => resolved,
        Err(error) if error.is_client_error() => {
            tracing::warn!("Cannot resolve '{}': {}", query.location_name, error);
            return ClimateReport {
                years: years
                    .iter()
                    .map(|&year| (year, YearOutcome::Failed { error: error.clone() }))
                    .collect(),
            };
        }
        Err(error) => {
            // Each year retries the lookup on its own.
            tracing::warn!("Resolving '{}' failed: {}", query.location_name, error);
            query.clone()
        }
    };
    let query = &resolved;

    let fetches = years.iter().map(|&year| async move {
        let outcome = match fetcher.fetch_year(query, year).await {
            Ok(series) if series.is_empty() => YearOutcome::Failed {
                error: FetchError::NoData { year },
            },
            Ok(series) => {
                tracing::debug!("Reducing {} models for {}", series.len(), year);
                YearOutcome::Report(reduce_year(&series))
            }
            Err(error) => {
                tracing::warn!("Climate data for {} unavailable: {}", year, error);
                YearOutcome::Failed { error }
            }
        };
        (year, outcome)
    });

    ClimateReport {
        years: join_all(fetches).await.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::Indicator;

    fn model_series(entries: &[(&str, Vec<Option<f64>>)]) -> ModelSeries {
        entries
            .iter()
            .map(|(name, values)| (name.to_string(), values.clone()))
            .collect()
    }

    #[test]
    fn reduce_model_merges_all_variable_families() {
        let series = model_series(&[
            ("temperature_2m_max", vec![Some(31.0), Some(36.0), Some(32.0)]),
            ("temperature_2m_min", vec![Some(-2.0), Some(1.0), Some(-0.5)]),
            ("temperature_2m_mean", vec![Some(6.0), Some(7.0), Some(4.0)]),
            ("precipitation_sum", vec![Some(0.0), Some(20.0), Some(0.2)]),
            ("rain_sum", vec![Some(0.0), Some(20.0), Some(0.2)]),
        ]);

        let set = reduce_model(&series);

        assert_eq!(set.len(), Indicator::ALL.len());
        assert_eq!(set[&Indicator::HotDays30], 3);
        assert_eq!(set[&Indicator::HotDays35], 1);
        assert_eq!(set[&Indicator::HeatWaveDuration], 3);
        assert_eq!(set[&Indicator::FrostDays], 2);
        assert_eq!(set[&Indicator::GrowingSeason], 2);
        assert_eq!(set[&Indicator::ConsecutiveDryDays], 1);
        assert_eq!(set[&Indicator::FloodDays20], 1);
        assert_eq!(set[&Indicator::FloodDays50], 0);
    }

    #[test]
    fn missing_variable_omits_only_its_indicators() {
        let series = model_series(&[("temperature_2m_min", vec![Some(-3.0)])]);
        let set = reduce_model(&series);

        assert_eq!(set.len(), 1);
        assert_eq!(set[&Indicator::FrostDays], 1);
        assert!(!set.contains_key(&Indicator::FloodDays20));
    }

    #[test]
    fn model_without_engine_variables_still_reports() {
        let mut year = YearSeries::new();
        year.insert("NICAM16_8S".into(), model_series(&[("rain_sum", vec![Some(1.0)])]));

        let report = reduce_year(&year);
        assert_eq!(report.len(), 1);
        assert!(report["NICAM16_8S"].is_empty());
    }

    #[test]
    fn failed_year_serializes_its_error() {
        let mut report = ClimateReport::default();
        report.years.insert(
            1950,
            YearOutcome::Failed {
                error: FetchError::LocationNotFound("Atlantis".into()),
            },
        );
        report.years.insert(2025, YearOutcome::Report(YearlyModelReport::new()));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["1950"]["failed"]["error"], "Location 'Atlantis' was not found");
        assert!(json["2025"]["report"].is_object());
        assert!(!report.all_failed());
    }
}
