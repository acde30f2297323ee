//! MCP server deriving climate-impact indicators from CMIP6 daily series.

pub mod config;
pub mod constants;
pub mod error;
pub mod fetcher;
pub mod formatters;
pub mod http;
pub mod indicators;
pub mod models;
pub mod open_meteo;
pub mod report;
pub mod sdg;
pub mod service;

pub use config::Config;
pub use error::{FetchError, Result};
pub use fetcher::{ModelSeries, SeriesFetcher, SeriesQuery, YearSeries};
pub use indicators::{DailySeries, Indicator, IndicatorSet};
pub use report::{build_climate_report, ClimateReport, YearOutcome, YearlyModelReport};
pub use service::ClimateServer;
