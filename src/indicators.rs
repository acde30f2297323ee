//! Reduction of daily climate series into climate-impact indicators.
//!
//! Every function here is a pure scan over one [`DailySeries`]. Absent or
//! non-finite readings never qualify: count indicators skip them, run-length
//! indicators treat them as a break in the streak.

use serde::Serialize;
use std::collections::BTreeMap;

/// One reading per calendar day; `None` marks a missing value.
pub type DailySeries = Vec<Option<f64>>;

/// Indicator values for one model and year.
pub type IndicatorSet = BTreeMap<Indicator, u32>;

pub const HOT_DAY_THRESHOLD: f64 = 30.0;
pub const VERY_HOT_DAY_THRESHOLD: f64 = 35.0;
pub const FROST_THRESHOLD: f64 = 0.0;
pub const HEAT_WAVE_THRESHOLD: f64 = 30.0;
pub const HEAT_WAVE_MIN_RUN: u32 = 3;
pub const GROWING_SEASON_THRESHOLD: f64 = 5.0;
/// Millimetres per day below which a day counts as dry
pub const DRY_DAY_THRESHOLD: f64 = 1.0;
pub const HEAVY_RAIN_THRESHOLD: f64 = 20.0;
pub const EXTREME_RAIN_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Indicator {
    #[serde(rename = "hot_days_30")]
    HotDays30,
    #[serde(rename = "hot_days_35")]
    HotDays35,
    #[serde(rename = "frost_days")]
    FrostDays,
    #[serde(rename = "heat_wave_duration")]
    HeatWaveDuration,
    #[serde(rename = "growing_season")]
    GrowingSeason,
    #[serde(rename = "consecutive_dry_days")]
    ConsecutiveDryDays,
    #[serde(rename = "flood_days_20")]
    FloodDays20,
    #[serde(rename = "flood_days_50")]
    FloodDays50,
}

impl Indicator {
    pub const ALL: [Indicator; 8] = [
        Indicator::HotDays30,
        Indicator::HotDays35,
        Indicator::FrostDays,
        Indicator::HeatWaveDuration,
        Indicator::GrowingSeason,
        Indicator::ConsecutiveDryDays,
        Indicator::FloodDays20,
        Indicator::FloodDays50,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Indicator::HotDays30 => "hot_days_30",
            Indicator::HotDays35 => "hot_days_35",
            Indicator::FrostDays => "frost_days",
            Indicator::HeatWaveDuration => "heat_wave_duration",
            Indicator::GrowingSeason => "growing_season",
            Indicator::ConsecutiveDryDays => "consecutive_dry_days",
            Indicator::FloodDays20 => "flood_days_20",
            Indicator::FloodDays50 => "flood_days_50",
        }
    }

    /// The daily variable this indicator is derived from
    pub fn source(self) -> Variable {
        match self {
            Indicator::HotDays30 | Indicator::HotDays35 | Indicator::HeatWaveDuration => {
                Variable::TemperatureMax
            }
            Indicator::FrostDays => Variable::TemperatureMin,
            Indicator::GrowingSeason => Variable::TemperatureMean,
            Indicator::ConsecutiveDryDays | Indicator::FloodDays20 | Indicator::FloodDays50 => {
                Variable::PrecipitationSum
            }
        }
    }

    /// Human-readable unit label
    pub fn unit(self) -> &'static str {
        match self {
            Indicator::HeatWaveDuration
            | Indicator::GrowingSeason
            | Indicator::ConsecutiveDryDays => "consecutive days",
            _ => "days",
        }
    }

    /// Applies the indicator's reduction with its default parameters.
    pub fn compute(self, series: &[Option<f64>]) -> u32 {
        match self {
            Indicator::HotDays30 => hot_days(series, HOT_DAY_THRESHOLD),
            Indicator::HotDays35 => hot_days(series, VERY_HOT_DAY_THRESHOLD),
            Indicator::FrostDays => frost_days(series, FROST_THRESHOLD),
            Indicator::HeatWaveDuration => {
                heat_wave_duration(series, HEAT_WAVE_THRESHOLD, HEAT_WAVE_MIN_RUN)
            }
            Indicator::GrowingSeason => growing_season_length(series, GROWING_SEASON_THRESHOLD),
            Indicator::ConsecutiveDryDays => consecutive_dry_days(series, DRY_DAY_THRESHOLD),
            Indicator::FloodDays20 => flood_days(series, HEAVY_RAIN_THRESHOLD),
            Indicator::FloodDays50 => flood_days(series, EXTREME_RAIN_THRESHOLD),
        }
    }
}

/// Daily variables the indicators are derived from, keyed by their API names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variable {
    TemperatureMean,
    TemperatureMax,
    TemperatureMin,
    PrecipitationSum,
}

impl Variable {
    pub fn api_name(self) -> &'static str {
        match self {
            Variable::TemperatureMean => "temperature_2m_mean",
            Variable::TemperatureMax => "temperature_2m_max",
            Variable::TemperatureMin => "temperature_2m_min",
            Variable::PrecipitationSum => "precipitation_sum",
        }
    }

    pub fn from_api_name(name: &str) -> Option<Self> {
        match name {
            "temperature_2m_mean" => Some(Variable::TemperatureMean),
            "temperature_2m_max" => Some(Variable::TemperatureMax),
            "temperature_2m_min" => Some(Variable::TemperatureMin),
            "precipitation_sum" => Some(Variable::PrecipitationSum),
            _ => None,
        }
    }

    pub fn indicators(self) -> impl Iterator<Item = Indicator> {
        Indicator::ALL.into_iter().filter(move |i| i.source() == self)
    }
}

fn reading(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn count_where(series: &[Option<f64>], qualifies: impl Fn(f64) -> bool) -> u32 {
    series
        .iter()
        .filter_map(|&v| reading(v))
        .filter(|&v| qualifies(v))
        .count() as u32
}

fn longest_run(series: &[Option<f64>], qualifies: impl Fn(f64) -> bool) -> u32 {
    let mut current: u32 = 0;
    let mut longest: u32 = 0;
    for &value in series {
        match reading(value) {
            Some(v) if qualifies(v) => current += 1,
            _ => current = 0,
        }
        longest = longest.max(current);
    }
    longest
}

/// Days with a maximum temperature strictly above `threshold`
pub fn hot_days(series: &[Option<f64>], threshold: f64) -> u32 {
    count_where(series, |t| t > threshold)
}

/// Days with a minimum temperature strictly below `threshold`
pub fn frost_days(series: &[Option<f64>], threshold: f64) -> u32 {
    count_where(series, |t| t < threshold)
}

/// Longest streak of days strictly above `threshold`.
///
/// A longest streak shorter than `min_run` yields 0, meaning no heat wave
/// occurred, rather than the length of the short streak.
pub fn heat_wave_duration(series: &[Option<f64>], threshold: f64, min_run: u32) -> u32 {
    let longest = longest_run(series, |t| t > threshold);
    if longest >= min_run {
        longest
    } else {
        0
    }
}

/// Longest streak of days with a mean temperature strictly above `threshold`
pub fn growing_season_length(series: &[Option<f64>], threshold: f64) -> u32 {
    longest_run(series, |t| t > threshold)
}

/// Longest streak of days with precipitation strictly below `threshold`
pub fn consecutive_dry_days(series: &[Option<f64>], threshold: f64) -> u32 {
    longest_run(series, |p| p < threshold)
}

/// Days with precipitation at or above `threshold`
pub fn flood_days(series: &[Option<f64>], threshold: f64) -> u32 {
    count_where(series, |p| p >= threshold)
}

/// Computes every indicator derived from `variable` over `series`.
pub fn indicators_for(variable: Variable, series: &[Option<f64>]) -> IndicatorSet {
    variable
        .indicators()
        .map(|indicator| (indicator, indicator.compute(series)))
        .collect()
}
