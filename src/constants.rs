/// User agent string for HTTP requests
pub const USER_AGENT: &str = "mcp-rust-climate-server/0.1.0";

/// Open-Meteo geocoding API base URL
pub const GEOCODING_API_BASE: &str = "https://geocoding-api.open-meteo.com/v1";

/// Open-Meteo climate (CMIP6) API base URL
pub const CLIMATE_API_BASE: &str = "https://climate-api.open-meteo.com/v1";

/// UN Statistics SDG API base URL
pub const SDG_API_BASE: &str = "https://unstats.un.org/SDGAPI/v1/sdg";

/// Historical baseline, present and future projection years
pub const REFERENCE_YEARS: [i32; 3] = [1950, 2025, 2050];

/// High-resolution CMIP6 models served by the climate API
pub const CMIP6_MODELS: [&str; 7] = [
    "CMCC_CM2_VHR4",
    "FGOALS_f3_H",
    "HiRAM_SIT_HR",
    "MRI_AGCM3_2_S",
    "EC_Earth3P_HR",
    "MPI_ESM1_2_XR",
    "NICAM16_8S",
];

/// Daily variables requested when the caller does not pick any
pub const DEFAULT_DAILY_VARIABLES: [&str; 10] = [
    "temperature_2m_mean",
    "temperature_2m_max",
    "temperature_2m_min",
    "precipitation_sum",
    "rain_sum",
    "snowfall_sum",
    "soil_moisture_0_to_10cm_mean",
    "windspeed_10m_mean",
    "windspeed_10m_max",
    "shortwave_radiation_sum",
];

/// SDG Goal 11 (sustainable cities and communities) indicator codes
pub const SDG11_INDICATORS: [&str; 11] = [
    "11.1.1", "11.2.1", "11.3.1", "11.3.2", "11.4.1", "11.5.1", "11.5.2", "11.6.1", "11.6.2",
    "11.7.1", "11.7.2",
];

pub const SDG_PERIOD_START: i32 = 2020;
pub const SDG_PERIOD_END: i32 = 2025;
pub const SDG_PAGE_SIZE: u32 = 1000;

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
