use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Open-Meteo Geocoding API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub results: Vec<GeocodingResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
}

// ============================================================================
// Open-Meteo Climate API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ClimateResponse {
    /// `time` plus one array per `<variable>_<model>` key
    pub daily: BTreeMap<String, serde_json::Value>,
}

// ============================================================================
// UN SDG API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SdgDataPage {
    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetClimateIndicatorsRequest {
    /// City, village or landmark name
    pub location_name: String,
    /// Country name used to disambiguate the location
    #[serde(default)]
    pub country: Option<String>,
    /// CMIP6 model identifiers; all seven when omitted
    #[serde(default)]
    pub models: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetSdgIndicatorsRequest {
    /// UN M49 area code, e.g. "250" for France or "1" for World
    pub country_code: String,
}
