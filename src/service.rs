use anyhow::Result;
use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::sync::Arc;

use crate::config::Config;
use crate::constants::CMIP6_MODELS;
use crate::error::FetchError;
use crate::fetcher::{SeriesFetcher, SeriesQuery};
use crate::formatters::{format_climate_report, format_sdg_report};
use crate::models::{GetClimateIndicatorsRequest, GetSdgIndicatorsRequest};
use crate::open_meteo::OpenMeteoClimate;
use crate::report::build_climate_report;
use crate::sdg::SdgClient;

/// Climate indicator service that handles MCP requests
#[derive(Clone)]
pub struct ClimateServer {
    fetcher: Arc<dyn SeriesFetcher>,
    sdg: Arc<SdgClient>,
    tool_router: ToolRouter<Self>,
}

impl ClimateServer {
    /// Creates a server backed by the Open-Meteo and UN SDG APIs
    pub fn new(config: &Config) -> Result<Self> {
        let fetcher = OpenMeteoClimate::new(config)?;
        let sdg = SdgClient::new(config)?;
        Ok(Self::with_clients(Arc::new(fetcher), sdg))
    }

    /// Creates a server around an arbitrary series source
    pub fn with_clients(fetcher: Arc<dyn SeriesFetcher>, sdg: SdgClient) -> Self {
        Self {
            fetcher,
            sdg: Arc::new(sdg),
            tool_router: Self::tool_router(),
        }
    }

    fn build_query(request: GetClimateIndicatorsRequest) -> Result<SeriesQuery, McpError> {
        let location = request.location_name.trim();
        if location.is_empty() {
            return Err(McpError::invalid_params("location_name must not be empty", None));
        }

        let mut query = SeriesQuery::new(location);
        if let Some(country) = request.country.filter(|c| !c.trim().is_empty()) {
            query = query.with_country(country.trim());
        }
        if let Some(models) = request.models.filter(|m| !m.is_empty()) {
            if let Some(unknown) = models.iter().find(|m| !CMIP6_MODELS.contains(&m.as_str())) {
                return Err(McpError::invalid_params(
                    format!(
                        "Unknown CMIP6 model '{}'. Available models: {}",
                        unknown,
                        CMIP6_MODELS.join(", ")
                    ),
                    None,
                ));
            }
            query = query.with_models(models);
        }
        Ok(query)
    }
}

fn to_mcp_error(context: &str, error: &FetchError) -> McpError {
    if error.is_client_error() {
        McpError::invalid_params(error.to_string(), None)
    } else {
        McpError::internal_error(format!("{}: {}", context, error), None)
    }
}

#[tool_handler]
impl ServerHandler for ClimateServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mcp-rust-climate".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Climate-impact indicators derived from high-resolution CMIP6 models for 1950, 2025 \
                and 2050, plus UN SDG Goal 11 indicator data by country."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl ClimateServer {
    /// Computes climate-impact indicators for a location
    #[tool(description = "Get 1950, 2025 and 2050 climate-impact indicators (hot days, frost days, heat-wave duration, growing season, consecutive dry days, flood days) for a city from CMIP6 high-resolution models. Provide a location name and optionally a country and a list of models.")]
    pub async fn get_climate_indicators(
        &self,
        Parameters(request): Parameters<GetClimateIndicatorsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting climate indicators for: {}", request.location_name);

        let query = Self::build_query(request)?;
        let report = build_climate_report(self.fetcher.as_ref(), &query).await;

        if report.all_failed() {
            let error = report.years.values().find_map(|o| o.error());
            if let Some(error) = error {
                return Err(to_mcp_error("Failed to fetch climate data", error));
            }
        }

        let json = serde_json::to_string_pretty(&report).map_err(|e| {
            McpError::internal_error(format!("Failed to serialize report: {}", e), None)
        })?;
        let formatted = format_climate_report(&query.location_name, &report);

        Ok(CallToolResult::success(vec![
            Content::text(formatted),
            Content::text(json),
        ]))
    }

    /// Fetches SDG Goal 11 indicator data for a country
    #[tool(description = "Fetch all UN SDG Goal 11 (sustainable cities and communities) indicator data for a country. Provide a UN M49 area code (e.g., '250' for France, '840' for USA, '1' for World).")]
    pub async fn get_sdg11_indicators(
        &self,
        Parameters(request): Parameters<GetSdgIndicatorsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting SDG 11 indicators for area: {}", request.country_code);

        let report = self
            .sdg
            .fetch_goal11(&request.country_code)
            .await
            .map_err(|e| to_mcp_error("Failed to fetch SDG indicators", &e))?;

        let json = serde_json::to_string_pretty(&report).map_err(|e| {
            McpError::internal_error(format!("Failed to serialize report: {}", e), None)
        })?;

        Ok(CallToolResult::success(vec![
            Content::text(format_sdg_report(&report)),
            Content::text(json),
        ]))
    }
}
