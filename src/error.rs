use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

/// Failures of the external data sources. Indicator reduction itself never fails.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Location '{0}' was not found")]
    LocationNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No model data returned for {year}")]
    NoData { year: i32 },
}

impl FetchError {
    /// True when the caller, not the upstream service, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::LocationNotFound(_) | Self::InvalidInput(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}
