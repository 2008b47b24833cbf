use serde::Deserialize;

/// A successful response from `GET /api/data/{ticker}`.
///
/// Only `returns` is contractual; the provider also echoes the ticker, the
/// period and the observation count, which are tolerated but not required.
#[derive(Debug, Clone, Deserialize)]
pub struct ReturnsResponse {
    pub returns: Vec<f64>,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
}

/// An error response from the provider. The `detail` message is surfaced to
/// the user verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderErrorResponse {
    pub detail: String,
}

/// The response from `GET /api/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
