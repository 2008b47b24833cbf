use crate::error::ConfigError;
use core_types::Period;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data_source: DataSourceConfig,
    pub analysis: AnalysisConfig,
}

/// Where the real-data path finds the market-data provider.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSourceConfig {
    /// Base URL of the provider, e.g. "http://localhost:8001".
    pub base_url: String,
}

/// Defaults for an analysis run. Any of these can be overridden per
/// invocation from the command line.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// The ticker symbol to analyze (e.g., "AAPL").
    pub ticker: String,
    /// The lookback window for the return series.
    pub period: Period,
    /// The confidence level for the interval, strictly inside (0, 1).
    pub confidence_level: f64,
}

impl Config {
    /// Enforces the constraints the statistical core relies on, so a bad
    /// config file fails at startup rather than mid-analysis.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_source.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "data_source.base_url must not be empty".to_string(),
            ));
        }
        if self.analysis.ticker.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "analysis.ticker must not be empty".to_string(),
            ));
        }
        let confidence = self.analysis.confidence_level;
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "analysis.confidence_level must lie strictly between 0 and 1, got {}",
                confidence
            )));
        }
        Ok(())
    }
}
