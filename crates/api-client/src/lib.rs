use crate::error::ApiError;
use async_trait::async_trait;
use configuration::settings::DataSourceConfig;
use core_types::Period;

pub mod error;
pub mod responses;

// --- Public API ---
pub use responses::{HealthResponse, ProviderErrorResponse, ReturnsResponse};

/// The generic, abstract interface for anything that can supply a return
/// series. This trait is the contract the laboratory orchestration uses,
/// allowing the underlying implementation (live provider or mock) to be
/// swapped out.
#[async_trait]
pub trait ReturnSource: Send + Sync {
    /// Fetches the periodic return series for a ticker over a period.
    async fn fetch_returns(&self, ticker: &str, period: Period) -> Result<Vec<f64>, ApiError>;
}

/// A concrete implementation of `ReturnSource` for the market-data provider
/// described by the `GET /api/data/{ticker}?period={period}` contract.
#[derive(Clone)]
pub struct MarketDataClient {
    client: reqwest::Client,
    base_url: String,
}

impl MarketDataClient {
    pub fn new(settings: &DataSourceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Pings the provider's `/api/health` endpoint.
    pub async fn health_check(&self) -> Result<HealthResponse, ApiError> {
        let url = format!("{}/api/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Provider(format!(
                "health check returned HTTP {}",
                response.status()
            )));
        }
        response
            .json::<HealthResponse>()
            .await
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

#[async_trait]
impl ReturnSource for MarketDataClient {
    async fn fetch_returns(&self, ticker: &str, period: Period) -> Result<Vec<f64>, ApiError> {
        let url = format!(
            "{}/api/data/{}?period={}",
            self.base_url,
            ticker,
            period.as_query()
        );
        tracing::debug!(%url, "requesting return series");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            let body = serde_json::from_str::<ReturnsResponse>(&text)
                .map_err(|e| ApiError::Deserialization(e.to_string()))?;
            if body.returns.len() < 2 {
                return Err(ApiError::InvalidData(format!(
                    "provider returned {} observations for {}; at least 2 are required",
                    body.returns.len(),
                    ticker
                )));
            }
            tracing::debug!(
                ticker,
                observations = body.returns.len(),
                "return series received"
            );
            Ok(body.returns)
        } else {
            // The provider reports failures as { "detail": "..." }; that
            // message is the user-facing error and passes through verbatim.
            let provider_error = serde_json::from_str::<ProviderErrorResponse>(&text)
                .map_err(|e| {
                    ApiError::Deserialization(format!(
                        "failed to deserialize error response: {}. Original text: {}",
                        e, text
                    ))
                })?;
            Err(ApiError::Provider(provider_error.detail))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let settings = DataSourceConfig {
            base_url: "http://localhost:8001/".to_string(),
        };
        let client = MarketDataClient::new(&settings);
        assert_eq!(client.base_url, "http://localhost:8001");
    }

    #[tokio::test]
    async fn a_mock_source_satisfies_the_trait() {
        struct FixedSource(Vec<f64>);

        #[async_trait]
        impl ReturnSource for FixedSource {
            async fn fetch_returns(
                &self,
                _ticker: &str,
                _period: Period,
            ) -> Result<Vec<f64>, ApiError> {
                Ok(self.0.clone())
            }
        }

        let source = FixedSource(vec![0.01, -0.02, 0.005]);
        let returns = source.fetch_returns("AAPL", Period::SixMonths).await.unwrap();
        assert_eq!(returns.len(), 3);
    }
}
