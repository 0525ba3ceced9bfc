use crate::config::Settings;
use anyhow::{Context, Result};
use serde_json::Value;

const TIME_SERIES_DAILY_FUNCTION: &str = "TIME_SERIES_DAILY";

#[async_trait::async_trait]
pub trait DailySeriesProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Raw JSON body of the provider's daily time series for `symbol`.
    async fn fetch_daily_series(&self, symbol: &str) -> Result<Value>;
}

#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("failed to build alpha vantage http client")?;

        Ok(Self {
            http,
            base_url: settings.alphavantage_base_url().to_string(),
            api_key: settings.alphavantage_api_key().to_string(),
        })
    }

    fn query(&self, symbol: &str) -> [(&'static str, String); 3] {
        [
            ("function", TIME_SERIES_DAILY_FUNCTION.to_string()),
            ("symbol", symbol.to_string()),
            ("apikey", self.api_key.clone()),
        ]
    }
}

#[async_trait::async_trait]
impl DailySeriesProvider for AlphaVantageClient {
    fn provider_name(&self) -> &'static str {
        "alphavantage"
    }

    async fn fetch_daily_series(&self, symbol: &str) -> Result<Value> {
        tracing::debug!(%symbol, base_url = %self.base_url, "requesting daily time series");

        let res = self
            .http
            .get(&self.base_url)
            .query(&self.query(symbol))
            .send()
            .await
            .context("alpha vantage request failed")?;

        // HTTP status is not inspected; the series key decides success.
        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read alpha vantage response")?;

        serde_json::from_str::<Value>(&text)
            .with_context(|| format!("alpha vantage response is not valid JSON (HTTP {status}): {text}"))
    }
}
