use crate::domain::market::{ClosingPrice, TimeSeries};
use crate::domain::ports::MarketDataProvider;
use crate::infrastructure::core::http_client_factory::{HttpClientFactory, build_url_with_query};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, error};

/// One daily bar from the Alpaca Data API; only the fields the pipeline
/// consumes are kept.
#[derive(Debug, Clone, Deserialize)]
struct AlpacaDailyBar {
    #[serde(rename = "t")]
    timestamp: String,
    #[serde(rename = "c")]
    close: f64,
}

#[derive(Debug, Deserialize)]
struct AlpacaBarsResponse {
    bars: HashMap<String, Vec<AlpacaDailyBar>>,
    next_page_token: Option<String>,
}

/// Daily-close provider backed by the Alpaca stock bars endpoint.
pub struct AlpacaMarketDataProvider {
    client: ClientWithMiddleware,
    api_key: String,
    api_secret: String,
    data_base_url: String,
}

impl AlpacaMarketDataProvider {
    pub fn new(
        api_key: String,
        api_secret: String,
        data_base_url: String,
        request_timeout: std::time::Duration,
    ) -> Self {
        Self {
            client: HttpClientFactory::create_client(request_timeout),
            api_key,
            api_secret,
            data_base_url,
        }
    }

    async fn fetch_daily_bars(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AlpacaDailyBar>> {
        let url = format!("{}/v2/stocks/bars", self.data_base_url);

        let mut all_bars = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query_params = vec![
                ("symbols", symbol.to_string()),
                ("start", start.to_rfc3339()),
                ("end", end.to_rfc3339()),
                ("timeframe", "1Day".to_string()),
                ("limit", "10000".to_string()),
                ("feed", "iex".to_string()),
            ];
            if let Some(token) = &page_token {
                query_params.push(("page_token", token.clone()));
            }

            let url_with_query = build_url_with_query(&url, &query_params);
            debug!(symbol, url = %url_with_query, "Fetching daily bars");

            let response = self
                .client
                .get(&url_with_query)
                .header("APCA-API-KEY-ID", &self.api_key)
                .header("APCA-API-SECRET-KEY", &self.api_secret)
                .send()
                .await
                .context("Failed to fetch daily bars")?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response.text().await.unwrap_or_default();
                error!(symbol, %status, "Alpaca API error: {}", error_text);
                anyhow::bail!("Alpaca API error ({}): {}", status, error_text);
            }

            let resp_body: AlpacaBarsResponse = response
                .json()
                .await
                .context("Failed to parse bars response")?;

            if let Some(bars) = resp_body.bars.get(symbol) {
                all_bars.extend(bars.iter().cloned());
            }

            page_token = resp_body.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        Ok(all_bars)
    }
}

#[async_trait]
impl MarketDataProvider for AlpacaMarketDataProvider {
    async fn daily_closes(&self, symbol: &str, lookback_days: i64) -> Result<TimeSeries> {
        let end = Utc::now();
        let start = end - Duration::days(lookback_days);

        let bars = self.fetch_daily_bars(symbol, start, end).await?;

        let mut points = Vec::with_capacity(bars.len());
        for bar in bars {
            let ts = DateTime::parse_from_rfc3339(&bar.timestamp)
                .with_context(|| format!("Invalid bar timestamp: {}", bar.timestamp))?;
            points.push(ClosingPrice {
                date: ts.date_naive(),
                close: bar.close,
            });
        }

        debug!(symbol, bars = points.len(), "Daily closes fetched");
        Ok(TimeSeries::new(symbol, points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_deserialization_ignores_extra_fields() {
        let json = r#"{"t":"2025-06-02T04:00:00Z","o":99.1,"h":101.0,"l":98.7,"c":100.4,"v":120394}"#;
        let bar: AlpacaDailyBar = serde_json::from_str(json).unwrap();
        assert_eq!(bar.close, 100.4);
        assert_eq!(bar.timestamp, "2025-06-02T04:00:00Z");
    }

    #[test]
    fn test_bars_response_shape() {
        let json = r#"{"bars":{"AAPL":[{"t":"2025-06-02T04:00:00Z","c":100.4}]},"next_page_token":null}"#;
        let resp: AlpacaBarsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.bars["AAPL"].len(), 1);
        assert!(resp.next_page_token.is_none());
    }
}
