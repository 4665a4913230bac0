//! HTTP client for the backtesting service.
//!
//! One POST per backtest; a GET for the coin pairs an exchange trades.

use reqwest::Client;

use crate::api::error::BacktestError;
use crate::api::request::BacktestRequest;
use crate::api::response::{BacktestResult, parse_markets, parse_response};
use crate::config::BackendSettings;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::{CoinPair, Exchange};
use crate::utils::app_time::{elapsed_since, now};
use crate::utils::time_utils::format_duration_short;

#[derive(Debug, Clone)]
pub struct BacktestClient {
    http: Client,
    settings: BackendSettings,
}

impl BacktestClient {
    pub fn new(settings: BackendSettings) -> Result<Self, BacktestError> {
        let builder = Client::builder();
        // The browser owns timeouts on wasm
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(settings.timeout);
        let http = builder.build()?;

        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &BackendSettings {
        &self.settings
    }

    /// Runs one backtest.
    pub async fn run(&self, request: &BacktestRequest) -> Result<BacktestResult, BacktestError> {
        let url = self.settings.backtest_url();
        let start = now();
        log::info!("POST {} ({})", url, request.summary());

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_request_payloads {
            match serde_json::to_string_pretty(&request.body) {
                Ok(body) => log::info!("Backtest body:\n{}", body),
                Err(e) => log::warn!("Could not render backtest body: {}", e),
            }
        }

        let response = self
            .http
            .post(&url)
            .query(&request.query)
            .json(&request.body)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        let result = parse_response(status, &body);
        match &result {
            Ok(r) => log::info!(
                "Backtest finished in {}: {} data points, profit {:?}",
                format_duration_short(elapsed_since(start)),
                r.closing_prices.len(),
                r.profit
            ),
            Err(e) => log::warn!("Backtest failed (HTTP {}): {}", status, e),
        }
        result
    }

    /// Coin pairs the service can backtest on `exchange`.
    pub async fn markets(&self, exchange: Exchange) -> Result<Vec<CoinPair>, BacktestError> {
        let url = self.settings.markets_url();
        log::info!("GET {} (exchange {})", url, exchange.id());

        let response = self
            .http
            .get(&url)
            .query(&[("exchange", exchange.id())])
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        parse_markets(status, &body)
    }
}
