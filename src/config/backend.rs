//! Backtesting service configuration constants and runtime settings.

use std::time::Duration;

/// Static defaults for the backtesting service.
pub struct BackendConfig {
    /// Base URL the dashboard talks to when nothing overrides it
    pub base_url: &'static str,
    /// Route that accepts a backtest POST
    pub backtest_path: &'static str,
    /// Route listing the coin pairs an exchange trades
    pub markets_path: &'static str,
    /// Environment variable consulted for a base URL override
    pub base_url_env: &'static str,
    /// Request timeout (seconds). Backtests over long histories are slow.
    pub timeout_secs: u64,
}

/// Request-shaping constants the service expects.
pub struct RequestDefaults {
    /// Sentinel sent as the data point count when the user asks for "all"
    pub all_data_points: u32,
    /// Period requested for Bollinger Bands
    pub bollinger_period: u32,
    /// Moving average periods offered in the plot options
    pub moving_average_periods: [u32; 2],
}

/// The Master Backend Configuration
pub struct BackendMasterConfig {
    pub service: BackendConfig,
    pub request: RequestDefaults,
}

pub const BACKEND: BackendMasterConfig = BackendMasterConfig {
    service: BackendConfig {
        base_url: "http://localhost:5000",
        backtest_path: "/backtest",
        markets_path: "/markets",
        base_url_env: "BACKTEST_BACKEND_URL",
        timeout_secs: 30,
    },
    request: RequestDefaults {
        all_data_points: 999_999,
        bollinger_period: 21,
        moving_average_periods: [9, 15],
    },
};

/// Runtime settings for the HTTP client, built from [`BACKEND`] plus CLI/env overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSettings {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: BACKEND.service.base_url.to_string(),
            timeout: Duration::from_secs(BACKEND.service.timeout_secs),
        }
    }
}

impl BackendSettings {
    pub fn new(base_url: Option<String>, timeout_secs: Option<u64>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: base_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.base_url),
            timeout: timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }

    /// Full URL of the backtest route, tolerant of a trailing slash on the base.
    pub fn backtest_url(&self) -> String {
        self.route(BACKEND.service.backtest_path)
    }

    pub fn markets_url(&self) -> String {
        self.route(BACKEND.service.markets_path)
    }

    fn route(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
