//! Backtesting service API: request payloads, response decoding and the HTTP client.

pub mod client;
pub mod error;
pub mod request;
pub mod response;

pub use client::BacktestClient;
pub use error::BacktestError;
pub use request::{BacktestBody, BacktestQuery, BacktestRequest, IndicatorRequest};
pub use response::{
    BacktestResult, IndicatorSeries, PricePoint, parse_markets, parse_response, series,
};
