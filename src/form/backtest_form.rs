use serde::{Deserialize, Serialize};

use crate::api::{BacktestBody, BacktestQuery, BacktestRequest, IndicatorRequest};
use crate::config::{BACKEND, MARKET};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::{CoinPair, Exchange, TimeUnit};
use crate::form::validation::{parse_data_points, parse_decimal};
use crate::strategy::{StrategyBuilder, StrategyError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Please select an exchange.")]
    MissingExchange,
    #[error("Please select a coin pair.")]
    MissingCoinPair,
    #[error("'{0}' is not a valid coin pair.")]
    InvalidCoinPair(String),
    #[error("Please select a time unit.")]
    MissingTimeUnit,
    #[error("Capital must be a positive number, got '{0}'.")]
    InvalidCapital(String),
    #[error("Stop loss must be a percentage between 0 and 100, got '{0}'.")]
    InvalidStopLoss(String),
    #[error("Data points must be a whole number or 'all', got '{0}'.")]
    InvalidDataPoints(String),
    #[error(transparent)]
    Strategy(#[from] StrategyError),
}

/// Which series to ask the service for, and which ones to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorToggles {
    pub bollinger: bool,
    pub movingaverage9: bool,
    pub movingaverage15: bool,
    pub macd: bool,
    pub rsi: bool,
}

impl Default for IndicatorToggles {
    fn default() -> Self {
        Self {
            bollinger: true,
            movingaverage9: false,
            movingaverage15: false,
            macd: false,
            rsi: false,
        }
    }
}

impl IndicatorToggles {
    /// MACD and RSI are drawn when the service returns them but are never requested.
    pub fn to_request(&self) -> IndicatorRequest {
        let [short, long] = BACKEND.request.moving_average_periods;
        let mut movingaverage = Vec::new();
        if self.movingaverage9 {
            movingaverage.push(short);
        }
        if self.movingaverage15 {
            movingaverage.push(long);
        }

        IndicatorRequest {
            movingaverage,
            bollinger: self
                .bollinger
                .then_some(BACKEND.request.bollinger_period),
        }
    }
}

/// Everything the control panel edits. Values stay as typed until Begin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestForm {
    pub exchange: Option<Exchange>,
    pub coin_pair: Option<String>,
    pub time_unit: Option<TimeUnit>,
    pub capital: String,
    pub stop_loss: String,
    pub data_points: String,
    pub strategy: StrategyBuilder,
    pub indicators: IndicatorToggles,
}

impl Default for BacktestForm {
    fn default() -> Self {
        Self {
            exchange: Some(MARKET.default_exchange),
            coin_pair: None,
            time_unit: None,
            capital: String::new(),
            stop_loss: "0".to_string(),
            data_points: "all".to_string(),
            strategy: StrategyBuilder::default(),
            indicators: IndicatorToggles::default(),
        }
    }
}

impl BacktestForm {
    /// Validates every field and produces the request for the backtesting service.
    /// The first problem found is returned.
    pub fn build_request(&self) -> Result<BacktestRequest, FormError> {
        let exchange = self.exchange.ok_or(FormError::MissingExchange)?;

        let pair_text = self.coin_pair.as_deref().ok_or(FormError::MissingCoinPair)?;
        let pair = CoinPair::parse(pair_text)
            .map_err(|_| FormError::InvalidCoinPair(pair_text.to_string()))?;

        let period = self.time_unit.ok_or(FormError::MissingTimeUnit)?;

        let capital = parse_decimal(&self.capital)
            .filter(|capital| capital.is_finite() && *capital > 0.0)
            .ok_or_else(|| FormError::InvalidCapital(self.capital.clone()))?;

        let stop_loss = parse_decimal(&self.stop_loss)
            .filter(|percent| *percent <= 100.0)
            .ok_or_else(|| FormError::InvalidStopLoss(self.stop_loss.clone()))?;

        let start_time = parse_data_points(&self.data_points)
            .ok_or_else(|| FormError::InvalidDataPoints(self.data_points.clone()))?;

        let (buy_strategy, sell_strategy) = self.strategy.build()?;

        let request = BacktestRequest {
            query: BacktestQuery {
                exchange,
                pair,
                period,
                capital,
                stop_loss,
                start_time,
            },
            body: BacktestBody {
                indicators: self.indicators.to_request(),
                buy_strategy,
                sell_strategy,
            },
        };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_request_payloads {
            log::info!("Built request: {}", request.summary());
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{Comparator, ConditionRow, IndicatorField, Side};

    fn filled_form() -> BacktestForm {
        let mut form = BacktestForm {
            exchange: Some(Exchange::Bittrex),
            coin_pair: Some("ETH/BTC".to_string()),
            time_unit: Some(TimeUnit::ThirtyMinutes),
            capital: "1.5".to_string(),
            ..Default::default()
        };
        form.strategy.rows_mut(Side::Buy)[0] = ConditionRow {
            field: Some(IndicatorField::Rsi),
            comparator: Some(Comparator::LessThan),
            value: "30".to_string(),
        };
        form.strategy.rows_mut(Side::Sell)[0] = ConditionRow {
            field: Some(IndicatorField::Rsi),
            comparator: Some(Comparator::GreaterThan),
            value: "70".to_string(),
        };
        form
    }

    #[test]
    fn defaults_match_the_control_panel() {
        let form = BacktestForm::default();
        assert_eq!(form.stop_loss, "0");
        assert_eq!(form.data_points, "all");
        assert_eq!(form.exchange, Some(Exchange::Bittrex));
        assert_eq!(form.coin_pair, None);
        assert!(form.indicators.bollinger);
        assert!(!form.indicators.movingaverage9);
        assert!(!form.indicators.rsi);
    }

    #[test]
    fn builds_a_complete_request() {
        let request = filled_form().build_request().unwrap();

        assert_eq!(request.query.exchange, Exchange::Bittrex);
        assert_eq!(request.query.pair.as_str(), "ETH/BTC");
        assert_eq!(request.query.period, TimeUnit::ThirtyMinutes);
        assert_eq!(request.query.capital, 1.5);
        assert_eq!(request.query.stop_loss, 0.0);
        assert_eq!(request.query.start_time, 999_999);
        assert_eq!(request.body.indicators.bollinger, Some(21));
        assert!(request.body.indicators.movingaverage.is_empty());
        assert_eq!(request.body.buy_strategy.len(), 1);
        assert_eq!(request.body.sell_strategy.len(), 1);
    }

    #[test]
    fn missing_selections_are_reported_first() {
        let mut form = filled_form();
        form.exchange = None;
        form.capital = "oops".to_string();
        assert_eq!(form.build_request().unwrap_err(), FormError::MissingExchange);

        let mut form = filled_form();
        form.coin_pair = None;
        assert_eq!(form.build_request().unwrap_err(), FormError::MissingCoinPair);

        let mut form = filled_form();
        form.time_unit = None;
        assert_eq!(form.build_request().unwrap_err(), FormError::MissingTimeUnit);
    }

    #[test]
    fn capital_must_be_positive() {
        let huge = "9".repeat(400);
        for bad in ["0", "0.0", "", "-3", "abc", huge.as_str()] {
            let mut form = filled_form();
            form.capital = bad.to_string();
            assert_eq!(
                form.build_request().unwrap_err(),
                FormError::InvalidCapital(bad.to_string())
            );
        }
    }

    #[test]
    fn stop_loss_and_data_points_are_validated() {
        let mut form = filled_form();
        form.stop_loss = "5%".to_string();
        assert_eq!(
            form.build_request().unwrap_err(),
            FormError::InvalidStopLoss("5%".to_string())
        );

        let mut form = filled_form();
        form.stop_loss = "150".to_string();
        assert_eq!(
            form.build_request().unwrap_err(),
            FormError::InvalidStopLoss("150".to_string())
        );

        let mut form = filled_form();
        form.data_points = "lots".to_string();
        assert_eq!(
            form.build_request().unwrap_err(),
            FormError::InvalidDataPoints("lots".to_string())
        );

        let mut form = filled_form();
        form.data_points = "500".to_string();
        assert_eq!(form.build_request().unwrap().query.start_time, 500);
    }

    #[test]
    fn strategy_errors_pass_through() {
        let mut form = filled_form();
        form.strategy.rows_mut(Side::Sell)[0].value = "soon".to_string();
        assert!(matches!(
            form.build_request().unwrap_err(),
            FormError::Strategy(StrategyError::InvalidValue { side: Side::Sell, row: 1, .. })
        ));
    }

    #[test]
    fn toggles_choose_requested_indicators() {
        let toggles = IndicatorToggles {
            bollinger: false,
            movingaverage9: true,
            movingaverage15: true,
            macd: true,
            rsi: true,
        };
        let request = toggles.to_request();
        assert_eq!(request.movingaverage, vec![9, 15]);
        assert_eq!(request.bollinger, None);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"movingaverage": [9, 15]})
        );
    }
}
