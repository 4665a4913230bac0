use serde::{Deserialize, Serialize};

use crate::domain::{CoinPair, Exchange, TimeUnit};
use crate::strategy::StrategyMap;

/// Indicators the service should compute alongside the backtest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorRequest {
    /// Moving average periods. Always sent, possibly empty.
    pub movingaverage: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bollinger: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestBody {
    pub indicators: IndicatorRequest,
    pub buy_strategy: StrategyMap,
    pub sell_strategy: StrategyMap,
}

/// Query string of the backtest POST.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestQuery {
    pub exchange: Exchange,
    pub pair: CoinPair,
    pub period: TimeUnit,
    pub capital: f64,
    pub stop_loss: f64,
    /// How many data points to backtest over (the service calls it `startTime`).
    pub start_time: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestRequest {
    pub query: BacktestQuery,
    pub body: BacktestBody,
}

impl BacktestRequest {
    /// One-line description for logs and the status bar.
    pub fn summary(&self) -> String {
        format!(
            "{} {} @ {} | capital {} | stop loss {} | {} points | {} buy / {} sell conditions",
            self.query.exchange,
            self.query.pair,
            self.query.period,
            self.query.capital,
            self.query.stop_loss,
            self.query.start_time,
            self.body.buy_strategy.len(),
            self.body.sell_strategy.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{Comparator, ConditionValue, IndicatorField, StrategyCondition};

    fn request() -> BacktestRequest {
        let mut buy = StrategyMap::new();
        buy.insert(
            IndicatorField::CurrentPrice,
            StrategyCondition {
                comparator: Comparator::GreaterThan,
                value: ConditionValue::Indicator(IndicatorField::MovingAverage9),
            },
        );
        let mut sell = StrategyMap::new();
        sell.insert(
            IndicatorField::Rsi,
            StrategyCondition {
                comparator: Comparator::GreaterThan,
                value: ConditionValue::Number(70.0),
            },
        );

        BacktestRequest {
            query: BacktestQuery {
                exchange: Exchange::Bittrex,
                pair: CoinPair::parse("ETH/BTC").unwrap(),
                period: TimeUnit::OneHour,
                capital: 1.0,
                stop_loss: 0.5,
                start_time: 999_999,
            },
            body: BacktestBody {
                indicators: IndicatorRequest {
                    movingaverage: vec![9],
                    bollinger: Some(21),
                },
                buy_strategy: buy,
                sell_strategy: sell,
            },
        }
    }

    #[test]
    fn query_uses_service_parameter_names() {
        let query = serde_json::to_value(&request().query).unwrap();
        assert_eq!(
            query,
            serde_json::json!({
                "exchange": "bittrex",
                "pair": "ETH/BTC",
                "period": "1h",
                "capital": 1.0,
                "stopLoss": 0.5,
                "startTime": 999_999,
            })
        );
    }

    #[test]
    fn body_matches_service_shape() {
        let body = serde_json::to_value(&request().body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "indicators": {"movingaverage": [9], "bollinger": 21},
                "buyStrategy": {
                    "currentprice": {"comparator": "GT", "value": "movingaverage9"}
                },
                "sellStrategy": {
                    "rsi": {"comparator": "GT", "value": 70.0}
                },
            })
        );
    }

    #[test]
    fn summary_mentions_pair_and_period() {
        let summary = request().summary();
        assert!(summary.contains("ETH/BTC"));
        assert!(summary.contains("1h"));
        assert!(summary.contains("1 buy / 1 sell"));
    }
}
