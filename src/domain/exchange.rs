use serde::{Deserialize, Serialize};
use std::fmt;

/// Exchanges the backtesting service can pull historical candles from.
/// Serialized as the lowercase id the service expects in the `exchange` query parameter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Bittrex,
    Binance,
    Poloniex,
}

impl Exchange {
    pub fn id(&self) -> &'static str {
        match self {
            Exchange::Bittrex => "bittrex",
            Exchange::Binance => "binance",
            Exchange::Poloniex => "poloniex",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exchange::Bittrex => write!(f, "Bittrex"),
            Exchange::Binance => write!(f, "Binance"),
            Exchange::Poloniex => write!(f, "Poloniex"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn serde_name_matches_query_id() {
        for exchange in Exchange::iter() {
            let json = serde_json::to_string(&exchange).unwrap();
            assert_eq!(json, format!("\"{}\"", exchange.id()));
        }
    }
}
