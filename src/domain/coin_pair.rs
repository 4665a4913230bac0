use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoinPairError {
    #[error("'{0}' is not a coin pair (expected BASE/QUOTE, e.g. ETH/BTC)")]
    Malformed(String),
}

/// A trading pair written the way the backtesting service wants it: `BASE/QUOTE`.
///
/// The quote asset is the currency the profit and the price axis are reported in.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
#[serde(try_from = "String", into = "String")]
pub struct CoinPair {
    name: String,
}

impl CoinPair {
    pub fn parse(text: &str) -> Result<Self, CoinPairError> {
        let name = text.trim().to_uppercase();
        match Self::split(&name) {
            Some(_) => Ok(Self { name }),
            None => Err(CoinPairError::Malformed(text.to_string())),
        }
    }

    // Both halves must be non-empty and alphanumeric.
    fn split(name: &str) -> Option<(&str, &str)> {
        let (base, quote) = name.split_once('/')?;
        let valid = |asset: &str| {
            !asset.is_empty() && asset.chars().all(|c| c.is_ascii_alphanumeric())
        };
        (valid(base) && valid(quote)).then_some((base, quote))
    }

    pub fn base(&self) -> &str {
        Self::split(&self.name).map(|(base, _)| base).unwrap_or("")
    }

    pub fn quote(&self) -> &str {
        Self::split(&self.name).map(|(_, quote)| quote).unwrap_or("")
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl TryFrom<String> for CoinPair {
    type Error = CoinPairError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CoinPair> for String {
    fn from(pair: CoinPair) -> Self {
        pair.name
    }
}

impl fmt::Display for CoinPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_base_and_quote() {
        let pair = CoinPair::parse("eth/btc").unwrap();
        assert_eq!(pair.as_str(), "ETH/BTC");
        assert_eq!(pair.base(), "ETH");
        assert_eq!(pair.quote(), "BTC");
    }

    #[test]
    fn rejects_pairs_without_two_assets() {
        for bad in ["ETHBTC", "ETH/", "/BTC", "ETH/BTC/USD", "ETH-BTC", ""] {
            assert!(CoinPair::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn serializes_as_plain_string() {
        let pair = CoinPair::parse("LTC/BTC").unwrap();
        assert_eq!(serde_json::to_string(&pair).unwrap(), "\"LTC/BTC\"");
        let back: CoinPair = serde_json::from_str("\"ltc/btc\"").unwrap();
        assert_eq!(back, pair);
        assert!(serde_json::from_str::<CoinPair>("\"LTCBTC\"").is_err());
    }
}
