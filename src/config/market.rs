//! Markets offered in the control panel selectors.

use crate::domain::Exchange;

pub struct MarketConfig {
    /// Exchange preselected on a fresh start
    pub default_exchange: Exchange,
    /// Coin pairs offered in the pair selector, `BASE/QUOTE`
    pub coin_pairs: &'static [&'static str],
}

pub const MARKET: MarketConfig = MarketConfig {
    default_exchange: Exchange::Bittrex,
    coin_pairs: &["ETH/BTC", "LTC/BTC", "XRP/BTC", "XMR/BTC", "NXT/BTC", "BCC/BTC"],
};
