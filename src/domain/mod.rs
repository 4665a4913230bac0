// Domain types and value objects
pub mod coin_pair;
pub mod exchange;
pub mod time_unit;

// Re-export commonly used types
pub use coin_pair::{CoinPair, CoinPairError};
pub use exchange::Exchange;
pub use time_unit::TimeUnit;
