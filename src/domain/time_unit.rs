use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::TimeUtils;

/// Candle width the backtest runs over. Sent as the `period` query parameter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::EnumIter,
)]
pub enum TimeUnit {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "1d")]
    OneDay,
}

impl TimeUnit {
    /// Exchange-style shorthand (e.g. `30m`, `1h`).
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::OneMinute => "1m",
            TimeUnit::FiveMinutes => "5m",
            TimeUnit::ThirtyMinutes => "30m",
            TimeUnit::OneHour => "1h",
            TimeUnit::OneDay => "1d",
        }
    }

    pub fn duration_ms(&self) -> i64 {
        match self {
            TimeUnit::OneMinute => TimeUtils::MS_IN_MIN,
            TimeUnit::FiveMinutes => TimeUtils::MS_IN_5_MIN,
            TimeUnit::ThirtyMinutes => TimeUtils::MS_IN_30_MIN,
            TimeUnit::OneHour => TimeUtils::MS_IN_H,
            TimeUnit::OneDay => TimeUtils::MS_IN_D,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
