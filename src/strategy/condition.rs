//! Building blocks of a buy/sell strategy: one comparison per row.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::EnumIter,
)]
pub enum Comparator {
    #[serde(rename = "LT")]
    LessThan,
    #[serde(rename = "EQ")]
    Equal,
    #[serde(rename = "GT")]
    GreaterThan,
}

impl Comparator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::LessThan => "<",
            Comparator::Equal => "=",
            Comparator::GreaterThan => ">",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Values the service can evaluate on every candle. The serde names are the
/// keys the service looks indicators up by.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorField {
    CurrentPrice,
    MovingAverage9,
    MovingAverage15,
    Rsi,
}

impl IndicatorField {
    pub const ALL: [IndicatorField; 4] = [
        IndicatorField::CurrentPrice,
        IndicatorField::MovingAverage9,
        IndicatorField::MovingAverage15,
        IndicatorField::Rsi,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            IndicatorField::CurrentPrice => "currentprice",
            IndicatorField::MovingAverage9 => "movingaverage9",
            IndicatorField::MovingAverage15 => "movingaverage15",
            IndicatorField::Rsi => "rsi",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IndicatorField::CurrentPrice => "Current Price",
            IndicatorField::MovingAverage9 => "Moving Average (9 Period)",
            IndicatorField::MovingAverage15 => "Moving Average (15 Period)",
            IndicatorField::Rsi => "RSI",
        }
    }

    /// Accepts either the display label or the service key, ignoring case.
    pub fn from_text(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL.into_iter().find(|field| {
            field.label().eq_ignore_ascii_case(text) || field.key().eq_ignore_ascii_case(text)
        })
    }
}

impl fmt::Display for IndicatorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Right-hand side of a comparison: a literal or another indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Number(f64),
    Indicator(IndicatorField),
}

impl ConditionValue {
    /// Reads what the user typed into a value box. `None` when it is neither a
    /// finite number nor a known indicator.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(number) = trimmed.parse::<f64>() {
            // "NaN" and "inf" parse as f64 but mean nothing to the service
            return number.is_finite().then_some(ConditionValue::Number(number));
        }
        IndicatorField::from_text(trimmed).map(ConditionValue::Indicator)
    }
}

/// Wire form of one condition: `{"comparator": "GT", "value": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyCondition {
    pub comparator: Comparator,
    pub value: ConditionValue,
}

/// One editable row of the strategy form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionRow {
    pub field: Option<IndicatorField>,
    pub comparator: Option<Comparator>,
    pub value: String,
}

/// Autocomplete for the value box: indicator labels containing `typed`.
/// Empty input lists every label.
pub fn suggestions(typed: &str) -> Vec<&'static str> {
    let needle = typed.trim().to_lowercase();
    IndicatorField::ALL
        .iter()
        .map(|field| field.label())
        .filter(|label| label.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparators_use_service_codes() {
        assert_eq!(serde_json::to_string(&Comparator::LessThan).unwrap(), "\"LT\"");
        assert_eq!(serde_json::to_string(&Comparator::Equal).unwrap(), "\"EQ\"");
        assert_eq!(serde_json::to_string(&Comparator::GreaterThan).unwrap(), "\"GT\"");
    }

    #[test]
    fn indicator_text_accepts_labels_and_keys() {
        assert_eq!(
            IndicatorField::from_text("Moving Average (9 Period)"),
            Some(IndicatorField::MovingAverage9)
        );
        assert_eq!(
            IndicatorField::from_text("  movingaverage15 "),
            Some(IndicatorField::MovingAverage15)
        );
        assert_eq!(IndicatorField::from_text("rsi"), Some(IndicatorField::Rsi));
        assert_eq!(IndicatorField::from_text("macd"), None);
    }

    #[test]
    fn values_are_numbers_or_indicators() {
        assert_eq!(ConditionValue::parse("0.0042"), Some(ConditionValue::Number(0.0042)));
        assert_eq!(ConditionValue::parse(" 70 "), Some(ConditionValue::Number(70.0)));
        assert_eq!(
            ConditionValue::parse("Current Price"),
            Some(ConditionValue::Indicator(IndicatorField::CurrentPrice))
        );
        assert_eq!(ConditionValue::parse(""), None);
        assert_eq!(ConditionValue::parse("NaN"), None);
        assert_eq!(ConditionValue::parse("inf"), None);
        assert_eq!(ConditionValue::parse("lots"), None);
    }

    #[test]
    fn condition_serializes_like_the_service_expects() {
        let numeric = StrategyCondition {
            comparator: Comparator::LessThan,
            value: ConditionValue::Number(30.0),
        };
        assert_eq!(
            serde_json::to_value(numeric).unwrap(),
            serde_json::json!({"comparator": "LT", "value": 30.0})
        );

        let indicator = StrategyCondition {
            comparator: Comparator::GreaterThan,
            value: ConditionValue::Indicator(IndicatorField::MovingAverage9),
        };
        assert_eq!(
            serde_json::to_value(indicator).unwrap(),
            serde_json::json!({"comparator": "GT", "value": "movingaverage9"})
        );
    }

    #[test]
    fn suggestions_filter_by_typed_text() {
        assert_eq!(
            suggestions("moving"),
            vec!["Moving Average (9 Period)", "Moving Average (15 Period)"]
        );
        assert_eq!(suggestions("").len(), 4);
        assert_eq!(suggestions("  ").len(), 4);
        assert!(suggestions("zzz").is_empty());
        assert!(suggestions("30").is_empty());
    }
}
