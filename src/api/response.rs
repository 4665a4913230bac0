use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::api::error::BacktestError;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::CoinPair;
use crate::utils::maths_utils::{Extent, finite_extent};

/// `[data point index, price]`
pub type PricePoint = [f64; 2];

/// Names the service files indicator series under. Older services use the `sma` spelling.
pub mod series {
    pub const BOLLINGER_UPPER: &[&str] = &["bollinger_upper"];
    pub const BOLLINGER_LOWER: &[&str] = &["bollinger_lower"];
    pub const MOVING_AVERAGE_9: &[&str] = &["movingaverage9", "sma9"];
    pub const MOVING_AVERAGE_15: &[&str] = &["movingaverage15", "sma15"];
    pub const MACD: &[&str] = &["macd"];
    pub const RSI: &[&str] = &["rsi"];
}

/// Indicator values keyed by series name, one value per data point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSeries(BTreeMap<String, Vec<Option<f64>>>);

impl IndicatorSeries {
    /// Whether the series has anything left to plot once warm-up and gaps are dropped.
    pub fn has(&self, names: &[&str]) -> bool {
        !self.points(names).is_empty()
    }

    /// Plottable points of the first series found under `names`.
    ///
    /// Values are indexed by data point. Gaps (null or non-finite) are skipped, as is
    /// the run of zeros the service pads the warm-up period with.
    pub fn points(&self, names: &[&str]) -> Vec<PricePoint> {
        let Some(values) = self.lookup(names) else {
            return Vec::new();
        };

        values
            .iter()
            .enumerate()
            .filter_map(|(index, value)| value.filter(|v| v.is_finite()).map(|v| (index, v)))
            .skip_while(|(_, value)| *value == 0.0)
            .map(|(index, value)| [index as f64, value])
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn lookup(&self, names: &[&str]) -> Option<&Vec<Option<f64>>> {
        names.iter().find_map(|name| self.0.get(*name))
    }
}

/// Everything a successful backtest returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestResult {
    #[serde(default, deserialize_with = "finite_points")]
    pub closing_prices: Vec<PricePoint>,
    #[serde(default, deserialize_with = "finite_points")]
    pub buys: Vec<PricePoint>,
    #[serde(default, deserialize_with = "finite_points")]
    pub sells: Vec<PricePoint>,
    #[serde(default)]
    pub indicators: IndicatorSeries,
    #[serde(default)]
    pub profit: Option<f64>,
}

impl BacktestResult {
    pub fn is_empty(&self) -> bool {
        self.closing_prices.is_empty()
    }

    /// Data point range covered by the closing prices.
    pub fn x_extent(&self) -> Option<Extent> {
        let xs: Vec<f64> = self.closing_prices.iter().map(|p| p[0]).collect();
        finite_extent(&xs)
    }

    /// Price range covered by the closing prices.
    pub fn y_extent(&self) -> Option<Extent> {
        let ys: Vec<f64> = self.closing_prices.iter().map(|p| p[1]).collect();
        finite_extent(&ys)
    }
}

// Points with a null coordinate are dropped instead of failing the whole result.
fn finite_points<'de, D>(deserializer: D) -> Result<Vec<PricePoint>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<[Option<f64>; 2]>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|[x, y]| Some([x?, y?]))
        .filter(|point| point.iter().all(|v| v.is_finite()))
        .collect())
}

const NON_FINITE_TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

/// Replaces the bare `NaN`/`Infinity` tokens Python's JSON encoder emits with `null`.
/// String contents are left alone.
pub fn sanitize_non_finite(body: &str) -> Cow<'_, str> {
    if !body.contains("NaN") && !body.contains("Infinity") {
        return Cow::Borrowed(body);
    }

    let bytes = body.as_bytes();
    let mut out = String::with_capacity(body.len());
    let mut copied = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        if byte == b'"' {
            in_string = true;
            i += 1;
            continue;
        }

        match NON_FINITE_TOKENS
            .iter()
            .find(|token| bytes[i..].starts_with(token.as_bytes()))
        {
            Some(token) => {
                out.push_str(&body[copied..i]);
                out.push_str("null");
                i += token.len();
                copied = i;
            }
            None => i += 1,
        }
    }
    out.push_str(&body[copied..]);

    Cow::Owned(out)
}

/// `{"response": <code>, "result": ...}`. Failures put their text in `result.message`
/// or `result` itself, older services in a top-level `error` or `message`.
#[derive(Deserialize)]
struct Envelope {
    response: Option<i64>,
    #[serde(default)]
    result: serde_json::Value,
    #[serde(default)]
    error: serde_json::Value,
    #[serde(default)]
    message: serde_json::Value,
}

impl Envelope {
    fn failure_message(&self) -> String {
        [
            self.result.get("message"),
            Some(&self.result),
            Some(&self.error),
            Some(&self.message),
        ]
        .into_iter()
        .flatten()
        .find_map(serde_json::Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| "no details given".to_string())
    }
}

/// Decodes any service reply: HTTP status first, then the envelope code, then `result`.
pub fn parse_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, BacktestError> {
    if !(200..300).contains(&status) {
        return Err(BacktestError::Status(status));
    }

    let body = sanitize_non_finite(body);
    let envelope: Envelope = serde_json::from_str(&body)?;

    let Some(code) = envelope.response else {
        return Err(BacktestError::Malformed("response has no status code".to_string()));
    };
    if code != 200 {
        return Err(BacktestError::Service {
            code,
            message: envelope.failure_message(),
        });
    }
    if envelope.result.is_null() {
        return Err(BacktestError::Malformed("response has no result".to_string()));
    }

    Ok(serde_json::from_value(envelope.result)?)
}

pub fn parse_response(status: u16, body: &str) -> Result<BacktestResult, BacktestError> {
    let result: BacktestResult = parse_envelope(status, body)?;

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_response_summaries {
        log::info!(
            "Backtest result: {} closes, {} buys, {} sells, indicators [{}], profit {:?}",
            result.closing_prices.len(),
            result.buys.len(),
            result.sells.len(),
            result.indicators.names().collect::<Vec<_>>().join(", "),
            result.profit
        );
    }

    Ok(result)
}

/// Coin pairs an exchange trades. Entries that are not `BASE/QUOTE` are skipped.
pub fn parse_markets(status: u16, body: &str) -> Result<Vec<CoinPair>, BacktestError> {
    let names: Vec<String> = parse_envelope(status, body)?;
    let total = names.len();
    let pairs: Vec<CoinPair> = names
        .iter()
        .filter_map(|name| CoinPair::parse(name).ok())
        .collect();

    if pairs.len() < total {
        log::debug!("Skipped {} unusable market names", total - pairs.len());
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUCCESS: &str = r#"{
        "response": 200,
        "result": {
            "closingPrices": [[0, 0.071], [1, 0.072], [2, 0.0705], [3, 0.074]],
            "buys": [[1, 0.072]],
            "sells": [[3, 0.074]],
            "indicators": {
                "bollinger_upper": [0, 0, 0.075, 0.076],
                "bollinger_lower": [0, 0, 0.069, NaN],
                "movingaverage9": [NaN, NaN, 0.0711, 0.0722]
            },
            "profit": 0.0277
        }
    }"#;

    #[test]
    fn parses_successful_backtest() {
        let result = parse_response(200, SUCCESS).unwrap();
        assert_eq!(result.closing_prices.len(), 4);
        assert_eq!(result.buys, vec![[1.0, 0.072]]);
        assert_eq!(result.sells, vec![[3.0, 0.074]]);
        assert_eq!(result.profit, Some(0.0277));
        assert!(result.indicators.has(series::BOLLINGER_UPPER));
        assert!(!result.indicators.has(series::RSI));

        let x = result.x_extent().unwrap();
        assert_eq!((x.min, x.max), (0.0, 3.0));
        let y = result.y_extent().unwrap();
        assert_eq!((y.min, y.max), (0.0705, 0.074));
    }

    #[test]
    fn indicator_points_skip_warm_up_and_gaps() {
        let result = parse_response(200, SUCCESS).unwrap();
        assert_eq!(
            result.indicators.points(series::BOLLINGER_UPPER),
            vec![[2.0, 0.075], [3.0, 0.076]]
        );
        assert_eq!(
            result.indicators.points(series::BOLLINGER_LOWER),
            vec![[2.0, 0.069]]
        );
        assert_eq!(
            result.indicators.points(series::MOVING_AVERAGE_9),
            vec![[2.0, 0.0711], [3.0, 0.0722]]
        );
        assert!(result.indicators.points(series::MACD).is_empty());
    }

    #[test]
    fn older_series_names_are_found() {
        let body = r#"{"response": 200, "result": {"indicators": {"sma15": [0, 1.5, 2.5]}}}"#;
        let result = parse_response(200, body).unwrap();
        assert!(result.is_empty());
        assert_eq!(
            result.indicators.points(series::MOVING_AVERAGE_15),
            vec![[1.0, 1.5], [2.0, 2.5]]
        );
    }

    #[test]
    fn http_status_wins_over_body() {
        assert_eq!(
            parse_response(502, "<html>Bad gateway</html>"),
            Err(BacktestError::Status(502))
        );
        assert_eq!(
            BacktestError::Status(500).to_string(),
            "Something went wrong: Response code 500. Please try again."
        );
    }

    #[test]
    fn service_failure_carries_its_message() {
        let body = r#"{"response": 500, "result": {"message": "bittrex does not have market symbol XMR/ETH"}}"#;
        assert_eq!(
            parse_response(200, body),
            Err(BacktestError::Service {
                code: 500,
                message: "bittrex does not have market symbol XMR/ETH".to_string()
            })
        );

        let body = r#"{"response": 400, "error": "bad pair"}"#;
        assert!(matches!(
            parse_response(200, body),
            Err(BacktestError::Service { code: 400, ref message }) if message == "bad pair"
        ));
    }

    #[test]
    fn service_failure_text_in_other_shapes() {
        let body = r#"{"response": 500, "result": "market closed"}"#;
        assert!(matches!(
            parse_response(200, body),
            Err(BacktestError::Service { code: 500, ref message }) if message == "market closed"
        ));

        // An error object keeps the code and falls through to `message`
        let body = r#"{"response": 503, "error": {"kind": "overloaded"}, "message": "try later"}"#;
        assert!(matches!(
            parse_response(200, body),
            Err(BacktestError::Service { code: 503, ref message }) if message == "try later"
        ));

        let body = r#"{"response": 500, "error": {"kind": "overloaded"}}"#;
        assert!(matches!(
            parse_response(200, body),
            Err(BacktestError::Service { code: 500, ref message }) if message == "no details given"
        ));
    }

    #[test]
    fn all_zero_series_counts_as_absent() {
        let body = r#"{"response": 200, "result": {"indicators": {"rsi": [0, 0, 0], "macd": [0, 0.2]}}}"#;
        let result = parse_response(200, body).unwrap();
        assert!(!result.indicators.has(series::RSI));
        assert!(result.indicators.has(series::MACD));
    }

    #[test]
    fn unreadable_bodies_are_malformed() {
        assert!(matches!(
            parse_response(200, "not json"),
            Err(BacktestError::Malformed(_))
        ));
        assert!(matches!(
            parse_response(200, r#"{"response": 200}"#),
            Err(BacktestError::Malformed(_))
        ));
        // No envelope code at all
        assert!(matches!(
            parse_response(200, r#"{"result": {"closingPrices": [[0, 1.0]]}}"#),
            Err(BacktestError::Malformed(_))
        ));
        assert!(matches!(
            parse_response(200, r#"{"response": 200, "result": {"closingPrices": "soon"}}"#),
            Err(BacktestError::Malformed(_))
        ));
    }

    #[test]
    fn sanitize_leaves_strings_alone() {
        let body = r#"{"a": NaN, "b": [Infinity, -Infinity], "c": "NaN \"Infinity\""}"#;
        assert_eq!(
            sanitize_non_finite(body),
            r#"{"a": null, "b": [null, null], "c": "NaN \"Infinity\""}"#
        );
        assert!(matches!(sanitize_non_finite(r#"{"a": 1}"#), Cow::Borrowed(_)));
    }

    #[test]
    fn markets_skip_unusable_names() {
        let body = r#"{"response": 200, "result": ["ETH/BTC", "ltc/btc", "WEIRD"]}"#;
        let pairs = parse_markets(200, body).unwrap();
        let names: Vec<&str> = pairs.iter().map(CoinPair::as_str).collect();
        assert_eq!(names, vec!["ETH/BTC", "LTC/BTC"]);
    }
}
