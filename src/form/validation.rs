use regex::Regex;
use std::sync::LazyLock;

use crate::config::BACKEND;

// Plain decimal: "12", "12.5" or ".5". No sign, no exponent.
static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(\.\d+)?|\.\d+)$").expect("regex decimal"));

static DATA_POINTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(all|\d+)$").expect("regex data points"));

pub fn is_decimal(text: &str) -> bool {
    DECIMAL_RE.is_match(text.trim())
}

pub fn parse_decimal(text: &str) -> Option<f64> {
    if !is_decimal(text) {
        return None;
    }
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Number of data points to backtest over. `all` becomes the service's "everything" sentinel.
pub fn parse_data_points(text: &str) -> Option<u32> {
    let text = text.trim();
    if !DATA_POINTS_RE.is_match(text) {
        return None;
    }
    if text.eq_ignore_ascii_case("all") {
        return Some(BACKEND.request.all_data_points);
    }
    text.parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimals() {
        for good in ["0", "12", "12.5", ".5", " 3.25 ", "0.0001"] {
            assert!(is_decimal(good), "{good} should be a decimal");
        }
        for bad in ["", "-1", "1.", "1e5", "1,5", "abc", "1.2.3", "."] {
            assert!(!is_decimal(bad), "{bad} should not be a decimal");
        }
        assert_eq!(parse_decimal(".5"), Some(0.5));
        assert_eq!(parse_decimal("-5"), None);
        // Digits only, but too long to fit in an f64
        assert_eq!(parse_decimal(&"9".repeat(400)), None);
    }

    #[test]
    fn data_points() {
        assert_eq!(parse_data_points("all"), Some(999_999));
        assert_eq!(parse_data_points("ALL"), Some(999_999));
        assert_eq!(parse_data_points("250"), Some(250));
        assert_eq!(parse_data_points("some"), None);
        assert_eq!(parse_data_points("2.5"), None);
        assert_eq!(parse_data_points(""), None);
        // Matches the pattern but overflows
        assert_eq!(parse_data_points("99999999999"), None);
    }
}
