//! Errors from talking to the backtesting service

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BacktestError {
    #[error("Could not reach the backtesting service: {0}")]
    Transport(String),
    /// Non-2xx HTTP status.
    #[error("Something went wrong: Response code {0}. Please try again.")]
    Status(u16),
    /// The service answered, but its envelope carries a failure code.
    #[error("Something went wrong. Response code: {code}. Error message: \"{message}\"")]
    Service { code: i64, message: String },
    #[error("The backtesting service sent an unreadable response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for BacktestError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for BacktestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
