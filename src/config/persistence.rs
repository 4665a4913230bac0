//! File persistence configuration

/// Path for saving/loading the native app's UI state (form contents only).
pub const APP_STATE_PATH: &str = ".backtest_dashboard_state.json";
