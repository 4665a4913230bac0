//! Configuration module for the backtest dashboard.

pub mod backend;

mod debug; // Private: callers go through crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod market;
pub mod persistence;
pub mod plot;

// Re-export commonly used items
pub use backend::{BACKEND, BackendSettings};
pub use market::MARKET;
pub use persistence::APP_STATE_PATH;
pub use plot::PLOT_CONFIG;
