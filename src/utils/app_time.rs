//! Monotonic clock that works on both native and WASM targets.
//!
//! `std::time::Instant::now()` panics in the browser, so the web build routes
//! through `web_time` instead.

use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
pub type AppInstant = std::time::Instant;

#[cfg(target_arch = "wasm32")]
pub type AppInstant = web_time::Instant;

pub fn now() -> AppInstant {
    AppInstant::now()
}

/// Time spent since `start`, used to report how long a backtest round trip took.
pub fn elapsed_since(start: AppInstant) -> Duration {
    now().saturating_duration_since(start)
}
