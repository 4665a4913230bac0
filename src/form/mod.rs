pub mod backtest_form;
pub mod validation;

pub use backtest_form::{BacktestForm, FormError, IndicatorToggles};
