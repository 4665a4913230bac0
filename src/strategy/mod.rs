//! Strategy condition form builder: the buy/sell rows of the control panel and
//! their translation into the maps the backtesting service evaluates.

pub mod builder;
pub mod condition;

pub use builder::{INVALID_VALUE_MESSAGE, StrategyBuilder, StrategyError, StrategyMap};
pub use condition::{
    Comparator, ConditionRow, ConditionValue, IndicatorField, Side, StrategyCondition, suggestions,
};
