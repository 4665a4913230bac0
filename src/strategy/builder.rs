use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::strategy::condition::{
    ConditionRow, ConditionValue, IndicatorField, Side, StrategyCondition,
};

/// What the service receives as `buyStrategy` / `sellStrategy`: every listed
/// indicator must satisfy its condition for the signal to fire.
pub type StrategyMap = BTreeMap<IndicatorField, StrategyCondition>;

pub const INVALID_VALUE_MESSAGE: &str =
    "You must enter a number or one of the suggested indicators.";

/// Row numbers in these errors are 1-based, as displayed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StrategyError {
    #[error("Pick an indicator for {side} condition #{row}.")]
    MissingField { side: Side, row: usize },
    #[error("Pick a comparator for {side} condition #{row}.")]
    MissingComparator { side: Side, row: usize },
    #[error("{} (incorrect value '{value}' for {side} condition #{row})", INVALID_VALUE_MESSAGE)]
    InvalidValue {
        side: Side,
        row: usize,
        value: String,
    },
}

/// Buy and sell condition rows behind the strategy section of the control panel.
/// Each side always keeps at least one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyBuilder {
    buy: Vec<ConditionRow>,
    sell: Vec<ConditionRow>,
}

impl Default for StrategyBuilder {
    fn default() -> Self {
        Self {
            buy: vec![ConditionRow::default()],
            sell: vec![ConditionRow::default()],
        }
    }
}

impl StrategyBuilder {
    pub fn rows(&self, side: Side) -> &[ConditionRow] {
        match side {
            Side::Buy => &self.buy,
            Side::Sell => &self.sell,
        }
    }

    pub fn rows_mut(&mut self, side: Side) -> &mut Vec<ConditionRow> {
        match side {
            Side::Buy => &mut self.buy,
            Side::Sell => &mut self.sell,
        }
    }

    pub fn add_condition(&mut self, side: Side) {
        self.rows_mut(side).push(ConditionRow::default());

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("Added {} condition, now {}", side, self.rows(side).len());
        }
    }

    pub fn can_remove(&self, side: Side) -> bool {
        self.rows(side).len() > 1
    }

    /// Drops the last row of `side`. Returns false (and does nothing) on the last remaining row.
    pub fn remove_condition(&mut self, side: Side) -> bool {
        if !self.can_remove(side) {
            return false;
        }
        self.rows_mut(side).pop();
        true
    }

    /// Restores the one-row minimum after loading persisted state.
    pub fn normalize(&mut self) {
        for side in [Side::Buy, Side::Sell] {
            if self.rows(side).is_empty() {
                self.rows_mut(side).push(ConditionRow::default());
            }
        }
    }

    /// Turns both sides into the maps the service evaluates.
    pub fn build(&self) -> Result<(StrategyMap, StrategyMap), StrategyError> {
        Ok((self.build_side(Side::Buy)?, self.build_side(Side::Sell)?))
    }

    fn build_side(&self, side: Side) -> Result<StrategyMap, StrategyError> {
        let mut strategy = StrategyMap::new();

        for (index, row) in self.rows(side).iter().enumerate() {
            let row_number = index + 1;
            let field = row.field.ok_or(StrategyError::MissingField {
                side,
                row: row_number,
            })?;
            let comparator = row.comparator.ok_or(StrategyError::MissingComparator {
                side,
                row: row_number,
            })?;
            let value =
                ConditionValue::parse(&row.value).ok_or_else(|| StrategyError::InvalidValue {
                    side,
                    row: row_number,
                    value: row.value.clone(),
                })?;

            // The service keys conditions by indicator, so a later row on the same field wins.
            if strategy
                .insert(field, StrategyCondition { comparator, value })
                .is_some()
            {
                log::warn!(
                    "{} condition #{} replaces an earlier condition on {}",
                    side,
                    row_number,
                    field.key()
                );
            }
        }

        Ok(strategy)
    }
}
