use eframe::egui::{ComboBox, Grid, TextEdit, Ui};
use strum::IntoEnumIterator;

use crate::config::MARKET;
use crate::domain::{CoinPair, Exchange, TimeUnit};
use crate::form::IndicatorToggles;
use crate::strategy::{Comparator, ConditionRow, IndicatorField, Side, StrategyBuilder, suggestions};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{colored_subsection_heading, section_heading, spaced_separator};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

// ============================================================================
// COIN INFORMATION
// ============================================================================

/// Exchange, pair, time unit and the three numeric inputs.
pub struct CoinInformationPanel<'a> {
    exchange: Option<Exchange>,
    coin_pair: Option<String>,
    time_unit: Option<TimeUnit>,
    capital: &'a mut String,
    stop_loss: &'a mut String,
    data_points: &'a mut String,
    /// `None` while the markets request is still out
    available_pairs: Option<&'a [CoinPair]>,
}

impl<'a> CoinInformationPanel<'a> {
    pub fn new(
        exchange: Option<Exchange>,
        coin_pair: Option<String>,
        time_unit: Option<TimeUnit>,
        capital: &'a mut String,
        stop_loss: &'a mut String,
        data_points: &'a mut String,
        available_pairs: Option<&'a [CoinPair]>,
    ) -> Self {
        Self {
            exchange,
            coin_pair,
            time_unit,
            capital,
            stop_loss,
            data_points,
            available_pairs,
        }
    }

    fn render_exchange_selector(&mut self, ui: &mut Ui) -> Option<Exchange> {
        let previous = self.exchange;
        let selected_text = self
            .exchange
            .map(|e| e.to_string())
            .unwrap_or_else(|| UI_TEXT.exchange_placeholder.to_string());

        ComboBox::from_id_salt("exchange_selector")
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for exchange in Exchange::iter() {
                    ui.selectable_value(&mut self.exchange, Some(exchange), exchange.to_string());
                }
            });

        (self.exchange != previous).then_some(self.exchange).flatten()
    }

    fn render_pair_selector(&mut self, ui: &mut Ui) -> Option<String> {
        let previous = self.coin_pair.clone();
        let selected_text = self
            .coin_pair
            .clone()
            .unwrap_or_else(|| UI_TEXT.coin_pair_placeholder.to_string());

        ComboBox::from_id_salt("coin_pair_selector")
            .selected_text(selected_text)
            .show_ui(ui, |ui| match self.available_pairs {
                Some(pairs) => {
                    for pair in pairs {
                        ui.selectable_value(
                            &mut self.coin_pair,
                            Some(pair.as_str().to_string()),
                            pair.as_str(),
                        );
                    }
                }
                None => {
                    ui.label_subdued(UI_TEXT.coin_pairs_loading);
                    // Offer the built-in list rather than nothing
                    for pair in MARKET.coin_pairs {
                        ui.selectable_value(&mut self.coin_pair, Some(pair.to_string()), *pair);
                    }
                }
            });

        if self.coin_pair != previous {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!("A new pair was selected: {:?}", self.coin_pair);
            }
            return self.coin_pair.clone();
        }
        None
    }

    fn render_time_unit_selector(&mut self, ui: &mut Ui) -> Option<TimeUnit> {
        let previous = self.time_unit;
        let selected_text = self
            .time_unit
            .map(|u| u.to_string())
            .unwrap_or_else(|| UI_TEXT.time_unit_placeholder.to_string());

        ComboBox::from_id_salt("time_unit_selector")
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for unit in TimeUnit::iter() {
                    ui.selectable_value(&mut self.time_unit, Some(unit), unit.as_str());
                }
            });

        (self.time_unit != previous).then_some(self.time_unit).flatten()
    }
}

#[derive(Debug)]
pub enum CoinInformationEvent {
    Exchange(Exchange),
    CoinPair(String),
    TimeUnit(TimeUnit),
}

impl<'a> Panel for CoinInformationPanel<'a> {
    type Event = CoinInformationEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.coin_information_heading);

        Grid::new("coin_information_grid")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label(colored_subsection_heading(UI_TEXT.exchange_label));
                if let Some(exchange) = self.render_exchange_selector(ui) {
                    events.push(CoinInformationEvent::Exchange(exchange));
                }
                ui.end_row();

                ui.label(colored_subsection_heading(UI_TEXT.coin_pair_label));
                if let Some(pair) = self.render_pair_selector(ui) {
                    events.push(CoinInformationEvent::CoinPair(pair));
                }
                ui.end_row();

                ui.label(colored_subsection_heading(UI_TEXT.time_unit_label));
                if let Some(unit) = self.render_time_unit_selector(ui) {
                    events.push(CoinInformationEvent::TimeUnit(unit));
                }
                ui.end_row();

                let text_rows: [(&str, &mut String, &str); 3] = [
                    (UI_TEXT.capital_label, &mut *self.capital, "1.0"),
                    (UI_TEXT.stop_loss_label, &mut *self.stop_loss, "0"),
                    (
                        UI_TEXT.data_points_label,
                        &mut *self.data_points,
                        UI_TEXT.data_points_hint,
                    ),
                ];
                for (label, text, hint) in text_rows {
                    ui.label(colored_subsection_heading(label));
                    ui.add(
                        TextEdit::singleline(text)
                            .hint_text(hint)
                            .desired_width(UI_CONFIG.text_field_width),
                    );
                    ui.end_row();
                }
            });

        events
    }
}

// ============================================================================
// STRATEGY
// ============================================================================

/// Buy and sell condition rows.
pub struct StrategyPanel<'a> {
    strategy: &'a StrategyBuilder,
}

impl<'a> StrategyPanel<'a> {
    pub fn new(strategy: &'a StrategyBuilder) -> Self {
        Self { strategy }
    }

    fn render_side(&self, ui: &mut Ui, side: Side, events: &mut Vec<StrategyEvent>) {
        let (heading, color) = match side {
            Side::Buy => (UI_TEXT.buy_strategy_heading, UI_CONFIG.colors.buy_heading),
            Side::Sell => (UI_TEXT.sell_strategy_heading, UI_CONFIG.colors.sell_heading),
        };
        ui.label_subheader(heading, color);

        for (index, row) in self.strategy.rows(side).iter().enumerate() {
            let mut edited = row.clone();
            ui.horizontal(|ui| {
                render_condition_row(ui, side, index, &mut edited);
            });
            if edited != *row {
                events.push(StrategyEvent::RowChanged { side, index, row: edited });
            }
        }

        ui.horizontal(|ui| {
            if ui.small_button(UI_TEXT.add_condition).clicked() {
                events.push(StrategyEvent::AddCondition(side));
            }
            let can_remove = self.strategy.can_remove(side);
            if ui
                .add_enabled(can_remove, eframe::egui::Button::new(UI_TEXT.remove_condition).small())
                .clicked()
            {
                events.push(StrategyEvent::RemoveCondition(side));
            }
        });
    }
}

fn render_condition_row(ui: &mut Ui, side: Side, index: usize, row: &mut ConditionRow) {
    let field_text = row
        .field
        .map(|f| f.label().to_string())
        .unwrap_or_else(|| UI_TEXT.indicator_placeholder.to_string());
    ComboBox::from_id_salt(("condition_field", side, index))
        .selected_text(field_text)
        .width(150.0)
        .show_ui(ui, |ui| {
            for field in IndicatorField::ALL {
                ui.selectable_value(&mut row.field, Some(field), field.label());
            }
        });

    let comparator_text = row
        .comparator
        .map(|c| c.symbol().to_string())
        .unwrap_or_else(|| UI_TEXT.comparator_placeholder.to_string());
    ComboBox::from_id_salt(("condition_comparator", side, index))
        .selected_text(comparator_text)
        .width(70.0)
        .show_ui(ui, |ui| {
            for comparator in Comparator::iter() {
                ui.selectable_value(&mut row.comparator, Some(comparator), comparator.symbol());
            }
        });

    ui.add(
        TextEdit::singleline(&mut row.value)
            .hint_text(UI_TEXT.value_hint)
            .desired_width(UI_CONFIG.condition_value_width),
    );

    ui.menu_button("▾", |ui| {
        let matching = suggestions(&row.value);
        if matching.is_empty() {
            ui.label_subdued(UI_TEXT.no_suggestions);
        }
        for suggestion in matching {
            if ui.button(suggestion).clicked() {
                row.value = suggestion.to_string();
                ui.close();
            }
        }
    });
}

#[derive(Debug, Clone, PartialEq)]
pub enum StrategyEvent {
    RowChanged {
        side: Side,
        index: usize,
        row: ConditionRow,
    },
    AddCondition(Side),
    RemoveCondition(Side),
}

impl<'a> Panel for StrategyPanel<'a> {
    type Event = StrategyEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.strategy_heading);

        self.render_side(ui, Side::Buy, &mut events);
        ui.add_space(8.0);
        self.render_side(ui, Side::Sell, &mut events);

        events
    }
}

// ============================================================================
// PLOT OPTIONS
// ============================================================================

/// Indicator checkboxes. The event carries the full new set.
pub struct PlotOptionsPanel {
    toggles: IndicatorToggles,
}

impl PlotOptionsPanel {
    pub fn new(toggles: IndicatorToggles) -> Self {
        Self { toggles }
    }
}

impl Panel for PlotOptionsPanel {
    type Event = IndicatorToggles;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let previous = self.toggles;
        spaced_separator(ui);
        section_heading(ui, UI_TEXT.plot_options_heading);

        ui.checkbox(&mut self.toggles.bollinger, UI_TEXT.toggle_bollinger);
        ui.checkbox(&mut self.toggles.movingaverage9, UI_TEXT.toggle_moving_average_9);
        ui.checkbox(&mut self.toggles.movingaverage15, UI_TEXT.toggle_moving_average_15);
        ui.checkbox(&mut self.toggles.macd, UI_TEXT.toggle_macd);
        ui.checkbox(&mut self.toggles.rsi, UI_TEXT.toggle_rsi);

        if self.toggles != previous {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!("Plot toggles changed: {:?}", self.toggles);
            }
            vec![self.toggles]
        } else {
            Vec::new()
        }
    }
}
