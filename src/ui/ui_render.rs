use eframe::egui::{
    Button, CentralPanel, Color32, Context, Frame, Grid, Id, Key, Margin, Modal, RichText,
    ScrollArea, SidePanel, Spinner, TopBottomPanel, Ui, Window,
};
use std::time::Duration;

use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_panels::{
    CoinInformationEvent, CoinInformationPanel, Panel, PlotOptionsPanel, StrategyEvent,
    StrategyPanel,
};
use crate::ui::utils::{format_amount, spaced_separator};
use crate::utils::time_utils::{format_duration_short, local_clock};

use super::app::BacktestDashboardApp;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

impl BacktestDashboardApp {
    pub(super) fn render_side_panel(&mut self, ctx: &Context) {
        let side_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::same(8));
        SidePanel::left("control_panel")
            .min_width(UI_CONFIG.side_panel_width)
            .frame(side_panel_frame)
            .show(ctx, |ui| {
                ScrollArea::vertical()
                    .id_salt("control_panel_scroll")
                    .show(ui, |ui| {
                        let coin_events = self.coin_information_panel(ui);
                        self.apply_coin_information_events(coin_events);

                        spaced_separator(ui);
                        let strategy_events = StrategyPanel::new(&self.form.strategy).render(ui);
                        self.apply_strategy_events(strategy_events);

                        if let Some(toggles) = PlotOptionsPanel::new(self.form.indicators)
                            .render(ui)
                            .pop()
                        {
                            self.form.indicators = toggles;
                        }

                        spaced_separator(ui);
                        self.render_begin_button(ui);
                        self.render_profit(ui);
                        ui.add_space(10.0);
                    });
            });
    }

    fn coin_information_panel(&mut self, ui: &mut Ui) -> Vec<CoinInformationEvent> {
        let form = &mut self.form;
        let mut panel = CoinInformationPanel::new(
            form.exchange,
            form.coin_pair.clone(),
            form.time_unit,
            &mut form.capital,
            &mut form.stop_loss,
            &mut form.data_points,
            self.market_pairs.as_deref(),
        );
        panel.render(ui)
    }

    fn apply_coin_information_events(&mut self, events: Vec<CoinInformationEvent>) {
        for event in events {
            match event {
                CoinInformationEvent::Exchange(exchange) => {
                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_ui_interactions {
                        log::info!("Exchange switched to {}", exchange);
                    }
                    self.form.exchange = Some(exchange);
                    self.start_markets_fetch();
                }
                CoinInformationEvent::CoinPair(pair) => {
                    self.form.coin_pair = Some(pair);
                }
                CoinInformationEvent::TimeUnit(unit) => {
                    self.form.time_unit = Some(unit);
                }
            }
        }
    }

    fn apply_strategy_events(&mut self, events: Vec<StrategyEvent>) {
        for event in events {
            match event {
                StrategyEvent::RowChanged { side, index, row } => {
                    if let Some(slot) = self.form.strategy.rows_mut(side).get_mut(index) {
                        *slot = row;
                    }
                }
                StrategyEvent::AddCondition(side) => self.form.strategy.add_condition(side),
                StrategyEvent::RemoveCondition(side) => {
                    self.form.strategy.remove_condition(side);
                }
            }
        }
    }

    fn render_begin_button(&mut self, ui: &mut Ui) {
        let running = self.is_running();
        let label = if running {
            UI_TEXT.begin_running
        } else {
            UI_TEXT.begin_button
        };

        ui.horizontal(|ui| {
            let button = Button::new(RichText::new(label).strong()).min_size([120.0, 28.0].into());
            if ui.add_enabled(!running, button).clicked() {
                self.start_backtest();
            }
            if running {
                ui.add(Spinner::new());
            }
        });
    }

    fn render_profit(&self, ui: &mut Ui) {
        let Some(profit) = self.result.as_ref().and_then(|r| r.profit) else {
            return;
        };
        ui.add_space(8.0);
        let color = if profit >= 0.0 {
            UI_CONFIG.colors.profit_positive
        } else {
            UI_CONFIG.colors.profit_negative
        };
        ui.label(
            RichText::new(format!(
                "{}: {}",
                UI_TEXT.profit_label,
                format_amount(profit, self.quote_currency())
            ))
            .heading()
            .color(color),
        );
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::same(6));
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                if self.is_running() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(ui.available_height() / 3.0);
                        ui.add(Spinner::new().size(48.0));
                        ui.label_warning(UI_TEXT.running_heading);
                    });
                    return;
                }

                let Some(result) = self.result.clone() else {
                    Self::render_placeholder(ui, UI_TEXT.placeholder_heading, UI_TEXT.placeholder_body);
                    return;
                };
                if result.is_empty() {
                    Self::render_placeholder(ui, UI_TEXT.no_data_heading, "");
                    return;
                }

                ui.horizontal(|ui| {
                    if ui.small_button(UI_TEXT.reset_view).clicked() {
                        self.plot_view.request_reset();
                    }
                });

                let quote = self.quote_currency().to_string();
                self.plot_view
                    .show(ui, &result, &self.form.indicators, &quote);
            });
    }

    fn render_placeholder(ui: &mut Ui, heading: &str, body: &str) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() / 3.0);
            ui.label_header(heading);
            if !body.is_empty() {
                ui.label_subdued(body);
            }
        });
    }

    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        let status_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    // 1. Profit
                    if let Some(profit) = self.result.as_ref().and_then(|r| r.profit) {
                        let color = if profit >= 0.0 {
                            UI_CONFIG.colors.profit_positive
                        } else {
                            UI_CONFIG.colors.profit_negative
                        };
                        ui.metric(
                            UI_TEXT.profit_label,
                            &format_amount(profit, self.quote_currency()),
                            color,
                        );
                        ui.separator();
                    }

                    // 2. Request state
                    let (state, color) = self.status_line();
                    ui.label(RichText::new(state).small().color(color));
                    ui.separator();

                    // 3. Timing
                    if let Some(elapsed) = self.last_elapsed {
                        ui.metric(
                            UI_TEXT.status_elapsed,
                            &format_duration_short(elapsed),
                            UI_CONFIG.colors.status_ok,
                        );
                    }
                    if let Some(at) = self.last_completed_at {
                        ui.metric(UI_TEXT.status_last_run, &local_clock(at), UI_CONFIG.colors.status_ok);
                    }
                    if let Some(span) = self.result_span() {
                        ui.metric(
                            UI_TEXT.status_span,
                            &format_duration_short(span),
                            UI_CONFIG.colors.status_ok,
                        );
                    }

                    // 4. Service
                    if let Some(client) = &self.client {
                        ui.separator();
                        ui.metric(
                            UI_TEXT.status_service,
                            &client.settings().backtest_url(),
                            Color32::GRAY,
                        );
                    }
                });
            });
    }

    fn status_line(&self) -> (String, Color32) {
        if let Some(running) = &self.running {
            return (
                format!("{} {} @ {}", UI_TEXT.status_running, running.query.pair, running.query.period),
                UI_CONFIG.colors.status_busy,
            );
        }
        if self.last_error.is_some() {
            return (UI_TEXT.status_failed.to_string(), UI_CONFIG.colors.status_error);
        }
        match &self.result_query {
            Some(query) => (
                format!("{} | {} {} @ {}", UI_TEXT.status_ready, query.exchange, query.pair, query.period),
                UI_CONFIG.colors.status_ok,
            ),
            None => (UI_TEXT.status_ready.to_string(), UI_CONFIG.colors.status_ok),
        }
    }

    /// Market time covered by the chart: data points times candle width.
    fn result_span(&self) -> Option<Duration> {
        let points = self.result.as_ref()?.closing_prices.len() as u64;
        let unit_ms = self.result_query.as_ref()?.period.duration_ms();
        (points > 0).then(|| Duration::from_millis(points * unit_ms.max(0) as u64))
    }

    pub(super) fn render_alert(&mut self, ctx: &Context) {
        let Some(alert) = self.alert.clone() else {
            return;
        };

        let response = Modal::new(Id::new("alert_modal")).show(ctx, |ui| {
            ui.set_max_width(420.0);
            ui.heading(RichText::new(&alert.title).color(UI_CONFIG.colors.status_error));
            ui.add_space(8.0);
            ui.label_error(&alert.message);
            ui.add_space(12.0);
            ui.vertical_centered(|ui| ui.button(UI_TEXT.alert_dismiss).clicked())
                .inner
        });

        if response.inner || response.should_close() {
            self.dismiss_alert();
        }
    }

    fn render_shortcut_rows(ui: &mut Ui, rows: &[(&str, &str)]) {
        for (key, description) in rows {
            ui.label(RichText::new(*key).monospace().strong());
            ui.label(*description);
            ui.end_row();
        }
    }

    pub(super) fn render_help_panel(&mut self, ctx: &Context) {
        Window::new(UI_TEXT.help_title)
            .open(&mut self.show_help)
            .resizable(false)
            .collapsible(false)
            .default_width(400.0)
            .show(ctx, |ui| {
                ui.label_subdued(UI_TEXT.help_intro);
                ui.add_space(5.0);

                let shortcuts = [
                    ("H", UI_TEXT.help_toggle),
                    ("Esc", UI_TEXT.help_close),
                    ("R", UI_TEXT.help_reset_view),
                    ("Ctrl+Enter", UI_TEXT.help_begin),
                    ("Mouse", UI_TEXT.help_zoom),
                ];

                Grid::new("shortcuts_grid")
                    .num_columns(2)
                    .spacing([20.0, 8.0])
                    .striped(true)
                    .show(ui, |ui| {
                        Self::render_shortcut_rows(ui, &shortcuts);
                    });

                ui.add_space(5.0);
            });
    }

    pub(super) fn handle_global_shortcuts(&mut self, ctx: &Context) {
        // Letter keys would otherwise fire while typing a value
        let typing = ctx.wants_keyboard_input();

        let (toggle_help, escape, reset_view, begin) = ctx.input(|i| {
            (
                !typing && i.key_pressed(Key::H),
                i.key_pressed(Key::Escape),
                !typing && i.key_pressed(Key::R),
                i.modifiers.command && i.key_pressed(Key::Enter),
            )
        });

        if escape {
            if self.alert.is_some() {
                self.dismiss_alert();
            } else {
                self.show_help = false;
            }
        }
        if toggle_help {
            self.show_help = !self.show_help;
        }
        if reset_view {
            self.plot_view.request_reset();
        }
        if begin && self.alert.is_none() {
            self.start_backtest();
        }
    }
}
