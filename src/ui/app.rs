use chrono::{DateTime, Local};
use eframe::{Frame, egui};
use poll_promise::Promise;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::api::{BacktestClient, BacktestError, BacktestQuery, BacktestResult};
use crate::domain::CoinPair;
use crate::form::{BacktestForm, FormError};
use crate::ui::config::UI_TEXT;
use crate::ui::ui_plot_view::PlotView;
use crate::ui::utils::setup_custom_visuals;
use crate::utils::app_time::AppInstant;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Everything that can go wrong between pressing Begin and drawing the chart.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Backtest(#[from] BacktestError),
}

/// A blocking message box. Only one is shown at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl From<&AppError> for Alert {
    fn from(error: &AppError) -> Self {
        Self {
            title: UI_TEXT.alert_title.to_string(),
            message: error.to_string(),
        }
    }
}

/// The one backtest allowed in flight.
pub(super) struct RunningBacktest {
    pub(super) query: BacktestQuery,
    pub(super) started: AppInstant,
    pub(super) promise: Promise<Result<BacktestResult, BacktestError>>,
}

#[derive(Deserialize, Serialize)]
#[serde(default)] // Fields missing from an older save fall back to defaults
pub struct BacktestDashboardApp {
    pub(super) form: BacktestForm,

    #[serde(skip)]
    pub(super) client: Option<BacktestClient>,

    // Latest successful run, and what it was run on
    #[serde(skip)]
    pub(super) result: Option<Arc<BacktestResult>>,
    #[serde(skip)]
    pub(super) result_query: Option<BacktestQuery>,

    #[serde(skip)]
    pub(super) running: Option<RunningBacktest>,

    // Coin pairs the selected exchange trades, fetched from the service
    #[serde(skip)]
    pub(super) markets_promise: Option<Promise<Result<Vec<CoinPair>, BacktestError>>>,
    #[serde(skip)]
    pub(super) market_pairs: Option<Vec<CoinPair>>,

    #[serde(skip)]
    pub(super) last_error: Option<AppError>,
    #[serde(skip)]
    pub(super) alert: Option<Alert>,

    #[serde(skip)]
    pub(super) plot_view: PlotView,

    // Help panel visibility
    #[serde(skip)]
    pub(super) show_help: bool,

    #[serde(skip)]
    pub(super) last_elapsed: Option<Duration>,
    #[serde(skip)]
    pub(super) last_completed_at: Option<DateTime<Local>>,
}

impl Default for BacktestDashboardApp {
    fn default() -> Self {
        Self {
            form: BacktestForm::default(),
            client: None,
            result: None,
            result_query: None,
            running: None,
            markets_promise: None,
            market_pairs: None,
            last_error: None,
            alert: None,
            plot_view: PlotView::new(),
            show_help: false,
            last_elapsed: None,
            last_completed_at: None,
        }
    }
}

impl BacktestDashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, client: BacktestClient) -> Self {
        let mut app: BacktestDashboardApp;

        // Attempt to load the persisted state
        if let Some(storage) = cc.storage {
            if let Some(value) = eframe::get_value(storage, eframe::APP_KEY) {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_state_serde {
                    log::info!("Successfully loaded persisted state");
                }
                app = value;
            } else {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_state_serde {
                    log::info!("No saved dashboard state in storage. Creating anew.");
                }
                app = BacktestDashboardApp::default();
            }
        } else {
            app = BacktestDashboardApp::default();
        }

        // A hand-edited save may have emptied a side
        app.form.strategy.normalize();

        log::info!("Backtesting service at {}", client.settings().base_url);
        app.client = Some(client);
        app.start_markets_fetch();

        app
    }

    /// Quote asset of the pair on screen; the profit and price axis are in it.
    pub(super) fn quote_currency(&self) -> &str {
        self.result_query
            .as_ref()
            .map(|q| q.pair.quote())
            .unwrap_or("")
    }

    pub(super) fn show_error(&mut self, error: AppError) {
        log::warn!("{}", error);
        self.alert = Some(Alert::from(&error));
        self.last_error = Some(error);
    }

    pub(super) fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Swaps the pair list for a new exchange. A selected pair the exchange
    /// does not trade is cleared.
    pub(super) fn apply_market_pairs(&mut self, pairs: Vec<CoinPair>) {
        if let Some(selected) = self.form.coin_pair.as_deref() {
            let still_listed = pairs.iter().any(|p| p.as_str() == selected);
            if !still_listed {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_ui_interactions {
                    log::info!("{} is not traded on this exchange, clearing it", selected);
                }
                self.form.coin_pair = None;
            }
        }
        self.market_pairs = Some(pairs);
    }
}

impl eframe::App for BacktestDashboardApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Drop any in-flight work so the worker's sender has nobody to panic at
        self.running = None;
        self.markets_promise = None;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Application shutdown complete.");
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        self.poll_backtest(ctx);
        self.poll_markets(ctx);

        self.handle_global_shortcuts(ctx);

        self.render_side_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);
        self.render_alert(ctx);
        if self.show_help {
            self.render_help_panel(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::StrategyError;

    #[test]
    fn alerts_carry_the_error_text() {
        let error = AppError::from(BacktestError::Status(500));
        let alert = Alert::from(&error);
        assert_eq!(alert.title, "Uh oh!");
        assert_eq!(
            alert.message,
            "Something went wrong: Response code 500. Please try again."
        );
    }

    #[test]
    fn form_errors_pass_through_unchanged() {
        let error = AppError::from(FormError::MissingTimeUnit);
        assert_eq!(error.to_string(), FormError::MissingTimeUnit.to_string());

        let nested = AppError::from(FormError::from(StrategyError::MissingField {
            side: crate::strategy::Side::Buy,
            row: 1,
        }));
        assert_eq!(
            nested.to_string(),
            StrategyError::MissingField {
                side: crate::strategy::Side::Buy,
                row: 1,
            }
            .to_string()
        );
    }

    #[test]
    fn switching_exchange_clears_unlisted_pair() {
        let mut app = BacktestDashboardApp::default();
        app.form.coin_pair = Some("XMR/BTC".to_string());

        app.apply_market_pairs(vec![CoinPair::parse("ETH/BTC").unwrap()]);
        assert_eq!(app.form.coin_pair, None);
        assert_eq!(app.market_pairs.as_ref().map(Vec::len), Some(1));

        app.form.coin_pair = Some("ETH/BTC".to_string());
        app.apply_market_pairs(vec![CoinPair::parse("ETH/BTC").unwrap()]);
        assert_eq!(app.form.coin_pair.as_deref(), Some("ETH/BTC"));
    }

    #[test]
    fn only_the_form_is_persisted() {
        let mut app = BacktestDashboardApp::default();
        app.form.capital = "2.5".to_string();
        app.show_help = true;
        app.result = Some(Arc::new(BacktestResult::default()));

        let json = serde_json::to_string(&app).unwrap();
        let restored: BacktestDashboardApp = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.form, app.form);
        assert!(!restored.show_help);
        assert!(restored.result.is_none());
    }
}
