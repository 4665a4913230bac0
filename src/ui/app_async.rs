use chrono::Local;
use eframe::egui;
use poll_promise::Promise;
use std::future::Future;
use std::sync::Arc;

use crate::api::BacktestError;
use crate::config::MARKET;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::CoinPair;
use crate::ui::app::{AppError, BacktestDashboardApp, RunningBacktest};
use crate::utils::app_time::{elapsed_since, now};

type Pending<T> = Promise<Result<T, BacktestError>>;

impl BacktestDashboardApp {
    pub(super) fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Validates the form and sends it off. Ignored while a backtest is still out.
    pub(super) fn start_backtest(&mut self) {
        if self.is_running() {
            return;
        }

        let request = match self.form.build_request() {
            Ok(request) => request,
            Err(e) => {
                self.show_error(AppError::from(e));
                return;
            }
        };
        let Some(client) = self.client.clone() else {
            return;
        };

        let query = request.query.clone();
        let promise = spawn_request("backtest", async move { client.run(&request).await });

        self.running = Some(RunningBacktest {
            query,
            started: now(),
            promise,
        });
    }

    pub(super) fn poll_backtest(&mut self, ctx: &egui::Context) {
        let Some(running) = self.running.take() else {
            return;
        };
        let RunningBacktest {
            query,
            started,
            promise,
        } = running;

        let result = match promise.try_take() {
            Ok(result) => result,
            Err(promise) => {
                self.running = Some(RunningBacktest {
                    query,
                    started,
                    promise,
                });
                ctx.request_repaint();
                return;
            }
        };

        self.last_elapsed = Some(elapsed_since(started));
        self.last_completed_at = Some(Local::now());

        match result {
            Ok(result) => {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_ui_interactions {
                    log::info!(
                        "Showing backtest for {} ({} data points)",
                        query.pair,
                        result.closing_prices.len()
                    );
                }
                self.result = Some(Arc::new(result));
                self.result_query = Some(query);
                self.last_error = None;
                self.plot_view.request_reset();
            }
            Err(e) => {
                self.result = None;
                self.result_query = None;
                self.show_error(AppError::from(e));
            }
        }
    }

    /// Asks the service which pairs the selected exchange trades.
    pub(super) fn start_markets_fetch(&mut self) {
        let (Some(exchange), Some(client)) = (self.form.exchange, self.client.clone()) else {
            return;
        };

        // Any older request is for the previous exchange
        self.markets_promise = None;
        self.market_pairs = None;

        let promise = spawn_request("markets", async move { client.markets(exchange).await });
        self.markets_promise = Some(promise);
    }

    pub(super) fn poll_markets(&mut self, ctx: &egui::Context) {
        let Some(promise) = self.markets_promise.take() else {
            return;
        };
        match promise.try_take() {
            Ok(Ok(pairs)) if !pairs.is_empty() => {
                log::info!("Service lists {} coin pairs", pairs.len());
                self.apply_market_pairs(pairs);
            }
            Ok(Ok(_)) => {
                log::warn!("Service listed no coin pairs, using the built-in list");
                self.apply_market_pairs(builtin_pairs());
            }
            Ok(Err(e)) => {
                log::warn!("Could not fetch coin pairs ({}), using the built-in list", e);
                self.apply_market_pairs(builtin_pairs());
            }
            Err(pending) => {
                self.markets_promise = Some(pending);
                ctx.request_repaint();
            }
        }
    }
}

fn builtin_pairs() -> Vec<CoinPair> {
    MARKET
        .coin_pairs
        .iter()
        .filter_map(|pair| CoinPair::parse(pair).ok())
        .collect()
}

/// Runs `future` off the UI thread: a worker thread with its own runtime on
/// native, the browser's event loop on wasm.
#[cfg(not(target_arch = "wasm32"))]
fn spawn_request<T, F>(name: &str, future: F) -> Pending<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T, BacktestError>> + Send + 'static,
{
    Promise::spawn_thread(name, move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| BacktestError::Transport(format!("could not start a runtime: {}", e)))?;
        rt.block_on(future)
    })
}

#[cfg(target_arch = "wasm32")]
fn spawn_request<T, F>(_name: &str, future: F) -> Pending<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T, BacktestError>> + 'static,
{
    Promise::spawn_local(future)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendSettings;
    use crate::domain::{Exchange, TimeUnit};
    use crate::form::BacktestForm;
    use crate::strategy::{Comparator, ConditionRow, IndicatorField, Side};
    use crate::api::BacktestResult;
    use crate::BacktestClient;

    fn ready_form(pair: &str) -> BacktestForm {
        let mut form = BacktestForm {
            exchange: Some(Exchange::Bittrex),
            coin_pair: Some(pair.to_string()),
            time_unit: Some(TimeUnit::OneHour),
            capital: "2".to_string(),
            ..Default::default()
        };
        form.strategy.rows_mut(Side::Buy)[0] = ConditionRow {
            field: Some(IndicatorField::CurrentPrice),
            comparator: Some(Comparator::LessThan),
            value: "Moving Average (9 Period)".to_string(),
        };
        form.strategy.rows_mut(Side::Sell)[0] = ConditionRow {
            field: Some(IndicatorField::CurrentPrice),
            comparator: Some(Comparator::GreaterThan),
            value: "Moving Average (9 Period)".to_string(),
        };
        form
    }

    #[test]
    fn builtin_list_parses_every_pair() {
        assert_eq!(builtin_pairs().len(), MARKET.coin_pairs.len());
    }

    #[test]
    fn begin_with_an_incomplete_form_raises_an_alert() {
        let mut app = BacktestDashboardApp::default();
        app.start_backtest();

        assert!(!app.is_running());
        let alert = app.alert.clone().expect("alert shown");
        assert_eq!(alert.message, "Please select a coin pair.");
        assert!(matches!(app.last_error, Some(AppError::Form(_))));
    }

    #[test]
    fn second_begin_leaves_the_pending_backtest_alone() {
        let mut app = BacktestDashboardApp {
            client: Some(BacktestClient::new(BackendSettings::default()).unwrap()),
            form: ready_form("ETH/BTC"),
            ..Default::default()
        };

        let pending_query = ready_form("LTC/BTC").build_request().unwrap().query;
        let (sender, promise) = Promise::new();
        app.running = Some(RunningBacktest {
            query: pending_query.clone(),
            started: now(),
            promise,
        });

        app.start_backtest();

        assert!(app.alert.is_none());
        assert!(app.last_error.is_none());
        let running = app.running.as_ref().expect("still running");
        assert_eq!(running.query, pending_query);

        // Settling the original sender settles the promise that is still held
        sender.send(Ok(BacktestResult::default()));
        assert!(running.promise.ready().is_some());
    }
}
