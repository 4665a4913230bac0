#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod api;
pub mod config;
pub mod domain;
pub mod form;
pub mod strategy;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use api::{BacktestClient, BacktestError, BacktestRequest, BacktestResult};
pub use config::BackendSettings;
pub use form::BacktestForm;
pub use ui::BacktestDashboardApp;
pub use utils::app_time;

// CLI argument parsing
use clap::Parser;

use crate::config::BACKEND;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the backtesting service
    #[arg(long, env = BACKEND.service.base_url_env)]
    pub backend_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    pub fn settings(&self) -> BackendSettings {
        BackendSettings::new(self.backend_url.clone(), self.timeout_secs)
    }
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext, client: BacktestClient) -> Box<dyn eframe::App> {
    let app = ui::BacktestDashboardApp::new(cc, client);
    Box::new(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_the_service() {
        let cli = Cli::try_parse_from([
            "backtest-dashboard",
            "--backend-url",
            "http://10.1.1.1:8080/",
            "--timeout-secs",
            "90",
        ])
        .unwrap();
        let settings = cli.settings();
        assert_eq!(settings.backtest_url(), "http://10.1.1.1:8080/backtest");
        assert_eq!(settings.timeout.as_secs(), 90);
    }
}
