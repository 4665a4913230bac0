use eframe::egui::Color32;
use egui_plot::{HLine, Line, LineStyle, MarkerShape, PlotPoints, PlotUi, Points};

use crate::api::{BacktestResult, PricePoint, series};
use crate::config::PLOT_CONFIG;
use crate::form::IndicatorToggles;
use crate::ui::ui_text::UI_TEXT;

/// Context passed to every layer during rendering.
pub struct LayerContext<'a> {
    pub result: &'a BacktestResult,
    pub toggles: &'a IndicatorToggles,
}

/// A standardized layer in the plot stack.
pub trait PlotLayer {
    fn render(&self, ui: &mut PlotUi, ctx: &LayerContext);
}

fn series_line(name: &str, points: Vec<PricePoint>, color: Color32) -> Option<Line<'static>> {
    if points.is_empty() {
        return None;
    }
    Some(
        Line::new(name.to_string(), PlotPoints::new(points))
            .color(color)
            .width(PLOT_CONFIG.line_width),
    )
}

// ============================================================================
// PRICE CHART
// ============================================================================

pub struct ClosingPriceLayer;

impl PlotLayer for ClosingPriceLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if let Some(line) = series_line(
            UI_TEXT.series_closing_price,
            ctx.result.closing_prices.clone(),
            PLOT_CONFIG.closing_price_color,
        ) {
            plot_ui.line(line);
        }
    }
}

/// Upper and lower bands share a name so the legend toggles them together.
pub struct BollingerBandLayer;

impl PlotLayer for BollingerBandLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if !ctx.toggles.bollinger {
            return;
        }

        for names in [series::BOLLINGER_UPPER, series::BOLLINGER_LOWER] {
            if let Some(line) = series_line(
                UI_TEXT.series_bollinger,
                ctx.result.indicators.points(names),
                PLOT_CONFIG.bollinger_color,
            ) {
                plot_ui.line(line.style(LineStyle::dashed_dense()));
            }
        }
    }
}

pub struct MovingAverageLayer;

impl PlotLayer for MovingAverageLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let averages = [
            (
                ctx.toggles.movingaverage9,
                series::MOVING_AVERAGE_9,
                UI_TEXT.series_moving_average_9,
                PLOT_CONFIG.moving_average_9_color,
            ),
            (
                ctx.toggles.movingaverage15,
                series::MOVING_AVERAGE_15,
                UI_TEXT.series_moving_average_15,
                PLOT_CONFIG.moving_average_15_color,
            ),
        ];

        for (visible, names, label, color) in averages {
            if !visible {
                continue;
            }
            if let Some(line) = series_line(label, ctx.result.indicators.points(names), color) {
                plot_ui.line(line);
            }
        }
    }
}

/// Buys and sells as filled dots on top of everything else.
pub struct TradeMarkerLayer;

impl PlotLayer for TradeMarkerLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let markers = [
            (
                &ctx.result.buys,
                UI_TEXT.series_buys,
                PLOT_CONFIG.buy_marker_color,
            ),
            (
                &ctx.result.sells,
                UI_TEXT.series_sells,
                PLOT_CONFIG.sell_marker_color,
            ),
        ];

        for (trades, label, color) in markers {
            if trades.is_empty() {
                continue;
            }
            plot_ui.points(
                Points::new(label, PlotPoints::new(trades.clone()))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(PLOT_CONFIG.marker_radius)
                    .color(color),
            );
        }
    }
}

// ============================================================================
// OSCILLATOR STRIP
// ============================================================================

pub struct RsiLayer;

impl PlotLayer for RsiLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if !ctx.toggles.rsi {
            return;
        }
        let Some(line) = series_line(
            UI_TEXT.series_rsi,
            ctx.result.indicators.points(series::RSI),
            PLOT_CONFIG.rsi_color,
        ) else {
            return;
        };

        for level in PLOT_CONFIG.rsi_guide_levels {
            plot_ui.hline(
                HLine::new(UI_TEXT.series_rsi_guides, level)
                    .color(PLOT_CONFIG.rsi_guide_color)
                    .style(LineStyle::dashed_loose()),
            );
        }
        plot_ui.line(line);
    }
}

pub struct MacdLayer;

impl PlotLayer for MacdLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if !ctx.toggles.macd {
            return;
        }
        if let Some(line) = series_line(
            UI_TEXT.series_macd,
            ctx.result.indicators.points(series::MACD),
            PLOT_CONFIG.macd_color,
        ) {
            plot_ui.hline(
                HLine::new(UI_TEXT.series_macd_zero, 0.0).color(PLOT_CONFIG.macd_zero_color),
            );
            plot_ui.line(line);
        }
    }
}

/// Whether the oscillator strip has anything to draw.
pub fn has_oscillators(result: &BacktestResult, toggles: &IndicatorToggles) -> bool {
    (toggles.rsi && result.indicators.has(series::RSI))
        || (toggles.macd && result.indicators.has(series::MACD))
}
