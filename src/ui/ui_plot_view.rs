use eframe::egui::{self, Id};
use egui_plot::{AxisHints, Corner, HPlacement, Legend, Plot, PlotBounds, PlotUi};

use crate::api::{BacktestResult, series};
use crate::config::PLOT_CONFIG;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::form::IndicatorToggles;
use crate::ui::plot_layers::{
    BollingerBandLayer, ClosingPriceLayer, LayerContext, MacdLayer, MovingAverageLayer, PlotLayer,
    RsiLayer, TradeMarkerLayer, has_oscillators,
};
use crate::ui::plot_zoom::{ZoomLimits, clamp_axis, differs};
use crate::ui::ui_text::UI_TEXT;
use crate::utils::maths_utils::{Extent, finite_extent};

const PRICE_PLOT_ID: &str = "backtest_price_plot";
const OSCILLATOR_PLOT_ID: &str = "backtest_oscillator_plot";
const LINKED_X_AXIS: &str = "backtest_linked_x";

/// Full extents the zoom is measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DataExtents {
    x: Extent,
    y: Extent,
}

impl DataExtents {
    /// Everything drawn on the price chart: closing prices, trades and visible bands.
    fn of(result: &BacktestResult, toggles: &IndicatorToggles) -> Option<Self> {
        let x = result.x_extent()?.non_degenerate();

        let mut ys: Vec<f64> = result
            .closing_prices
            .iter()
            .chain(&result.buys)
            .chain(&result.sells)
            .map(|p| p[1])
            .collect();
        if toggles.bollinger {
            for names in [series::BOLLINGER_UPPER, series::BOLLINGER_LOWER] {
                ys.extend(result.indicators.points(names).iter().map(|p| p[1]));
            }
        }
        let y = finite_extent(&ys)?.non_degenerate();

        Some(Self { x, y })
    }
}

/// The chart in the central panel: price plot plus an optional oscillator strip.
pub struct PlotView {
    limits: ZoomLimits,
    reset_requested: bool,
}

impl Default for PlotView {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotView {
    pub fn new() -> Self {
        Self {
            limits: ZoomLimits::default(),
            reset_requested: true,
        }
    }

    /// Shows the full data extent on the next frame.
    pub fn request_reset(&mut self) {
        self.reset_requested = true;
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        result: &BacktestResult,
        toggles: &IndicatorToggles,
        quote: &str,
    ) {
        let Some(extents) = DataExtents::of(result, toggles) else {
            return;
        };
        let reset = std::mem::take(&mut self.reset_requested);
        let limits = self.limits;
        let show_oscillators = has_oscillators(result, toggles);

        let price_height = if show_oscillators {
            (ui.available_height() - PLOT_CONFIG.oscillator_height - ui.spacing().item_spacing.y)
                .max(PLOT_CONFIG.oscillator_height)
        } else {
            ui.available_height()
        };

        let ctx = LayerContext { result, toggles };

        let response = Plot::new(PRICE_PLOT_ID)
            .height(price_height)
            .legend(Legend::default().position(Corner::LeftTop))
            .link_axis(Id::new(LINKED_X_AXIS), [true, false])
            .custom_x_axes(vec![x_axis()])
            .custom_y_axes(vec![price_axis(quote)])
            .label_formatter(|name, value| {
                if name.is_empty() {
                    format!("#{:.0}\n{:.8}", value.x, value.y)
                } else {
                    format!("{}\n#{:.0}\n{:.8}", name, value.x, value.y)
                }
            })
            .allow_zoom(true)
            .allow_drag(true)
            .allow_scroll(true)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .show(ui, |plot_ui| {
                if reset {
                    plot_ui.set_plot_bounds_x(extents.x.min..=extents.x.max);
                    plot_ui.set_plot_bounds_y(extents.y.min..=extents.y.max);
                } else {
                    clamp_view(plot_ui, extents, &limits, true);
                }

                // Back to front
                let layers: Vec<Box<dyn PlotLayer>> = vec![
                    Box::new(ClosingPriceLayer),
                    Box::new(BollingerBandLayer),
                    Box::new(MovingAverageLayer),
                    Box::new(TradeMarkerLayer),
                ];
                for layer in layers {
                    layer.render(plot_ui, &ctx);
                }
            });

        if response.response.double_clicked() {
            self.request_reset();
        }
        if reset || out_of_limits(response.transform.bounds(), extents, &limits) {
            ui.ctx().request_repaint();
        }

        if !show_oscillators {
            return;
        }

        let response = Plot::new(OSCILLATOR_PLOT_ID)
            .height(PLOT_CONFIG.oscillator_height)
            .legend(Legend::default().position(Corner::LeftTop))
            .link_axis(Id::new(LINKED_X_AXIS), [true, false])
            .custom_x_axes(vec![x_axis()])
            .custom_y_axes(vec![
                AxisHints::new_y()
                    .label(UI_TEXT.oscillator_y_axis)
                    .placement(HPlacement::Left),
            ])
            .allow_zoom([true, false])
            .allow_drag([true, false])
            .allow_scroll([true, false])
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .show(ui, |plot_ui| {
                if reset {
                    plot_ui.set_plot_bounds_x(extents.x.min..=extents.x.max);
                } else {
                    clamp_view(plot_ui, extents, &limits, false);
                }

                let layers: Vec<Box<dyn PlotLayer>> = vec![Box::new(RsiLayer), Box::new(MacdLayer)];
                for layer in layers {
                    layer.render(plot_ui, &ctx);
                }
            });

        if response.response.double_clicked() {
            self.request_reset();
        }
    }
}

/// Pulls the view back inside the zoom limits, x always and y on request.
fn clamp_view(plot_ui: &mut PlotUi, extents: DataExtents, limits: &ZoomLimits, with_y: bool) {
    let bounds = plot_ui.plot_bounds();
    let (min, max) = (bounds.min(), bounds.max());

    let view_x = Extent::new(min[0], max[0]);
    let clamped_x = clamp_axis(extents.x, view_x, limits);
    if differs(view_x, clamped_x, extents.x.width()) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_zoom_clamps {
            log::info!("Clamped x view {:?} -> {:?}", view_x, clamped_x);
        }
        plot_ui.set_plot_bounds_x(clamped_x.min..=clamped_x.max);
    }

    if !with_y {
        return;
    }
    let view_y = Extent::new(min[1], max[1]);
    let clamped_y = clamp_axis(extents.y, view_y, limits);
    if differs(view_y, clamped_y, extents.y.width()) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_zoom_clamps {
            log::info!("Clamped y view {:?} -> {:?}", view_y, clamped_y);
        }
        plot_ui.set_plot_bounds_y(clamped_y.min..=clamped_y.max);
    }
}

// Input is applied after the build closure, so a zoom can overshoot for one frame.
fn out_of_limits(bounds: &PlotBounds, extents: DataExtents, limits: &ZoomLimits) -> bool {
    let (min, max) = (bounds.min(), bounds.max());
    let view_x = Extent::new(min[0], max[0]);
    let view_y = Extent::new(min[1], max[1]);
    differs(view_x, clamp_axis(extents.x, view_x, limits), extents.x.width())
        || differs(view_y, clamp_axis(extents.y, view_y, limits), extents.y.width())
}

fn x_axis() -> AxisHints<'static> {
    AxisHints::new_x()
        .label(UI_TEXT.plot_x_axis)
        .formatter(|grid_mark, _range| format!("{:.0}", grid_mark.value))
}

fn price_axis(quote: &str) -> AxisHints<'static> {
    let label = if quote.is_empty() {
        UI_TEXT.plot_y_axis_prefix.to_string()
    } else {
        format!("{} ({})", UI_TEXT.plot_y_axis_prefix, quote)
    };
    AxisHints::new_y()
        .label(label)
        .formatter(|grid_mark, _range| format!("{:.8}", grid_mark.value))
        .placement(HPlacement::Left)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> BacktestResult {
        serde_json::from_str(
            r#"{
                "closingPrices": [[0, 0.010], [1, 0.012], [2, 0.011]],
                "buys": [[1, 0.012]],
                "sells": [[2, 0.011]],
                "indicators": {
                    "bollinger_upper": [0, 0.013, 0.014],
                    "bollinger_lower": [0, 0.009, 0.008]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn extents_cover_visible_bands_only() {
        let result = result();
        let mut toggles = IndicatorToggles::default();

        let with_bands = DataExtents::of(&result, &toggles).unwrap();
        assert_eq!(with_bands.x, Extent::new(0.0, 2.0));
        assert_eq!(with_bands.y, Extent::new(0.008, 0.014));

        toggles.bollinger = false;
        let without = DataExtents::of(&result, &toggles).unwrap();
        assert_eq!(without.y, Extent::new(0.010, 0.012));
    }

    #[test]
    fn no_prices_means_nothing_to_draw() {
        let empty = BacktestResult::default();
        assert!(DataExtents::of(&empty, &IndicatorToggles::default()).is_none());
    }
}
