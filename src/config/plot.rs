//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    pub closing_price_color: Color32,
    pub bollinger_color: Color32,
    pub moving_average_9_color: Color32,
    pub moving_average_15_color: Color32,
    pub buy_marker_color: Color32,
    pub sell_marker_color: Color32,
    pub rsi_color: Color32,
    pub macd_color: Color32,
    /// Overbought/oversold guide lines on the RSI strip
    pub rsi_guide_color: Color32,
    pub rsi_guide_levels: [f64; 2],
    /// MACD zero line
    pub macd_zero_color: Color32,
    /// Width of every series line
    pub line_width: f32,
    /// Radius of buy/sell markers
    pub marker_radius: f32,
    /// Zoom limits, as multiples of the full data extent (1 = everything visible)
    pub min_zoom_scale: f64,
    pub max_zoom_scale: f64,
    /// How far past the data the view may be panned, as a fraction of the full extent
    pub pan_margin_pct: f64,
    /// Height of the oscillator strip under the price chart
    pub oscillator_height: f32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    closing_price_color: Color32::from_rgb(70, 130, 180), // Steel blue
    bollinger_color: Color32::from_rgb(255, 165, 0),      // Orange
    moving_average_9_color: Color32::from_rgb(220, 20, 60), // Red
    moving_average_15_color: Color32::from_rgb(0, 170, 0), // Green
    buy_marker_color: Color32::from_rgb(0, 200, 0),
    sell_marker_color: Color32::from_rgb(230, 0, 0),
    rsi_color: Color32::from_rgb(186, 85, 211), // Orchid
    macd_color: Color32::from_rgb(0, 191, 255), // Deep sky blue
    rsi_guide_color: Color32::from_gray(110),
    rsi_guide_levels: [30.0, 70.0],
    macd_zero_color: Color32::from_rgb(70, 110, 130),
    line_width: 1.5,
    marker_radius: 4.0,
    min_zoom_scale: 1.0,
    max_zoom_scale: 8.0,
    pan_margin_pct: 0.1,
    oscillator_height: 140.0,
};
