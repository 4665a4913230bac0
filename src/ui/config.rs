use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub buy_heading: Color32,
    pub sell_heading: Color32,
    pub profit_positive: Color32,
    pub profit_negative: Color32,
    pub status_ok: Color32,
    pub status_busy: Color32,
    pub status_error: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub side_panel_width: f32,
    /// Width of the value box in a condition row
    pub condition_value_width: f32,
    pub text_field_width: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,     // This sets every label globally to this color
        heading: Color32::YELLOW, // Sets every heading
        subsection_heading: Color32::ORANGE, // Sets every subsection heading
        central_panel: Color32::from_rgb(30, 30, 36),
        side_panel: Color32::from_rgb(25, 25, 25),
        buy_heading: Color32::from_rgb(100, 200, 100),
        sell_heading: Color32::from_rgb(230, 110, 110),
        profit_positive: Color32::from_rgb(100, 220, 120),
        profit_negative: Color32::from_rgb(255, 100, 100),
        status_ok: Color32::from_rgb(100, 200, 255),
        status_busy: Color32::from_rgb(255, 215, 0),
        status_error: Color32::from_rgb(255, 100, 100),
    },
    side_panel_width: 330.0,
    condition_value_width: 90.0,
    text_field_width: 120.0,
};
