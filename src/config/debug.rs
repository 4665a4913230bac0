//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep the noisy ones `false` so debug
//! builds stay readable. Release builds never consult these.

pub struct DebugFlags {
    /// Emit UI interaction logs (pair switching, condition rows added/removed, etc.).
    pub print_ui_interactions: bool,
    /// Dump the full JSON body of every backtest request before it is sent.
    pub print_request_payloads: bool,
    /// Emit a one-line summary of every backtest response.
    pub print_response_summaries: bool,
    /// Emit details of UI state serialization/deserialization.
    pub print_state_serde: bool,
    /// Emit zoom clamp corrections applied to the chart.
    pub print_zoom_clamps: bool,
    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_ui_interactions: true,
    print_request_payloads: false,
    print_response_summaries: true,
    print_state_serde: false,
    print_zoom_clamps: false,
    print_shutdown: false,
};
