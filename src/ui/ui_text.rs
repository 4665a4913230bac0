/// All user-facing strings in one place.
pub struct UiText {
    // Control panel
    pub coin_information_heading: &'static str,
    pub exchange_label: &'static str,
    pub exchange_placeholder: &'static str,
    pub coin_pair_label: &'static str,
    pub coin_pair_placeholder: &'static str,
    pub coin_pairs_loading: &'static str,
    pub time_unit_label: &'static str,
    pub time_unit_placeholder: &'static str,
    pub capital_label: &'static str,
    pub stop_loss_label: &'static str,
    pub data_points_label: &'static str,
    pub data_points_hint: &'static str,
    pub strategy_heading: &'static str,
    pub buy_strategy_heading: &'static str,
    pub sell_strategy_heading: &'static str,
    pub indicator_placeholder: &'static str,
    pub comparator_placeholder: &'static str,
    pub value_hint: &'static str,
    pub no_suggestions: &'static str,
    pub add_condition: &'static str,
    pub remove_condition: &'static str,
    pub plot_options_heading: &'static str,
    pub toggle_bollinger: &'static str,
    pub toggle_moving_average_9: &'static str,
    pub toggle_moving_average_15: &'static str,
    pub toggle_macd: &'static str,
    pub toggle_rsi: &'static str,
    pub begin_button: &'static str,
    pub begin_running: &'static str,
    pub profit_label: &'static str,

    // Chart
    pub plot_x_axis: &'static str,
    pub plot_y_axis_prefix: &'static str,
    pub oscillator_y_axis: &'static str,
    pub series_closing_price: &'static str,
    pub series_bollinger: &'static str,
    pub series_moving_average_9: &'static str,
    pub series_moving_average_15: &'static str,
    pub series_buys: &'static str,
    pub series_sells: &'static str,
    pub series_rsi: &'static str,
    pub series_rsi_guides: &'static str,
    pub series_macd: &'static str,
    pub series_macd_zero: &'static str,
    pub reset_view: &'static str,
    pub placeholder_heading: &'static str,
    pub placeholder_body: &'static str,
    pub running_heading: &'static str,
    pub no_data_heading: &'static str,

    // Alerts
    pub alert_title: &'static str,
    pub alert_dismiss: &'static str,

    // Status bar
    pub status_ready: &'static str,
    pub status_running: &'static str,
    pub status_failed: &'static str,
    pub status_elapsed: &'static str,
    pub status_last_run: &'static str,
    pub status_span: &'static str,
    pub status_service: &'static str,

    // Help
    pub help_title: &'static str,
    pub help_intro: &'static str,
    pub help_toggle: &'static str,
    pub help_close: &'static str,
    pub help_reset_view: &'static str,
    pub help_begin: &'static str,
    pub help_zoom: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    coin_information_heading: "Coin Information",
    exchange_label: "Exchange",
    exchange_placeholder: "Pick an exchange...",
    coin_pair_label: "Coin Pair",
    coin_pair_placeholder: "Pick a coin pair...",
    coin_pairs_loading: "Loading markets...",
    time_unit_label: "Time Unit",
    time_unit_placeholder: "Pick a time unit...",
    capital_label: "Capital",
    stop_loss_label: "Stop Loss (%)",
    data_points_label: "Data Points",
    data_points_hint: "a number, or 'all'",
    strategy_heading: "Strategy",
    buy_strategy_heading: "Buy Strategy",
    sell_strategy_heading: "Sell Strategy",
    indicator_placeholder: "Indicator...",
    comparator_placeholder: "Choose...",
    value_hint: "Value",
    no_suggestions: "No matching indicators",
    add_condition: "➕ Add condition",
    remove_condition: "➖ Remove",
    plot_options_heading: "Plot",
    toggle_bollinger: "Bollinger Bands",
    toggle_moving_average_9: "Moving Average (9 Period)",
    toggle_moving_average_15: "Moving Average (15 Period)",
    toggle_macd: "MACD",
    toggle_rsi: "Relative Strength Index",
    begin_button: "▶ Begin",
    begin_running: "Running...",
    profit_label: "Profit",

    plot_x_axis: "Data Point #",
    plot_y_axis_prefix: "Price",
    oscillator_y_axis: "Oscillators",
    series_closing_price: "Closing Price",
    series_bollinger: "Bollinger Bands",
    series_moving_average_9: "MA 9",
    series_moving_average_15: "MA 15",
    series_buys: "Buys",
    series_sells: "Sells",
    series_rsi: "RSI",
    series_rsi_guides: "RSI 30 / 70",
    series_macd: "MACD",
    series_macd_zero: "MACD zero",
    reset_view: "⟲ Reset view",
    placeholder_heading: "No backtest yet",
    placeholder_body: "Fill in the control panel and press Begin.",
    running_heading: "Running backtest...",
    no_data_heading: "The backtest returned no price data",

    alert_title: "Uh oh!",
    alert_dismiss: "OK",

    status_ready: "Ready",
    status_running: "Backtest running...",
    status_failed: "Last backtest failed",
    status_elapsed: "Took",
    status_last_run: "Last run",
    status_span: "Span",
    status_service: "Service",

    help_title: "⌨️ Keyboard Shortcuts",
    help_intro: "Letter shortcuts are ignored while a text box has focus.",
    help_toggle: "Toggle this help panel",
    help_close: "Close the alert or this panel",
    help_reset_view: "Reset the chart view",
    help_begin: "Begin the backtest",
    help_zoom: "Ctrl+scroll to zoom, drag to pan, double click to reset",
};
