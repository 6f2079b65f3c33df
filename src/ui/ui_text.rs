/// User-facing strings, kept in one place.
pub struct UiText {
    pub app_title: &'static str,
    pub date_range_heading: &'static str,
    pub custom_range_heading: &'static str,
    pub custom_start_label: &'static str,
    pub custom_end_label: &'static str,
    pub custom_apply_button: &'static str,
    pub custom_input_hint: &'static str,
    pub invalid_datetime: &'static str,
    pub coins_heading: &'static str,
    pub playback_heading: &'static str,
    pub play_button: &'static str,
    pub pause_button: &'static str,
    pub overview_heading: &'static str,
    pub change_heading: &'static str,
    pub plot_x_axis: &'static str,
    pub plot_overview_y_axis: &'static str,
    pub plot_change_y_axis: &'static str,
    pub not_enough_data: &'static str,
    pub no_selection: &'static str,
    pub no_data: &'static str,
    pub excluded_prefix: &'static str,
    pub source_label: &'static str,
    pub observations_label: &'static str,
    pub help_title: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    app_title: "Price Window - percent change explorer",
    date_range_heading: "Date range",
    custom_range_heading: "Custom range",
    custom_start_label: "Start",
    custom_end_label: "End",
    custom_apply_button: "Apply",
    custom_input_hint: "YYYY-MM-DD HH:MM",
    invalid_datetime: "Enter dates as YYYY-MM-DD or YYYY-MM-DD HH:MM.",
    coins_heading: "Coins",
    playback_heading: "Playback",
    play_button: "▶ Play",
    pause_button: "⏸ Pause",
    overview_heading: "Overview (drag to select a window)",
    change_heading: "Percent change over window",
    plot_x_axis: "Time (UTC)",
    plot_overview_y_axis: "Price / max",
    plot_change_y_axis: "Change %",
    not_enough_data: "Window: Not enough data in range.",
    no_selection: "Window: none selected.",
    no_data: "No data loaded.",
    excluded_prefix: "Excluded (no defined change):",
    source_label: "Source",
    observations_label: "Rows in window",
    help_title: "⌨️ Keyboard Shortcuts",
};
