//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so debug
//! builds stay readable. Every flag is further gated by `cfg(debug_assertions)`.

pub struct DebugFlags {
    /// Emit UI interaction logs (preset changes, brush drags, coin toggles).
    pub print_ui_interactions: bool,
    /// Emit one line per aggregation (window, observation count, outcome).
    pub print_aggregation: bool,
    /// Emit per-row diagnostics while parsing CSV input.
    pub print_csv_rows: bool,
    /// Emit playback start/stop and end-of-data events.
    pub print_playback: bool,
    /// Emit details of UI state serialization/deserialization.
    pub print_state_serde: bool,
    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_ui_interactions: true,
    print_aggregation: false,
    print_csv_rows: false,
    print_playback: false,
    print_state_serde: false,
    print_shutdown: false,
};
