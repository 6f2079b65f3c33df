use eframe::{Frame, egui};
use serde::{Deserialize, Serialize};

use crate::domain::{DateRangePreset, Window};
use crate::models::{AggregationError, SeriesStore};
use crate::ui::app_playback::PlaybackClock;
use crate::ui::shell_state::{ChartDisplay, ShellState};
use crate::ui::ui_panels::CustomRangeInputs;
use crate::ui::ui_plot_view::{OverviewLine, PlotView};
use crate::ui::config::UI_TEXT;
use crate::ui::utils::setup_custom_visuals;
use crate::utils::time_utils::{epoch_ms_to_input, parse_timestamp_ms};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Loaded data and everything derived from it once per load
#[derive(Default)]
pub struct DataState {
    pub store: SeriesStore,
    pub signature: &'static str,
    pub overview_lines: Vec<OverviewLine>,
}

impl DataState {
    pub fn new(store: SeriesStore, signature: &'static str) -> Self {
        let overview_lines = OverviewLine::build_all(&store);
        Self {
            store,
            signature,
            overview_lines,
        }
    }
}

#[derive(Deserialize, Serialize)]
pub struct PriceWindowApp {
    // Persisted selection
    #[serde(default)]
    pub(super) shell: ShellState,

    // Runtime-only state
    #[serde(skip)]
    pub(super) data_state: DataState,
    #[serde(skip)]
    pub(super) display: ChartDisplay,
    // Last aggregation condition that left the display untouched
    #[serde(skip)]
    pub(super) last_condition: Option<AggregationError>,
    // Inputs the current display was computed from, to skip redundant work
    #[serde(skip)]
    pub(super) last_summarized: Option<(Window, Vec<String>)>,
    #[serde(skip)]
    pub(super) custom_inputs: CustomRangeInputs,
    #[serde(skip)]
    pub(super) playback_clock: PlaybackClock,
    #[serde(skip)]
    pub(super) plot_view: PlotView,
    #[serde(skip)]
    pub(super) show_help: bool,
}

impl PriceWindowApp {
    pub fn new(cc: &eframe::CreationContext<'_>, store: SeriesStore, signature: &'static str) -> Self {
        let shell = cc
            .storage
            .and_then(|storage| {
                let restored: Option<ShellState> = eframe::get_value(storage, eframe::APP_KEY);
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_state_serde {
                    log::info!("Restored shell state: {:?}", restored);
                }
                restored
            })
            .unwrap_or_default();

        Self::with_state(shell, store, signature)
    }

    /// Builds the app around a (possibly restored) shell state and fits it onto the data.
    pub fn with_state(mut shell: ShellState, store: SeriesStore, signature: &'static str) -> Self {
        shell.reconcile(store.assets(), store.extent());
        if store.is_empty() {
            log::error!("No observations available in series store");
        }

        let mut app = Self {
            shell,
            data_state: DataState::new(store, signature),
            display: ChartDisplay::default(),
            last_condition: None,
            last_summarized: None,
            custom_inputs: CustomRangeInputs::default(),
            playback_clock: PlaybackClock::default(),
            plot_view: PlotView::new(),
            show_help: false,
        };
        app.sync_custom_inputs();
        app.refresh_summary();
        app
    }

    /// Re-runs the aggregator when the window or tracked set changed since last time.
    /// Returns true when it ran.
    pub(super) fn refresh_summary(&mut self) -> bool {
        let Some(window) = self.shell.window else {
            return false;
        };
        let key = (window, self.shell.tracked_assets.clone());
        if self.last_summarized.as_ref() == Some(&key) {
            return false;
        }

        let outcome = self
            .data_state
            .store
            .summarize(&window, &self.shell.tracked_assets);
        self.last_condition = outcome.as_ref().err().copied();
        self.display.apply(outcome);
        self.last_summarized = Some(key);
        true
    }

    /// Rewrites the custom range text boxes from the current window.
    pub(super) fn sync_custom_inputs(&mut self) {
        if let Some(window) = self.shell.window {
            self.custom_inputs.start = epoch_ms_to_input(window.start_ms);
            self.custom_inputs.end = epoch_ms_to_input(window.end_ms);
        }
    }

    pub(super) fn handle_preset(&mut self, preset: DateRangePreset) {
        let Some(extent) = self.data_state.store.extent() else {
            return;
        };
        self.shell.apply_preset(preset, &extent);
        self.custom_inputs.error = None;
        self.sync_custom_inputs();
    }

    pub(super) fn handle_custom_submit(&mut self) {
        let Some(extent) = self.data_state.store.extent() else {
            return;
        };
        let (Some(start), Some(end)) = (
            parse_timestamp_ms(&self.custom_inputs.start),
            parse_timestamp_ms(&self.custom_inputs.end),
        ) else {
            self.custom_inputs.error = Some(UI_TEXT.invalid_datetime.to_string());
            return;
        };

        match self.shell.apply_custom(start, end, &extent) {
            Ok(_) => {
                self.custom_inputs.error = None;
                self.sync_custom_inputs();
            }
            Err(e) => self.custom_inputs.error = Some(e.to_string()),
        }
    }

    pub(super) fn handle_brush(&mut self, window: Window) {
        let Some(extent) = self.data_state.store.extent() else {
            return;
        };
        if self.shell.apply_brush(window, &extent) {
            self.custom_inputs.error = None;
            self.sync_custom_inputs();
        }
    }

    pub(super) fn handle_asset_toggle(&mut self, key: &str) {
        let assets = self.data_state.store.assets().to_vec();
        self.shell.toggle_asset(key, &assets);
    }

    pub(super) fn handle_playback_toggle(&mut self) {
        self.shell.toggle_playback();
        self.playback_clock.reset();
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_playback {
            log::info!("Playback {}", if self.shell.playing { "started" } else { "stopped" });
        }
    }
}

impl eframe::App for PriceWindowApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.shell.stop_playback();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Application shutdown complete.");
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.shell);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        self.handle_global_shortcuts(ctx);
        self.drive_playback(ctx);

        self.render_side_panel(ctx);
        self.refresh_summary();

        self.render_status_panel(ctx);
        self.render_central_panel(ctx);
        if self.show_help {
            self.render_help_panel(ctx);
        }

        // Brush drags land while the central panel renders
        if self.refresh_summary() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetSchema, Observation};

    fn store() -> SeriesStore {
        let schema = AssetSchema::new(vec!["BTCUSDT_Open".into(), "ETHUSDT_Open".into()]);
        let rows = (0..10)
            .map(|t| Observation::new(t * 1000, vec![Some(100.0 + t as f64), Some(50.0)]))
            .collect();
        SeriesStore::new(schema, rows).unwrap()
    }

    #[test]
    fn startup_selects_middle_window_and_summarizes() {
        let app = PriceWindowApp::with_state(ShellState::default(), store(), "test");
        assert_eq!(app.shell.window, Some(Window::new(2700, 6300)));
        assert_eq!(app.shell.tracked_assets.len(), 2);
        let summary = app.display.summary().unwrap();
        assert_eq!(summary.changes.len(), 2);
        assert_eq!(app.custom_inputs.start, "1970-01-01 00:00");
    }

    #[test]
    fn invalid_custom_text_reports_an_error() {
        let mut app = PriceWindowApp::with_state(ShellState::default(), store(), "test");
        let before = app.shell.window;
        app.custom_inputs.start = "soon".to_string();
        app.handle_custom_submit();
        assert_eq!(app.custom_inputs.error.as_deref(), Some(UI_TEXT.invalid_datetime));
        assert_eq!(app.shell.window, before);
    }

    #[test]
    fn untracking_everything_keeps_last_bars() {
        let mut app = PriceWindowApp::with_state(ShellState::default(), store(), "test");
        let shown = app.display.clone();
        app.handle_asset_toggle("BTCUSDT_Open");
        app.handle_asset_toggle("ETHUSDT_Open");
        app.refresh_summary();
        assert_eq!(app.last_condition, Some(AggregationError::EmptyAssetSet));
        assert_eq!(app.display, shown);
    }

    #[test]
    fn preset_change_is_summarized_before_the_chart_renders() {
        let mut app = PriceWindowApp::with_state(ShellState::default(), store(), "test");
        assert!(!app.refresh_summary());

        app.handle_preset(DateRangePreset::AllTime);
        assert!(app.refresh_summary());
        let summary = app.display.summary().unwrap();
        assert_eq!(summary.window, Window::new(0, 9000));
        assert_eq!(summary.observation_count, 10);
        assert!(!app.refresh_summary());
    }

    #[test]
    fn narrow_brush_shows_not_enough_data() {
        let mut app = PriceWindowApp::with_state(ShellState::default(), store(), "test");
        app.handle_brush(Window::new(1100, 1900));
        app.refresh_summary();
        assert_eq!(app.display, ChartDisplay::NotEnoughData);
        assert_eq!(app.shell.preset, DateRangePreset::Custom);
    }
}
