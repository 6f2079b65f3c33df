use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ANALYSIS;
use crate::domain::{DateRangePreset, Window};
use crate::models::{AggregationError, WindowSummary};

/// Rejected custom range input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeInputError {
    StartNotBeforeEnd,
}

impl fmt::Display for RangeInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeInputError::StartNotBeforeEnd => write!(f, "Start date must be before end date."),
        }
    }
}

impl std::error::Error for RangeInputError {}

/// Result of one playback step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStep {
    /// Not playing, or nothing selected
    Idle,
    Moved,
    /// Window snapped onto the end of the data and playback stopped
    ReachedEnd,
}

/// Everything the user has chosen about what to look at.
/// Persisted between sessions, apart from the playing flag.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ShellState {
    #[serde(default)]
    pub window: Option<Window>,
    #[serde(default)]
    pub preset: DateRangePreset,
    #[serde(default)]
    pub tracked_assets: Vec<String>,
    #[serde(skip)]
    pub playing: bool,
}

impl ShellState {
    /// Middle slice of the extent used when nothing has been selected yet.
    pub fn initial_window(extent: &Window) -> Window {
        let sel = &ANALYSIS.initial_selection;
        Window::new(
            extent.lerp(sel.start_fraction),
            extent.lerp(sel.end_fraction),
        )
    }

    /// Fits restored state onto freshly loaded data: unknown assets are dropped
    /// (an empty selection tracks everything), presets are re-resolved and a
    /// window that misses the data is replaced with the initial window.
    pub fn reconcile(&mut self, assets: &[String], extent: Option<Window>) {
        self.playing = false;
        self.tracked_assets.retain(|key| assets.contains(key));
        if self.tracked_assets.is_empty() {
            self.tracked_assets = assets.to_vec();
        } else {
            self.sort_tracked(assets);
        }

        let Some(extent) = extent else {
            self.window = None;
            return;
        };

        if let Some(window) = self.preset.resolve(&extent) {
            self.window = Some(window);
            return;
        }

        self.window = match self.window {
            Some(w) if w.end_ms >= extent.start_ms && w.start_ms <= extent.end_ms => {
                Some(w.clamp_to(&extent))
            }
            _ => Some(Self::initial_window(&extent)),
        };
    }

    pub fn apply_preset(&mut self, preset: DateRangePreset, extent: &Window) {
        self.stop_playback();
        self.preset = preset;
        if let Some(window) = preset.resolve(extent) {
            self.window = Some(window);
        }
    }

    /// Sets a typed range. Both ends are clamped to the extent first.
    pub fn apply_custom(
        &mut self,
        start_ms: i64,
        end_ms: i64,
        extent: &Window,
    ) -> Result<Window, RangeInputError> {
        self.stop_playback();
        let start = start_ms.clamp(extent.start_ms, extent.end_ms);
        let end = end_ms.clamp(extent.start_ms, extent.end_ms);
        if start >= end {
            return Err(RangeInputError::StartNotBeforeEnd);
        }
        let window = Window::new(start, end);
        self.window = Some(window);
        self.preset = DateRangePreset::Custom;
        Ok(window)
    }

    /// Brush drag on the overview. Returns false for zero-width selections, which are ignored.
    pub fn apply_brush(&mut self, window: Window, extent: &Window) -> bool {
        let window = window.clamp_to(extent);
        if window.duration_ms() == 0 {
            return false;
        }
        self.stop_playback();
        self.preset = DateRangePreset::Custom;
        self.window = Some(window);
        true
    }

    pub fn toggle_playback(&mut self) {
        if self.window.is_none() {
            self.playing = false;
            return;
        }
        self.playing = !self.playing;
    }

    pub fn stop_playback(&mut self) {
        self.playing = false;
    }

    /// Slides the window forward by `step_ms`, keeping its width.
    pub fn advance_playback(&mut self, extent: &Window, step_ms: i64) -> PlaybackStep {
        if !self.playing {
            return PlaybackStep::Idle;
        }
        let Some(window) = self.window else {
            self.playing = false;
            return PlaybackStep::Idle;
        };

        self.preset = DateRangePreset::Custom;
        let shifted = window.shifted(step_ms);
        if shifted.end_ms >= extent.end_ms {
            let start = (extent.end_ms - window.duration_ms()).max(extent.start_ms);
            self.window = Some(Window::new(start, extent.end_ms));
            self.playing = false;
            return PlaybackStep::ReachedEnd;
        }
        self.window = Some(shifted);
        PlaybackStep::Moved
    }

    /// Adds or removes `key`, keeping tracked assets in schema order.
    pub fn toggle_asset(&mut self, key: &str, assets: &[String]) {
        if let Some(pos) = self.tracked_assets.iter().position(|k| k == key) {
            self.tracked_assets.remove(pos);
        } else if assets.iter().any(|k| k == key) {
            self.tracked_assets.push(key.to_string());
            self.sort_tracked(assets);
        }
    }

    pub fn is_tracked(&self, key: &str) -> bool {
        self.tracked_assets.iter().any(|k| k == key)
    }

    fn sort_tracked(&mut self, assets: &[String]) {
        self.tracked_assets = assets
            .iter()
            .filter(|key| self.tracked_assets.contains(key))
            .cloned()
            .collect();
    }
}

/// What the bar chart is currently showing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ChartDisplay {
    #[default]
    Empty,
    Summary(WindowSummary),
    NotEnoughData,
}

impl ChartDisplay {
    /// `InsufficientData` clears the bars. The other conditions keep whatever was shown.
    pub fn apply(&mut self, outcome: Result<WindowSummary, AggregationError>) {
        match outcome {
            Ok(summary) => *self = ChartDisplay::Summary(summary),
            Err(AggregationError::InsufficientData) => *self = ChartDisplay::NotEnoughData,
            Err(AggregationError::NoDefinedResults | AggregationError::EmptyAssetSet) => {}
        }
    }

    pub fn summary(&self) -> Option<&WindowSummary> {
        match self {
            ChartDisplay::Summary(summary) => Some(summary),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetSchema, Observation};
    use crate::models::SeriesStore;
    use crate::utils::TimeUtils;

    const DAY: i64 = TimeUtils::MS_IN_D;

    fn assets() -> Vec<String> {
        vec!["BTC".to_string(), "ETH".to_string(), "SOL".to_string()]
    }

    fn playing_state(window: Window) -> ShellState {
        ShellState {
            window: Some(window),
            playing: true,
            ..ShellState::default()
        }
    }

    #[test]
    fn initial_window_is_middle_forty_percent() {
        let w = ShellState::initial_window(&Window::new(0, 1000));
        assert_eq!(w, Window::new(300, 700));
    }

    #[test]
    fn presets_end_at_extent_and_clamp_start() {
        let extent = Window::new(0, 20 * DAY);
        let mut state = playing_state(Window::new(DAY, 2 * DAY));

        state.apply_preset(DateRangePreset::Last7Days, &extent);
        assert!(!state.playing);
        assert_eq!(state.window, Some(Window::new(13 * DAY, 20 * DAY)));

        state.apply_preset(DateRangePreset::Last90Days, &extent);
        assert_eq!(state.window, Some(extent));

        state.apply_preset(DateRangePreset::Custom, &extent);
        assert_eq!(state.window, Some(extent));
        assert_eq!(state.preset, DateRangePreset::Custom);
    }

    #[test]
    fn custom_range_rejects_start_not_before_end() {
        let extent = Window::new(0, 10 * DAY);
        let mut state = ShellState::default();

        assert_eq!(
            state.apply_custom(5 * DAY, 5 * DAY, &extent),
            Err(RangeInputError::StartNotBeforeEnd)
        );
        assert_eq!(
            state.apply_custom(6 * DAY, 2 * DAY, &extent),
            Err(RangeInputError::StartNotBeforeEnd)
        );
        // Both ends clamp onto the extent end
        assert_eq!(
            state.apply_custom(20 * DAY, 30 * DAY, &extent),
            Err(RangeInputError::StartNotBeforeEnd)
        );
        assert_eq!(state.window, None);

        let w = state.apply_custom(-DAY, 3 * DAY, &extent).unwrap();
        assert_eq!(w, Window::new(0, 3 * DAY));
        assert_eq!(state.preset, DateRangePreset::Custom);
    }

    #[test]
    fn brush_stops_playback_and_switches_to_custom() {
        let extent = Window::new(0, 100);
        let mut state = playing_state(Window::new(10, 20));
        state.preset = DateRangePreset::AllTime;

        assert!(state.apply_brush(Window::new(90, 150), &extent));
        assert!(!state.playing);
        assert_eq!(state.preset, DateRangePreset::Custom);
        assert_eq!(state.window, Some(Window::new(90, 100)));

        assert!(!state.apply_brush(Window::new(40, 40), &extent));
        assert_eq!(state.window, Some(Window::new(90, 100)));
    }

    #[test]
    fn playback_moves_then_snaps_to_end_and_stops() {
        let extent = Window::new(0, 100);
        let mut state = playing_state(Window::new(50, 80));

        assert_eq!(state.advance_playback(&extent, 10), PlaybackStep::Moved);
        assert_eq!(state.window, Some(Window::new(60, 90)));
        assert!(state.playing);

        assert_eq!(state.advance_playback(&extent, 15), PlaybackStep::ReachedEnd);
        assert_eq!(state.window, Some(Window::new(70, 100)));
        assert!(!state.playing);

        assert_eq!(state.advance_playback(&extent, 15), PlaybackStep::Idle);
    }

    #[test]
    fn toggle_playback_needs_a_window() {
        let mut state = ShellState::default();
        state.toggle_playback();
        assert!(!state.playing);

        state.window = Some(Window::new(0, 1));
        state.toggle_playback();
        assert!(state.playing);
        state.toggle_playback();
        assert!(!state.playing);
    }

    #[test]
    fn toggled_assets_stay_in_schema_order() {
        let assets = assets();
        let mut state = ShellState::default();
        state.toggle_asset("SOL", &assets);
        state.toggle_asset("BTC", &assets);
        state.toggle_asset("DOGE", &assets);
        assert_eq!(state.tracked_assets, vec!["BTC".to_string(), "SOL".to_string()]);

        state.toggle_asset("BTC", &assets);
        assert_eq!(state.tracked_assets, vec!["SOL".to_string()]);
        assert!(state.is_tracked("SOL") && !state.is_tracked("BTC"));
    }

    #[test]
    fn reconcile_drops_unknown_assets_and_fixes_window() {
        let assets = assets();
        let extent = Window::new(0, 1000);
        let mut state = ShellState {
            window: Some(Window::new(5000, 6000)),
            preset: DateRangePreset::Custom,
            tracked_assets: vec!["DOGE".to_string()],
            playing: true,
        };
        state.reconcile(&assets, Some(extent));
        assert!(!state.playing);
        assert_eq!(state.tracked_assets, assets);
        assert_eq!(state.window, Some(Window::new(300, 700)));

        state.window = Some(Window::new(900, 1500));
        state.reconcile(&assets, Some(extent));
        assert_eq!(state.window, Some(Window::new(900, 1000)));

        state.preset = DateRangePreset::AllTime;
        state.reconcile(&assets, Some(extent));
        assert_eq!(state.window, Some(extent));
    }

    #[test]
    fn persisted_state_forgets_playing() {
        let state = playing_state(Window::new(1, 2));
        let json = serde_json::to_string(&state).unwrap();
        let restored: ShellState = serde_json::from_str(&json).unwrap();
        assert!(!restored.playing);
        assert_eq!(restored.window, state.window);
    }

    #[test]
    fn display_keeps_prior_summary_on_soft_conditions() {
        let schema = AssetSchema::new(vec!["BTC".to_string()]);
        let store = SeriesStore::new(
            schema,
            vec![
                Observation::new(0, vec![Some(100.0)]),
                Observation::new(1, vec![Some(110.0)]),
            ],
        )
        .unwrap();
        let summary = store.summarize(&Window::new(0, 1), &["BTC"]).unwrap();

        let mut display = ChartDisplay::default();
        display.apply(Ok(summary.clone()));
        display.apply(Err(AggregationError::NoDefinedResults));
        display.apply(Err(AggregationError::EmptyAssetSet));
        assert_eq!(display.summary(), Some(&summary));

        display.apply(Err(AggregationError::InsufficientData));
        assert_eq!(display, ChartDisplay::NotEnoughData);
        assert_eq!(display.summary(), None);
    }
}
