use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::utils::TimeUtils;
use crate::utils::time_utils::{epoch_ms_to_utc_date, epoch_ms_to_utc_time};

/// Closed interval `[start_ms, end_ms]` in epoch milliseconds.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl Window {
    /// Builds a window from two arbitrary points, ordering them.
    pub fn new(a: i64, b: i64) -> Self {
        Self {
            start_ms: a.min(b),
            end_ms: a.max(b),
        }
    }

    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    pub fn shifted(&self, delta_ms: i64) -> Self {
        Self {
            start_ms: self.start_ms.saturating_add(delta_ms),
            end_ms: self.end_ms.saturating_add(delta_ms),
        }
    }

    /// Intersects with `bounds`. A window entirely outside collapses onto the nearest edge.
    pub fn clamp_to(&self, bounds: &Window) -> Self {
        Self::new(
            self.start_ms.clamp(bounds.start_ms, bounds.end_ms),
            self.end_ms.clamp(bounds.start_ms, bounds.end_ms),
        )
    }

    /// Point at `fraction` (0.0..=1.0) of the way through the window.
    pub fn lerp(&self, fraction: f64) -> i64 {
        self.start_ms
            .saturating_add((self.duration_ms() as f64 * fraction).round() as i64)
    }

    /// `Time Range: 2024-01-02 (13:05) → 2024-02-01 (00:00)`, rendered in UTC.
    pub fn label(&self) -> String {
        format!(
            "Time Range: {} ({}) → {} ({})",
            epoch_ms_to_utc_date(self.start_ms),
            epoch_ms_to_utc_time(self.start_ms),
            epoch_ms_to_utc_date(self.end_ms),
            epoch_ms_to_utc_time(self.end_ms),
        )
    }
}

/// Named window rules offered by the date-range selector.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter,
)]
pub enum DateRangePreset {
    #[strum(to_string = "Last 7 Days")]
    Last7Days,
    #[strum(to_string = "Last 30 Days")]
    Last30Days,
    #[strum(to_string = "Last 90 Days")]
    Last90Days,
    #[strum(to_string = "All Time")]
    AllTime,
    #[default]
    #[strum(to_string = "Custom")]
    Custom,
}

impl DateRangePreset {
    pub fn days(&self) -> Option<i64> {
        match self {
            Self::Last7Days => Some(7),
            Self::Last30Days => Some(30),
            Self::Last90Days => Some(90),
            Self::AllTime | Self::Custom => None,
        }
    }

    /// Resolves the preset against the data extent. `Custom` has no rule of its own.
    pub fn resolve(&self, extent: &Window) -> Option<Window> {
        match self {
            Self::AllTime => Some(*extent),
            Self::Custom => None,
            _ => {
                let days = self.days()?;
                let start = extent
                    .end_ms
                    .saturating_sub(days * TimeUtils::MS_IN_D)
                    .max(extent.start_ms);
                Some(Window::new(start, extent.end_ms))
            }
        }
    }

    /// Parses the short CLI names (`last-7d`, `last-30d`, `last-90d`, `all-time`).
    pub fn from_cli_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "last-7d" | "7d" => Some(Self::Last7Days),
            "last-30d" | "30d" => Some(Self::Last30Days),
            "last-90d" | "90d" => Some(Self::Last90Days),
            "all-time" | "all" => Some(Self::AllTime),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn new_orders_its_points() {
        let w = Window::new(10, 2);
        assert_eq!((w.start_ms, w.end_ms), (2, 10));
        assert_eq!(w.duration_ms(), 8);
    }

    #[test]
    fn extreme_extents_saturate_instead_of_overflowing() {
        let extent = Window::new(i64::MIN, i64::MAX);
        assert_eq!(extent.duration_ms(), i64::MAX);
        assert_eq!(extent.lerp(0.0), i64::MIN);
        assert!(extent.lerp(0.5) < extent.lerp(0.7));

        let last_7 = DateRangePreset::Last7Days.resolve(&extent).unwrap();
        assert_eq!(last_7.end_ms, i64::MAX);
        assert_eq!(last_7.duration_ms(), 7 * TimeUtils::MS_IN_D);
    }

    #[test]
    fn clamp_collapses_outside_windows_onto_edge() {
        let bounds = Window::new(100, 200);
        assert_eq!(Window::new(50, 150).clamp_to(&bounds), Window::new(100, 150));
        assert_eq!(Window::new(300, 400).clamp_to(&bounds), Window::new(200, 200));
    }

    #[test]
    fn presets_clamp_to_extent_start() {
        let extent = Window::new(0, 10 * TimeUtils::MS_IN_D);
        let last_7 = DateRangePreset::Last7Days.resolve(&extent).unwrap();
        assert_eq!(last_7.start_ms, 3 * TimeUtils::MS_IN_D);
        assert_eq!(last_7.end_ms, extent.end_ms);

        let last_30 = DateRangePreset::Last30Days.resolve(&extent).unwrap();
        assert_eq!(last_30, extent);
        assert_eq!(DateRangePreset::AllTime.resolve(&extent), Some(extent));
        assert_eq!(DateRangePreset::Custom.resolve(&extent), None);
    }

    #[test]
    fn cli_names_cover_every_preset() {
        for preset in DateRangePreset::iter() {
            let name = match preset {
                DateRangePreset::Last7Days => "last-7d",
                DateRangePreset::Last30Days => "last-30d",
                DateRangePreset::Last90Days => "last-90d",
                DateRangePreset::AllTime => "all-time",
                DateRangePreset::Custom => "custom",
            };
            assert_eq!(DateRangePreset::from_cli_name(name), Some(preset));
        }
        assert_eq!(DateRangePreset::from_cli_name("fortnight"), None);
    }

    #[test]
    fn label_uses_utc_dates_and_times() {
        let w = Window::new(0, TimeUtils::MS_IN_D + 90 * TimeUtils::MS_IN_MIN);
        assert_eq!(
            w.label(),
            "Time Range: 1970-01-01 (00:00) → 1970-01-02 (01:30)"
        );
    }
}
