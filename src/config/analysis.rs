//! Window aggregation configuration

/// Settings for the percent-change aggregator
pub struct WindowSettings {
    // A window needs a first and a distinct last observation
    pub min_observations: usize,
    // Fractional padding applied to the largest absolute change (0.2 => 20%)
    pub domain_padding_pct: f64,
    // Half-width used when every defined change is exactly zero
    pub fallback_max_abs: f64,
}

/// Where the brush lands on first load, as fractions of the data extent
pub struct InitialSelection {
    pub start_fraction: f64,
    pub end_fraction: f64,
}

/// The Master Analysis Configuration
pub struct AnalysisConfig {
    pub window: WindowSettings,
    pub initial_selection: InitialSelection,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    window: WindowSettings {
        min_observations: 2,
        domain_padding_pct: 0.2,
        fallback_max_abs: 1.0,
    },

    initial_selection: InitialSelection {
        start_fraction: 0.3,
        end_fraction: 0.7,
    },
};
