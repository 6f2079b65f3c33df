//! Playback animation configuration

pub struct PlaybackConfig {
    /// Milliseconds between playback steps
    pub tick_ms: u64,
    /// Fraction of the data extent the window moves per step
    pub step_fraction: f64,
}

pub const PLAYBACK: PlaybackConfig = PlaybackConfig {
    tick_ms: 60,
    step_fraction: 0.005,
};
