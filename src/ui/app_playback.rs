use std::time::Duration;

use crate::config::PLAYBACK;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::Window;
use crate::ui::shell_state::PlaybackStep;
use crate::utils::app_time::{AppInstant, now};

use super::app::PriceWindowApp;

/// Window movement per playback step for the given data extent (at least 1 ms).
pub fn playback_step_ms(extent: &Window) -> i64 {
    ((extent.duration_ms() as f64 * PLAYBACK.step_fraction).round() as i64).max(1)
}

pub fn tick_interval() -> Duration {
    Duration::from_millis(PLAYBACK.tick_ms)
}

/// Frame-rate independent ticker for playback.
#[derive(Default)]
pub struct PlaybackClock {
    last_tick: Option<AppInstant>,
}

impl PlaybackClock {
    /// True when a tick is due at `at`. The first call after a reset is always due.
    pub fn tick_due(&mut self, at: AppInstant) -> bool {
        match self.last_tick {
            Some(last) if at.saturating_duration_since(last) < tick_interval() => false,
            _ => {
                self.last_tick = Some(at);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_tick = None;
    }
}

impl PriceWindowApp {
    pub(super) fn drive_playback(&mut self, ctx: &eframe::egui::Context) {
        if !self.shell.playing {
            self.playback_clock.reset();
            return;
        }
        let Some(extent) = self.data_state.store.extent() else {
            self.shell.stop_playback();
            return;
        };

        if self.playback_clock.tick_due(now()) {
            match self.shell.advance_playback(&extent, playback_step_ms(&extent)) {
                PlaybackStep::ReachedEnd => {
                    self.playback_clock.reset();
                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_playback {
                        log::info!("Playback reached the end of the data");
                    }
                }
                PlaybackStep::Moved | PlaybackStep::Idle => {}
            }
            self.sync_custom_inputs();
        }

        if self.shell.playing {
            ctx.request_repaint_after(tick_interval());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_is_half_a_percent_of_extent() {
        assert_eq!(playback_step_ms(&Window::new(0, 200_000)), 1_000);
        assert_eq!(playback_step_ms(&Window::new(0, 10)), 1);
    }

    #[test]
    fn clock_waits_for_the_tick_interval() {
        let mut clock = PlaybackClock::default();
        let start = now();
        assert!(clock.tick_due(start));
        assert!(!clock.tick_due(start));
        assert!(clock.tick_due(start + tick_interval()));
        clock.reset();
        assert!(clock.tick_due(start));
    }
}
