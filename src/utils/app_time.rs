//! Monotonic clock that works on native and in the browser.

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant as AppInstant;

#[cfg(target_arch = "wasm32")]
pub use web_time::Instant as AppInstant;

use std::time::Duration;

#[inline]
pub fn now() -> AppInstant {
    AppInstant::now()
}

/// Time since `earlier`, zero if the clock appears to have gone backwards.
pub fn elapsed_since(earlier: AppInstant) -> Duration {
    now().saturating_duration_since(earlier)
}
