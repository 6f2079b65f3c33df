//! Configuration module for the price window explorer.

pub mod analysis;
pub mod data;

mod debug; // Private: callers use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod demo;
pub mod persistence;
pub mod playback;
pub mod plot;

// Re-export commonly used items
pub use analysis::ANALYSIS;
pub use data::DATA;
pub use demo::DEMO;
pub use persistence::APP_STATE_PATH;
pub use playback::PLAYBACK;
pub use plot::PLOT_CONFIG;
