// User interface components
pub mod app;
pub mod app_playback;
pub mod config;
pub mod shell_state;
pub mod styles;
pub mod ui_panels;
pub mod ui_plot_view;
pub mod ui_render;
pub mod ui_text;
pub mod utils;

// Re-export main app
pub use app::PriceWindowApp;
pub use config::UI_CONFIG;
pub use shell_state::{ChartDisplay, ShellState};
