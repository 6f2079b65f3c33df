//! config/demo.rs Demo / WASM specific configuration knobs.
//!
//! The browser build has no file system, so it runs from a small CSV that is
//! compiled into the binary. These knobs decide what that file contains.

/// Static assets and paths required for the Demo
pub struct DemoResources {
    /// Demo CSV written by `make_demo_csv` and embedded by the library
    pub csv_path: &'static str,
    /// Curated list of columns that should appear in the demo
    pub columns: &'static [&'static str],
}

/// The Master Demo Configuration
pub struct DemoConfig {
    /// Keep only the most recent rows (limit)
    pub max_rows: usize,
    /// Bundled resources
    pub resources: DemoResources,
}

pub const DEMO: DemoConfig = DemoConfig {
    max_rows: 2000,

    resources: DemoResources {
        csv_path: "demo_data/timeseries_demo.csv",
        columns: &["BTCUSDT_Open", "ETHUSDT_Open", "SOLUSDT_Open", "DOGEUSDT_Open"],
    },
};
