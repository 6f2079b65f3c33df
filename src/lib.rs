#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod report;
pub mod ui;
pub mod utils;

use std::path::PathBuf;

// Re-export commonly used types
pub use data::{CsvLayout, CsvSeriesSource, EmbeddedDemoSource, SeriesSource, load_first_available};
pub use domain::{DateRangePreset, Observation, Window};
pub use models::{AggregationError, SeriesStore, WindowSummary, aggregate};
pub use report::run_report;
pub use ui::PriceWindowApp;
pub use utils::app_time;

use crate::config::DATA;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// CSV file to load. Without it the default path is tried, then the embedded demo.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Name of the timestamp column
    #[arg(long)]
    pub date_column: Option<String>,

    /// Value columns to load, comma separated. Empty loads every column.
    #[arg(long, value_delimiter = ',')]
    pub assets: Option<Vec<String>>,

    /// Print the window summary to stdout instead of opening the app
    #[arg(long, default_value_t = false)]
    pub report: bool,

    /// Window preset for --report: last-7d, last-30d, last-90d, all-time
    #[arg(long, value_parser = parse_preset, conflicts_with_all = ["start", "end"])]
    pub preset: Option<DateRangePreset>,

    /// Window start for --report (YYYY-MM-DD or YYYY-MM-DD HH:MM, UTC)
    #[arg(long, requires = "end")]
    pub start: Option<String>,

    /// Window end for --report (YYYY-MM-DD or YYYY-MM-DD HH:MM, UTC)
    #[arg(long, requires = "start")]
    pub end: Option<String>,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

fn parse_preset(name: &str) -> Result<DateRangePreset, String> {
    DateRangePreset::from_cli_name(name).ok_or_else(|| {
        format!(
            "unknown preset '{}' (expected last-7d, last-30d, last-90d or all-time)",
            name
        )
    })
}

impl Cli {
    pub fn csv_layout(&self) -> CsvLayout {
        let mut layout = CsvLayout::default();
        if let Some(column) = &self.date_column {
            layout.date_column = column.clone();
        }
        if let Some(assets) = &self.assets {
            layout.value_columns = assets
                .iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect();
        }
        layout
    }

    /// Sources to try, in order. An explicit `--csv` is the only source.
    pub fn series_sources(&self) -> Vec<Box<dyn SeriesSource>> {
        match &self.csv {
            Some(path) => vec![Box::new(CsvSeriesSource::new(path, self.csv_layout()))],
            None => vec![
                Box::new(CsvSeriesSource::new(DATA.csv.path, self.csv_layout())),
                Box::new(EmbeddedDemoSource),
            ],
        }
    }
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(
    cc: &eframe::CreationContext,
    store: SeriesStore,
    signature: &'static str,
) -> Box<dyn eframe::App> {
    let app = ui::PriceWindowApp::new(cc, store, signature);
    Box::new(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_report_flags() {
        let cli = Cli::try_parse_from([
            "price-window",
            "--report",
            "--preset",
            "last-30d",
            "--assets",
            "BTCUSDT_Open,ETHUSDT_Open",
            "--json",
        ])
        .unwrap();
        assert!(cli.report && cli.json);
        assert_eq!(cli.preset, Some(DateRangePreset::Last30Days));
        assert_eq!(
            cli.csv_layout().value_columns,
            vec!["BTCUSDT_Open".to_string(), "ETHUSDT_Open".to_string()]
        );
    }

    #[test]
    fn cli_rejects_half_a_custom_range() {
        assert!(Cli::try_parse_from(["price-window", "--start", "2024-01-01"]).is_err());
        assert!(Cli::try_parse_from(["price-window", "--preset", "fortnight"]).is_err());
    }

    #[test]
    fn explicit_csv_disables_fallback() {
        let cli = Cli {
            csv: Some(PathBuf::from("nowhere.csv")),
            ..Cli::default()
        };
        assert_eq!(cli.series_sources().len(), 1);
        assert_eq!(Cli::default().series_sources().len(), 2);
    }
}
