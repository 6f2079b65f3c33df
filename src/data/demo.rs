use anyhow::{Context, Result};

use crate::data::SeriesSource;
use crate::data::csv_loader::{CsvLayout, read_series};
use crate::models::SeriesStore;

const DEMO_CSV: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/demo_data/timeseries_demo.csv"
));

/// Series compiled into the binary. Always available, including in the browser.
pub struct EmbeddedDemoSource;

impl SeriesSource for EmbeddedDemoSource {
    fn signature(&self) -> &'static str {
        "Embedded Demo CSV"
    }

    fn load(&self) -> Result<SeriesStore> {
        let layout = CsvLayout {
            value_columns: Vec::new(),
            ..CsvLayout::default()
        };
        read_series(DEMO_CSV.as_bytes(), &layout).context("Failed to parse embedded demo CSV")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_demo_loads() {
        let store = EmbeddedDemoSource.load().unwrap();
        assert!(store.len() >= 2);
        assert!(!store.assets().is_empty());
        assert!(store.extent().is_some());
    }
}
