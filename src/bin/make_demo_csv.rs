use anyhow::{Context, Result, bail};
use price_window::config::{DATA, DEMO};
use price_window::data::csv_loader::{CsvLayout, write_series};
use price_window::data::{CsvSeriesSource, SeriesSource};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

fn main() -> Result<()> {
    build_demo_csv()
}

fn build_demo_csv() -> Result<()> {
    let source_path = PathBuf::from(DATA.csv.path);
    let layout = CsvLayout {
        value_columns: DEMO.resources.columns.iter().map(|c| c.to_string()).collect(),
        ..CsvLayout::default()
    };
    let store = CsvSeriesSource::new(&source_path, layout.clone())
        .load()
        .with_context(|| format!("Failed to load source CSV {:?}", source_path))?;

    println!(
        "Loaded {} rows for {} assets from {:?}",
        store.len(),
        store.assets().len(),
        source_path
    );
    if store.len() < 2 {
        bail!("Source CSV needs at least two rows to make a useful demo");
    }

    // Most recent rows only
    let observations = store.observations();
    let keep_from = observations.len().saturating_sub(DEMO.max_rows);
    let demo_rows = &observations[keep_from..];

    let output_path = PathBuf::from(DEMO.resources.csv_path);
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let file = File::create(&output_path)
        .with_context(|| format!("Failed to create file: {}", output_path.display()))?;
    write_series(
        BufWriter::new(file),
        &layout.date_column,
        store.assets(),
        demo_rows,
    )?;

    println!(
        "✅ Demo CSV written to {:?} with {} rows.",
        output_path,
        demo_rows.len()
    );
    Ok(())
}
