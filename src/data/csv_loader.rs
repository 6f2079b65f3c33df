use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::DATA;
use crate::data::SeriesSource;
use crate::domain::{AssetSchema, Observation};
use crate::models::SeriesStore;
use crate::utils::time_utils::{epoch_ms_to_csv_timestamp, parse_timestamp_ms};

/// Which columns of a CSV file make up the series.
#[derive(Debug, Clone)]
pub struct CsvLayout {
    pub date_column: String,
    /// Empty means every column except the date column
    pub value_columns: Vec<String>,
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self {
            date_column: DATA.csv.date_column.to_string(),
            value_columns: DATA
                .csv
                .value_columns
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

/// Loads a series from a CSV file on disk.
pub struct CsvSeriesSource {
    pub path: PathBuf,
    pub layout: CsvLayout,
}

impl CsvSeriesSource {
    pub fn new<P: AsRef<Path>>(path: P, layout: CsvLayout) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            layout,
        }
    }
}

impl SeriesSource for CsvSeriesSource {
    fn signature(&self) -> &'static str {
        "CSV File"
    }

    fn load(&self) -> Result<SeriesStore> {
        let file = std::fs::File::open(&self.path)
            .with_context(|| format!("Failed to open CSV file: {}", self.path.display()))?;
        read_series(file, &self.layout)
            .with_context(|| format!("Failed to read series from {}", self.path.display()))
    }
}

fn clean_header(header: &str) -> &str {
    header.trim().trim_matches('"')
}

fn parse_cell(cell: Option<&str>) -> Option<f64> {
    let text = cell?.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses CSV text into a store.
///
/// Rows whose timestamp does not parse are skipped with a warning. Value cells
/// that are empty or not numbers become absent values.
pub fn read_series<R: io::Read>(reader: R, layout: &CsvLayout) -> Result<SeriesStore> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(|h| clean_header(h).to_string())
        .collect();

    let Some(date_idx) = headers.iter().position(|h| *h == layout.date_column) else {
        bail!("Date column '{}' not found in CSV header", layout.date_column);
    };

    let (keys, value_idxs): (Vec<String>, Vec<usize>) = if layout.value_columns.is_empty() {
        headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != date_idx)
            .map(|(idx, h)| (h.clone(), idx))
            .unzip()
    } else {
        let mut pairs = Vec::with_capacity(layout.value_columns.len());
        for column in &layout.value_columns {
            let column = clean_header(column);
            let Some(idx) = headers.iter().position(|h| h == column) else {
                bail!("Value column '{}' not found in CSV header", column);
            };
            pairs.push((column.to_string(), idx));
        }
        pairs.into_iter().unzip()
    };

    if keys.is_empty() {
        bail!("CSV has no value columns besides '{}'", layout.date_column);
    }

    let mut observations = Vec::new();
    let mut skipped = 0usize;
    for (row_idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read CSV row {}", row_idx + 1))?;

        let Some(timestamp_ms) = record.get(date_idx).and_then(parse_timestamp_ms) else {
            skipped += 1;
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_csv_rows {
                log::info!("Row {}: unparseable timestamp {:?}", row_idx + 1, record.get(date_idx));
            }
            continue;
        };

        let values = value_idxs
            .iter()
            .map(|&idx| parse_cell(record.get(idx)))
            .collect();
        observations.push(Observation::new(timestamp_ms, values));
    }

    if skipped > 0 {
        log::warn!("Skipped {} CSV rows with unparseable timestamps", skipped);
    }
    if observations.is_empty() {
        bail!("CSV contains no rows with a valid timestamp");
    }

    let store = SeriesStore::new(AssetSchema::new(keys), observations)?;
    log::info!(
        "Loaded {} observations for {} assets",
        store.len(),
        store.assets().len()
    );
    Ok(store)
}

/// Writes observations back out in the layout `read_series` accepts.
/// Absent values become empty cells.
pub fn write_series<W: io::Write>(
    writer: W,
    date_column: &str,
    keys: &[String],
    observations: &[Observation],
) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(keys.len() + 1);
    header.push(date_column);
    header.extend(keys.iter().map(String::as_str));
    writer.write_record(&header).context("Failed to write CSV header")?;

    for obs in observations {
        let mut row = Vec::with_capacity(keys.len() + 1);
        row.push(epoch_ms_to_csv_timestamp(obs.timestamp_ms));
        row.extend(
            (0..keys.len()).map(|slot| obs.value(slot).map(|v| v.to_string()).unwrap_or_default()),
        );
        writer
            .write_record(&row)
            .with_context(|| format!("Failed to write CSV row at {}", obs.timestamp_ms))?;
    }
    writer.flush().context("Failed to flush CSV writer")?;
    Ok(())
}
