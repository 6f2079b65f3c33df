//! Headless summary output for `--report`.

use std::io::{self, Write};

use anyhow::{Context, Result, bail};

use crate::Cli;
use crate::data::load_first_available;
use crate::domain::{AssetKey, DateRangePreset, Window};
use crate::models::{AggregationError, SeriesStore, WindowSummary};
use crate::ui::shell_state::ShellState;
use crate::ui::utils::{format_percent, format_price};
use crate::utils::time_utils::parse_timestamp_ms;

/// Loads the series, resolves the requested window and prints its summary.
/// Aggregation conditions are reported on stdout and are not errors.
pub fn run_report(cli: &Cli) -> Result<()> {
    let (store, signature) = load_first_available(&cli.series_sources())?;
    log::info!("Reporting from {} ({} rows)", signature, store.len());

    let window = resolve_window(cli, &store)?;
    let outcome = store.summarize(&window, store.assets());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &window, &outcome, cli.json)
}

/// Custom range if given, else preset, else the initial middle window.
pub fn resolve_window(cli: &Cli, store: &SeriesStore) -> Result<Window> {
    let Some(extent) = store.extent() else {
        bail!("Series is empty");
    };

    if let (Some(start), Some(end)) = (&cli.start, &cli.end) {
        let start_ms = parse_timestamp_ms(start)
            .with_context(|| format!("Could not parse --start '{}'", start))?;
        let end_ms =
            parse_timestamp_ms(end).with_context(|| format!("Could not parse --end '{}'", end))?;
        let mut shell = ShellState::default();
        return Ok(shell.apply_custom(start_ms, end_ms, &extent)?);
    }

    let window = cli
        .preset
        .filter(|p| *p != DateRangePreset::Custom)
        .and_then(|p| p.resolve(&extent))
        .unwrap_or_else(|| ShellState::initial_window(&extent));
    Ok(window)
}

pub fn write_report<W: Write>(
    out: &mut W,
    window: &Window,
    outcome: &Result<WindowSummary, AggregationError>,
    json: bool,
) -> Result<()> {
    let summary = match outcome {
        Ok(summary) => summary,
        Err(condition) => {
            if json {
                let body = serde_json::json!({
                    "window": window,
                    "condition": condition.to_string(),
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
            } else {
                writeln!(out, "{}", window.label())?;
                writeln!(out, "Window: {}", condition)?;
            }
            return Ok(());
        }
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(summary)?)?;
        return Ok(());
    }

    writeln!(out, "{}", window.label())?;
    writeln!(out, "Observations: {}", summary.observation_count)?;
    for change in &summary.changes {
        writeln!(
            out,
            "{:<8} {:>9}   {} -> {}",
            AssetKey::display_name(&change.key),
            format_percent(change.percent),
            format_price(change.baseline),
            format_price(change.final_value),
        )?;
    }
    for key in &summary.undefined {
        writeln!(out, "{:<8} {:>9}", AssetKey::display_name(key), "n/a")?;
    }
    writeln!(
        out,
        "Domain: [{:.2}%, {:.2}%]",
        summary.domain.min, summary.domain.max
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetSchema, Observation};
    use crate::utils::TimeUtils;

    fn store() -> SeriesStore {
        let schema = AssetSchema::new(vec!["BTCUSDT_Open".into(), "SOLUSDT_Open".into()]);
        let rows = vec![
            Observation::new(0, vec![Some(100.0), Some(0.0)]),
            Observation::new(TimeUtils::MS_IN_D, vec![Some(110.0), Some(5.0)]),
            Observation::new(2 * TimeUtils::MS_IN_D, vec![Some(90.0), Some(6.0)]),
        ];
        SeriesStore::new(schema, rows).unwrap()
    }

    fn render(window: Window, json: bool) -> String {
        let store = store();
        let outcome = store.summarize(&window, store.assets());
        let mut out = Vec::new();
        write_report(&mut out, &window, &outcome, json).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn table_lists_changes_and_exclusions() {
        let text = render(Window::new(0, 2 * TimeUtils::MS_IN_D), false);
        assert!(text.starts_with("Time Range: 1970-01-01 (00:00) → 1970-01-03 (00:00)\n"));
        assert!(text.contains("BTC        -10.00%   $100.0000 -> $90.0000"));
        assert!(text.contains("SOL"));
        assert!(text.contains("n/a"));
        assert!(text.contains("Domain: [-12.00%, 12.00%]"));
    }

    #[test]
    fn conditions_are_printed_not_raised() {
        let text = render(Window::new(5, 5), false);
        assert!(text.contains("Window: Not enough data in range."));
    }

    #[test]
    fn json_report_is_the_summary() {
        let text = render(Window::new(0, 2 * TimeUtils::MS_IN_D), true);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["changes"][0]["key"], "BTCUSDT_Open");
        assert_eq!(value["undefined"][0], "SOLUSDT_Open");
        assert_eq!(value["observation_count"], 3);
    }

    #[test]
    fn window_resolution_prefers_custom_then_preset() {
        let store = store();
        let custom = Cli {
            start: Some("1970-01-01 12:00".into()),
            end: Some("1970-01-05".into()),
            ..Cli::default()
        };
        assert_eq!(
            resolve_window(&custom, &store).unwrap(),
            Window::new(TimeUtils::MS_IN_D / 2, 2 * TimeUtils::MS_IN_D)
        );

        let preset = Cli {
            preset: Some(DateRangePreset::AllTime),
            ..Cli::default()
        };
        assert_eq!(
            resolve_window(&preset, &store).unwrap(),
            store.extent().unwrap()
        );

        let reversed = Cli {
            start: Some("1970-01-02".into()),
            end: Some("1970-01-01".into()),
            ..Cli::default()
        };
        assert!(resolve_window(&reversed, &store).is_err());
    }
}
