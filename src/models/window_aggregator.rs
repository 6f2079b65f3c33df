//! Windowed percent-change aggregation.
//!
//! Given the observations inside a window, compares the first and last
//! observation per tracked asset and derives a symmetric display domain for the
//! percent axis. Pure and cheap enough to run on every brush drag frame.

use std::fmt;

use serde::Serialize;

use crate::config::ANALYSIS;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::{AssetSchema, Observation, Window};
use crate::utils::maths_utils::{max_abs, pct_change};

/// Conditions under which no summary can be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationError {
    /// Fewer than two observations in the window
    InsufficientData,
    /// Every tracked asset was undefined for this window
    NoDefinedResults,
    /// None of the tracked keys exist in the schema
    EmptyAssetSet,
}

impl fmt::Display for AggregationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationError::InsufficientData => write!(f, "Not enough data in range."),
            AggregationError::NoDefinedResults => {
                write!(f, "No tracked asset has a defined change in range.")
            }
            AggregationError::EmptyAssetSet => write!(f, "No tracked assets selected."),
        }
    }
}

impl std::error::Error for AggregationError {}

/// Percent change of one asset between the first and last observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetChange {
    pub key: String,
    pub slot: usize,
    pub baseline: f64,
    pub final_value: f64,
    pub percent: f64,
}

/// Percent axis range, symmetric about zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayDomain {
    pub min: f64,
    pub max: f64,
}

impl DisplayDomain {
    pub fn from_max_abs(max_abs: f64) -> Self {
        let half_width = max_abs * (1.0 + ANALYSIS.window.domain_padding_pct);
        Self {
            min: -half_width,
            max: half_width,
        }
    }

    pub fn half_width(&self) -> f64 {
        self.max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowSummary {
    pub window: Window,
    pub first_timestamp_ms: i64,
    pub last_timestamp_ms: i64,
    pub observation_count: usize,
    /// Defined changes, in tracked order
    pub changes: Vec<AssetChange>,
    /// Tracked keys with no defined change (absent, zero or non-finite values)
    pub undefined: Vec<String>,
    pub domain: DisplayDomain,
}

impl WindowSummary {
    pub fn change_for(&self, key: &str) -> Option<&AssetChange> {
        self.changes.iter().find(|c| c.key == key)
    }
}

/// Aggregates `observations` (the contents of `window`) for the `tracked` keys.
///
/// `first` is the earliest observation (first on ties) and `last` the latest
/// (last on ties). The input does not need to be sorted.
pub fn aggregate<S: AsRef<str>>(
    window: Window,
    observations: &[Observation],
    schema: &AssetSchema,
    tracked: &[S],
) -> Result<WindowSummary, AggregationError> {
    let mut resolved: Vec<(&str, Option<usize>)> = Vec::with_capacity(tracked.len());
    for key in tracked.iter().map(AsRef::as_ref) {
        if !resolved.iter().any(|(k, _)| *k == key) {
            resolved.push((key, schema.slot(key)));
        }
    }
    if resolved.iter().all(|(_, slot)| slot.is_none()) {
        return Err(AggregationError::EmptyAssetSet);
    }

    if observations.len() < ANALYSIS.window.min_observations {
        log_outcome(&window, observations.len(), "insufficient data");
        return Err(AggregationError::InsufficientData);
    }

    // min_by_key keeps the first minimum, max_by_key keeps the last maximum
    let (Some(first), Some(last)) = (
        observations.iter().min_by_key(|o| o.timestamp_ms),
        observations.iter().max_by_key(|o| o.timestamp_ms),
    ) else {
        return Err(AggregationError::InsufficientData);
    };

    let mut changes = Vec::with_capacity(resolved.len());
    let mut undefined = Vec::new();
    for (key, slot) in resolved {
        let change = slot.and_then(|slot| {
            let baseline = first.value(slot)?;
            let final_value = last.value(slot)?;
            let percent = pct_change(baseline, final_value)?;
            Some(AssetChange {
                key: key.to_string(),
                slot,
                baseline,
                final_value,
                percent,
            })
        });
        match change {
            Some(change) => changes.push(change),
            None => undefined.push(key.to_string()),
        }
    }

    if changes.is_empty() {
        log_outcome(&window, observations.len(), "no defined results");
        return Err(AggregationError::NoDefinedResults);
    }

    let percents: Vec<f64> = changes.iter().map(|c| c.percent).collect();
    let max_abs = max_abs(&percents)
        .filter(|m| *m > 0.0)
        .unwrap_or(ANALYSIS.window.fallback_max_abs);

    log_outcome(&window, observations.len(), "ok");

    Ok(WindowSummary {
        window,
        first_timestamp_ms: first.timestamp_ms,
        last_timestamp_ms: last.timestamp_ms,
        observation_count: observations.len(),
        changes,
        undefined,
        domain: DisplayDomain::from_max_abs(max_abs),
    })
}

#[inline]
#[allow(unused_variables)]
fn log_outcome(window: &Window, count: usize, outcome: &str) {
    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_aggregation {
        log::info!(
            "Aggregated [{} .. {}] over {} observations: {}",
            window.start_ms,
            window.end_ms,
            count,
            outcome
        );
    }
}
