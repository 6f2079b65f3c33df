use std::fmt;

use crate::domain::{AssetSchema, Observation, Window};
use crate::models::window_aggregator::{self, AggregationError, WindowSummary};

/// Store construction failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    /// An observation carries a different number of value slots than the schema has keys
    SchemaMismatch {
        timestamp_ms: i64,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesError::SchemaMismatch {
                timestamp_ms,
                expected,
                found,
            } => write!(
                f,
                "Observation at {} has {} values, schema has {} assets",
                timestamp_ms, found, expected
            ),
        }
    }
}

impl std::error::Error for SeriesError {}

/// Owns the parsed series for a session, sorted by timestamp.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    schema: AssetSchema,
    observations: Vec<Observation>,
}

impl SeriesStore {
    /// Sorts (stably, so equal timestamps keep file order) and validates slot counts.
    pub fn new(
        schema: AssetSchema,
        mut observations: Vec<Observation>,
    ) -> Result<Self, SeriesError> {
        if let Some(bad) = observations
            .iter()
            .find(|obs| obs.values.len() != schema.len())
        {
            return Err(SeriesError::SchemaMismatch {
                timestamp_ms: bad.timestamp_ms,
                expected: schema.len(),
                found: bad.values.len(),
            });
        }
        observations.sort_by_key(|obs| obs.timestamp_ms);
        Ok(Self {
            schema,
            observations,
        })
    }

    /// Observations with `start <= timestamp <= end`, in timestamp order.
    /// Windows outside the data give an empty slice.
    pub fn query(&self, window: &Window) -> &[Observation] {
        let lo = self
            .observations
            .partition_point(|obs| obs.timestamp_ms < window.start_ms);
        let hi = self
            .observations
            .partition_point(|obs| obs.timestamp_ms <= window.end_ms);
        if lo >= hi {
            return &[];
        }
        &self.observations[lo..hi]
    }

    pub fn extent(&self) -> Option<Window> {
        let first = self.observations.first()?;
        let last = self.observations.last()?;
        Some(Window::new(first.timestamp_ms, last.timestamp_ms))
    }

    pub fn schema(&self) -> &AssetSchema {
        &self.schema
    }

    pub fn assets(&self) -> &[String] {
        self.schema.keys()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Query plus aggregate in one call.
    pub fn summarize<S: AsRef<str>>(
        &self,
        window: &Window,
        tracked: &[S],
    ) -> Result<WindowSummary, AggregationError> {
        window_aggregator::aggregate(*window, self.query(window), &self.schema, tracked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(rows: &[(i64, f64)]) -> SeriesStore {
        let schema = AssetSchema::new(vec!["BTCUSDT_Open".to_string()]);
        let obs = rows
            .iter()
            .map(|&(t, v)| Observation::new(t, vec![Some(v)]))
            .collect();
        SeriesStore::new(schema, obs).unwrap()
    }

    #[test]
    fn construction_sorts_stably() {
        let s = store(&[(3, 30.0), (1, 10.0), (3, 31.0), (2, 20.0)]);
        let values: Vec<_> = s.observations().iter().map(|o| o.value(0)).collect();
        assert_eq!(
            values,
            vec![Some(10.0), Some(20.0), Some(30.0), Some(31.0)]
        );
    }

    #[test]
    fn construction_rejects_width_mismatch() {
        let schema = AssetSchema::new(vec!["A".into(), "B".into()]);
        let err = SeriesStore::new(schema, vec![Observation::new(5, vec![Some(1.0)])]).unwrap_err();
        assert_eq!(
            err,
            SeriesError::SchemaMismatch {
                timestamp_ms: 5,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn query_is_inclusive_on_both_ends() {
        let s = store(&[(0, 1.0), (1, 2.0), (2, 3.0), (3, 4.0)]);
        let got: Vec<_> = s
            .query(&Window::new(1, 2))
            .iter()
            .map(|o| o.timestamp_ms)
            .collect();
        assert_eq!(got, vec![1, 2]);
    }

    #[test]
    fn query_outside_extent_is_empty() {
        let s = store(&[(10, 1.0), (20, 2.0)]);
        assert!(s.query(&Window::new(0, 5)).is_empty());
        assert!(s.query(&Window::new(25, 100)).is_empty());
        assert!(s.query(&Window::new(11, 19)).is_empty());
    }

    #[test]
    fn extent_spans_first_to_last() {
        let s = store(&[(20, 1.0), (10, 2.0), (15, 3.0)]);
        assert_eq!(s.extent(), Some(Window::new(10, 20)));
        assert_eq!(SeriesStore::default().extent(), None);
    }
}
