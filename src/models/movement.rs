//! Per-asset movement statistics for the overview chart.

use itertools::Itertools;

use crate::models::SeriesStore;
use crate::utils::maths_utils::{get_max, normalize_max};

/// Mean of `|next - prev| / prev * 100` over consecutive observations where both
/// values are present and finite and `prev` is non-zero.
pub fn average_step_movement(store: &SeriesStore, slot: usize) -> Option<f64> {
    let (sum, count) = store
        .observations()
        .iter()
        .map(|obs| obs.value(slot))
        .tuple_windows()
        .filter_map(|(prev, next)| {
            let (prev, next) = (prev?, next?);
            if prev == 0.0 || !prev.is_finite() || !next.is_finite() {
                return None;
            }
            Some(((next - prev) / prev * 100.0).abs())
        })
        .fold((0.0, 0usize), |(sum, n), m| (sum + m, n + 1));

    (count > 0).then(|| sum / count as f64)
}

/// `[timestamp_ms, value / max]` for every present, finite value of `slot`.
/// Empty when the series maximum is not positive.
pub fn normalized_line(store: &SeriesStore, slot: usize) -> Vec<[f64; 2]> {
    let (timestamps, values): (Vec<f64>, Vec<f64>) = store
        .observations()
        .iter()
        .filter_map(|obs| {
            let v = obs.value(slot)?;
            v.is_finite().then_some((obs.timestamp_ms as f64, v))
        })
        .unzip();

    if values.is_empty() || get_max(&values) <= 0.0 {
        return Vec::new();
    }

    timestamps
        .into_iter()
        .zip(normalize_max(&values))
        .map(|(t, v)| [t, v])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetSchema, Observation};

    fn store(values: &[Option<f64>]) -> SeriesStore {
        let schema = AssetSchema::new(vec!["BTC".to_string()]);
        let obs = values
            .iter()
            .enumerate()
            .map(|(t, v)| Observation::new(t as i64 * 10, vec![*v]))
            .collect();
        SeriesStore::new(schema, obs).unwrap()
    }

    #[test]
    fn average_movement_skips_gaps_and_zero_baselines() {
        // Pairs: (100,110)=10%, (110,None) skip, (None,0) skip, (0,50) skip, (50,25)=50%
        let s = store(&[
            Some(100.0),
            Some(110.0),
            None,
            Some(0.0),
            Some(50.0),
            Some(25.0),
        ]);
        let avg = average_step_movement(&s, 0).unwrap();
        assert!((avg - 30.0).abs() < 1e-9);
    }

    #[test]
    fn average_movement_needs_a_pair() {
        assert_eq!(average_step_movement(&store(&[Some(1.0)]), 0), None);
        assert_eq!(average_step_movement(&store(&[None, None]), 0), None);
    }

    #[test]
    fn normalized_line_scales_to_unit_max() {
        let s = store(&[Some(50.0), None, Some(200.0)]);
        let line = normalized_line(&s, 0);
        assert_eq!(line, vec![[0.0, 0.25], [20.0, 1.0]]);
    }

    #[test]
    fn normalized_line_empty_for_non_positive_series() {
        assert!(normalized_line(&store(&[Some(-1.0), Some(0.0)]), 0).is_empty());
        assert!(normalized_line(&store(&[None]), 0).is_empty());
    }
}
