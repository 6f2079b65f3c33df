use serde::Serialize;

/// One timestamped row of asset values.
///
/// `values` has exactly one slot per key of the owning store's `AssetSchema`.
/// A missing or unparseable cell is `None`, never zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub timestamp_ms: i64,
    pub values: Vec<Option<f64>>,
}

impl Observation {
    pub fn new(timestamp_ms: i64, values: Vec<Option<f64>>) -> Self {
        Self {
            timestamp_ms,
            values,
        }
    }

    /// Value at `slot`, flattened so an out-of-range slot reads as absent.
    #[inline]
    pub fn value(&self, slot: usize) -> Option<f64> {
        self.values.get(slot).copied().flatten()
    }
}

/// Ordered asset keys (CSV column names), fixed once at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetSchema {
    keys: Vec<String>,
}

impl AssetSchema {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn slot(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_treats_out_of_range_slot_as_absent() {
        let obs = Observation::new(0, vec![Some(1.0), None]);
        assert_eq!(obs.value(0), Some(1.0));
        assert_eq!(obs.value(1), None);
        assert_eq!(obs.value(7), None);
    }

    #[test]
    fn schema_resolves_slots() {
        let schema = AssetSchema::new(vec!["BTCUSDT_Open".into(), "ETHUSDT_Open".into()]);
        assert_eq!(schema.slot("ETHUSDT_Open"), Some(1));
        assert_eq!(schema.slot("DOGEUSDT_Open"), None);
        assert_eq!(schema.keys()[0], "BTCUSDT_Open");
    }
}
