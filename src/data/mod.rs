// Series loading
pub mod csv_loader;
pub mod demo;

use anyhow::{Result, anyhow};

use crate::models::SeriesStore;
use crate::utils::app_time::{elapsed_since, now};

// Re-export commonly used types
pub use csv_loader::{CsvLayout, CsvSeriesSource};
pub use demo::EmbeddedDemoSource;

pub trait SeriesSource {
    // Either load a store OR return an anyhow::error
    fn load(&self) -> Result<SeriesStore>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// Tries each source in order and returns the first store that loads.
pub fn load_first_available(
    sources: &[Box<dyn SeriesSource>],
) -> Result<(SeriesStore, &'static str)> {
    for source in sources {
        let started = now();
        match source.load() {
            Ok(store) => {
                let signature = source.signature();
                log::info!(
                    "Series loaded from {} in {:?}",
                    signature,
                    elapsed_since(started)
                );
                return Ok((store, signature));
            }
            Err(e) => {
                log::info!("Error with series source {}: {:#}", source.signature(), e);
                // Continue to the next source
            }
        }
    }
    Err(anyhow!("All series sources failed to load data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    struct Failing;
    impl SeriesSource for Failing {
        fn load(&self) -> Result<SeriesStore> {
            bail!("offline")
        }
        fn signature(&self) -> &'static str {
            "Failing"
        }
    }

    #[test]
    fn falls_through_to_next_source() {
        let sources: Vec<Box<dyn SeriesSource>> = vec![Box::new(Failing), Box::new(EmbeddedDemoSource)];
        let (store, signature) = load_first_available(&sources).unwrap();
        assert_eq!(signature, "Embedded Demo CSV");
        assert!(!store.is_empty());
    }

    #[test]
    fn all_failing_is_an_error() {
        let sources: Vec<Box<dyn SeriesSource>> = vec![Box::new(Failing)];
        assert!(load_first_available(&sources).is_err());
    }
}
