// Domain models for the price window explorer
// These modules contain pure logic independent of UI/visualization

pub mod movement;
pub mod series_store;
pub mod window_aggregator;

// Re-export key types for convenience
pub use series_store::{SeriesError, SeriesStore};
pub use window_aggregator::{
    AggregationError, AssetChange, DisplayDomain, WindowSummary, aggregate,
};
