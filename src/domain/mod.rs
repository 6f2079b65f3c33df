// Domain types and value objects
pub mod asset;
pub mod observation;
pub mod window;

// Re-export commonly used types
pub use asset::AssetKey;
pub use observation::{AssetSchema, Observation};
pub use window::{DateRangePreset, Window};
