//! Dataset loading and the in-memory tabular representation

pub mod dataset;
pub mod loader;

pub use dataset::{Dataset, FeatureTable};
pub use loader::{DataLoader, DataRoot};
