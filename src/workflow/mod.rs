//! Classifier boundary used by the evaluation harness

pub mod prior;

pub use prior::PriorClassifier;

use crate::data::FeatureTable;
use crate::predictions::Predictions;
use anyhow::Result;

/// A model that can be trained on labelled features and emit class probabilities.
///
/// Feature extraction is the implementor's concern: it receives the raw
/// table exactly as loaded.
pub trait Classifier {
    /// Short name used in logs
    fn name(&self) -> &str;

    fn fit(&mut self, features: &FeatureTable, labels: &[u8]) -> Result<()>;

    /// One probability row per feature row
    fn predict_proba(&self, features: &FeatureTable) -> Result<Predictions>;
}
