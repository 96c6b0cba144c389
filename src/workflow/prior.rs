//! Class-prior baseline classifier

use crate::data::FeatureTable;
use crate::predictions::Predictions;
use crate::workflow::Classifier;
use anyhow::{bail, Result};
use tracing::debug;

/// Predicts the training fraud rate for every row.
///
/// Ignores the features entirely. Useful as a floor for the other models and
/// to exercise the harness without an external learner.
#[derive(Debug, Clone, Default)]
pub struct PriorClassifier {
    fraud_rate: Option<f64>,
}

impl PriorClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of fraud rows seen in `fit`, if fitted
    pub fn fraud_rate(&self) -> Option<f64> {
        self.fraud_rate
    }
}

impl Classifier for PriorClassifier {
    fn name(&self) -> &str {
        "prior"
    }

    fn fit(&mut self, features: &FeatureTable, labels: &[u8]) -> Result<()> {
        if labels.is_empty() {
            bail!("cannot fit on an empty training set");
        }
        if features.n_rows() != labels.len() {
            bail!(
                "{} feature rows but {} labels",
                features.n_rows(),
                labels.len()
            );
        }
        let positives = labels.iter().filter(|&&y| y == 1).count();
        let rate = positives as f64 / labels.len() as f64;
        debug!(rows = labels.len(), fraud_rate = rate, "Prior fitted");
        self.fraud_rate = Some(rate);
        Ok(())
    }

    fn predict_proba(&self, features: &FeatureTable) -> Result<Predictions> {
        let Some(rate) = self.fraud_rate else {
            bail!("prior classifier used before fit");
        };
        Predictions::from_proba(vec![[1.0 - rate, rate]; features.n_rows()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(n: usize) -> FeatureTable {
        FeatureTable::new(
            vec!["amount".to_string()],
            (0..n).map(|i| vec![i.to_string()]).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_predicts_prior() {
        let mut clf = PriorClassifier::new();
        clf.fit(&table(4), &[0, 1, 0, 0]).unwrap();
        assert_eq!(clf.fraud_rate(), Some(0.25));

        let p = clf.predict_proba(&table(3)).unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.class_proba(1), vec![0.25, 0.25, 0.25]);
        assert_eq!(p.y_pred_label_index(), vec![0, 0, 0]);
    }

    #[test]
    fn test_unfitted_and_bad_input() {
        let mut clf = PriorClassifier::new();
        assert!(clf.predict_proba(&table(1)).is_err());
        assert!(clf.fit(&table(0), &[]).is_err());
        assert!(clf.fit(&table(2), &[0]).is_err());
    }
}
