//! Classification accuracy

use crate::predictions::Predictions;
use crate::scoring::confusion::check_aligned;
use crate::scoring::{score_label_indices, LabelScore, ScoreType};
use anyhow::Result;

/// Fraction of rows whose predicted label matches the true label
#[derive(Debug, Clone)]
pub struct Accuracy {
    name: String,
    precision: usize,
}

impl Accuracy {
    pub fn new(name: &str, precision: usize) -> Self {
        Self {
            name: name.to_string(),
            precision,
        }
    }
}

impl Default for Accuracy {
    fn default() -> Self {
        Self::new("accuracy", 2)
    }
}

impl LabelScore for Accuracy {
    fn compute(&self, y_true_label_index: &[usize], y_pred_label_index: &[usize]) -> Result<f64> {
        check_aligned(y_true_label_index.len(), y_pred_label_index.len())?;
        let hits = y_true_label_index
            .iter()
            .zip(y_pred_label_index)
            .filter(|(t, p)| t == p)
            .count();
        Ok(hits as f64 / y_true_label_index.len() as f64)
    }
}

impl ScoreType for Accuracy {
    fn name(&self) -> &str {
        &self.name
    }

    fn precision(&self) -> usize {
        self.precision
    }

    fn minimum(&self) -> f64 {
        0.0
    }

    fn maximum(&self) -> f64 {
        1.0
    }

    fn score(&self, y_true: &Predictions, y_pred: &Predictions) -> Result<f64> {
        score_label_indices(self, y_true, y_pred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        let acc = Accuracy::default();
        assert_eq!(acc.compute(&[0, 1, 1, 0], &[0, 1, 0, 0]).unwrap(), 0.75);
        assert!(acc.compute(&[], &[]).is_err());
    }

    #[test]
    fn test_score_thresholds_probabilities() {
        let acc = Accuracy::new("acc", 3);
        let y_true = Predictions::from_labels(&[0, 1, 1]).unwrap();
        let y_pred = Predictions::from_proba(vec![[0.9, 0.1], [0.3, 0.7], [0.6, 0.4]]).unwrap();
        let value = acc.score(&y_true, &y_pred).unwrap();
        assert!((value - 2.0 / 3.0).abs() < 1e-12);
    }
}
