//! Score definitions for the fraud detection problem.
//!
//! Every score is a bounded, stateless function of ground truth and
//! predictions. Classifier scores (kappa, Matthews, accuracy) compare label
//! indices; ROC-AUC ranks the fraud-class probability.

pub mod accuracy;
pub mod confusion;
pub mod kappa;
pub mod matthews;
pub mod roc_auc;

pub use accuracy::Accuracy;
pub use confusion::ConfusionMatrix;
pub use kappa::Kappa;
pub use matthews::MatthewsCorrcoef;
pub use roc_auc::RocAuc;

use crate::predictions::Predictions;
use anyhow::Result;
use std::fmt::Debug;

/// Display precision shared by the problem's scores
pub const SCORE_PRECISION: usize = 3;

/// A named, bounded evaluation metric.
pub trait ScoreType: Debug + Send + Sync {
    /// Display name
    fn name(&self) -> &str;

    /// Digits after the decimal point when displayed
    fn precision(&self) -> usize;

    fn minimum(&self) -> f64;

    fn maximum(&self) -> f64;

    fn is_lower_the_better(&self) -> bool {
        false
    }

    /// Worst achievable value
    fn worst(&self) -> f64 {
        if self.is_lower_the_better() {
            self.maximum()
        } else {
            self.minimum()
        }
    }

    /// Score predictions against ground truth.
    fn score(&self, y_true: &Predictions, y_pred: &Predictions) -> Result<f64>;

    /// Round for display
    fn format(&self, value: f64) -> String {
        format!("{:.*}", self.precision(), value)
    }
}

/// Score computed from true and predicted label indices.
pub trait LabelScore {
    fn compute(&self, y_true_label_index: &[usize], y_pred_label_index: &[usize]) -> Result<f64>;
}

/// Reduce both sides to argmax label indices and apply a [`LabelScore`].
pub(crate) fn score_label_indices<S: LabelScore + ?Sized>(
    score: &S,
    y_true: &Predictions,
    y_pred: &Predictions,
) -> Result<f64> {
    confusion::check_aligned(y_true.len(), y_pred.len())?;
    score.compute(&y_true.y_pred_label_index(), &y_pred.y_pred_label_index())
}

/// The four scores reported for this problem, in display order.
pub fn default_score_types() -> Vec<Box<dyn ScoreType>> {
    vec![
        Box::new(Kappa::new("kappa", SCORE_PRECISION)),
        Box::new(MatthewsCorrcoef::new("matthews", SCORE_PRECISION)),
        Box::new(RocAuc::new("roc_auc", SCORE_PRECISION)),
        Box::new(Accuracy::new("acc", SCORE_PRECISION)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_default_score_types() {
        let scores = default_score_types();
        let names: Vec<&str> = scores.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["kappa", "matthews", "roc_auc", "acc"]);

        for s in &scores {
            assert_eq!(s.precision(), 3);
            assert!(!s.is_lower_the_better());
            assert_eq!(s.worst(), s.minimum());
        }
        assert_eq!((scores[0].minimum(), scores[0].maximum()), (-1.0, 1.0));
        assert_eq!((scores[1].minimum(), scores[1].maximum()), (-1.0, 1.0));
        assert_eq!((scores[2].minimum(), scores[2].maximum()), (0.0, 1.0));
        assert_eq!((scores[3].minimum(), scores[3].maximum()), (0.0, 1.0));
    }

    #[test]
    fn test_format_uses_precision() {
        let acc = Accuracy::new("acc", 3);
        assert_eq!(acc.format(0.123456), "0.123");
        assert_eq!(acc.format(1.0), "1.000");
    }

    #[test]
    fn test_scores_stay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let scores = default_score_types();

        for _ in 0..200 {
            let n = rng.gen_range(4..40);
            let mut labels: Vec<u8> = (0..n).map(|_| u8::from(rng.gen_bool(0.3))).collect();
            // keep both classes so every score is defined
            labels[0] = 0;
            labels[1] = 1;
            let proba: Vec<[f64; 2]> = (0..n)
                .map(|_| {
                    let p: f64 = rng.gen();
                    [1.0 - p, p]
                })
                .collect();

            let y_true = Predictions::from_labels(&labels).unwrap();
            let y_pred = Predictions::from_proba(proba).unwrap();

            for s in &scores {
                let value = s.score(&y_true, &y_pred).unwrap();
                assert!(
                    value >= s.minimum() - 1e-12 && value <= s.maximum() + 1e-12,
                    "{} = {} outside [{}, {}]",
                    s.name(),
                    value,
                    s.minimum(),
                    s.maximum()
                );
            }
        }
    }

    #[test]
    fn test_misaligned_predictions_error() {
        let y_true = Predictions::from_labels(&[0, 1, 1]).unwrap();
        let y_pred = Predictions::from_labels(&[0, 1]).unwrap();
        for s in default_score_types() {
            assert!(s.score(&y_true, &y_pred).is_err(), "{}", s.name());
        }
    }
}
