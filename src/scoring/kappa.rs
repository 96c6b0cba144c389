//! Cohen's kappa

use crate::predictions::{Predictions, N_CLASSES};
use crate::scoring::{score_label_indices, ConfusionMatrix, LabelScore, ScoreType};
use anyhow::Result;

/// Chance-corrected agreement between true and predicted labels.
///
/// `kappa = (p_o - p_e) / (1 - p_e)` with observed agreement `p_o` and the
/// agreement `p_e` expected from the marginals. NaN when `p_e == 1`, i.e.
/// both sides are the same single class.
#[derive(Debug, Clone)]
pub struct Kappa {
    name: String,
    precision: usize,
}

impl Kappa {
    pub fn new(name: &str, precision: usize) -> Self {
        Self {
            name: name.to_string(),
            precision,
        }
    }
}

impl Default for Kappa {
    fn default() -> Self {
        Self::new("Kappa", 2)
    }
}

impl LabelScore for Kappa {
    fn compute(&self, y_true_label_index: &[usize], y_pred_label_index: &[usize]) -> Result<f64> {
        let cm = ConfusionMatrix::from_labels(y_true_label_index, y_pred_label_index, N_CLASSES)?;
        let n = cm.total() as f64;

        let observed = cm.correct() as f64 / n;
        let expected = (0..cm.n_classes())
            .map(|k| cm.row_sum(k) as f64 * cm.col_sum(k) as f64)
            .sum::<f64>()
            / (n * n);

        if expected >= 1.0 {
            return Ok(f64::NAN);
        }
        Ok((observed - expected) / (1.0 - expected))
    }
}

impl ScoreType for Kappa {
    fn name(&self) -> &str {
        &self.name
    }

    fn precision(&self) -> usize {
        self.precision
    }

    fn minimum(&self) -> f64 {
        -1.0
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
    fn test_perfect_agreement() {
        let k = Kappa::default();
        assert_eq!(k.compute(&[0, 1, 0, 1], &[0, 1, 0, 1]).unwrap(), 1.0);
    }

    #[test]
    fn test_total_disagreement() {
        let k = Kappa::default();
        assert_eq!(k.compute(&[0, 1, 0, 1], &[1, 0, 1, 0]).unwrap(), -1.0);
    }

    #[test]
    fn test_known_value() {
        // p_o = 0.6, p_e = (3*3 + 2*2) / 25 = 0.52, kappa = 0.08 / 0.48
        let k = Kappa::default();
        let value = k.compute(&[0, 0, 0, 1, 1], &[0, 0, 1, 1, 0]).unwrap();
        assert!((value - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_class_is_nan() {
        let k = Kappa::default();
        assert!(k.compute(&[1, 1, 1], &[1, 1, 1]).unwrap().is_nan());
    }

    #[test]
    fn test_default_metadata() {
        let k = Kappa::default();
        assert_eq!(k.name(), "Kappa");
        assert_eq!(k.precision(), 2);
    }
}
