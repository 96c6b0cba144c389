//! Matthews correlation coefficient

use crate::predictions::{Predictions, N_CLASSES};
use crate::scoring::{score_label_indices, ConfusionMatrix, LabelScore, ScoreType};
use anyhow::Result;

/// Matthews correlation coefficient.
///
/// Uses the multiclass form, which reduces to
/// `(TP*TN - FP*FN) / sqrt((TP+FP)(TP+FN)(TN+FP)(TN+FN))` for two classes.
/// Returns 0.0 when the denominator is zero.
#[derive(Debug, Clone)]
pub struct MatthewsCorrcoef {
    name: String,
    precision: usize,
}

impl MatthewsCorrcoef {
    pub fn new(name: &str, precision: usize) -> Self {
        Self {
            name: name.to_string(),
            precision,
        }
    }
}

impl Default for MatthewsCorrcoef {
    fn default() -> Self {
        Self::new("Matthews", 2)
    }
}

impl LabelScore for MatthewsCorrcoef {
    fn compute(&self, y_true_label_index: &[usize], y_pred_label_index: &[usize]) -> Result<f64> {
        let cm = ConfusionMatrix::from_labels(y_true_label_index, y_pred_label_index, N_CLASSES)?;

        let s = cm.total() as f64;
        let c = cm.correct() as f64;
        let mut sum_pk_sq = 0.0;
        let mut sum_tk_sq = 0.0;
        let mut sum_pk_tk = 0.0;
        for k in 0..cm.n_classes() {
            let pk = cm.col_sum(k) as f64;
            let tk = cm.row_sum(k) as f64;
            sum_pk_sq += pk * pk;
            sum_tk_sq += tk * tk;
            sum_pk_tk += pk * tk;
        }

        let numer = c * s - sum_pk_tk;
        let denom_sq = (s * s - sum_pk_sq) * (s * s - sum_tk_sq);
        if denom_sq <= 0.0 {
            return Ok(0.0);
        }
        Ok((numer / denom_sq.sqrt()).clamp(-1.0, 1.0))
    }
}

impl ScoreType for MatthewsCorrcoef {
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
    fn test_perfect_and_inverse() {
        let m = MatthewsCorrcoef::default();
        assert!((m.compute(&[0, 1, 1, 0], &[0, 1, 1, 0]).unwrap() - 1.0).abs() < 1e-12);
        assert!((m.compute(&[0, 1, 1, 0], &[1, 0, 0, 1]).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_known_value() {
        // TP=2 TN=1 FP=1 FN=1: (2 - 1) / sqrt(3 * 3 * 2 * 2) = 1/6
        let m = MatthewsCorrcoef::default();
        let value = m.compute(&[0, 0, 1, 1, 1], &[0, 1, 1, 1, 0]).unwrap();
        assert!((value - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_prediction_is_zero() {
        let m = MatthewsCorrcoef::default();
        assert_eq!(m.compute(&[0, 1, 1, 0], &[1, 1, 1, 1]).unwrap(), 0.0);
    }
}
