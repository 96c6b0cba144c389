//! Area under the ROC curve

use crate::predictions::Predictions;
use crate::scoring::confusion::check_aligned;
use crate::scoring::{LabelScore, ScoreType};
use anyhow::{bail, Result};

/// Index of the fraud class in the probability matrix
const POSITIVE_CLASS: usize = 1;

/// ROC-AUC of the fraud-class probability.
///
/// Computed as the normalized Mann-Whitney U statistic, with tied scores
/// given their average rank. Equal to the trapezoidal area under the ROC
/// curve. Fails when only one class is present in the ground truth.
#[derive(Debug, Clone)]
pub struct RocAuc {
    name: String,
    precision: usize,
}

impl RocAuc {
    pub fn new(name: &str, precision: usize) -> Self {
        Self {
            name: name.to_string(),
            precision,
        }
    }

    /// AUC of `scores` against binary `positives`.
    pub fn auc(positives: &[bool], scores: &[f64]) -> Result<f64> {
        check_aligned(positives.len(), scores.len())?;
        if scores.iter().any(|s| s.is_nan()) {
            bail!("NaN score");
        }

        let n_pos = positives.iter().filter(|&&p| p).count();
        let n_neg = positives.len() - n_pos;
        if n_pos == 0 || n_neg == 0 {
            bail!("only one class present in y_true; ROC AUC is not defined");
        }

        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

        // 1-based average ranks over runs of tied scores
        let mut pos_rank_sum = 0.0;
        let mut i = 0;
        while i < order.len() {
            let mut j = i;
            while j + 1 < order.len() && scores[order[j + 1]] == scores[order[i]] {
                j += 1;
            }
            let avg_rank = (i + j) as f64 / 2.0 + 1.0;
            let tied_pos = order[i..=j].iter().filter(|&&k| positives[k]).count();
            pos_rank_sum += avg_rank * tied_pos as f64;
            i = j + 1;
        }

        let n_pos = n_pos as f64;
        let u = pos_rank_sum - n_pos * (n_pos + 1.0) / 2.0;
        Ok(u / (n_pos * n_neg as f64))
    }
}

impl Default for RocAuc {
    fn default() -> Self {
        Self::new("roc_auc", 2)
    }
}

impl LabelScore for RocAuc {
    /// Predicted label indices act as scores.
    fn compute(&self, y_true_label_index: &[usize], y_pred_label_index: &[usize]) -> Result<f64> {
        let positives: Vec<bool> = y_true_label_index
            .iter()
            .map(|&y| y == POSITIVE_CLASS)
            .collect();
        let scores: Vec<f64> = y_pred_label_index.iter().map(|&y| y as f64).collect();
        Self::auc(&positives, &scores)
    }
}

impl ScoreType for RocAuc {
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
        let positives: Vec<bool> = y_true
            .y_pred_label_index()
            .into_iter()
            .map(|y| y == POSITIVE_CLASS)
            .collect();
        Self::auc(&positives, &y_pred.class_proba(POSITIVE_CLASS))
    }
}
