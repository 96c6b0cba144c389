//! Confusion matrix over label indices

use anyhow::{bail, Result};

/// Row-major confusion matrix.
///
/// Entry `(i, j)` counts samples whose true class is `i` and predicted class
/// is `j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    counts: Vec<usize>,
    n_classes: usize,
}

impl ConfusionMatrix {
    /// Count aligned (true, predicted) label index pairs.
    ///
    /// Errors on empty or misaligned input and on indices outside
    /// `0..n_classes`.
    pub fn from_labels(y_true: &[usize], y_pred: &[usize], n_classes: usize) -> Result<Self> {
        check_aligned(y_true.len(), y_pred.len())?;

        let mut counts = vec![0; n_classes * n_classes];
        for (&t, &p) in y_true.iter().zip(y_pred) {
            if t >= n_classes || p >= n_classes {
                bail!("label index ({}, {}) outside {} classes", t, p, n_classes);
            }
            counts[t * n_classes + p] += 1;
        }
        Ok(Self { counts, n_classes })
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    #[inline]
    pub fn get(&self, actual: usize, predicted: usize) -> usize {
        self.counts[actual * self.n_classes + predicted]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Correct predictions (the diagonal)
    pub fn correct(&self) -> usize {
        (0..self.n_classes).map(|k| self.get(k, k)).sum()
    }

    /// Number of samples whose true class is `k`
    pub fn row_sum(&self, k: usize) -> usize {
        (0..self.n_classes).map(|j| self.get(k, j)).sum()
    }

    /// Number of samples predicted as class `k`
    pub fn col_sum(&self, k: usize) -> usize {
        (0..self.n_classes).map(|i| self.get(i, k)).sum()
    }
}

/// Shared length check for aligned label or score sequences.
pub(crate) fn check_aligned(n_true: usize, n_pred: usize) -> Result<()> {
    if n_true == 0 {
        bail!("empty label vectors");
    }
    if n_true != n_pred {
        bail!("y_true length {} != y_pred length {}", n_true, n_pred);
    }
    Ok(())
}
