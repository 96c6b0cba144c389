//! Two-class probability predictions

use crate::problem::LABEL_NAMES;
use anyhow::{bail, Result};

/// Number of classes in the fixed label set
pub const N_CLASSES: usize = LABEL_NAMES.len();

/// Per-row class probabilities over [`LABEL_NAMES`].
///
/// Column `k` holds the probability of label `LABEL_NAMES[k]`. Ground truth
/// is represented the same way, as one-hot rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Predictions {
    y_proba: Vec<[f64; N_CLASSES]>,
}

impl Predictions {
    /// Wrap a probability matrix, rejecting NaN and infinite entries.
    pub fn from_proba(y_proba: Vec<[f64; N_CLASSES]>) -> Result<Self> {
        if let Some(i) = y_proba
            .iter()
            .position(|row| row.iter().any(|p| !p.is_finite()))
        {
            bail!("non-finite probability on row {}", i);
        }
        Ok(Self { y_proba })
    }

    /// One-hot encode true labels
    pub fn from_labels(labels: &[u8]) -> Result<Self> {
        let mut y_proba = Vec::with_capacity(labels.len());
        for (i, &y) in labels.iter().enumerate() {
            let Some(k) = LABEL_NAMES.iter().position(|&name| name == y) else {
                bail!("label {} on row {} is not in {:?}", y, i, LABEL_NAMES);
            };
            let mut row = [0.0; N_CLASSES];
            row[k] = 1.0;
            y_proba.push(row);
        }
        Ok(Self { y_proba })
    }

    pub fn len(&self) -> usize {
        self.y_proba.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y_proba.is_empty()
    }

    pub fn y_proba(&self) -> &[[f64; N_CLASSES]] {
        &self.y_proba
    }

    /// Probability column for class index `k`
    pub fn class_proba(&self, k: usize) -> Vec<f64> {
        self.y_proba.iter().map(|row| row[k]).collect()
    }

    /// Most probable class index per row; ties resolve to the lower index.
    pub fn y_pred_label_index(&self) -> Vec<usize> {
        self.y_proba
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .fold((0, f64::NEG_INFINITY), |best, (k, &p)| {
                        if p > best.1 {
                            (k, p)
                        } else {
                            best
                        }
                    })
                    .0
            })
            .collect()
    }

    /// Rows at the given indices, in order
    pub fn select(&self, indices: &[usize]) -> Result<Self> {
        let mut y_proba = Vec::with_capacity(indices.len());
        for &i in indices {
            match self.y_proba.get(i) {
                Some(row) => y_proba.push(*row),
                None => bail!("row index {} out of range ({} rows)", i, self.len()),
            }
        }
        Ok(Self { y_proba })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_labels_one_hot() {
        let p = Predictions::from_labels(&[0, 1, 1]).unwrap();
        assert_eq!(p.y_proba(), &[[1.0, 0.0], [0.0, 1.0], [0.0, 1.0]]);
        assert_eq!(p.y_pred_label_index(), vec![0, 1, 1]);
        assert!(Predictions::from_labels(&[2]).is_err());
    }

    #[test]
    fn test_argmax_ties_to_first_class() {
        let p = Predictions::from_proba(vec![[0.5, 0.5], [0.2, 0.8], [0.9, 0.1]]).unwrap();
        assert_eq!(p.y_pred_label_index(), vec![0, 1, 0]);
        assert_eq!(p.class_proba(1), vec![0.5, 0.8, 0.1]);
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(Predictions::from_proba(vec![[0.5, f64::NAN]]).is_err());
        assert!(Predictions::from_proba(vec![[f64::INFINITY, 0.0]]).is_err());
    }

    #[test]
    fn test_select() {
        let p = Predictions::from_proba(vec![[0.1, 0.9], [0.7, 0.3]]).unwrap();
        assert_eq!(p.select(&[1]).unwrap().y_proba(), &[[0.7, 0.3]]);
        assert!(p.select(&[2]).is_err());
    }
}
