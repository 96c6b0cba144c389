//! Stratified shuffle-split cross-validation

use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;
use tracing::debug;

/// One train/validation partition of the training rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train: Vec<usize>,
    pub validation: Vec<usize>,
}

/// Repeated randomized stratified splits.
///
/// Each split is drawn independently: validation sets of different folds may
/// overlap. Within a fold, train and validation are disjoint and together
/// cover every row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StratifiedShuffleSplit {
    pub n_splits: usize,
    pub test_size: f64,
    pub random_state: u64,
}

impl Default for StratifiedShuffleSplit {
    fn default() -> Self {
        Self {
            n_splits: 8,
            test_size: 0.5,
            random_state: 57,
        }
    }
}

impl StratifiedShuffleSplit {
    pub fn new(n_splits: usize, test_size: f64, random_state: u64) -> Self {
        Self {
            n_splits,
            test_size,
            random_state,
        }
    }

    /// Start a fresh fold sequence. Every call restarts from the seed.
    pub fn split(&self, labels: &[u8]) -> Result<Folds> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            bail!("test_size must be in (0, 1), got {}", self.test_size);
        }
        let n_samples = labels.len();
        if n_samples < 2 {
            bail!("cannot split {} samples", n_samples);
        }

        let mut by_class: BTreeMap<u8, Vec<usize>> = BTreeMap::new();
        for (i, &y) in labels.iter().enumerate() {
            by_class.entry(y).or_default().push(i);
        }
        if let Some((class, members)) = by_class.iter().find(|(_, m)| m.len() < 2) {
            bail!(
                "class {} has {} member(s); every class needs at least 2 for a stratified split",
                class,
                members.len()
            );
        }

        let n_test = (self.test_size * n_samples as f64).ceil() as usize;
        let n_train = n_samples - n_test;
        let n_classes = by_class.len();
        if n_train < n_classes || n_test < n_classes {
            bail!(
                "train size {} and test size {} must both be at least the number of classes {}",
                n_train,
                n_test,
                n_classes
            );
        }

        let classes: Vec<Vec<usize>> = by_class.into_values().collect();
        let counts: Vec<usize> = classes.iter().map(Vec::len).collect();
        let test_counts = allocate(&counts, n_test);

        debug!(
            n_splits = self.n_splits,
            n_samples,
            n_test,
            test_counts = ?test_counts,
            "Stratified split prepared"
        );

        Ok(Folds {
            classes,
            test_counts,
            rng: StdRng::seed_from_u64(self.random_state),
            remaining: self.n_splits,
        })
    }
}

/// Split `total` across classes in proportion to `counts`.
///
/// Floors first, then hands the remainder to the classes with the largest
/// fractional parts; ties go to the lower class. No class is given more than
/// it has.
fn allocate(counts: &[usize], total: usize) -> Vec<usize> {
    let n: usize = counts.iter().sum();
    let exact: Vec<f64> = counts
        .iter()
        .map(|&c| c as f64 * total as f64 / n as f64)
        .collect();
    let mut alloc: Vec<usize> = exact.iter().map(|e| e.floor() as usize).collect();

    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.sort_by(|&a, &b| {
        let fa = exact[a] - exact[a].floor();
        let fb = exact[b] - exact[b].floor();
        fb.partial_cmp(&fa)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut left = total - alloc.iter().sum::<usize>();
    while left > 0 {
        let before = left;
        for &k in &order {
            if left == 0 {
                break;
            }
            if alloc[k] < counts[k] {
                alloc[k] += 1;
                left -= 1;
            }
        }
        if left == before {
            break;
        }
    }
    alloc
}

/// Lazy, finite sequence of folds
#[derive(Debug, Clone)]
pub struct Folds {
    classes: Vec<Vec<usize>>,
    test_counts: Vec<usize>,
    rng: StdRng,
    remaining: usize,
}

impl Iterator for Folds {
    type Item = Fold;

    fn next(&mut self) -> Option<Fold> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let mut train = Vec::new();
        let mut validation = Vec::new();
        for (members, &n_test) in self.classes.iter().zip(&self.test_counts) {
            let mut shuffled = members.clone();
            shuffled.shuffle(&mut self.rng);
            validation.extend_from_slice(&shuffled[..n_test]);
            train.extend_from_slice(&shuffled[n_test..]);
        }
        // interleave classes
        train.shuffle(&mut self.rng);
        validation.shuffle(&mut self.rng);

        Some(Fold { train, validation })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Folds {}
