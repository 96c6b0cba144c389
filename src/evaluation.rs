//! Cross-validated evaluation of a classifier on the problem

use crate::data::Dataset;
use crate::predictions::Predictions;
use crate::problem::Problem;
use crate::scoring::ScoreType;
use crate::workflow::Classifier;
use anyhow::{Context, Result};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Scores of one fold, in score-type order
#[derive(Debug, Clone, PartialEq)]
pub struct FoldScores {
    pub fold: usize,
    pub train: Vec<f64>,
    pub validation: Vec<f64>,
    pub elapsed: Duration,
}

/// Mean and standard deviation of one score across folds
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    pub name: String,
    pub precision: usize,
    pub train_mean: f64,
    pub train_std: f64,
    pub validation_mean: f64,
    pub validation_std: f64,
}

/// Per-fold scores and their aggregate
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    pub classifier: String,
    pub folds: Vec<FoldScores>,
    pub summary: Vec<ScoreSummary>,
}

impl EvaluationReport {
    fn new(classifier: &str, score_types: &[Box<dyn ScoreType>], folds: Vec<FoldScores>) -> Self {
        let summary = score_types
            .iter()
            .enumerate()
            .map(|(k, score)| {
                let train: Vec<f64> = folds.iter().map(|f| f.train[k]).collect();
                let validation: Vec<f64> = folds.iter().map(|f| f.validation[k]).collect();
                let (train_mean, train_std) = mean_std(&train);
                let (validation_mean, validation_std) = mean_std(&validation);
                ScoreSummary {
                    name: score.name().to_string(),
                    precision: score.precision(),
                    train_mean,
                    train_std,
                    validation_mean,
                    validation_std,
                }
            })
            .collect();

        Self {
            classifier: classifier.to_string(),
            folds,
            summary,
        }
    }

    /// Summary entry for a score name
    pub fn get(&self, name: &str) -> Option<&ScoreSummary> {
        self.summary.iter().find(|s| s.name == name)
    }

    /// Log the summary table
    pub fn print_summary(&self) {
        info!("════════════════════════════════════════════════════════════");
        info!(
            "  {} | {} folds | classifier: {}",
            crate::problem::PROBLEM_TITLE,
            self.folds.len(),
            self.classifier
        );
        info!("════════════════════════════════════════════════════════════");
        info!("  {:<10} {:>22} {:>22}", "score", "train", "valid");
        for s in &self.summary {
            let p = s.precision;
            info!(
                "  {:<10} {:>22} {:>22}",
                s.name,
                format!("{:.*} ± {:.*}", p, s.train_mean, p, s.train_std),
                format!("{:.*} ± {:.*}", p, s.validation_mean, p, s.validation_std)
            );
        }
        info!("════════════════════════════════════════════════════════════");
    }
}

/// Population mean and standard deviation. NaN for an empty slice.
fn mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Runs a classifier over every cross-validation fold and scores it.
#[derive(Debug)]
pub struct Evaluator<'a> {
    problem: &'a Problem,
    score_types: Vec<Box<dyn ScoreType>>,
}

impl<'a> Evaluator<'a> {
    pub fn new(problem: &'a Problem) -> Self {
        Self {
            problem,
            score_types: problem.score_types(),
        }
    }

    pub fn score_types(&self) -> &[Box<dyn ScoreType>] {
        &self.score_types
    }

    /// Fit on each fold's training rows and score both sides of the fold.
    ///
    /// Any score error (for example a single-class fold for ROC-AUC) aborts
    /// the run.
    pub fn run(&self, classifier: &mut dyn Classifier, train: &Dataset) -> Result<EvaluationReport> {
        let folds = self.problem.get_cv(train)?;
        info!(
            classifier = classifier.name(),
            folds = folds.len(),
            rows = train.len(),
            "Starting cross-validation"
        );

        let mut results = Vec::with_capacity(folds.len());
        for (i, fold) in folds.enumerate() {
            let start = Instant::now();
            let fold_train = train.select(&fold.train)?;
            let fold_valid = train.select(&fold.validation)?;

            classifier
                .fit(&fold_train.features, &fold_train.labels)
                .with_context(|| format!("fold {}: fit failed", i))?;

            let train_scores = self
                .score_all(classifier, &fold_train)
                .with_context(|| format!("fold {}: scoring train rows", i))?;
            let valid_scores = self
                .score_all(classifier, &fold_valid)
                .with_context(|| format!("fold {}: scoring validation rows", i))?;

            let elapsed = start.elapsed();
            debug!(
                fold = i,
                train_rows = fold.train.len(),
                validation_rows = fold.validation.len(),
                validation_scores = ?valid_scores,
                elapsed_ms = elapsed.as_millis() as u64,
                "Fold complete"
            );

            results.push(FoldScores {
                fold: i,
                train: train_scores,
                validation: valid_scores,
                elapsed,
            });
        }

        Ok(EvaluationReport::new(
            classifier.name(),
            &self.score_types,
            results,
        ))
    }

    fn score_all(&self, classifier: &dyn Classifier, data: &Dataset) -> Result<Vec<f64>> {
        let y_true = Predictions::from_labels(&data.labels)?;
        let y_pred = classifier.predict_proba(&data.features)?;
        self.score_types
            .iter()
            .map(|s| {
                s.score(&y_true, &y_pred)
                    .with_context(|| format!("score `{}`", s.name()))
            })
            .collect()
    }
}
