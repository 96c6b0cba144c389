//! Fraud Detection Benchmark Problem
//!
//! Loads the transaction dataset, generates stratified cross-validation
//! folds, scores classifier predictions and writes Kaggle submissions.

pub mod config;
pub mod cv;
pub mod data;
pub mod evaluation;
pub mod predictions;
pub mod problem;
pub mod scoring;
pub mod submission;
pub mod workflow;

pub use config::AppConfig;
pub use cv::{Fold, Folds, StratifiedShuffleSplit};
pub use data::{DataLoader, DataRoot, Dataset, FeatureTable};
pub use evaluation::{EvaluationReport, Evaluator};
pub use predictions::Predictions;
pub use problem::Problem;
pub use scoring::{default_score_types, ScoreType};
pub use submission::SubmissionWriter;
pub use workflow::{Classifier, PriorClassifier};
