//! The fraud detection problem: data, cross-validation, scores and submissions.

use crate::config::AppConfig;
use crate::cv::{Folds, StratifiedShuffleSplit};
use crate::data::{DataLoader, DataRoot, Dataset};
use crate::predictions::Predictions;
use crate::scoring::{default_score_types, ScoreType};
use crate::submission::SubmissionWriter;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const PROBLEM_TITLE: &str = "Fraud detection";

/// Label column in the training data
pub const TARGET_COLUMN: &str = "isFraud";

/// Identifier column of the sample submission
pub const ID_COLUMN: &str = "id";

/// 0 = legitimate, 1 = fraud
pub const LABEL_NAMES: [u8; 2] = [0, 1];

pub const TRAIN_FILE: &str = "train.csv";
pub const TEST_FILE: &str = "test.csv";

/// Everything an evaluation harness needs to run this problem.
#[derive(Debug, Clone)]
pub struct Problem {
    loader: DataLoader,
    submissions: SubmissionWriter,
    cv: StratifiedShuffleSplit,
}

impl Problem {
    /// Problem with the default cross-validation policy
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(data_path: P, root: DataRoot, output_path: Q) -> Self {
        Self {
            loader: DataLoader::new(&data_path, root),
            submissions: SubmissionWriter::new(&data_path, root, output_path),
            cv: StratifiedShuffleSplit::default(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let root = config.data.resolved_root();
        Self::new(&config.data.base_path, root, &config.submission.output_path).with_cv(
            StratifiedShuffleSplit::new(
                config.cv.n_splits,
                config.cv.test_size,
                config.cv.random_state,
            ),
        )
    }

    pub fn with_cv(mut self, cv: StratifiedShuffleSplit) -> Self {
        self.cv = cv;
        self
    }

    pub fn title(&self) -> &'static str {
        PROBLEM_TITLE
    }

    pub fn root(&self) -> DataRoot {
        self.loader.root()
    }

    pub fn cv(&self) -> &StratifiedShuffleSplit {
        &self.cv
    }

    /// Labelled training data
    pub fn get_train_data(&self) -> Result<Dataset> {
        self.loader.load_labelled(TRAIN_FILE)
    }

    /// Held-out test data. Unlabelled unless the file carries `isFraud`.
    pub fn get_test_data(&self) -> Result<Dataset> {
        self.loader.load(TEST_FILE)
    }

    /// Cross-validation folds over the training labels
    pub fn get_cv(&self, train: &Dataset) -> Result<Folds> {
        self.cv.split(&train.labels)
    }

    pub fn score_types(&self) -> Vec<Box<dyn ScoreType>> {
        default_score_types()
    }

    /// Persist test predictions; a no-op for suffixes without `"test"`.
    pub fn save_submission(&self, y_pred: &Predictions, suffix: &str) -> Result<Option<PathBuf>> {
        self.submissions.save(y_pred, suffix)
    }
}
