//! Kaggle submission file writer

use crate::data::loader::read_csv;
use crate::data::{DataLoader, DataRoot};
use crate::predictions::Predictions;
use crate::problem::{ID_COLUMN, TARGET_COLUMN};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Template listing the row identifiers expected in a submission
pub const SAMPLE_SUBMISSION_FILE: &str = "sample_submission.csv";

/// Only predictions whose suffix contains this marker are persisted
const TEST_SUFFIX_MARKER: &str = "test";

#[derive(Debug, Serialize)]
struct SubmissionRow<'a> {
    id: &'a str,
    #[serde(rename = "isFraud")]
    is_fraud: f64,
}

/// Writes `submission_<suffix>.csv` from fraud probabilities.
#[derive(Debug, Clone)]
pub struct SubmissionWriter {
    data: DataLoader,
    output_path: PathBuf,
}

impl SubmissionWriter {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(data_path: P, root: DataRoot, output_path: Q) -> Self {
        Self {
            data: DataLoader::new(data_path, root),
            output_path: output_path.as_ref().to_path_buf(),
        }
    }

    /// Output file for a suffix
    pub fn output_file(&self, suffix: &str) -> PathBuf {
        self.output_path.join(format!("submission_{}.csv", suffix))
    }

    /// Save test predictions.
    ///
    /// Returns `Ok(None)` without touching the file system when `suffix` does
    /// not contain `"test"`: training-fold predictions are never persisted.
    pub fn save(&self, y_pred: &Predictions, suffix: &str) -> Result<Option<PathBuf>> {
        if !suffix.contains(TEST_SUFFIX_MARKER) {
            debug!(suffix = %suffix, "Skipping submission for non-test predictions");
            return Ok(None);
        }

        let template = self.data.resolve(SAMPLE_SUBMISSION_FILE);
        let (columns, rows) = read_csv(&template)?;
        let Some(id_idx) = columns.iter().position(|c| c == ID_COLUMN) else {
            bail!("{} has no `{}` column", template.display(), ID_COLUMN);
        };
        if rows.len() != y_pred.len() {
            bail!(
                "{} lists {} ids but there are {} predictions",
                template.display(),
                rows.len(),
                y_pred.len()
            );
        }

        let path = self.output_file(suffix);
        let file =
            File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = csv::Writer::from_writer(file);
        for (row, proba) in rows.iter().zip(y_pred.y_proba()) {
            writer
                .serialize(SubmissionRow {
                    id: &row[id_idx],
                    is_fraud: proba[1],
                })
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!(
            path = %path.display(),
            rows = rows.len(),
            column = TARGET_COLUMN,
            "Submission written"
        );
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn setup(root: DataRoot, ids: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join(root.dir_name());
        fs::create_dir_all(&data_dir).unwrap();
        let mut contents = String::from("id,isFraud\n");
        for id in ids {
            contents.push_str(&format!("{},0.5\n", id));
        }
        fs::write(data_dir.join(SAMPLE_SUBMISSION_FILE), contents).unwrap();
        dir
    }

    fn proba() -> Predictions {
        Predictions::from_proba(vec![
            [0.9, 0.1],
            [0.25, 0.75],
            [0.5, 0.5],
            [0.0, 1.0],
            [0.875, 0.125],
        ])
        .unwrap()
    }

    #[test]
    fn test_writes_test_submission() {
        let dir = setup(DataRoot::Sample, &["3663549", "3663550", "3663551", "3663552", "3663553"]);
        let writer = SubmissionWriter::new(dir.path(), DataRoot::Sample, dir.path());

        let path = writer.save(&proba(), "test").unwrap().unwrap();
        assert_eq!(path, dir.path().join("submission_test.csv"));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.headers().unwrap(), vec!["id", "isFraud"]);
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 5);

        let ids: Vec<&str> = records.iter().map(|r| &r[0]).collect();
        assert_eq!(ids, ["3663549", "3663550", "3663551", "3663552", "3663553"]);
        let values: Vec<f64> = records.iter().map(|r| r[1].parse().unwrap()).collect();
        assert_eq!(values, proba().class_proba(1));
    }

    #[test]
    fn test_train_suffix_writes_nothing() {
        let dir = setup(DataRoot::Full, &["1", "2", "3", "4", "5"]);
        let writer = SubmissionWriter::new(dir.path(), DataRoot::Full, dir.path());

        assert!(writer.save(&proba(), "train").unwrap().is_none());
        assert!(!writer.output_file("train").exists());
    }

    #[test]
    fn test_suffix_containing_test_is_written() {
        let dir = setup(DataRoot::Full, &["1", "2", "3", "4", "5"]);
        let writer = SubmissionWriter::new(dir.path(), DataRoot::Full, dir.path());

        let path = writer.save(&proba(), "bagged_test").unwrap().unwrap();
        assert!(path.ends_with("submission_bagged_test.csv"));
        assert!(path.exists());
    }

    #[test]
    fn test_row_count_mismatch() {
        let dir = setup(DataRoot::Sample, &["1", "2", "3"]);
        let writer = SubmissionWriter::new(dir.path(), DataRoot::Sample, dir.path());

        assert!(writer.save(&proba(), "test").is_err());
        assert!(!writer.output_file("test").exists());
    }

    #[test]
    fn test_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SubmissionWriter::new(dir.path(), DataRoot::Sample, dir.path());
        assert!(writer.save(&proba(), "test").is_err());
    }
}
