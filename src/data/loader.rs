//! CSV dataset loader

use crate::data::dataset::{Dataset, FeatureTable};
use crate::problem::TARGET_COLUMN;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment flag that selects the sample data directory
pub const TEST_MODE_ENV: &str = "RAMP_TEST_MODE";

/// Which of the two data directory layouts to read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataRoot {
    /// Small sample dataset under `data/`
    Sample,
    /// Full competition dataset under `kaggle_data/`
    Full,
}

impl DataRoot {
    /// Directory name relative to the base path
    pub fn dir_name(self) -> &'static str {
        match self {
            DataRoot::Sample => "data",
            DataRoot::Full => "kaggle_data",
        }
    }

    /// Pick the root from `RAMP_TEST_MODE`: any non-empty value means sample data.
    pub fn from_env() -> Self {
        Self::from_flag(std::env::var_os(TEST_MODE_ENV).as_deref())
    }

    fn from_flag(flag: Option<&std::ffi::OsStr>) -> Self {
        match flag {
            Some(v) if !v.is_empty() => DataRoot::Sample,
            _ => DataRoot::Full,
        }
    }
}

/// Reads `train.csv`/`test.csv` from a resolved data directory.
#[derive(Debug, Clone)]
pub struct DataLoader {
    base_path: PathBuf,
    root: DataRoot,
}

impl DataLoader {
    pub fn new<P: AsRef<Path>>(base_path: P, root: DataRoot) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            root,
        }
    }

    pub fn root(&self) -> DataRoot {
        self.root
    }

    /// Full path of a file inside the selected data directory
    pub fn resolve(&self, file_name: &str) -> PathBuf {
        self.base_path.join(self.root.dir_name()).join(file_name)
    }

    /// Load a labelled file. The label column must be present.
    pub fn load_labelled(&self, file_name: &str) -> Result<Dataset> {
        let dataset = self.load(file_name)?;
        if !dataset.labelled {
            bail!(
                "{} has no `{}` column",
                self.resolve(file_name).display(),
                TARGET_COLUMN
            );
        }
        Ok(dataset)
    }

    /// Load a CSV file and split off the label column.
    ///
    /// When the file has no label column the dataset comes back unlabelled
    /// with zero placeholder labels.
    pub fn load(&self, file_name: &str) -> Result<Dataset> {
        let path = self.resolve(file_name);
        let (columns, rows) = read_csv(&path)?;

        let Some(target_idx) = columns.iter().position(|c| c == TARGET_COLUMN) else {
            warn!(
                path = %path.display(),
                column = TARGET_COLUMN,
                "Label column missing, returning unlabelled dataset"
            );
            return Ok(Dataset::unlabelled(FeatureTable::new(columns, rows)?));
        };

        let mut labels = Vec::with_capacity(rows.len());
        let mut feature_rows = Vec::with_capacity(rows.len());
        for (i, mut row) in rows.into_iter().enumerate() {
            let cell = row.remove(target_idx);
            labels.push(
                parse_label(&cell)
                    .with_context(|| format!("{}: bad label on row {}", path.display(), i))?,
            );
            feature_rows.push(row);
        }

        let mut feature_columns = columns;
        feature_columns.remove(target_idx);

        let dataset = Dataset::new(FeatureTable::new(feature_columns, feature_rows)?, labels)?;
        info!(
            path = %path.display(),
            rows = dataset.len(),
            features = dataset.features.n_columns(),
            positives = dataset.positives(),
            "Dataset loaded"
        );
        Ok(dataset)
    }
}

/// Read a CSV file into its header and raw string rows.
pub(crate) fn read_csv(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);

    let columns: Vec<String> = reader
        .headers()
        .with_context(|| format!("Failed to read header of {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("Failed to parse {}", path.display()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(path = %path.display(), columns = columns.len(), rows = rows.len(), "CSV read");
    Ok((columns, rows))
}

fn parse_label(cell: &str) -> Result<u8> {
    let value: f64 = cell
        .trim()
        .parse()
        .with_context(|| format!("`{}` is not a number", cell))?;
    if value == 0.0 {
        Ok(0)
    } else if value == 1.0 {
        Ok(1)
    } else {
        bail!("`{}` is not a binary label", cell)
    }
}
