//! Feature table and labelled dataset types

use anyhow::{bail, Result};

/// Ordered table of raw feature cells.
///
/// Cells are kept as the strings read from disk: columns are heterogeneous
/// and typing them is the job of whatever feature extractor consumes the
/// table. Column order and names are preserved exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl FeatureTable {
    /// Build a table, checking that every row has one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            bail!(
                "row {} has {} cells, expected {}",
                i,
                row.len(),
                columns.len()
            );
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of row `i`, in column order
    pub fn row(&self, i: usize) -> Option<&[String]> {
        self.rows.get(i).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of one column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Copy the given rows, in the given order, into a new table.
    pub fn select_rows(&self, indices: &[usize]) -> Result<Self> {
        let mut rows = Vec::with_capacity(indices.len());
        for &i in indices {
            match self.rows.get(i) {
                Some(row) => rows.push(row.clone()),
                None => bail!("row index {} out of range ({} rows)", i, self.rows.len()),
            }
        }
        Ok(Self {
            columns: self.columns.clone(),
            rows,
        })
    }
}

/// Feature table with its aligned label vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub features: FeatureTable,
    /// Binary labels, one per feature row
    pub labels: Vec<u8>,
    /// False when the source file had no label column and `labels` holds
    /// zero placeholders
    pub labelled: bool,
}

impl Dataset {
    pub fn new(features: FeatureTable, labels: Vec<u8>) -> Result<Self> {
        if features.n_rows() != labels.len() {
            bail!(
                "{} feature rows but {} labels",
                features.n_rows(),
                labels.len()
            );
        }
        if let Some(bad) = labels.iter().find(|&&y| y > 1) {
            bail!("label {} is not binary", bad);
        }
        Ok(Self {
            features,
            labels,
            labelled: true,
        })
    }

    /// Dataset whose labels are unknown; placeholder zeros keep the shapes aligned.
    pub fn unlabelled(features: FeatureTable) -> Self {
        let labels = vec![0; features.n_rows()];
        Self {
            features,
            labels,
            labelled: false,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of rows labelled as fraud
    pub fn positives(&self) -> usize {
        self.labels.iter().filter(|&&y| y == 1).count()
    }

    /// Subset of rows, labels kept aligned
    pub fn select(&self, indices: &[usize]) -> Result<Self> {
        let features = self.features.select_rows(indices)?;
        let labels = indices.iter().map(|&i| self.labels[i]).collect();
        Ok(Self {
            features,
            labels,
            labelled: self.labelled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FeatureTable {
        FeatureTable::new(
            vec!["id".to_string(), "amount".to_string()],
            vec![
                vec!["a".to_string(), "10.5".to_string()],
                vec!["b".to_string(), "".to_string()],
                vec!["c".to_string(), "7".to_string()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = FeatureTable::new(
            vec!["x".to_string(), "y".to_string()],
            vec![vec!["1".to_string()]],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_column_access() {
        let t = table();
        assert_eq!(t.n_rows(), 3);
        assert_eq!(t.n_columns(), 2);
        assert_eq!(t.column("amount"), Some(vec!["10.5", "", "7"]));
        assert!(t.column("isFraud").is_none());
    }

    #[test]
    fn test_select_keeps_alignment() {
        let ds = Dataset::new(table(), vec![0, 1, 0]).unwrap();
        let subset = ds.select(&[2, 1]).unwrap();

        assert_eq!(subset.labels, vec![0, 1]);
        assert_eq!(subset.features.row(0).unwrap()[0], "c");
        assert_eq!(subset.features.row(1).unwrap()[0], "b");
        assert_eq!(subset.features.columns(), ds.features.columns());
        assert!(ds.select(&[3]).is_err());
    }

    #[test]
    fn test_non_binary_labels_rejected() {
        assert!(Dataset::new(table(), vec![0, 2, 1]).is_err());
        assert!(Dataset::new(table(), vec![0, 1]).is_err());
    }

    #[test]
    fn test_unlabelled_placeholders() {
        let ds = Dataset::unlabelled(table());
        assert!(!ds.labelled);
        assert_eq!(ds.labels, vec![0, 0, 0]);
        assert_eq!(ds.positives(), 0);
    }
}
