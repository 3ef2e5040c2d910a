use std::collections::HashSet;
use crate::error::{Result, TabDriftError};
use super::column::Column;

/// An audited table: named, typed columns of equal length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(TabDriftError::InvalidDataset(format!(
                    "duplicate column '{}'",
                    column.name
                )));
            }
            if column.len() != row_count {
                return Err(TabDriftError::InvalidDataset(format!(
                    "column '{}' has {} rows, expected {}",
                    column.name,
                    column.len(),
                    row_count
                )));
            }
        }

        Ok(Self { columns, row_count })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.data_type.is_numeric())
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Builds a new dataset from the given row indices, in that order.
    pub fn take_rows(&self, indices: &[usize]) -> Result<Self> {
        if let Some(bad) = indices.iter().find(|&&i| i >= self.row_count) {
            return Err(TabDriftError::InvalidDataset(format!(
                "row index {} out of bounds for {} rows",
                bad, self.row_count
            )));
        }

        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                data_type: c.data_type,
                values: indices.iter().map(|&i| c.values[i].clone()).collect(),
            })
            .collect();

        Ok(Self {
            columns,
            row_count: indices.len(),
        })
    }
}
