use serde::Serialize;
use crate::dataset::DataType;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDrift {
    pub column: String,
    pub statistic: f64,
    pub p_value: f64,
    pub drifted: bool,
    pub baseline_n: usize,
    pub current_n: usize,
}

/// Why a column shared by both datasets got no drift verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    InsufficientSample { baseline_n: usize, current_n: usize },
    SchemaMismatch { baseline: DataType, current: DataType },
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::InsufficientSample { .. } => "insufficient_sample",
            SkipReason::SchemaMismatch { .. } => "schema_mismatch",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedColumn {
    pub column: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriftReport {
    pub p_threshold: f64,
    /// Evaluated columns in the current dataset's column order.
    pub columns: Vec<ColumnDrift>,
    pub skipped: Vec<SkippedColumn>,
}

impl DriftReport {
    pub fn new(p_threshold: f64) -> Self {
        Self {
            p_threshold,
            columns: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn add(&mut self, drift: ColumnDrift) {
        self.columns.push(drift);
    }

    pub fn skip(&mut self, column: impl Into<String>, reason: SkipReason) {
        self.skipped.push(SkippedColumn {
            column: column.into(),
            reason,
        });
    }

    pub fn get(&self, column: &str) -> Option<&ColumnDrift> {
        self.columns.iter().find(|c| c.column == column)
    }

    pub fn drifted_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.drifted)
            .map(|c| c.column.clone())
            .collect()
    }

    pub fn has_drift(&self) -> bool {
        self.columns.iter().any(|c| c.drifted)
    }

    pub fn schema_mismatches(&self) -> Vec<&SkippedColumn> {
        self.skipped
            .iter()
            .filter(|s| matches!(s.reason, SkipReason::SchemaMismatch { .. }))
            .collect()
    }
}
