use tracing::{debug, warn};
use crate::config::IntegrityConfig;
use crate::dataset::{Column, Dataset, Value};
use crate::error::Result;
use super::ks::ks_two_sample;
use super::state::{ColumnDrift, DriftReport, SkipReason};

/// Per-column two-sample KS drift between a baseline and a current dataset.
#[derive(Debug, Clone)]
pub struct DriftDetector {
    p_threshold: f64,
    min_sample_size: usize,
    max_sample_size: usize,
}

impl Default for DriftDetector {
    fn default() -> Self {
        Self::from_valid(&IntegrityConfig::default())
    }
}

impl DriftDetector {
    /// Fails with `InvalidConfig` when `config` does not validate.
    pub fn new(config: &IntegrityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    pub(crate) fn from_valid(config: &IntegrityConfig) -> Self {
        Self {
            p_threshold: config.drift_p_threshold,
            min_sample_size: config.min_sample_size,
            max_sample_size: config.max_sample_size,
        }
    }

    pub fn p_threshold(&self) -> f64 {
        self.p_threshold
    }

    pub fn detect(&self, baseline: &Dataset, current: &Dataset) -> DriftReport {
        self.detect_columns(baseline.columns(), current.columns())
    }

    /// Evaluates every column present in both inputs, in `current` order.
    ///
    /// Columns missing on either side, or non-numeric on both, are left out
    /// of the report entirely.
    pub fn detect_columns(&self, baseline: &[Column], current: &[Column]) -> DriftReport {
        let mut report = DriftReport::new(self.p_threshold);

        for cur in current {
            let Some(base) = baseline.iter().find(|c| c.name == cur.name) else {
                continue;
            };

            if !base.data_type.is_numeric() && !cur.data_type.is_numeric() {
                continue;
            }

            if base.data_type != cur.data_type {
                warn!(
                    "Column '{}' changed type from {} to {}, skipping drift check",
                    cur.name, base.data_type, cur.data_type
                );
                report.skip(
                    cur.name.clone(),
                    SkipReason::SchemaMismatch {
                        baseline: base.data_type,
                        current: cur.data_type,
                    },
                );
                continue;
            }

            let baseline_sample = self.sample(base);
            let current_sample = self.sample(cur);

            if baseline_sample.len() < self.min_sample_size
                || current_sample.len() < self.min_sample_size
            {
                debug!(
                    "Column '{}' has too few observations ({} vs {})",
                    cur.name,
                    baseline_sample.len(),
                    current_sample.len()
                );
                report.skip(
                    cur.name.clone(),
                    SkipReason::InsufficientSample {
                        baseline_n: baseline_sample.len(),
                        current_n: current_sample.len(),
                    },
                );
                continue;
            }

            if let Some(result) = ks_two_sample(&baseline_sample, &current_sample) {
                report.add(ColumnDrift {
                    column: cur.name.clone(),
                    statistic: result.statistic,
                    p_value: result.p_value,
                    drifted: result.p_value < self.p_threshold,
                    baseline_n: baseline_sample.len(),
                    current_n: current_sample.len(),
                });
            }
        }

        report
    }

    /// Non-missing numeric values, thinned by a fixed row stride when the
    /// column is longer than `max_sample_size`.
    fn sample(&self, column: &Column) -> Vec<f64> {
        let rows = column.values.len();
        if rows <= self.max_sample_size {
            return column.numeric_values();
        }

        debug!(
            "Sub-sampling column '{}' from {} to {} rows",
            column.name, rows, self.max_sample_size
        );
        stride_indices(rows, self.max_sample_size)
            .filter_map(|i| column.values.get(i).and_then(Value::as_f64))
            .collect()
    }
}

fn stride_indices(rows: usize, target: usize) -> impl Iterator<Item = usize> {
    (0..target).map(move |i| i * rows / target)
}
