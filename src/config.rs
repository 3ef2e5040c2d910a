use serde::{Deserialize, Serialize};
use crate::error::{Result, TabDriftError};

pub const DEFAULT_PRECISION: u32 = 6;
pub const DEFAULT_P_THRESHOLD: f64 = 0.05;
pub const DEFAULT_MIN_SAMPLE_SIZE: usize = 2;
pub const DEFAULT_MAX_SAMPLE_SIZE: usize = 10_000;

/// Tuning knobs for fingerprinting and drift detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrityConfig {
    /// Decimal places numeric summaries are rounded to before hashing.
    pub precision: u32,
    pub drift_p_threshold: f64,
    /// Columns with fewer non-missing values on either side get no verdict.
    pub min_sample_size: usize,
    /// Samples longer than this are thinned with a fixed stride.
    pub max_sample_size: usize,
}

impl Default for IntegrityConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            drift_p_threshold: DEFAULT_P_THRESHOLD,
            min_sample_size: DEFAULT_MIN_SAMPLE_SIZE,
            max_sample_size: DEFAULT_MAX_SAMPLE_SIZE,
        }
    }
}

impl IntegrityConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_p_threshold(mut self, threshold: f64) -> Self {
        self.drift_p_threshold = threshold;
        self
    }

    pub fn with_min_sample_size(mut self, size: usize) -> Self {
        self.min_sample_size = size;
        self
    }

    pub fn with_max_sample_size(mut self, size: usize) -> Self {
        self.max_sample_size = size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.drift_p_threshold > 0.0 && self.drift_p_threshold < 1.0) {
            return Err(TabDriftError::InvalidConfig(format!(
                "drift_p_threshold must be between 0 and 1, got {}",
                self.drift_p_threshold
            )));
        }
        if self.precision > 15 {
            return Err(TabDriftError::InvalidConfig(format!(
                "precision must be at most 15 decimal places, got {}",
                self.precision
            )));
        }
        if self.min_sample_size == 0 {
            return Err(TabDriftError::InvalidConfig(
                "min_sample_size must be at least 1".to_string(),
            ));
        }
        if self.max_sample_size < self.min_sample_size {
            return Err(TabDriftError::InvalidConfig(format!(
                "max_sample_size ({}) must not be below min_sample_size ({})",
                self.max_sample_size, self.min_sample_size
            )));
        }
        Ok(())
    }
}
