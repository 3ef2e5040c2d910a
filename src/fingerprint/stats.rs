use serde::Serialize;

/// Distribution summary of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
}

impl NumericSummary {
    /// Summarizes `values`, or `None` when there are no observations.
    ///
    /// Values are sorted first so the result does not depend on row order.
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let std = if n > 1 {
            let sq: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (sq / (n - 1) as f64).sqrt()
        } else {
            0.0
        };

        Some(Self {
            count: n,
            mean,
            std,
            p25: percentile(&sorted, 0.25),
            p50: percentile(&sorted, 0.50),
            p75: percentile(&sorted, 0.75),
        })
    }

    pub(crate) fn rounded(&self, name: &str, precision: u32) -> RoundedSummary {
        RoundedSummary {
            name: name.to_string(),
            mean: round_to_string(self.mean, precision),
            std: round_to_string(self.std, precision),
            p25: round_to_string(self.p25, precision),
            p50: round_to_string(self.p50, precision),
            p75: round_to_string(self.p75, precision),
        }
    }
}

/// Hash input for one column: every float already fixed to `precision` digits.
#[derive(Debug, Serialize)]
pub(crate) struct RoundedSummary {
    name: String,
    mean: String,
    std: String,
    p25: String,
    p50: String,
    p75: String,
}

/// Linear interpolation between closest ranks. `sorted` must be non-empty and ascending.
pub(crate) fn percentile(sorted: &[f64], q: f64) -> f64 {
    let last = sorted.len() - 1;
    let pos = q.clamp(0.0, 1.0) * last as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Fixed-precision decimal rendering with negative zero folded into zero.
pub fn round_to_string(value: f64, precision: u32) -> String {
    let rendered = format!("{:.*}", precision as usize, value);
    if rendered.starts_with('-') && rendered[1..].chars().all(|c| c == '0' || c == '.') {
        rendered[1..].to_string()
    } else {
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_simple_series() {
        let summary = NumericSummary::compute(&[4.0, 1.0, 3.0, 2.0, 5.0]).unwrap();
        assert_eq!(summary.count, 5);
        assert_eq!(summary.mean, 3.0);
        assert_eq!(summary.p25, 2.0);
        assert_eq!(summary.p50, 3.0);
        assert_eq!(summary.p75, 4.0);
        assert!((summary.std - 2.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_summary_single_value_has_zero_std() {
        let summary = NumericSummary::compute(&[7.5]).unwrap();
        assert_eq!(summary.std, 0.0);
        assert_eq!(summary.p25, 7.5);
        assert_eq!(summary.p75, 7.5);
    }

    #[test]
    fn test_summary_empty_is_none() {
        assert!(NumericSummary::compute(&[]).is_none());
    }

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&sorted, 0.5), 2.5);
        assert_eq!(percentile(&sorted, 0.25), 1.75);
        assert_eq!(percentile(&sorted, 1.0), 4.0);
    }

    #[test]
    fn test_round_to_string() {
        assert_eq!(round_to_string(1.23456789, 6), "1.234568");
        assert_eq!(round_to_string(-0.0000001, 6), "0.000000");
        assert_eq!(round_to_string(-2.5, 2), "-2.50");
        assert_eq!(round_to_string(3.0, 0), "3");
    }
}
