use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use crate::config::DEFAULT_PRECISION;
use crate::dataset::Dataset;
use super::stats::{NumericSummary, RoundedSummary};

/// Structure-, distribution- and size-aware digest of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    pub structural: String,
    pub statistical: String,
    pub row_count: u64,
    pub combined: String,
}

impl Fingerprint {
    pub fn compute(dataset: &Dataset) -> Self {
        Self::compute_with_precision(dataset, DEFAULT_PRECISION)
    }

    pub fn compute_with_precision(dataset: &Dataset, precision: u32) -> Self {
        let structural = structural_hash(dataset);
        let statistical = statistical_hash(dataset, precision);
        let row_count = dataset.row_count() as u64;
        let combined = sha256(&format!("{}{}{}", structural, statistical, row_count));

        Self {
            structural,
            statistical,
            row_count,
            combined,
        }
    }

    pub fn short(&self) -> &str {
        &self.combined[..self.combined.len().min(12)]
    }
}

fn structural_hash(dataset: &Dataset) -> String {
    let mut pairs: Vec<(&str, &str)> = dataset
        .columns()
        .iter()
        .map(|c| (c.name.as_str(), c.data_type.canonical_name()))
        .collect();
    pairs.sort_unstable();

    sha256(&serde_json::to_string(&pairs).unwrap_or_default())
}

fn statistical_hash(dataset: &Dataset, precision: u32) -> String {
    let mut columns: Vec<_> = dataset.numeric_columns().collect();
    columns.sort_by(|a, b| a.name.cmp(&b.name));

    let summaries: Vec<RoundedSummary> = columns
        .into_iter()
        .filter_map(|c| {
            NumericSummary::compute(&c.numeric_values()).map(|s| s.rounded(&c.name, precision))
        })
        .collect();

    sha256(&serde_json::to_string(&summaries).unwrap_or_default())
}

pub(crate) fn sha256(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Column, DataType};

    fn sample() -> Dataset {
        Dataset::new(vec![
            Column::new("id", DataType::Integer).with_values(vec![1i64, 2, 3, 4]),
            Column::new("price", DataType::Float).with_values(vec![Some(9.5), Some(12.0), None, Some(3.25)]),
            Column::new("label", DataType::String).with_values(vec!["a", "b", "c", "d"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_sha256_deterministic() {
        assert_eq!(sha256("hello world"), sha256("hello world"));
        assert_ne!(sha256("hello"), sha256("world"));
        assert_eq!(sha256("").len(), 64);
    }

    #[test]
    fn test_fingerprint_repeatable() {
        let dataset = sample();
        assert_eq!(Fingerprint::compute(&dataset), Fingerprint::compute(&dataset));
    }

    #[test]
    fn test_row_count_includes_missing() {
        assert_eq!(Fingerprint::compute(&sample()).row_count, 4);
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let dataset = sample();
        let mut columns = dataset.columns().to_vec();
        columns.reverse();
        let reordered = Dataset::new(columns).unwrap();
        assert_eq!(Fingerprint::compute(&dataset), Fingerprint::compute(&reordered));
    }

    #[test]
    fn test_type_change_alters_structural() {
        let a = Dataset::new(vec![Column::new("x", DataType::Integer).with_values(vec![1i64])]).unwrap();
        let b = Dataset::new(vec![Column::new("x", DataType::Float).with_values(vec![1.0])]).unwrap();
        let fa = Fingerprint::compute(&a);
        let fb = Fingerprint::compute(&b);
        assert_ne!(fa.structural, fb.structural);
        assert_eq!(fa.statistical, fb.statistical);
        assert_ne!(fa.combined, fb.combined);
    }

    #[test]
    fn test_all_missing_column_is_skipped() {
        let with_empty = Dataset::new(vec![
            Column::new("a", DataType::Float).with_values(vec![1.0, 2.0]),
            Column::new("b", DataType::Float).with_values(vec![None::<f64>, None]),
        ])
        .unwrap();
        let without = Dataset::new(vec![
            Column::new("a", DataType::Float).with_values(vec![1.0, 2.0]),
        ])
        .unwrap();
        assert_eq!(
            Fingerprint::compute(&with_empty).statistical,
            Fingerprint::compute(&without).statistical
        );
    }

    #[test]
    fn test_empty_dataset_has_valid_fingerprint() {
        let fp = Fingerprint::compute(&Dataset::empty());
        assert_eq!(fp.row_count, 0);
        assert_eq!(fp.combined.len(), 64);
        assert_eq!(fp.short().len(), 12);
    }

    #[test]
    fn test_noise_below_precision_is_ignored() {
        let a = Dataset::new(vec![Column::new("x", DataType::Float).with_values(vec![1.0, 2.0])]).unwrap();
        let b = Dataset::new(vec![Column::new("x", DataType::Float).with_values(vec![1.0 + 1e-12, 2.0])]).unwrap();
        assert_eq!(Fingerprint::compute(&a), Fingerprint::compute(&b));
    }
}
