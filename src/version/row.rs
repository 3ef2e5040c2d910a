use tabled::Tabled;
use super::record::VersionRecord;

#[derive(Debug, Clone, Tabled)]
pub struct HistoryTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    #[tabled(rename = "Version")]
    pub version_id: String,
    #[tabled(rename = "Timestamp")]
    pub timestamp: String,
    #[tabled(rename = "Score")]
    pub score: String,
    #[tabled(rename = "Rows")]
    pub rows: u64,
    #[tabled(rename = "Fingerprint")]
    pub fingerprint: String,
}

impl HistoryTableRow {
    pub fn new(position: usize, record: &VersionRecord) -> Self {
        HistoryTableRow {
            position,
            version_id: record.version_id().to_string(),
            timestamp: record.timestamp().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            score: format!("{:.2}", record.overall_score()),
            rows: record.fingerprint().row_count,
            fingerprint: record.fingerprint().short().to_string(),
        }
    }

    pub fn from_history(history: &[VersionRecord]) -> Vec<Self> {
        history
            .iter()
            .enumerate()
            .map(|(i, r)| Self::new(i + 1, r))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crate::dataset::{Dataset, ScoreCard};

    #[test]
    fn test_row_formatting() {
        let record = VersionRecord::builder(&Dataset::empty(), "s", ScoreCard::new(87.256))
            .timestamp(Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap())
            .build();
        let rows = HistoryTableRow::from_history(&[record.clone()]);

        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[0].score, "87.26");
        assert_eq!(rows[0].timestamp, "2024-05-02 08:30:00 UTC");
        assert_eq!(rows[0].version_id, record.version_id());
        assert_eq!(rows[0].fingerprint.len(), 12);
    }
}
