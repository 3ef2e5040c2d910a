use std::collections::BTreeMap;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use crate::config::{IntegrityConfig, DEFAULT_PRECISION};
use crate::dataset::{Dataset, ScoreCard};
use crate::fingerprint::{sha256, Fingerprint};

const VERSION_ID_LEN: usize = 16;

/// One completed audit of a source: fingerprint, scores and when it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionRecord {
    version_id: String,
    timestamp: DateTime<Utc>,
    fingerprint: Fingerprint,
    #[serde(rename = "data_score")]
    overall_score: f64,
    #[serde(default)]
    dimension_scores: BTreeMap<String, f64>,
    source: String,
}

impl VersionRecord {
    pub fn builder<'a>(
        dataset: &'a Dataset,
        source: impl Into<String>,
        scores: ScoreCard,
    ) -> VersionRecordBuilder<'a> {
        VersionRecordBuilder {
            dataset,
            source: source.into(),
            scores,
            timestamp: None,
            sequence: 0,
            precision: DEFAULT_PRECISION,
        }
    }

    /// Record stamped with the current time at sequence position 0.
    pub fn new(dataset: &Dataset, source: impl Into<String>, scores: ScoreCard) -> Self {
        Self::builder(dataset, source, scores).build()
    }

    pub fn from_fingerprint(
        fingerprint: Fingerprint,
        source: impl Into<String>,
        scores: ScoreCard,
        timestamp: DateTime<Utc>,
        sequence: u64,
    ) -> Self {
        let source = source.into();
        let version_id = derive_version_id(&fingerprint, &scores, &timestamp, sequence);

        Self {
            version_id,
            timestamp,
            fingerprint,
            overall_score: scores.overall_score,
            dimension_scores: scores.dimension_scores,
            source,
        }
    }

    pub fn version_id(&self) -> &str {
        &self.version_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn overall_score(&self) -> f64 {
        self.overall_score
    }

    pub fn dimension_scores(&self) -> &BTreeMap<String, f64> {
        &self.dimension_scores
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

pub struct VersionRecordBuilder<'a> {
    dataset: &'a Dataset,
    source: String,
    scores: ScoreCard,
    timestamp: Option<DateTime<Utc>>,
    sequence: u64,
    precision: u32,
}

impl<'a> VersionRecordBuilder<'a> {
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Position this record will take in its source's history.
    pub fn sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Takes the fingerprint precision from `config`.
    pub fn config(self, config: &IntegrityConfig) -> Self {
        self.precision(config.precision)
    }

    pub fn build(self) -> VersionRecord {
        let fingerprint = Fingerprint::compute_with_precision(self.dataset, self.precision);
        VersionRecord::from_fingerprint(
            fingerprint,
            self.source,
            self.scores,
            self.timestamp.unwrap_or_else(Utc::now),
            self.sequence,
        )
    }
}

fn derive_version_id(
    fingerprint: &Fingerprint,
    scores: &ScoreCard,
    timestamp: &DateTime<Utc>,
    sequence: u64,
) -> String {
    let dimensions = serde_json::to_string(&scores.dimension_scores).unwrap_or_default();
    let payload = format!(
        "{}|{}|{:?}|{}|{}",
        fingerprint.combined,
        sequence,
        scores.overall_score,
        dimensions,
        timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true),
    );
    let mut digest = sha256(&payload);
    digest.truncate(VERSION_ID_LEN);
    digest
}
