use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info, warn};
use crate::config::IntegrityConfig;
use crate::dataset::Dataset;
use crate::drift::DriftDetector;
use crate::error::Result;
use crate::fingerprint::Fingerprint;
use crate::version::{VersionRecord, VersionStore};
use super::report::{Comparison, ComparisonDetails, ComparisonReport, DimensionDelta};
use super::severity::Severity;

/// Row data for previously recorded versions. History files only keep
/// fingerprints, so drift needs the caller to retain or re-fetch the rows.
pub trait BaselineData {
    fn baseline_for(&self, record: &VersionRecord) -> Option<&Dataset>;
}

impl BaselineData for Dataset {
    fn baseline_for(&self, _record: &VersionRecord) -> Option<&Dataset> {
        Some(self)
    }
}

impl BaselineData for Option<Dataset> {
    fn baseline_for(&self, _record: &VersionRecord) -> Option<&Dataset> {
        self.as_ref()
    }
}

/// Retained snapshots keyed by version id.
impl BaselineData for HashMap<String, Dataset> {
    fn baseline_for(&self, record: &VersionRecord) -> Option<&Dataset> {
        self.get(record.version_id())
    }
}

pub struct Comparator {
    detector: DriftDetector,
    precision: u32,
}

impl Default for Comparator {
    fn default() -> Self {
        let config = IntegrityConfig::default();
        Self {
            detector: DriftDetector::from_valid(&config),
            precision: config.precision,
        }
    }
}

impl Comparator {
    /// Records compared by this comparator should be built with the same
    /// config (`VersionRecordBuilder::config`) so fingerprints line up.
    pub fn new(config: &IntegrityConfig) -> Result<Self> {
        Ok(Self {
            detector: DriftDetector::new(config)?,
            precision: config.precision,
        })
    }

    /// True when `data` hashes to the fingerprint stored in `record`.
    pub fn baseline_matches(&self, record: &VersionRecord, data: &Dataset) -> bool {
        Fingerprint::compute_with_precision(data, self.precision).combined
            == record.fingerprint().combined
    }

    /// Compares `current` against the newest stored version of the same source.
    ///
    /// Never writes to the store. If `current` was already saved it is not
    /// used as its own baseline.
    pub fn compare(
        &self,
        current: &VersionRecord,
        current_data: &Dataset,
        baseline: &dyn BaselineData,
        store: &VersionStore,
    ) -> Result<Comparison> {
        let history = store.load_history(current.source())?;
        let previous = history
            .iter()
            .rev()
            .find(|v| v.version_id() != current.version_id());

        let Some(previous) = previous else {
            info!("No baseline for '{}', establishing one", current.source());
            return Ok(Comparison::NoBaseline);
        };

        let baseline_data = baseline.baseline_for(previous);
        if let Some(data) = baseline_data {
            if !self.baseline_matches(previous, data) {
                warn!(
                    "Baseline rows for version {} do not match its recorded fingerprint",
                    previous.version_id()
                );
            }
        } else {
            debug!(
                "No baseline rows for version {}, comparing scores only",
                previous.version_id()
            );
        }

        let details = self.compare_with(previous, current, baseline_data.map(|b| (b, current_data)));

        info!(
            "Compared '{}' {} -> {}: delta {:+.4} ({})",
            current.source(),
            details.report.baseline_version_id,
            details.report.current_version_id,
            details.report.score_delta,
            details.report.severity
        );
        Ok(Comparison::Reported(Box::new(details)))
    }

    /// Compares two stored versions without row data, so no drift is computed.
    pub fn compare_records(&self, previous: &VersionRecord, current: &VersionRecord) -> ComparisonDetails {
        self.compare_with(previous, current, None)
    }

    /// `data` is the (baseline, current) row pair when available.
    pub fn compare_with(
        &self,
        previous: &VersionRecord,
        current: &VersionRecord,
        data: Option<(&Dataset, &Dataset)>,
    ) -> ComparisonDetails {
        let score_delta = round_to(current.overall_score() - previous.overall_score(), 4);
        let drift = data.map(|(baseline, current)| self.detector.detect(baseline, current));

        let drifted_columns = drift
            .as_ref()
            .map(|d| d.drifted_columns())
            .unwrap_or_default();

        ComparisonDetails {
            report: ComparisonReport {
                score_delta,
                dimension_deltas: dimension_deltas(
                    previous.dimension_scores(),
                    current.dimension_scores(),
                ),
                drifted_columns,
                severity: Severity::classify(score_delta),
                baseline_version_id: previous.version_id().to_string(),
                current_version_id: current.version_id().to_string(),
            },
            previous_score: previous.overall_score(),
            current_score: current.overall_score(),
            drift,
        }
    }
}

fn dimension_deltas(
    previous: &BTreeMap<String, f64>,
    current: &BTreeMap<String, f64>,
) -> BTreeMap<String, DimensionDelta> {
    let names: BTreeSet<&String> = previous.keys().chain(current.keys()).collect();

    names
        .into_iter()
        .map(|name| {
            let delta = match (previous.get(name), current.get(name)) {
                (Some(p), Some(c)) => DimensionDelta::Change(round_to(c - p, 6)),
                _ => DimensionDelta::Unavailable,
            };
            (name.clone(), delta)
        })
        .collect()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 { 0.0 } else { rounded }
}
