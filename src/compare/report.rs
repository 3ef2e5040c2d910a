use std::collections::BTreeMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use crate::drift::DriftReport;
use super::severity::Severity;

const UNAVAILABLE: &str = "unavailable";

/// Per-dimension change; `Unavailable` when only one version scored the dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimensionDelta {
    Change(f64),
    Unavailable,
}

impl DimensionDelta {
    pub fn value(&self) -> Option<f64> {
        match self {
            DimensionDelta::Change(v) => Some(*v),
            DimensionDelta::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, DimensionDelta::Change(_))
    }
}

impl Serialize for DimensionDelta {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DimensionDelta::Change(v) => serializer.serialize_f64(*v),
            DimensionDelta::Unavailable => serializer.serialize_str(UNAVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for DimensionDelta {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(v) => Ok(DimensionDelta::Change(v)),
            Raw::Text(s) if s == UNAVAILABLE => Ok(DimensionDelta::Unavailable),
            Raw::Text(s) => Err(de::Error::invalid_value(
                de::Unexpected::Str(&s),
                &"a number or \"unavailable\"",
            )),
        }
    }
}

/// Delta between a baseline version and the current one, as handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub score_delta: f64,
    pub dimension_deltas: BTreeMap<String, DimensionDelta>,
    pub drifted_columns: Vec<String>,
    pub severity: Severity,
    pub baseline_version_id: String,
    pub current_version_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonDetails {
    pub report: ComparisonReport,
    pub previous_score: f64,
    pub current_score: f64,
    /// `None` when no baseline rows were available to test against.
    pub drift: Option<DriftReport>,
}

impl ComparisonDetails {
    pub fn drift_available(&self) -> bool {
        self.drift.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    /// First audit of the source; the current record becomes the baseline.
    NoBaseline,
    Reported(Box<ComparisonDetails>),
}

impl Comparison {
    pub fn is_baseline(&self) -> bool {
        matches!(self, Comparison::NoBaseline)
    }

    pub fn report(&self) -> Option<&ComparisonReport> {
        match self {
            Comparison::NoBaseline => None,
            Comparison::Reported(details) => Some(&details.report),
        }
    }

    pub fn details(&self) -> Option<&ComparisonDetails> {
        match self {
            Comparison::NoBaseline => None,
            Comparison::Reported(details) => Some(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_json_shape() {
        let report = ComparisonReport {
            score_delta: -4.2,
            dimension_deltas: BTreeMap::from([
                ("completeness".to_string(), DimensionDelta::Change(-0.05)),
                ("timeliness".to_string(), DimensionDelta::Unavailable),
            ]),
            drifted_columns: vec!["amount".to_string()],
            severity: Severity::Minor,
            baseline_version_id: "aaaa".to_string(),
            current_version_id: "bbbb".to_string(),
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["score_delta"], -4.2);
        assert_eq!(json["dimension_deltas"]["completeness"], -0.05);
        assert_eq!(json["dimension_deltas"]["timeliness"], "unavailable");
        assert_eq!(json["severity"], "minor");
        assert_eq!(json["drifted_columns"][0], "amount");

        let back: ComparisonReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_rejects_unknown_delta_marker() {
        let result: Result<DimensionDelta, _> = serde_json::from_str("\"missing\"");
        assert!(result.is_err());
    }
}
