use serde::{Deserialize, Serialize};

/// Size of the composite score movement between two versions.
///
/// | level    | `abs(delta)`  |
/// |----------|---------------|
/// | stable   | < 2           |
/// | minor    | [2, 5)        |
/// | moderate | [5, 10)       |
/// | critical | >= 10         |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Stable,
    Minor,
    Moderate,
    Critical,
}

impl Severity {
    pub fn classify(score_delta: f64) -> Self {
        let magnitude = score_delta.abs();
        if magnitude < 2.0 {
            Severity::Stable
        } else if magnitude < 5.0 {
            Severity::Minor
        } else if magnitude < 10.0 {
            Severity::Moderate
        } else {
            // NaN lands here too
            Severity::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Stable => "stable",
            Severity::Minor => "minor",
            Severity::Moderate => "moderate",
            Severity::Critical => "critical",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Stable => "✓",
            Severity::Minor => "•",
            Severity::Moderate => "⚠",
            Severity::Critical => "✗",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
