use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Scores handed over by the scoring engine once an audit completes.
///
/// Overall score is on a 0-100 scale, dimension scores on 0-1.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreCard {
    pub overall_score: f64,
    #[serde(default)]
    pub dimension_scores: BTreeMap<String, f64>,
}

impl ScoreCard {
    pub fn new(overall_score: f64) -> Self {
        Self {
            overall_score,
            dimension_scores: BTreeMap::new(),
        }
    }

    pub fn with_dimension(mut self, name: impl Into<String>, score: f64) -> Self {
        self.dimension_scores.insert(name.into(), score);
        self
    }

    pub fn with_dimensions<K: Into<String>>(
        mut self,
        dimensions: impl IntoIterator<Item = (K, f64)>,
    ) -> Self {
        self.dimension_scores
            .extend(dimensions.into_iter().map(|(k, v)| (k.into(), v)));
        self
    }
}
