//! Metric identifiers, metric selection, BLEU n-gram weights and the
//! serialisable configuration the UI layer hands to the pipeline.
//!
//! Everything in here is validated on construction, so the scoring code can
//! assume well-formed inputs.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{MetricsError, Result};

/// Default weights for n-gram orders 1..=4.
pub const DEFAULT_WEIGHTS: [f64; 4] = [0.25, 0.25, 0.25, 0.25];

/// The four scores computed for every text pair.
///
/// Declaration order is the order of the appended output columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    NGramPrecision,
    CharOverlap,
    EditProxy,
    SemanticSim,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::NGramPrecision,
        Metric::CharOverlap,
        Metric::EditProxy,
        Metric::SemanticSim,
    ];

    /// Name of the output column holding this metric.
    pub fn column_name(self) -> &'static str {
        match self {
            Metric::NGramPrecision => "BLEU",
            Metric::CharOverlap => "CHRF",
            Metric::EditProxy => "TER",
            Metric::SemanticSim => "SemanticSim",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Metric {
    type Err = MetricsError;

    /// Accepts column names (`BLEU`), variant names (`NGramPrecision`) and
    /// UI labels (`Semantic Sim`), ignoring case, spaces, `_` and `-`.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "bleu" | "ngramprecision" => Ok(Metric::NGramPrecision),
            "chrf" | "charoverlap" => Ok(Metric::CharOverlap),
            "ter" | "editproxy" => Ok(Metric::EditProxy),
            "semanticsim" | "semanticsimilarity" => Ok(Metric::SemanticSim),
            _ => Err(MetricsError::UnknownMetric(s.to_string())),
        }
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.column_name())
    }
}

impl<'de> Deserialize<'de> for Metric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Metrics to include in the summary. Per-row scores are always computed for
/// all four metrics; the selection only filters aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSelection(BTreeSet<Metric>);

impl MetricSelection {
    pub fn all() -> Self {
        Metric::ALL.into_iter().collect()
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a selection from textual identifiers, failing on the first
    /// unknown one.
    pub fn parse<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter()
            .map(|id| id.as_ref().parse::<Metric>())
            .collect()
    }

    pub fn contains(&self, metric: Metric) -> bool {
        self.0.contains(&metric)
    }

    pub fn iter(&self) -> impl Iterator<Item = Metric> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Metric> for MetricSelection {
    fn from_iter<T: IntoIterator<Item = Metric>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// N-gram order weights for BLEU; index 0 weighs unigrams.
///
/// Guaranteed non-empty with finite, non-negative entries. The weights do
/// not have to sum to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Weights(Vec<f64>);

impl Weights {
    pub fn new(weights: Vec<f64>) -> Result<Self> {
        if weights.is_empty() {
            return Err(MetricsError::EmptyWeights);
        }
        if let Some((index, &value)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(MetricsError::InvalidWeight { index, value });
        }
        Ok(Self(weights))
    }

    /// Equal weights over orders 1..=`max_order`.
    pub fn uniform(max_order: usize) -> Result<Self> {
        Self::new(vec![1.0 / max_order as f64; max_order])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Highest n-gram order these weights cover.
    pub fn max_order(&self) -> usize {
        self.0.len()
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self(DEFAULT_WEIGHTS.to_vec())
    }
}

impl TryFrom<Vec<f64>> for Weights {
    type Error = MetricsError;

    fn try_from(weights: Vec<f64>) -> Result<Self> {
        Self::new(weights)
    }
}

impl From<Weights> for Vec<f64> {
    fn from(weights: Weights) -> Self {
        weights.0
    }
}

impl FromStr for Weights {
    type Err = MetricsError;

    /// Parses the comma-separated form typed into the UI, e.g.
    /// `"0.25, 0.25, 0.25, 0.25"`.
    fn from_str(s: &str) -> Result<Self> {
        let parsed = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| MetricsError::UnparsableWeights(s.to_string()))?;
        Self::new(parsed)
    }
}

/// Everything the caller chooses for one computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Column holding the candidate (translated) text.
    pub candidate_column: String,
    /// Column holding the reference (original) text.
    pub reference_column: String,
    pub metrics: MetricSelection,
    pub weights: Weights,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            candidate_column: "another_text".to_string(),
            reference_column: "original_text".to_string(),
            metrics: MetricSelection::all(),
            weights: Weights::default(),
        }
    }
}

impl MetricsConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_parses_ui_labels_and_column_names() {
        assert_eq!("BLEU".parse::<Metric>().unwrap(), Metric::NGramPrecision);
        assert_eq!("chrf".parse::<Metric>().unwrap(), Metric::CharOverlap);
        assert_eq!("EditProxy".parse::<Metric>().unwrap(), Metric::EditProxy);
        assert_eq!("Semantic Sim".parse::<Metric>().unwrap(), Metric::SemanticSim);
        assert_eq!("SemanticSim".parse::<Metric>().unwrap(), Metric::SemanticSim);
    }

    #[test]
    fn test_unknown_metric_is_rejected() {
        let err = "METEOR".parse::<Metric>().unwrap_err();
        assert!(matches!(err, MetricsError::UnknownMetric(name) if name == "METEOR"));
    }

    #[test]
    fn test_selection_parse_collects_all_identifiers() {
        let selection = MetricSelection::parse(["BLEU", "TER"]).unwrap();
        assert_eq!(selection.len(), 2);
        assert!(selection.contains(Metric::NGramPrecision));
        assert!(selection.contains(Metric::EditProxy));
        assert!(!selection.contains(Metric::SemanticSim));
        assert!(MetricSelection::parse(["BLEU", "nope"]).is_err());
    }

    #[test]
    fn test_weights_default_is_uniform_quarter() {
        assert_eq!(Weights::default().as_slice(), &[0.25, 0.25, 0.25, 0.25]);
        assert_eq!(Weights::uniform(4).unwrap(), Weights::default());
    }

    #[test]
    fn test_weights_reject_empty_and_negative() {
        assert!(matches!(Weights::new(vec![]), Err(MetricsError::EmptyWeights)));
        assert!(matches!(
            Weights::new(vec![0.5, -0.1]),
            Err(MetricsError::InvalidWeight { index: 1, .. })
        ));
        assert!(matches!(
            Weights::new(vec![f64::NAN]),
            Err(MetricsError::InvalidWeight { index: 0, .. })
        ));
    }

    #[test]
    fn test_weights_parse_from_text() {
        let weights: Weights = "0.5, 0.3,0.2 , 0".parse().unwrap();
        assert_eq!(weights.as_slice(), &[0.5, 0.3, 0.2, 0.0]);
        assert!(matches!(
            "0.5, abc".parse::<Weights>(),
            Err(MetricsError::UnparsableWeights(_))
        ));
        assert!("".parse::<Weights>().is_err());
    }

    #[test]
    fn test_config_from_json_uses_defaults() {
        let config = MetricsConfig::from_json(r#"{"metrics": ["BLEU", "Semantic Sim"]}"#).unwrap();
        assert_eq!(config.candidate_column, "another_text");
        assert_eq!(config.reference_column, "original_text");
        assert_eq!(config.weights, Weights::default());
        assert_eq!(config.metrics.len(), 2);
    }

    #[test]
    fn test_config_from_json_validates_weights() {
        let err = MetricsConfig::from_json(r#"{"weights": [0.5, -1.0]}"#).unwrap_err();
        assert!(matches!(err, MetricsError::Config(_)));
        assert!(MetricsConfig::from_json(r#"{"weights": []}"#).is_err());
    }

    #[test]
    fn test_selection_serialises_column_names() {
        let json = serde_json::to_string(&MetricSelection::all()).unwrap();
        assert_eq!(json, r#"["BLEU","CHRF","TER","SemanticSim"]"#);
    }
}
