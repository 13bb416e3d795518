//! Decision Types
//!
//! Core types cho alert decision.
//! KHÔNG chứa logic - chỉ data structures.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::labels::ClassLabel;

// ============================================================================
// ALERT LEVEL
// ============================================================================

/// Business-facing severity, derived from label AND reliability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    /// Fire, reliable
    High,
    /// Smoke, reliable
    Medium,
    /// Neutral, reliable
    Safe,
    /// Any label below the confidence threshold
    Uncertain,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::High => "HIGH",
            AlertLevel::Medium => "MEDIUM",
            AlertLevel::Safe => "SAFE",
            AlertLevel::Uncertain => "UNCERTAIN",
        }
    }

    /// Whether a camera client should raise an alarm
    pub fn is_alarm(&self) -> bool {
        matches!(self, AlertLevel::High | AlertLevel::Medium)
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CLASS SCORES
// ============================================================================

/// Per-label probabilities in label-set order, serialized as a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassScores(Vec<(ClassLabel, f32)>);

impl ClassScores {
    pub fn new(scores: Vec<(ClassLabel, f32)>) -> Self {
        Self(scores)
    }

    pub fn get(&self, label: ClassLabel) -> Option<f32> {
        self.0.iter().find(|(l, _)| *l == label).map(|(_, p)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ClassLabel, f32)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ClassScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, probability) in &self.0 {
            map.serialize_entry(label.as_str(), probability)?;
        }
        map.end()
    }
}

// ============================================================================
// DECISION RESULT
// ============================================================================

/// Terminal output of one pipeline run. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionResult {
    pub predicted_class: ClassLabel,
    pub confidence: f32,
    pub is_reliable: bool,
    pub all_predictions: ClassScores,
    pub alert_level: AlertLevel,
    pub message: String,
    pub threshold: f32,
}

impl DecisionResult {
    /// Confidence in percent, one decimal (e.g. "95.0")
    pub fn confidence_percent(&self) -> String {
        format_percent(self.confidence)
    }
}

pub(crate) fn format_percent(confidence: f32) -> String {
    format!("{:.1}", confidence * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_level_serializes_uppercase() {
        let json = serde_json::to_string(&AlertLevel::Uncertain).unwrap();
        assert_eq!(json, "\"UNCERTAIN\"");
        assert_eq!(AlertLevel::Medium.to_string(), "MEDIUM");
    }

    #[test]
    fn test_class_scores_keep_order() {
        let scores = ClassScores::new(vec![
            (ClassLabel::Smoke, 0.1),
            (ClassLabel::Fire, 0.7),
            (ClassLabel::Neutral, 0.2),
        ]);
        let json = serde_json::to_string(&scores).unwrap();
        assert!(json.starts_with("{\"Smoke\":"));
        assert_eq!(scores.get(ClassLabel::Fire), Some(0.7));
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.95), "95.0");
        assert_eq!(format_percent(0.7534), "75.3");
        assert_eq!(format_percent(1.0), "100.0");
    }
}
