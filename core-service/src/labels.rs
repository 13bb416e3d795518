//! Class Labels
//!
//! Thứ tự label PHẢI khớp với thứ tự output của model khi train.
//! `LabelSet` giữ thứ tự đó; index i của probability vector ứng với `labels()[i]`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Order the deployed model was trained with.
pub const DEFAULT_CLASS_ORDER: [ClassLabel; 3] =
    [ClassLabel::Fire, ClassLabel::Neutral, ClassLabel::Smoke];

// ============================================================================
// CLASS LABEL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassLabel {
    Fire,
    Smoke,
    Neutral,
}

impl ClassLabel {
    pub const ALL: [ClassLabel; 3] = [ClassLabel::Fire, ClassLabel::Smoke, ClassLabel::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassLabel::Fire => "Fire",
            ClassLabel::Smoke => "Smoke",
            ClassLabel::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClassLabel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ClassLabel::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigError::UnknownLabel(trimmed.to_string()))
    }
}

// ============================================================================
// LABEL SET
// ============================================================================

/// Ordered, complete set of class labels (each label exactly once).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<ClassLabel>,
}

impl LabelSet {
    pub fn new(labels: Vec<ClassLabel>) -> Result<Self, ConfigError> {
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(ConfigError::DuplicateLabel(label.to_string()));
            }
        }
        if labels.len() != ClassLabel::ALL.len() {
            return Err(ConfigError::IncompleteLabels(labels.len()));
        }
        Ok(Self { labels })
    }

    /// Parse a comma separated list, e.g. `"Fire,Neutral,Smoke"`.
    pub fn parse(list: &str) -> Result<Self, ConfigError> {
        let labels = list
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(ClassLabel::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(labels)
    }

    pub fn labels(&self) -> &[ClassLabel] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<ClassLabel> {
        self.labels.get(index).copied()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.labels.iter().map(ClassLabel::as_str).collect()
    }
}

impl Default for LabelSet {
    fn default() -> Self {
        Self {
            labels: DEFAULT_CLASS_ORDER.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order_matches_trained_model() {
        let set = LabelSet::default();
        assert_eq!(set.names(), vec!["Fire", "Neutral", "Smoke"]);
    }

    #[test]
    fn test_parse_keeps_configured_order() {
        let set = LabelSet::parse("smoke, Fire ,NEUTRAL").unwrap();
        assert_eq!(
            set.labels(),
            &[ClassLabel::Smoke, ClassLabel::Fire, ClassLabel::Neutral]
        );
    }

    #[test]
    fn test_parse_rejects_unknown_label() {
        let err = LabelSet::parse("Fire,Water,Smoke").unwrap_err();
        assert_eq!(err, ConfigError::UnknownLabel("Water".to_string()));
    }

    #[test]
    fn test_parse_rejects_duplicates_and_missing() {
        assert_eq!(
            LabelSet::parse("Fire,Fire,Smoke").unwrap_err(),
            ConfigError::DuplicateLabel("Fire".to_string())
        );
        assert_eq!(
            LabelSet::parse("Fire,Smoke").unwrap_err(),
            ConfigError::IncompleteLabels(2)
        );
    }
}
