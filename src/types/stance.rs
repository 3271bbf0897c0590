//! Stance label types.
//!
//! A stance expresses how strongly a party agrees with a statement. Labels
//! are the Dutch survey answers used by the downstream negotiation domain;
//! the set of valid labels is fixed per domain variant.

use serde::{Deserialize, Serialize};

use crate::{Result, StancemapError};

/// A party's agreement level on a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StanceLabel {
    /// "Helemaal mee eens"
    StronglyAgree,
    /// "Mee eens"
    Agree,
    /// "Neutraal"
    Neutral,
    /// "Niet mee eens"
    Disagree,
    /// "Helemaal niet mee eens"
    StronglyDisagree,
    /// "Geen mening"
    NoOpinion,
}

impl StanceLabel {
    /// All labels, in canonical order.
    pub const ALL: [StanceLabel; 6] = [
        StanceLabel::StronglyAgree,
        StanceLabel::Agree,
        StanceLabel::Neutral,
        StanceLabel::Disagree,
        StanceLabel::StronglyDisagree,
        StanceLabel::NoOpinion,
    ];

    /// The label text as it appears in survey input and output documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StronglyAgree => "Helemaal mee eens",
            Self::Agree => "Mee eens",
            Self::Neutral => "Neutraal",
            Self::Disagree => "Niet mee eens",
            Self::StronglyDisagree => "Helemaal niet mee eens",
            Self::NoOpinion => "Geen mening",
        }
    }

    /// Position in [`StanceLabel::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for StanceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StanceLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

const SIX: &[StanceLabel] = &StanceLabel::ALL;

const FIVE: &[StanceLabel] = &[
    StanceLabel::StronglyAgree,
    StanceLabel::Agree,
    StanceLabel::Neutral,
    StanceLabel::Disagree,
    StanceLabel::StronglyDisagree,
];

/// The closed set of labels a domain accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSet {
    /// The five agreement labels plus "Geen mening".
    #[default]
    Six,
    /// The five agreement labels only.
    Five,
}

impl LabelSet {
    /// Labels in this set, in canonical order.
    pub fn labels(self) -> &'static [StanceLabel] {
        match self {
            Self::Six => SIX,
            Self::Five => FIVE,
        }
    }

    /// Whether `label` belongs to this set.
    pub fn contains(self, label: StanceLabel) -> bool {
        self.labels().contains(&label)
    }

    /// Parse free-text survey input into a label of this set.
    ///
    /// Surrounding whitespace is ignored; matching is otherwise exact.
    pub fn parse(self, text: &str) -> Result<StanceLabel> {
        let text = text.trim();
        self.labels()
            .iter()
            .copied()
            .find(|label| label.as_str() == text)
            .ok_or_else(|| StancemapError::UnrecognizedStance {
                label: text.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let label = LabelSet::Six.parse("  Mee eens ").unwrap();
        assert_eq!(label, StanceLabel::Agree);
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!(LabelSet::Six.parse("mee eens").is_err());
    }

    #[test]
    fn five_label_set_rejects_no_opinion() {
        let err = LabelSet::Five.parse("Geen mening").unwrap_err();
        assert!(matches!(err, StancemapError::UnrecognizedStance { label } if label == "Geen mening"));
        assert_eq!(LabelSet::Six.parse("Geen mening").unwrap(), StanceLabel::NoOpinion);
    }

    #[test]
    fn label_sets_share_canonical_order() {
        assert_eq!(LabelSet::Five.labels(), &LabelSet::Six.labels()[..5]);
        assert!(!LabelSet::Five.contains(StanceLabel::NoOpinion));
    }

    #[test]
    fn label_serializes_as_survey_text() {
        let json = serde_json::to_string(&StanceLabel::StronglyDisagree).unwrap();
        assert_eq!(json, r#""Helemaal niet mee eens""#);
    }
}
