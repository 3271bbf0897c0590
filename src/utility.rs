//! Fixed stance-to-utility lookup.
//!
//! Each agreement label maps to a hand-tuned vector over all labels: the
//! chosen stance scores 1.0 and utility falls off as the alternative moves
//! further from it. "Geen mening" (no opinion) is indifferent and scores 1.0
//! everywhere.

use crate::types::{LabelSet, StanceLabel, UtilityVector};
use crate::{Result, StancemapError};

/// Utilities per chosen stance, columns in [`StanceLabel::ALL`] order.
///
/// Rows cover the five agreement labels; the last column is "Geen mening".
static SCORES: [[f64; 6]; 5] = [
    // Helemaal mee eens
    [1.0, 0.8, 0.5, 0.3, 0.1, 0.5],
    // Mee eens
    [0.8, 1.0, 0.7, 0.4, 0.1, 0.5],
    // Neutraal
    [0.1, 0.5, 1.0, 0.5, 0.1, 0.5],
    // Niet mee eens
    [0.1, 0.4, 0.7, 1.0, 0.8, 0.5],
    // Helemaal niet mee eens
    [0.1, 0.3, 0.5, 0.8, 1.0, 0.5],
];

static INDIFFERENT: [f64; 6] = [1.0; 6];

/// Looks up the utility vector for a chosen stance within one label set.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtilityTable {
    labels: LabelSet,
}

impl UtilityTable {
    pub fn new(labels: LabelSet) -> Self {
        Self { labels }
    }

    /// The label set this table produces vectors over.
    pub fn label_set(&self) -> LabelSet {
        self.labels
    }

    /// Full utility vector for a party that chose `stance`.
    ///
    /// Fails with [`StancemapError::UnrecognizedStance`] if `stance` is not
    /// part of the configured label set.
    pub fn lookup(&self, stance: StanceLabel) -> Result<UtilityVector> {
        if !self.labels.contains(stance) {
            return Err(StancemapError::UnrecognizedStance {
                label: stance.as_str().to_owned(),
            });
        }
        let row = match stance {
            StanceLabel::NoOpinion => &INDIFFERENT,
            other => &SCORES[other.index()],
        };
        let entries = self
            .labels
            .labels()
            .iter()
            .map(|&label| (label, row[label.index()]))
            .collect();
        Ok(UtilityVector::new(entries))
    }
}
