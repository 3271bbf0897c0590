//! Utility profile types and their document schema.
//!
//! Profiles serialize to the `LinearAdditiveUtilitySpace` document consumed
//! by the negotiation environment:
//!
//! ```json
//! {
//!   "LinearAdditiveUtilitySpace": {
//!     "name": "party",
//!     "issueUtilities": { "s1": { "discreteutils": { "valueUtilities": { "Mee eens": 1.0 } } } },
//!     "issueWeights": { "s1": 1.0 },
//!     "domain": { "name": "...", "issuesValues": { "s1": { "values": ["Mee eens"] } } }
//!   }
//! }
//! ```
//!
//! Map entries keep statement and label order, so serializing the same
//! profile twice yields identical bytes.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::domain::Domain;
use super::stance::StanceLabel;

/// Utility of every label in a domain, given one chosen stance.
#[derive(Debug, Clone, PartialEq)]
pub struct UtilityVector {
    entries: Vec<(StanceLabel, f64)>,
}

impl UtilityVector {
    pub(crate) fn new(entries: Vec<(StanceLabel, f64)>) -> Self {
        Self { entries }
    }

    /// Utility assigned to `label`, if the label is part of the vector.
    pub fn get(&self, label: StanceLabel) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, score)| *score)
    }

    /// Iterate over `(label, utility)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (StanceLabel, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// The highest utility in the vector.
    pub fn max(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, score)| *score)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for UtilityVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, score) in &self.entries {
            map.serialize_entry(label.as_str(), score)?;
        }
        map.end()
    }
}

/// Normalized statement weights, keyed by identifier in statement order.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightDistribution {
    entries: Vec<(String, f64)>,
}

impl WeightDistribution {
    pub(crate) fn new(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }

    /// Weight of the statement with the given identifier.
    pub fn get(&self, identifier: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, weight)| *weight)
    }

    /// Iterate over `(identifier, weight)` pairs in statement order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(id, w)| (id.as_str(), *w))
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for WeightDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (identifier, weight) in &self.entries {
            map.serialize_entry(identifier, weight)?;
        }
        map.end()
    }
}

/// One party's complete utility description.
///
/// Built once per party by [`ProfileBuilder`](crate::ProfileBuilder) and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub(crate) party: String,
    pub(crate) utilities: Vec<(String, UtilityVector)>,
    pub(crate) weights: WeightDistribution,
    pub(crate) domain: Domain,
}

impl Profile {
    /// The party this profile describes.
    pub fn party(&self) -> &str {
        &self.party
    }

    /// Utility vector of the statement with the given identifier.
    pub fn utility(&self, identifier: &str) -> Option<&UtilityVector> {
        self.utilities
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, vector)| vector)
    }

    /// Iterate over `(identifier, utility vector)` pairs in statement order.
    pub fn utilities(&self) -> impl Iterator<Item = (&str, &UtilityVector)> {
        self.utilities.iter().map(|(id, v)| (id.as_str(), v))
    }

    /// Normalized statement weights.
    pub fn weights(&self) -> &WeightDistribution {
        &self.weights
    }

    /// The domain embedded in this profile.
    pub fn domain(&self) -> &Domain {
        &self.domain
    }
}

#[derive(Serialize)]
struct ProfileDocument<'a> {
    #[serde(rename = "LinearAdditiveUtilitySpace")]
    space: SpaceDocument<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpaceDocument<'a> {
    name: &'a str,
    issue_utilities: IssueUtilities<'a>,
    issue_weights: &'a WeightDistribution,
    domain: &'a Domain,
}

struct IssueUtilities<'a>(&'a [(String, UtilityVector)]);

#[derive(Serialize)]
struct DiscreteUtils<'a> {
    discreteutils: ValueUtilities<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueUtilities<'a> {
    value_utilities: &'a UtilityVector,
}

impl Serialize for IssueUtilities<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (identifier, vector) in self.0 {
            let utils = DiscreteUtils {
                discreteutils: ValueUtilities {
                    value_utilities: vector,
                },
            };
            map.serialize_entry(identifier, &utils)?;
        }
        map.end()
    }
}

impl Serialize for Profile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ProfileDocument {
            space: SpaceDocument {
                name: &self.party,
                issue_utilities: IssueUtilities(&self.utilities),
                issue_weights: &self.weights,
                domain: &self.domain,
            },
        }
        .serialize(serializer)
    }
}
