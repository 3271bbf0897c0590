//! Shared domain description.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::stance::StanceLabel;

/// Statement identifiers and the stance labels each statement allows.
///
/// Every statement in a domain shares the same label set. Serializes as
/// `{ "name": ..., "issuesValues": { id: { "values": [labels] } } }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    pub(crate) name: String,
    pub(crate) identifiers: Vec<String>,
    pub(crate) labels: Vec<StanceLabel>,
}

impl Domain {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Statement identifiers in input order.
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Allowed labels for `identifier`, or `None` if the statement is unknown.
    pub fn labels_for(&self, identifier: &str) -> Option<&[StanceLabel]> {
        self.identifiers
            .iter()
            .any(|id| id == identifier)
            .then_some(self.labels.as_slice())
    }

    /// Labels shared by every statement.
    pub fn labels(&self) -> &[StanceLabel] {
        &self.labels
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DomainDocument<'a> {
    name: &'a str,
    issues_values: IssuesValues<'a>,
}

struct IssuesValues<'a> {
    identifiers: &'a [String],
    labels: &'a [StanceLabel],
}

#[derive(Serialize)]
struct Values<'a> {
    values: &'a [StanceLabel],
}

impl Serialize for IssuesValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.identifiers.len()))?;
        for identifier in self.identifiers {
            map.serialize_entry(identifier, &Values { values: self.labels })?;
        }
        map.end()
    }
}

impl Serialize for Domain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DomainDocument {
            name: &self.name,
            issues_values: IssuesValues {
                identifiers: &self.identifiers,
                labels: &self.labels,
            },
        }
        .serialize(serializer)
    }
}
