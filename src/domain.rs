//! Domain construction.

use crate::types::{Domain, StanceLabel};

/// Build the shared domain description for a set of statements.
///
/// Every identifier maps to the same `allowed` label set; identifiers keep
/// their input order.
pub fn build_domain<I, S>(name: impl Into<String>, identifiers: I, allowed: &[StanceLabel]) -> Domain
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Domain {
        name: name.into(),
        identifiers: identifiers.into_iter().map(Into::into).collect(),
        labels: allowed.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn every_identifier_gets_the_same_labels() {
        let labels = [StanceLabel::Agree, StanceLabel::Disagree];
        let domain = build_domain("test-domain", ["s1", "s2"], &labels);

        let value = serde_json::to_value(&domain).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "test-domain",
                "issuesValues": {
                    "s1": { "values": ["Mee eens", "Niet mee eens"] },
                    "s2": { "values": ["Mee eens", "Niet mee eens"] }
                }
            })
        );
        assert_eq!(domain.labels_for("s2"), Some(&labels[..]));
        assert_eq!(domain.labels_for("s3"), None);
    }

    #[test]
    fn empty_identifier_list_yields_empty_domain() {
        let domain = build_domain("empty", Vec::<String>::new(), &StanceLabel::ALL);
        assert!(domain.identifiers().is_empty());
        let value = serde_json::to_value(&domain).unwrap();
        assert_eq!(value["issuesValues"], json!({}));
    }
}
