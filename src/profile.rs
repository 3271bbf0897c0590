//! Profile construction: utility vectors + normalized weights + domain.

use std::collections::HashSet;

use tracing::debug;

use crate::config::Config;
use crate::domain::build_domain;
use crate::types::{Domain, LabelSet, Profile, Statement, WeightDistribution};
use crate::utility::UtilityTable;
use crate::weights::WeightNormalizer;
use crate::{Result, StancemapError, telemetry};

/// Builds one party's [`Profile`] from its statements.
///
/// ```rust
/// use stancemap::{LabelSet, ProfileBuilder, StanceLabel, Statement, WeightNormalizer};
///
/// let builder = ProfileBuilder::new("example.domain", LabelSet::Six, WeightNormalizer::default());
/// let profile = builder
///     .build(
///         "party",
///         &[
///             Statement::new("s1", StanceLabel::Agree, 2.0),
///             Statement::new("s2", StanceLabel::Neutral, 1.0),
///             Statement::new("s3", StanceLabel::Disagree, 1.0),
///         ],
///     )
///     .unwrap();
/// assert_eq!(profile.weights().get("s1"), Some(0.5));
/// ```
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    domain_name: String,
    table: UtilityTable,
    normalizer: WeightNormalizer,
}

impl ProfileBuilder {
    pub fn new(
        domain_name: impl Into<String>,
        labels: LabelSet,
        normalizer: WeightNormalizer,
    ) -> Self {
        Self {
            domain_name: domain_name.into(),
            table: UtilityTable::new(labels),
            normalizer,
        }
    }

    /// Create a builder from the domain and weight sections of `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.domain.name.clone(),
            config.domain.labels,
            WeightNormalizer::new(config.weights.precision, config.weights.correction),
        )
    }

    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    pub fn label_set(&self) -> LabelSet {
        self.table.label_set()
    }

    /// Build the profile for `party`.
    ///
    /// # Errors
    ///
    /// - [`StancemapError::EmptyInput`] if `statements` is empty.
    /// - [`StancemapError::DuplicateIdentifier`] if two statements share an
    ///   identifier.
    /// - [`StancemapError::InvalidWeight`] for a negative or non-finite
    ///   importance.
    /// - [`StancemapError::UnrecognizedStance`] for a stance outside the
    ///   builder's label set.
    /// - Any error from [`WeightNormalizer::normalize`].
    pub fn build(&self, party: &str, statements: &[Statement]) -> Result<Profile> {
        if statements.is_empty() {
            return Err(StancemapError::EmptyInput {
                party: party.to_owned(),
            });
        }

        let mut seen = HashSet::with_capacity(statements.len());
        for statement in statements {
            if !seen.insert(statement.identifier.as_str()) {
                return Err(StancemapError::DuplicateIdentifier(
                    statement.identifier.clone(),
                ));
            }
            if !statement.importance.is_finite() || statement.importance < 0.0 {
                return Err(StancemapError::InvalidWeight {
                    identifier: statement.identifier.clone(),
                    value: statement.importance,
                });
            }
        }

        let utilities = statements
            .iter()
            .map(|s| Ok((s.identifier.clone(), self.table.lookup(s.stance)?)))
            .collect::<Result<Vec<_>>>()?;

        let raw: Vec<f64> = statements.iter().map(|s| s.importance).collect();
        let shares = self.normalizer.normalize(&raw)?;
        let weights = WeightDistribution::new(
            statements
                .iter()
                .map(|s| s.identifier.clone())
                .zip(shares)
                .collect(),
        );

        let domain = self.build_domain(statements);

        metrics::counter!(telemetry::STATEMENTS_TOTAL).increment(statements.len() as u64);
        debug!(party, statements = statements.len(), "built profile");

        Ok(Profile {
            party: party.to_owned(),
            utilities,
            weights,
            domain,
        })
    }

    /// The domain shared by every party answering these statements.
    pub fn build_domain(&self, statements: &[Statement]) -> Domain {
        build_domain(
            self.domain_name.as_str(),
            statements.iter().map(|s| s.identifier.as_str()),
            self.table.label_set().labels(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StanceLabel;

    fn builder() -> ProfileBuilder {
        ProfileBuilder::new("test.domain", LabelSet::Six, WeightNormalizer::default())
    }

    #[test]
    fn empty_statements_fail() {
        let err = builder().build("nobody", &[]).unwrap_err();
        assert!(matches!(err, StancemapError::EmptyInput { party } if party == "nobody"));
    }

    #[test]
    fn duplicate_identifiers_fail() {
        let statements = [
            Statement::new("s1", StanceLabel::Agree, 1.0),
            Statement::new("s1", StanceLabel::Neutral, 1.0),
        ];
        let err = builder().build("party", &statements).unwrap_err();
        assert!(matches!(err, StancemapError::DuplicateIdentifier(id) if id == "s1"));
    }

    #[test]
    fn negative_importance_names_the_statement() {
        let statements = [
            Statement::new("s1", StanceLabel::Agree, 1.0),
            Statement::new("s2", StanceLabel::Agree, -2.0),
        ];
        let err = builder().build("party", &statements).unwrap_err();
        assert!(matches!(err, StancemapError::InvalidWeight { identifier, .. } if identifier == "s2"));
    }

    #[test]
    fn no_opinion_rejected_by_five_label_builder() {
        let builder =
            ProfileBuilder::new("five", LabelSet::Five, WeightNormalizer::default());
        let statements = [Statement::new("s1", StanceLabel::NoOpinion, 1.0)];
        let err = builder.build("party", &statements).unwrap_err();
        assert!(matches!(err, StancemapError::UnrecognizedStance { .. }));
    }

    #[test]
    fn embedded_domain_lists_every_statement() {
        let statements = [
            Statement::new("b", StanceLabel::Agree, 1.0),
            Statement::new("a", StanceLabel::Neutral, 3.0),
        ];
        let profile = builder().build("party", &statements).unwrap();
        assert_eq!(profile.domain().name(), "test.domain");
        assert_eq!(profile.domain().identifiers(), ["b", "a"]);
        assert_eq!(profile.domain().labels(), LabelSet::Six.labels());
        assert_eq!(profile.weights().get("a"), Some(0.75));
    }
}
