//! Statement (issue) records read from survey input.

use super::stance::StanceLabel;

/// One survey statement as answered by a party.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Identifier, unique within one party's statement list.
    pub identifier: String,
    /// The stance the party chose.
    pub stance: StanceLabel,
    /// Raw importance weight (non-negative).
    pub importance: f64,
}

impl Statement {
    /// Create a statement.
    pub fn new(identifier: impl Into<String>, stance: StanceLabel, importance: f64) -> Self {
        Self {
            identifier: identifier.into(),
            stance,
            importance,
        }
    }
}
