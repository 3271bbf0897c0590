//! Stancemap error types

/// Stancemap error types
#[derive(Debug, thiserror::Error)]
pub enum StancemapError {
    // Input data errors
    #[error("unrecognized stance label: {label:?}")]
    UnrecognizedStance { label: String },

    #[error("degenerate weights: {0}")]
    DegenerateWeights(String),

    #[error("no statements for party '{party}'")]
    EmptyInput { party: String },

    #[error("duplicate statement identifier: {0}")]
    DuplicateIdentifier(String),

    #[error("invalid weight {value} for statement '{identifier}'")]
    InvalidWeight { identifier: String, value: f64 },

    #[error("invalid record at line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },

    /// Party file stem equals the domain name; both documents would share
    /// one output path.
    #[error("party '{party}' has the same name as the domain document")]
    PartyNameConflict { party: String },

    /// Internal rounding correction failed to reach an exact sum.
    ///
    /// Indicates a logic defect, never a property of the input.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    // I/O and serialization errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl StancemapError {
    /// Whether this error is local to one party's input.
    ///
    /// The batch driver logs data errors as warnings and anything else as
    /// errors. Failures while reading or building a party never abort the
    /// run; failures while writing its output do.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedStance { .. }
                | Self::DegenerateWeights(_)
                | Self::EmptyInput { .. }
                | Self::DuplicateIdentifier(_)
                | Self::InvalidWeight { .. }
                | Self::InvalidRecord { .. }
                | Self::PartyNameConflict { .. }
                | Self::InvariantViolation(_)
                | Self::Csv(_)
        )
    }
}

/// Result type alias for Stancemap operations
pub type Result<T> = std::result::Result<T, StancemapError>;
