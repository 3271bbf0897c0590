use stancemap::{Result, StancemapError};

#[test]
fn test_error_display() {
    let err = StancemapError::UnrecognizedStance {
        label: "Misschien".to_string(),
    };
    assert!(err.to_string().contains("Misschien"));

    let err = StancemapError::EmptyInput {
        party: "groenlinks".to_string(),
    };
    assert!(err.to_string().contains("groenlinks"));

    let err = StancemapError::InvalidRecord {
        line: 7,
        reason: "missing weight".to_string(),
    };
    assert_eq!(err.to_string(), "invalid record at line 7: missing weight");
}

#[test]
fn test_result_alias() {
    fn returns_error() -> Result<()> {
        Err(StancemapError::DegenerateWeights("all weights are zero".into()))
    }
    assert!(returns_error().is_err());
}

// ============================================================================
// Data error classification
// ============================================================================

#[test]
fn data_errors() {
    assert!(StancemapError::UnrecognizedStance { label: "x".into() }.is_data_error());
    assert!(StancemapError::DegenerateWeights("zero".into()).is_data_error());
    assert!(StancemapError::EmptyInput { party: "p".into() }.is_data_error());
    assert!(StancemapError::DuplicateIdentifier("s1".into()).is_data_error());
    assert!(
        StancemapError::InvalidWeight {
            identifier: "s1".into(),
            value: -1.0
        }
        .is_data_error()
    );
    assert!(StancemapError::InvariantViolation("sum".into()).is_data_error());
    assert!(
        StancemapError::PartyNameConflict {
            party: "tweedekamer2017.kieskompas.nl".into()
        }
        .is_data_error()
    );
}

#[test]
fn non_data_errors() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    assert!(!StancemapError::from(io).is_data_error());
    assert!(!StancemapError::Configuration("bad".into()).is_data_error());

    let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(!StancemapError::from(json).is_data_error());
}
