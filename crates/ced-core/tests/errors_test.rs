use ced_core::errors::*;

#[test]
fn cyclic_graph_carries_cycle() {
    let err = ScmError::CyclicGraph {
        cycle: "A -> B -> A".into(),
    };
    assert!(err.to_string().contains("A -> B -> A"));
    assert_eq!(err.error_code(), "CYCLIC_GRAPH");
}

#[test]
fn undeclared_parent_carries_both_names() {
    let err = ScmError::UndeclaredParent {
        variable: "E".into(),
        parent: "Q".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("'E'"));
    assert!(msg.contains("'Q'"));
}

#[test]
fn shape_mismatch_carries_lengths() {
    let err = ScmError::ShapeMismatch {
        variable: "I".into(),
        expected: 1000,
        actual: 10,
    };
    let msg = err.to_string();
    assert!(msg.contains("1000"));
    assert!(msg.contains("10"));
}

#[test]
fn invalid_increment_carries_value() {
    let err = EstimationError::InvalidIncrement { increment: 0.0 };
    assert!(err.to_string().contains('0'));
    assert_eq!(err.coded_string(), format!("[INVALID_INCREMENT] {err}"));
}

#[test]
fn missing_scale_names_variable() {
    let err = EstimationError::MissingScale {
        variable: "S".into(),
    };
    assert!(err.to_string().contains("'S'"));
    assert_eq!(err.error_code(), "MISSING_SCALE");
}

// --- From impls ---

#[test]
fn scm_error_converts_to_estimation_error_and_keeps_code() {
    let err: EstimationError = ScmError::EmptySampleCount.into();
    assert!(matches!(err, EstimationError::Scm(ScmError::EmptySampleCount)));
    assert_eq!(err.error_code(), "EMPTY_SAMPLE_COUNT");
}

#[test]
fn subsystem_errors_convert_to_ced_error() {
    let e: CedError = ScmError::UnknownVariable { name: "Z".into() }.into();
    assert!(matches!(e, CedError::Scm(_)));
    assert_eq!(e.error_code(), "UNKNOWN_VARIABLE");

    let e: CedError = EstimationError::AllRowsFiltered {
        variable: "I".into(),
    }
    .into();
    assert!(matches!(e, CedError::Estimation(_)));
    assert_eq!(e.error_code(), "ALL_ROWS_FILTERED");

    let e: CedError = ConfigError::FileNotFound {
        path: "ced.toml".into(),
    }
    .into();
    assert_eq!(e.error_code(), "CONFIG_ERROR");
}

#[test]
fn serialization_error_converts_to_ced_error() {
    let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
    let err: CedError = json_err.into();
    assert!(matches!(err, CedError::Serialization(_)));
}
