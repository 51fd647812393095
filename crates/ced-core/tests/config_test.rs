//! Tests for the configuration system.

use std::sync::Mutex;

use ced_core::config::*;
use ced_core::errors::ConfigError;
use ced_core::models::Activation;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all CED_ env vars to prevent cross-test contamination.
fn clear_ced_env_vars() {
    for key in [
        "CED_SEED",
        "CED_N_SAMPLES",
        "CED_RANDOM_FACTOR",
        "CED_INCREMENT",
        "CED_PARALLEL",
        "CED_LOG_FORMAT",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = CedConfig::from_toml("").unwrap();

    assert_eq!(config.scm.model, ScmModel::GermanCredit);
    assert_eq!(config.scm.seed, 3);
    assert_eq!(config.scm.n_samples, 1000);
    assert_eq!(config.scm.random_factor, 0.3);
    assert_eq!(config.scm.activation, Activation::Linear);
    assert_eq!(config.scm.coefficient("I"), 1.0);

    assert_eq!(config.estimation.increment, 1.2);
    assert_eq!(config.estimation.policy, IncrementPolicy::ProperScale);
    assert_eq!(config.estimation.z_threshold, 3.0);
    assert_eq!(config.estimation.empty_filter, EmptyFilterPolicy::Nan);
    assert_eq!(config.estimation.outcome, "Y");
    assert_eq!(config.estimation.decimals, 3);
    assert!(!config.estimation.parallel);

    assert_eq!(config.comparison.selected_interventions, vec!["I", "E"]);
    assert_eq!(config.comparison.display_columns, vec!["A", "E", "I", "L", "Y"]);
    assert_eq!(config.comparison.observational_label, "O");

    assert_eq!(config.observability.log_level, "info");
    assert_eq!(config.observability.log_format, LogFormat::Text);
    assert!(config.validate().is_ok());
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[scm]
model = "karimi"
random_factor = 1.0

[scm.coefficients]
I = 2.0

[estimation]
policy = "baseline_std"
"#;
    let config = CedConfig::from_toml(toml).unwrap();
    assert_eq!(config.scm.model, ScmModel::Karimi);
    assert_eq!(config.scm.random_factor, 1.0);
    assert_eq!(config.scm.coefficient("I"), 2.0);
    assert_eq!(config.scm.coefficient("S"), 1.0);
    assert_eq!(config.estimation.policy, IncrementPolicy::BaselineStd);
    // Non-overridden fields keep defaults
    assert_eq!(config.scm.seed, 3);
    assert_eq!(config.estimation.increment, 1.2);
}

#[test]
fn config_parses_tagged_activation() {
    let toml = r#"
[scm.activation]
kind = "sigmoid"
factor = 2.0
"#;
    let config = CedConfig::from_toml(toml).unwrap();
    assert_eq!(config.scm.activation, Activation::Sigmoid { factor: 2.0 });
}

#[test]
fn config_serde_roundtrip() {
    let mut config = CedConfig::default();
    config.scm.coefficients.insert("E".into(), 0.5);
    config.scm.activation = Activation::KSigmoid { k: 2.0, factor: 1.0 };
    let toml_str = config.to_toml().unwrap();
    let roundtripped = CedConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped, config);
}

#[test]
fn validate_rejects_zero_increment() {
    let mut config = CedConfig::default();
    config.estimation.increment = 0.0;
    match config.validate().unwrap_err() {
        ConfigError::InvalidValue { field, .. } => assert_eq!(field, "estimation.increment"),
        other => panic!("Expected InvalidValue, got: {:?}", other),
    }
}

#[test]
fn validate_rejects_bad_values() {
    let cases: Vec<(&str, Box<dyn Fn(&mut CedConfig)>)> = vec![
        ("scm.n_samples", Box::new(|c: &mut CedConfig| c.scm.n_samples = 0)),
        ("scm.random_factor", Box::new(|c: &mut CedConfig| c.scm.random_factor = -0.1)),
        ("estimation.z_threshold", Box::new(|c: &mut CedConfig| c.estimation.z_threshold = 0.0)),
        ("comparison.display_columns", Box::new(|c: &mut CedConfig| c.comparison.display_columns.clear())),
    ];
    for (expected_field, mutate) in cases {
        let mut config = CedConfig::default();
        mutate(&mut config);
        match config.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("{expected_field}: expected InvalidValue, got {:?}", other),
        }
    }
}

#[test]
fn load_missing_file_returns_file_not_found() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_ced_env_vars();

    let dir = tempdir();
    let result = CedConfig::load(&dir.path().join("ced.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_ced_env_vars();

    let dir = tempdir();
    let path = dir.path().join("ced.toml");
    std::fs::write(&path, "this is not valid toml {{{{").unwrap();

    match CedConfig::load(&path).unwrap_err() {
        ConfigError::ParseError { .. } => {}
        other => panic!("Expected ParseError, got: {:?}", other),
    }
}

#[test]
fn env_overrides_file_values() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_ced_env_vars();

    let dir = tempdir();
    let path = dir.path().join("ced.toml");
    std::fs::write(
        &path,
        r#"
[scm]
seed = 11
n_samples = 200
"#,
    )
    .unwrap();

    std::env::set_var("CED_SEED", "42");
    std::env::set_var("CED_PARALLEL", "true");
    let config = CedConfig::load(&path).unwrap();

    assert_eq!(config.scm.seed, 42);
    assert_eq!(config.scm.n_samples, 200);
    assert!(config.estimation.parallel);

    clear_ced_env_vars();
}

#[test]
fn env_override_that_fails_validation_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_ced_env_vars();

    std::env::set_var("CED_INCREMENT", "0");
    let result = CedConfig::from_env();
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

    clear_ced_env_vars();
}

#[test]
fn json_log_format_is_read_from_toml() {
    let config = CedConfig::from_toml("[observability]\nlog_format = \"json\"").unwrap();
    assert_eq!(config.observability.log_format, LogFormat::Json);
}

#[test]
fn log_format_env_override_wins_over_default() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_ced_env_vars();

    std::env::set_var("CED_LOG_FORMAT", "JSON");
    assert_eq!(
        CedConfig::from_env().unwrap().observability.log_format,
        LogFormat::Json
    );
    std::env::set_var("CED_LOG_FORMAT", "yaml");
    assert_eq!(
        CedConfig::from_env().unwrap().observability.log_format,
        LogFormat::Text
    );

    clear_ced_env_vars();
}
