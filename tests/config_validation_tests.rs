//! Config Validation Tests
//!
//! Exercise the config layer through files on disk: typo detection, range
//! validation, and save/load.

use std::io::Write;

use vault_alert::config::validation::{known_config_keys, suggest_correction, validate_unknown_keys};
use vault_alert::config::{ConfigError, NodeConfig};

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_report_interval_warns_with_suggestion() {
    let toml_str = r#"
[telemetry]
report_interval = 5000
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("report_interval"));
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("telemetry.report_interval_ms"),
        "Should suggest the correct key"
    );
}

#[test]
fn typo_in_node_section_warns() {
    let warnings = validate_unknown_keys("[node]\nnaem = \"vault-02\"\n");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].suggestion.as_deref(), Some("node.name"));
}

#[test]
fn known_keys_produce_no_warnings() {
    let toml_str = r#"
[node]
name = "vault-07"

[detection]
light_threshold = 80
motion_threshold_g = 0.3

[sensors]
light_max = 4095
tick_interval_ms = 20

[actuator]
tone_hz = 2500

[telemetry]
endpoint = "https://hub.example.org/api/collect"
report_interval_ms = 5000
request_timeout_secs = 15

[network]
probe_timeout_ms = 500
"#;
    assert!(validate_unknown_keys(toml_str).is_empty());
    let config = NodeConfig::from_toml_str(toml_str).unwrap();
    assert_eq!(config.actuator.tone_hz, 2_500);
    assert_eq!(config.sensors.tick_interval_ms, 20);
}

#[test]
fn unknown_key_does_not_fail_parse() {
    let config = NodeConfig::from_toml_str("[detection]\nlight_treshold = 70\n").unwrap();
    // The misspelled key is ignored; the default stays.
    assert_eq!(config.detection.light_threshold, 50);
}

#[test]
fn every_known_key_is_its_own_best_suggestion() {
    let known = known_config_keys();
    for key in &known {
        assert_eq!(suggest_correction(key, &known).as_deref(), Some(*key));
    }
}

// ============================================================================
// Range Validation
// ============================================================================

#[test]
fn negative_motion_threshold_is_rejected() {
    let err = NodeConfig::from_toml_str("[detection]\nmotion_threshold_g = -0.5\n").unwrap_err();
    match err {
        ConfigError::Validation(errors) => {
            assert!(errors.iter().any(|e| e.contains("motion_threshold_g")));
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn zero_report_interval_is_rejected() {
    let err = NodeConfig::from_toml_str("[telemetry]\nreport_interval_ms = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn wrong_type_is_a_parse_error() {
    let err = NodeConfig::from_toml_str("[detection]\nlight_threshold = \"bright\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(..)));
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn load_from_file_reads_values() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[telemetry]\nendpoint = \"http://10.0.0.5:7071/api/collect\"\nreport_interval_ms = 1000"
    )
    .unwrap();

    let config = NodeConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.telemetry.endpoint, "http://10.0.0.5:7071/api/collect");
    assert_eq!(config.telemetry.report_interval_ms, 1_000);
}

#[test]
fn parse_error_names_the_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[detection\nlight_threshold = 1").unwrap();

    let err = NodeConfig::load_from_file(file.path()).unwrap_err();
    match &err {
        ConfigError::Parse(path, _) => assert_eq!(path, file.path()),
        other => panic!("expected parse error, got {other}"),
    }
    assert!(err.to_string().contains(&file.path().display().to_string()));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = NodeConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(..)));
}

#[test]
fn save_then_load_keeps_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vault_config.toml");

    let mut config = NodeConfig::default();
    config.node.name = "vault-lobby".to_string();
    config.detection.motion_threshold_g = 0.25;
    config.telemetry.report_interval_ms = 3_000;
    config.save_to_file(&path).unwrap();

    let loaded = NodeConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded.node.name, "vault-lobby");
    assert!((loaded.detection.motion_threshold_g - 0.25).abs() < f32::EPSILON);
    assert_eq!(loaded.telemetry.report_interval_ms, 3_000);
}
