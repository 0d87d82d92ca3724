//! Config validation: unknown-key detection with Levenshtein suggestions
//! and range checks on sensing values.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " - did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `NodeConfig`.
///
/// Maintained by hand to match the struct hierarchy in node_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [node]
        "node",
        "node.name",
        // [detection]
        "detection",
        "detection.light_threshold",
        "detection.motion_threshold_g",
        // [sensors]
        "sensors",
        "sensors.light_max",
        "sensors.tick_interval_ms",
        // [actuator]
        "actuator",
        "actuator.tone_hz",
        // [telemetry]
        "telemetry",
        "telemetry.endpoint",
        "telemetry.report_interval_ms",
        "telemetry.request_timeout_secs",
        // [network]
        "network",
        "network.probe_timeout_ms",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (k, levenshtein(unknown, k)))
        .filter(|&(_, dist)| dist <= 3)
        .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys - it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Sensing Range Checks
// ============================================================================

/// Flag values that parse and validate but are unlikely to be intended.
pub fn suspicious_values(config: &super::NodeConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let motion = config.detection.motion_threshold_g;
    if motion.is_finite() && motion < 0.05 {
        warnings.push(ValidationWarning {
            field: "detection.motion_threshold_g".to_string(),
            message: format!(
                "motion_threshold_g = {motion:.3} is below accelerometer noise; every sample will trigger"
            ),
            suggestion: None,
        });
    }
    if motion.is_finite() && motion > 2.0 {
        warnings.push(ValidationWarning {
            field: "detection.motion_threshold_g".to_string(),
            message: format!(
                "motion_threshold_g = {motion:.2} needs more than 3 g of shaking; motion will rarely trigger"
            ),
            suggestion: None,
        });
    }

    let report = config.telemetry.report_interval_ms;
    if report > 0 && report < 500 {
        warnings.push(ValidationWarning {
            field: "telemetry.report_interval_ms".to_string(),
            message: format!("report_interval_ms = {report} sends more than two reports per second"),
            suggestion: None,
        });
    }

    if config.sensors.tick_interval_ms > config.telemetry.report_interval_ms {
        warnings.push(ValidationWarning {
            field: "sensors.tick_interval_ms".to_string(),
            message: format!(
                "tick_interval_ms ({}) is longer than report_interval_ms ({}); reports will follow every tick",
                config.sensors.tick_interval_ms, config.telemetry.report_interval_ms
            ),
            suggestion: None,
        });
    }

    warnings
}

// ============================================================================
// Tests
// ============================================================================
