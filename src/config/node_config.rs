//! Node Configuration - detection thresholds, timings and endpoint as TOML values
//!
//! Each struct implements `Default` with values matching the device
//! constants in [`super::defaults`], so a node with no config file behaves
//! exactly like the stock firmware.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use super::defaults;
use crate::detection::DetectionThresholds;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "VAULT_CONFIG";

/// Environment variable overriding `telemetry.endpoint`.
pub const ENDPOINT_ENV_VAR: &str = "VAULT_ENDPOINT";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "vault_config.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one vault node.
///
/// Load with `NodeConfig::load()` which searches:
/// 1. `$VAULT_CONFIG` env var
/// 2. `./vault_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Node identification
    #[serde(default)]
    pub node: NodeInfo,

    /// Trigger thresholds
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Sensor scale and polling
    #[serde(default)]
    pub sensors: SensorConfig,

    /// Buzzer settings
    #[serde(default)]
    pub actuator: ActuatorConfig,

    /// Report endpoint and cadence
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Connectivity probing
    #[serde(default)]
    pub network: NetworkConfig,
}

impl NodeConfig {
    /// Load configuration using the standard search order, then apply
    /// environment overrides.
    pub fn load() -> Self {
        let mut config = Self::load_file_or_default();
        config.apply_env_overrides();
        config
    }

    fn load_file_or_default() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), node = %config.node.name, "Loaded node config from VAULT_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from VAULT_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "VAULT_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./vault_config.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(node = %config.node.name, "Loaded node config from ./vault_config.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./vault_config.toml, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No vault_config.toml found - using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are reported as warnings only; structural errors and
    /// failed validation are returned.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `VAULT_ENDPOINT` if set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV_VAR) {
            if !endpoint.trim().is_empty() {
                info!(endpoint = %endpoint, "Endpoint overridden by VAULT_ENDPOINT");
                self.telemetry.endpoint = endpoint.trim().to_string();
            }
        }
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Node config saved");
        Ok(())
    }

    /// Validate all values for internal consistency.
    ///
    /// Rules:
    /// - Motion threshold must be finite and > 0
    /// - Light threshold must lie inside the sensor scale
    /// - Intervals and timeouts must be > 0
    /// - The endpoint must be an absolute http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let d = &self.detection;
        if !d.motion_threshold_g.is_finite() {
            errors.push(format!(
                "detection.motion_threshold_g must be finite (got {})",
                d.motion_threshold_g
            ));
        } else if d.motion_threshold_g <= 0.0 {
            errors.push(format!(
                "detection.motion_threshold_g ({:.3}) must be > 0",
                d.motion_threshold_g
            ));
        }

        let s = &self.sensors;
        if s.light_max == 0 {
            errors.push("sensors.light_max must be > 0".to_string());
        }
        if d.light_threshold >= s.light_max {
            errors.push(format!(
                "detection.light_threshold ({}) must be below sensors.light_max ({})",
                d.light_threshold, s.light_max
            ));
        }
        if s.tick_interval_ms == 0 {
            errors.push("sensors.tick_interval_ms must be > 0".to_string());
        }

        if self.actuator.tone_hz == 0 {
            errors.push("actuator.tone_hz must be > 0".to_string());
        }

        let t = &self.telemetry;
        if t.report_interval_ms == 0 {
            errors.push("telemetry.report_interval_ms must be > 0".to_string());
        }
        if t.request_timeout_secs == 0 {
            errors.push("telemetry.request_timeout_secs must be > 0".to_string());
        }
        if let Err(e) = validate_endpoint(&t.endpoint) {
            errors.push(e);
        }

        if self.network.probe_timeout_ms == 0 {
            errors.push("network.probe_timeout_ms must be > 0".to_string());
        }

        for w in super::validation::suspicious_values(self) {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), String> {
    if endpoint.trim().is_empty() {
        return Err("telemetry.endpoint must be set".to_string());
    }
    match reqwest::Url::parse(endpoint) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => Ok(()),
        Ok(url) => Err(format!(
            "telemetry.endpoint '{endpoint}' must be an http(s) URL with a host (scheme '{}')",
            url.scheme()
        )),
        Err(e) => Err(format!("telemetry.endpoint '{endpoint}' is not a valid URL: {e}")),
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Node Info
// ============================================================================

/// Identification metadata - appears in logs only, never in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeInfo {
    /// Node name / identifier
    #[serde(default = "default_node_name")]
    pub name: String,
}

fn default_node_name() -> String {
    "vault-01".to_string()
}

impl Default for NodeInfo {
    fn default() -> Self {
        Self {
            name: default_node_name(),
        }
    }
}

// ============================================================================
// Detection
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Light level above which the vault counts as open
    #[serde(default = "default_light_threshold")]
    pub light_threshold: u16,

    /// Allowed |magnitude - 1 g| before a sample counts as motion
    #[serde(default = "default_motion_threshold")]
    pub motion_threshold_g: f32,
}

fn default_light_threshold() -> u16 { defaults::LIGHT_THRESHOLD }
fn default_motion_threshold() -> f32 { defaults::MOTION_THRESHOLD_G }

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            light_threshold: default_light_threshold(),
            motion_threshold_g: default_motion_threshold(),
        }
    }
}

impl DetectionConfig {
    pub const fn thresholds(&self) -> DetectionThresholds {
        DetectionThresholds {
            light: self.light_threshold,
            motion_g: self.motion_threshold_g,
        }
    }
}

// ============================================================================
// Sensors
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Full-scale value of the light sensor
    #[serde(default = "default_light_max")]
    pub light_max: u16,

    /// Delay between control-loop ticks
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
}

fn default_light_max() -> u16 { defaults::LIGHT_SENSOR_MAX }
fn default_tick_interval() -> u64 { defaults::TICK_INTERVAL_MS }

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            light_max: default_light_max(),
            tick_interval_ms: default_tick_interval(),
        }
    }
}

impl SensorConfig {
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

// ============================================================================
// Actuator
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActuatorConfig {
    /// Alarm tone frequency
    #[serde(default = "default_tone_hz")]
    pub tone_hz: u32,
}

fn default_tone_hz() -> u32 { defaults::ALARM_TONE_HZ }

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            tone_hz: default_tone_hz(),
        }
    }
}

// ============================================================================
// Telemetry
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// URL the node POSTs its state to.
    ///
    /// Can be overridden by `VAULT_ENDPOINT` env var or `--endpoint` CLI flag.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Interval between reports
    #[serde(default = "default_report_interval")]
    pub report_interval_ms: u64,

    /// Transport timeout for one report
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_endpoint() -> String { defaults::DEFAULT_ENDPOINT.to_string() }
fn default_report_interval() -> u64 { defaults::REPORT_INTERVAL_MS }
fn default_request_timeout() -> u64 { defaults::REQUEST_TIMEOUT_SECS }

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            report_interval_ms: default_report_interval(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl TelemetryConfig {
    pub const fn report_interval(&self) -> Duration {
        Duration::from_millis(self.report_interval_ms)
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// ============================================================================
// Network
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Connectivity probe timeout
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_ms: u64,
}

fn default_probe_timeout() -> u64 { defaults::LINK_PROBE_TIMEOUT_MS }

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: default_probe_timeout(),
        }
    }
}

impl NetworkConfig {
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

// ============================================================================
// Tests
// ============================================================================
