//! System-wide default constants.
//!
//! Values match the reference device: a 12-bit LDR channel, an LSM6DSO
//! accelerometer reporting in g, and a piezo buzzer. Grouped by subsystem.

// ============================================================================
// Detection
// ============================================================================

/// Light level above which the enclosure is considered open (ADC counts).
pub const LIGHT_THRESHOLD: u16 = 50;

/// Allowed deviation of the acceleration magnitude from 1 g before a sample
/// counts as motion. 0.15 is sensitive, 0.5 needs hard shaking.
pub const MOTION_THRESHOLD_G: f32 = 0.2;

/// Magnitude of the acceleration vector at rest (gravity only).
pub const REST_MAGNITUDE_G: f32 = 1.0;

// ============================================================================
// Sensors
// ============================================================================

/// Upper bound of the light sensor scale (12-bit ADC).
pub const LIGHT_SENSOR_MAX: u16 = 4095;

/// Delay between control-loop ticks (ms).
pub const TICK_INTERVAL_MS: u64 = 10;

// ============================================================================
// Actuator
// ============================================================================

/// Alarm tone frequency (Hz).
pub const ALARM_TONE_HZ: u32 = 2_000;

// ============================================================================
// Telemetry
// ============================================================================

/// Interval between telemetry reports (ms).
pub const REPORT_INTERVAL_MS: u64 = 2_000;

/// Transport timeout for a single report (seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default report endpoint: a `vault-hub` running on the same machine.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:7071/api/collect";

// ============================================================================
// Network
// ============================================================================

/// How long a connectivity probe may take before the link counts as down (ms).
pub const LINK_PROBE_TIMEOUT_MS: u64 = 1_000;

// ============================================================================
// Hub
// ============================================================================

/// Default bind address of `vault-hub`.
pub const HUB_BIND_ADDR: &str = "0.0.0.0:7071";

/// Number of reports the hub keeps for the history endpoint.
pub const HUB_HISTORY_CAPACITY: usize = 100;

/// HTTP timeout for alert webhook deliveries (seconds).
pub const HUB_WEBHOOK_TIMEOUT_SECS: u64 = 10;
