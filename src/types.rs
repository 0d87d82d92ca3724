//! Shared data structures for the vault intrusion-detection node
//!
//! This module defines the core types passed between the per-tick stages:
//! - Acquisition: `Reading` (light level + acceleration vector)
//! - Detection: `TriggerFlags` (latching motion / light triggers)
//! - Alarm: `AlarmState`
//! - Telemetry: `TelemetryPayload`, `VaultStatus`, `RemoteCommand`

use serde::{Deserialize, Serialize};

// ============================================================================
// Acquisition
// ============================================================================

/// 3-axis acceleration in g-units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Acceleration {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Acceleration {
    /// Device lying still: gravity only, along Z.
    pub const REST: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Vector magnitude `sqrt(x² + y² + z²)`. ~1.0 at rest.
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Default for Acceleration {
    fn default() -> Self {
        Self::REST
    }
}

/// One calibrated sample of both sensors, produced fresh every tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Reading {
    /// Light intensity on the sensor's native scale (0-4095 for a 12-bit ADC).
    pub light_level: u16,
    /// Acceleration in g.
    #[serde(default)]
    pub accel: Acceleration,
}

// ============================================================================
// Detection
// ============================================================================

/// Latching detection triggers.
///
/// A flag goes `false -> true` only inside the detection engine and
/// `true -> false` only in the post-report clear step of the telemetry
/// reporter. Both mutators are crate-private to keep it that way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerFlags {
    motion: bool,
    light: bool,
}

impl TriggerFlags {
    pub const fn new() -> Self {
        Self {
            motion: false,
            light: false,
        }
    }

    pub const fn motion(&self) -> bool {
        self.motion
    }

    pub const fn light(&self) -> bool {
        self.light
    }

    /// Either trigger latched.
    pub const fn any_active(&self) -> bool {
        self.motion || self.light
    }

    pub(crate) fn latch_motion(&mut self) {
        self.motion = true;
    }

    pub(crate) fn latch_light(&mut self) {
        self.light = true;
    }

    pub(crate) fn clear(&mut self) {
        self.motion = false;
        self.light = false;
    }
}

// ============================================================================
// Alarm
// ============================================================================

/// Local alarm latch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
pub enum AlarmState {
    #[default]
    Inactive,
    Active,
}

impl AlarmState {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for AlarmState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlarmState::Inactive => write!(f, "Inactive"),
            AlarmState::Active => write!(f, "Active"),
        }
    }
}

// ============================================================================
// Telemetry
// ============================================================================

/// Display label for the enclosure, derived from the light trigger.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum VaultStatus {
    Open,
    #[default]
    Closed,
}

impl VaultStatus {
    pub const fn from_flags(flags: &TriggerFlags) -> Self {
        if flags.light() {
            Self::Open
        } else {
            Self::Closed
        }
    }
}

impl std::fmt::Display for VaultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VaultStatus::Open => write!(f, "OPEN"),
            VaultStatus::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Body of one telemetry report. The JSON field names are fixed by the
/// remote endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TelemetryPayload {
    pub light_level: u16,
    pub motion_detected: bool,
    pub alarm_active: bool,
    pub vault_status: VaultStatus,
}

impl TelemetryPayload {
    pub const fn new(light_level: u16, flags: &TriggerFlags, alarm: AlarmState) -> Self {
        Self {
            light_level,
            motion_detected: flags.motion(),
            alarm_active: alarm.is_active(),
            vault_status: VaultStatus::from_flags(flags),
        }
    }
}

/// Commands the remote endpoint can issue through a report response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCommand {
    /// Silence the alarm (`AlarmState -> Inactive`).
    Reset,
}

impl RemoteCommand {
    /// Token whose presence anywhere in a response body means "reset".
    pub const RESET_TOKEN: &'static str = "false";

    /// Interpret a response body. Case-sensitive substring match, so the
    /// token counts whether it arrives bare (`false`), quoted (`"false"`)
    /// or inside a JSON document (`{"ok": false}`). Anything else is a no-op.
    pub fn from_response_body(body: &str) -> Option<Self> {
        body.contains(Self::RESET_TOKEN).then_some(Self::Reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_magnitude_is_one_g() {
        assert!((Acceleration::REST.magnitude() - 1.0).abs() < f32::EPSILON);
        let a = Acceleration::new(0.6, 0.0, 0.8);
        assert!((a.magnitude() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_payload_json_has_exact_keys() {
        let mut flags = TriggerFlags::new();
        flags.latch_light();
        let payload = TelemetryPayload::new(75, &flags, AlarmState::Active);
        let value = serde_json::to_value(payload).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 4);
        assert_eq!(obj["light_level"], 75);
        assert_eq!(obj["motion_detected"], false);
        assert_eq!(obj["alarm_active"], true);
        assert_eq!(obj["vault_status"], "OPEN");
    }

    #[test]
    fn test_vault_status_tracks_light_trigger_only() {
        let mut flags = TriggerFlags::new();
        flags.latch_motion();
        assert_eq!(VaultStatus::from_flags(&flags), VaultStatus::Closed);
        flags.latch_light();
        assert_eq!(VaultStatus::from_flags(&flags), VaultStatus::Open);
        flags.clear();
        assert_eq!(VaultStatus::from_flags(&flags), VaultStatus::Closed);
    }

    #[test]
    fn test_reset_token_matching() {
        assert_eq!(RemoteCommand::from_response_body("false"), Some(RemoteCommand::Reset));
        assert_eq!(RemoteCommand::from_response_body("\"false\""), Some(RemoteCommand::Reset));
        assert_eq!(
            RemoteCommand::from_response_body(r#"{"ok": false}"#),
            Some(RemoteCommand::Reset)
        );
        assert_eq!(RemoteCommand::from_response_body("true"), None);
        assert_eq!(RemoteCommand::from_response_body("acknowledged"), None);
        assert_eq!(RemoteCommand::from_response_body("FALSE"), None);
        assert_eq!(RemoteCommand::from_response_body(""), None);
    }

    #[test]
    fn test_reading_deserializes_without_accel() {
        let reading: Reading = serde_json::from_str(r#"{"light_level": 12}"#).unwrap();
        assert_eq!(reading.light_level, 12);
        assert_eq!(reading.accel, Acceleration::REST);
    }
}
