//! Detection Engine - raw readings to latching triggers
//!
//! Two physically distinct cues are tested independently and OR-combined by
//! the alarm, so either one alone is enough to raise it:
//!
//! - **Motion**: `|‖accel‖ − 1 g| > motion_g`. An absolute deviation test on
//!   a single sample, no filtering.
//! - **Light**: `light_level > light`.
//!
//! A latched trigger is left alone until the telemetry reporter clears it,
//! so each detection episode is evaluated and logged exactly once.

use tracing::info;

use crate::config::defaults::{LIGHT_THRESHOLD, MOTION_THRESHOLD_G, REST_MAGNITUDE_G};
use crate::types::{Reading, TriggerFlags};

/// Trigger thresholds, injected as plain values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionThresholds {
    /// Light level above which the vault counts as open.
    pub light: u16,
    /// Allowed deviation of the acceleration magnitude from 1 g.
    pub motion_g: f32,
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        Self {
            light: LIGHT_THRESHOLD,
            motion_g: MOTION_THRESHOLD_G,
        }
    }
}

/// Which triggers latched during one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionOutcome {
    pub motion_latched: bool,
    pub light_latched: bool,
}

impl DetectionOutcome {
    pub const fn any(&self) -> bool {
        self.motion_latched || self.light_latched
    }
}

#[derive(Debug, Clone, Default)]
pub struct DetectionEngine {
    thresholds: DetectionThresholds,
}

impl DetectionEngine {
    pub const fn new(thresholds: DetectionThresholds) -> Self {
        Self { thresholds }
    }

    pub const fn thresholds(&self) -> &DetectionThresholds {
        &self.thresholds
    }

    /// Evaluate one reading against the current flags, latching any trigger
    /// whose rule fires. Already-latched flags are skipped.
    pub fn evaluate(&self, reading: &Reading, flags: &mut TriggerFlags) -> DetectionOutcome {
        let mut outcome = DetectionOutcome::default();

        if !flags.motion() {
            let magnitude = reading.accel.magnitude();
            if self.is_motion(magnitude) {
                flags.latch_motion();
                outcome.motion_latched = true;
                info!(
                    magnitude_g = magnitude,
                    threshold_g = self.thresholds.motion_g,
                    "🫨 Motion detected"
                );
            }
        }

        if !flags.light() && reading.light_level > self.thresholds.light {
            flags.latch_light();
            outcome.light_latched = true;
            info!(
                light_level = reading.light_level,
                threshold = self.thresholds.light,
                "💡 Light detected"
            );
        }

        outcome
    }

    /// NaN magnitudes compare false and never trigger.
    fn is_motion(&self, magnitude: f32) -> bool {
        (magnitude - REST_MAGNITUDE_G).abs() > self.thresholds.motion_g
    }
}
