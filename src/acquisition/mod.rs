//! Sensor data acquisition module
//!
//! Wraps a motion source (3-axis accelerometer) and a light source (single
//! scalar) into one calibrated [`Reading`] per tick.
//!
//! Drivers never fail from the core's point of view: a faulty channel yields
//! a stale or default value. The reader replaces non-finite acceleration with
//! the last good sample and clamps light to the sensor scale.

pub mod simulated;
pub mod stdin_source;

pub use simulated::{Scenario, SimulatedSensors};
pub use stdin_source::FeedSensors;

use crate::config::defaults::LIGHT_SENSOR_MAX;
use crate::types::{Acceleration, Reading};

/// 3-axis accelerometer driver returning calibrated g values.
pub trait MotionSource: Send {
    /// Most recent sample. Must not block.
    fn acceleration(&mut self) -> Acceleration;
}

/// Light sensor driver returning a level on the sensor's native scale.
pub trait LightSource: Send {
    /// Most recent sample. Must not block.
    fn light_level(&mut self) -> u16;
}

/// Combines both drivers into one [`Reading`] per tick.
#[derive(Debug)]
pub struct SensorReader<M: MotionSource, L: LightSource> {
    motion: M,
    light: L,
    light_max: u16,
    last_accel: Acceleration,
    glitches: u64,
}

impl<M: MotionSource, L: LightSource> SensorReader<M, L> {
    pub const fn new(motion: M, light: L) -> Self {
        Self::with_light_max(motion, light, LIGHT_SENSOR_MAX)
    }

    pub const fn with_light_max(motion: M, light: L, light_max: u16) -> Self {
        Self {
            motion,
            light,
            light_max,
            last_accel: Acceleration::REST,
            glitches: 0,
        }
    }

    /// Sample both drivers.
    pub fn read(&mut self) -> Reading {
        let light_level = self.light.light_level().min(self.light_max);

        let sample = self.motion.acceleration();
        let accel = if sample.is_finite() {
            self.last_accel = sample;
            sample
        } else {
            self.glitches += 1;
            tracing::debug!(glitches = self.glitches, "Non-finite accelerometer sample, reusing last good value");
            self.last_accel
        };

        Reading { light_level, accel }
    }

    /// Non-finite accelerometer samples replaced so far.
    pub const fn glitches(&self) -> u64 {
        self.glitches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Scripted {
        accel: VecDeque<Acceleration>,
        light: VecDeque<u16>,
    }

    impl MotionSource for Scripted {
        fn acceleration(&mut self) -> Acceleration {
            self.accel.pop_front().unwrap_or(Acceleration::REST)
        }
    }

    impl LightSource for Scripted {
        fn light_level(&mut self) -> u16 {
            self.light.pop_front().unwrap_or(0)
        }
    }

    fn scripted(accel: &[Acceleration], light: &[u16]) -> Scripted {
        Scripted {
            accel: accel.iter().copied().collect(),
            light: light.iter().copied().collect(),
        }
    }

    #[test]
    fn test_reads_both_channels() {
        let mut reader = SensorReader::new(
            scripted(&[Acceleration::new(0.1, 0.2, 0.9)], &[]),
            scripted(&[], &[321]),
        );
        let r = reader.read();
        assert_eq!(r.light_level, 321);
        assert_eq!(r.accel, Acceleration::new(0.1, 0.2, 0.9));
    }

    #[test]
    fn test_light_is_clamped_to_scale() {
        let mut reader = SensorReader::with_light_max(
            scripted(&[], &[]),
            scripted(&[], &[u16::MAX]),
            4_095,
        );
        assert_eq!(reader.read().light_level, 4_095);
    }

    #[test]
    fn test_non_finite_sample_reuses_last_good() {
        let good = Acceleration::new(0.0, 0.3, 0.95);
        let mut reader = SensorReader::new(
            scripted(&[good, Acceleration::new(f32::NAN, 0.0, 1.0)], &[]),
            scripted(&[], &[0, 0]),
        );
        assert_eq!(reader.read().accel, good);
        assert_eq!(reader.read().accel, good);
        assert_eq!(reader.glitches(), 1);
    }

    #[test]
    fn test_first_glitch_falls_back_to_rest() {
        let mut reader = SensorReader::new(
            scripted(&[Acceleration::new(f32::INFINITY, 0.0, 0.0)], &[]),
            scripted(&[], &[0]),
        );
        assert_eq!(reader.read().accel, Acceleration::REST);
    }
}
