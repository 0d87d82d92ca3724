//! Simulated vault sensors
//!
//! Scripted timelines for running the node on a host without hardware. Each
//! scenario repeats on a fixed cycle so that long runs re-trigger after a
//! remote reset. Timing is derived from the sample count and the tick
//! interval, so a run is reproducible for a given seed.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{LightSource, MotionSource};
use crate::types::Acceleration;

/// Length of one scenario cycle.
const CYCLE: Duration = Duration::from_secs(20);

/// Ambient light inside a closed vault.
const DARK_LEVEL: u16 = 12;

/// Light level with the door open.
const OPEN_LEVEL: u16 = 820;

/// Peak accelerometer noise per axis (g).
const ACCEL_NOISE_G: f32 = 0.02;

/// Scripted event timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scenario {
    /// Dark and still.
    #[default]
    Quiet,
    /// Door swings open at 3 s and closes at 8 s. No motion.
    DoorOpen,
    /// A 200 ms knock at 3 s with the door shut.
    Tamper,
    /// Knock at 3 s followed by the door opening from 3.5 s to 10 s.
    Intrusion,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Quiet,
        Scenario::DoorOpen,
        Scenario::Tamper,
        Scenario::Intrusion,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Scenario::Quiet => "quiet",
            Scenario::DoorOpen => "door-open",
            Scenario::Tamper => "tamper",
            Scenario::Intrusion => "intrusion",
        }
    }

    fn door_open(&self, t: Duration) -> bool {
        let ms = t.as_millis();
        match self {
            Scenario::DoorOpen => (3_000..8_000).contains(&ms),
            Scenario::Intrusion => (3_500..10_000).contains(&ms),
            _ => false,
        }
    }

    fn knocking(&self, t: Duration) -> bool {
        let ms = t.as_millis();
        matches!(self, Scenario::Tamper | Scenario::Intrusion) && (3_000..3_200).contains(&ms)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|sc| sc.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<_> = Scenario::ALL.iter().map(Scenario::as_str).collect();
                format!("unknown scenario '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

/// One simulated sensor channel. Motion and light are separate instances
/// sharing a scenario; both are sampled once per tick so they stay in step.
#[derive(Debug)]
pub struct SimulatedSensors {
    scenario: Scenario,
    tick_interval: Duration,
    samples: u64,
    rng: StdRng,
}

impl SimulatedSensors {
    pub fn new(scenario: Scenario, tick_interval: Duration, seed: u64) -> Self {
        Self {
            scenario,
            tick_interval,
            samples: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Build a motion channel and a light channel for the same scenario.
    pub fn pair(scenario: Scenario, tick_interval: Duration, seed: u64) -> (Self, Self) {
        (
            Self::new(scenario, tick_interval, seed),
            Self::new(scenario, tick_interval, seed.wrapping_add(1)),
        )
    }

    pub const fn scenario(&self) -> Scenario {
        self.scenario
    }

    /// Position in the scenario cycle of the next sample, then advance.
    fn advance(&mut self) -> Duration {
        let elapsed_ms = self.samples as u128 * self.tick_interval.as_millis();
        self.samples += 1;
        let cycle_ms = elapsed_ms % CYCLE.as_millis();
        Duration::from_millis(u64::try_from(cycle_ms).unwrap_or(0))
    }

    fn noise(&mut self) -> f32 {
        self.rng.gen_range(-ACCEL_NOISE_G..=ACCEL_NOISE_G)
    }
}

impl MotionSource for SimulatedSensors {
    fn acceleration(&mut self) -> Acceleration {
        let t = self.advance();
        let (x, y, z) = if self.scenario.knocking(t) {
            (0.45, -0.3, 1.55)
        } else {
            (0.0, 0.0, 1.0)
        };
        Acceleration::new(x + self.noise(), y + self.noise(), z + self.noise())
    }
}

impl LightSource for SimulatedSensors {
    fn light_level(&mut self) -> u16 {
        let t = self.advance();
        let base = if self.scenario.door_open(t) {
            OPEN_LEVEL
        } else {
            DARK_LEVEL
        };
        let jitter: i32 = self.rng.gen_range(-4..=4);
        u16::try_from((i32::from(base) + jitter).max(0)).unwrap_or(base)
    }
}
