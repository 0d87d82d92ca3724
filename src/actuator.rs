//! Actuator - alarm state to a continuous audible tone
//!
//! The hardware is only touched on edges of the commanded state; calling
//! [`Actuator::sync`] every tick with an unchanged value does nothing.

use tracing::{info, warn};

/// Tone output the actuator drives.
pub trait Buzzer: Send {
    /// Start a continuous tone at `frequency_hz`.
    fn start_tone(&mut self, frequency_hz: u32);

    /// Silence the tone.
    fn stop_tone(&mut self);
}

/// Hardware action issued by one `sync` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCommand {
    Start,
    Stop,
}

#[derive(Debug)]
pub struct Actuator<B: Buzzer> {
    buzzer: B,
    tone_hz: u32,
    /// Last state commanded to the buzzer.
    sounding: bool,
    starts: u64,
    stops: u64,
}

impl<B: Buzzer> Actuator<B> {
    pub const fn new(buzzer: B, tone_hz: u32) -> Self {
        Self {
            buzzer,
            tone_hz,
            sounding: false,
            starts: 0,
            stops: 0,
        }
    }

    /// Bring the buzzer in line with `alarm_active`.
    pub fn sync(&mut self, alarm_active: bool) -> Option<ActuatorCommand> {
        match (alarm_active, self.sounding) {
            (true, false) => {
                self.buzzer.start_tone(self.tone_hz);
                self.sounding = true;
                self.starts += 1;
                Some(ActuatorCommand::Start)
            }
            (false, true) => {
                self.buzzer.stop_tone();
                self.sounding = false;
                self.stops += 1;
                Some(ActuatorCommand::Stop)
            }
            _ => None,
        }
    }

    pub const fn is_sounding(&self) -> bool {
        self.sounding
    }

    pub const fn starts(&self) -> u64 {
        self.starts
    }

    pub const fn stops(&self) -> u64 {
        self.stops
    }

    pub const fn buzzer(&self) -> &B {
        &self.buzzer
    }
}

/// Buzzer for hosts without a tone output: reports tone changes through
/// the log.
#[derive(Debug, Default)]
pub struct LogBuzzer;

impl Buzzer for LogBuzzer {
    fn start_tone(&mut self, frequency_hz: u32) {
        warn!(frequency_hz, "🔊 Buzzer ON");
    }

    fn stop_tone(&mut self) {
        info!("🔇 Buzzer OFF");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingBuzzer {
        starts: Vec<u32>,
        stops: usize,
    }

    impl Buzzer for CountingBuzzer {
        fn start_tone(&mut self, frequency_hz: u32) {
            self.starts.push(frequency_hz);
        }

        fn stop_tone(&mut self) {
            self.stops += 1;
        }
    }

    #[test]
    fn test_inactive_alarm_issues_nothing() {
        let mut actuator = Actuator::new(CountingBuzzer::default(), 2_000);
        for _ in 0..5 {
            assert_eq!(actuator.sync(false), None);
        }
        assert!(actuator.buzzer().starts.is_empty());
        assert_eq!(actuator.buzzer().stops, 0);
    }

    #[test]
    fn test_start_only_on_rising_edge() {
        let mut actuator = Actuator::new(CountingBuzzer::default(), 2_000);
        assert_eq!(actuator.sync(true), Some(ActuatorCommand::Start));
        for _ in 0..100 {
            assert_eq!(actuator.sync(true), None);
        }
        assert_eq!(actuator.buzzer().starts, vec![2_000]);
        assert!(actuator.is_sounding());
    }

    #[test]
    fn test_stop_only_on_falling_edge() {
        let mut actuator = Actuator::new(CountingBuzzer::default(), 2_000);
        actuator.sync(true);
        assert_eq!(actuator.sync(false), Some(ActuatorCommand::Stop));
        assert_eq!(actuator.sync(false), None);
        assert_eq!(actuator.buzzer().stops, 1);
        assert_eq!((actuator.starts(), actuator.stops()), (1, 1));
    }

    #[test]
    fn test_tone_frequency_is_passed_through() {
        let mut actuator = Actuator::new(CountingBuzzer::default(), 3_150);
        actuator.sync(true);
        assert_eq!(actuator.buzzer().starts, vec![3_150]);
    }
}
