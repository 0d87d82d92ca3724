//! Alarm State Machine
//!
//! ```text
//!              any trigger latched
//!   Inactive ───────────────────────► Active
//!      ▲                                 │
//!      └────── apply_remote_reset() ─────┘
//! ```
//!
//! There is no local timeout: an active alarm stays active until the remote
//! endpoint acknowledges it, however long the triggers have been clear.

use tracing::{info, warn};

use crate::types::{AlarmState, TriggerFlags};

#[derive(Debug, Clone, Default)]
pub struct AlarmStateMachine {
    state: AlarmState,
    activations: u64,
    resets: u64,
}

impl AlarmStateMachine {
    pub const fn new() -> Self {
        Self {
            state: AlarmState::Inactive,
            activations: 0,
            resets: 0,
        }
    }

    pub const fn state(&self) -> AlarmState {
        self.state
    }

    pub const fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Number of Inactive -> Active transitions since start.
    pub const fn activations(&self) -> u64 {
        self.activations
    }

    /// Number of Active -> Inactive transitions since start.
    pub const fn resets(&self) -> u64 {
        self.resets
    }

    /// Raise the alarm if any trigger is latched and it is not already active.
    ///
    /// Returns `true` only on the transition itself.
    pub fn observe(&mut self, flags: &TriggerFlags) -> bool {
        if self.state.is_active() || !flags.any_active() {
            return false;
        }
        self.state = AlarmState::Active;
        self.activations += 1;
        warn!(
            motion = flags.motion(),
            light = flags.light(),
            activation = self.activations,
            "🚨 ALARM TRIGGERED"
        );
        true
    }

    /// Clear the alarm on a remote reset command.
    ///
    /// Returns `true` if the alarm was active.
    pub fn apply_remote_reset(&mut self) -> bool {
        if !self.state.is_active() {
            info!("Remote reset received while alarm inactive - nothing to clear");
            return false;
        }
        self.state = AlarmState::Inactive;
        self.resets += 1;
        info!(reset = self.resets, "🔕 Alarm cleared by remote reset");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(motion: bool, light: bool) -> TriggerFlags {
        let mut f = TriggerFlags::new();
        if motion {
            f.latch_motion();
        }
        if light {
            f.latch_light();
        }
        f
    }

    #[test]
    fn test_starts_inactive() {
        let alarm = AlarmStateMachine::new();
        assert_eq!(alarm.state(), AlarmState::Inactive);
        assert_eq!(alarm.activations(), 0);
    }

    #[test]
    fn test_either_trigger_activates() {
        for (motion, light) in [(true, false), (false, true), (true, true)] {
            let mut alarm = AlarmStateMachine::new();
            assert!(alarm.observe(&flags(motion, light)));
            assert!(alarm.is_active(), "motion={motion} light={light}");
        }
    }

    #[test]
    fn test_no_trigger_keeps_inactive() {
        let mut alarm = AlarmStateMachine::new();
        assert!(!alarm.observe(&flags(false, false)));
        assert!(!alarm.is_active());
    }

    #[test]
    fn test_activation_is_edge_triggered() {
        let mut alarm = AlarmStateMachine::new();
        assert!(alarm.observe(&flags(true, false)));
        for _ in 0..10 {
            assert!(!alarm.observe(&flags(true, true)));
        }
        assert_eq!(alarm.activations(), 1);
    }

    #[test]
    fn test_cleared_triggers_do_not_clear_alarm() {
        let mut alarm = AlarmStateMachine::new();
        alarm.observe(&flags(false, true));
        for _ in 0..1_000 {
            alarm.observe(&flags(false, false));
        }
        assert!(alarm.is_active());
    }

    #[test]
    fn test_remote_reset_clears_and_rearms() {
        let mut alarm = AlarmStateMachine::new();
        alarm.observe(&flags(true, false));
        assert!(alarm.apply_remote_reset());
        assert!(!alarm.is_active());
        assert_eq!(alarm.resets(), 1);

        assert!(alarm.observe(&flags(true, false)));
        assert_eq!(alarm.activations(), 2);
    }

    #[test]
    fn test_reset_while_inactive_is_noop() {
        let mut alarm = AlarmStateMachine::new();
        assert!(!alarm.apply_remote_reset());
        assert_eq!(alarm.resets(), 0);
    }
}
