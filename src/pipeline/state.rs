//! Node state and run statistics
//!
//! Everything the tick loop mutates lives in one [`VaultContext`] owned by
//! the loop and lent to each stage in turn.

use serde::Serialize;

use crate::alarm::AlarmStateMachine;
use crate::types::{Reading, TriggerFlags};

// ============================================================================
// Vault Context
// ============================================================================

/// Per-process vault state. Created at start with the alarm inactive and
/// never persisted.
#[derive(Debug, Clone, Default)]
pub struct VaultContext {
    /// Latest reading, replaced every tick.
    pub reading: Reading,
    /// Latching triggers.
    pub flags: TriggerFlags,
    /// Sticky alarm latch.
    pub alarm: AlarmStateMachine,
}

// ============================================================================
// Node Statistics
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NodeStats {
    pub ticks: u64,
    pub alarms_raised: u64,
    pub resets_applied: u64,
    pub reports_delivered: u64,
    pub reports_failed: u64,
    pub reports_skipped: u64,
    pub reconnects_requested: u64,
}

impl NodeStats {
    pub const fn reports_attempted(&self) -> u64 {
        self.reports_delivered + self.reports_failed
    }
}

impl std::fmt::Display for NodeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Node: {} ticks, {} alarms ({} reset), {} reports ({} failed, {} skipped)",
            self.ticks,
            self.alarms_raised,
            self.resets_applied,
            self.reports_attempted(),
            self.reports_failed,
            self.reports_skipped
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AlarmState;

    #[test]
    fn test_context_starts_clean() {
        let ctx = VaultContext::default();
        assert_eq!(ctx.alarm.state(), AlarmState::Inactive);
        assert!(!ctx.flags.any_active());
        assert_eq!(ctx.reading.light_level, 0);
    }

    #[test]
    fn test_stats_display() {
        let stats = NodeStats {
            ticks: 500,
            alarms_raised: 2,
            resets_applied: 1,
            reports_delivered: 4,
            reports_failed: 1,
            reports_skipped: 0,
            reconnects_requested: 0,
        };
        assert_eq!(
            stats.to_string(),
            "Node: 500 ticks, 2 alarms (1 reset), 5 reports (1 failed, 0 skipped)"
        );
    }
}
