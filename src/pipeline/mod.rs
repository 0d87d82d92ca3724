//! Node Pipeline
//!
//! ```text
//! every tick:   SensorReader → DetectionEngine → AlarmStateMachine → Actuator
//! every period: TelemetryReporter (may clear flags, may reset the alarm)
//! ```
//!
//! One task owns all state. The report send is awaited inside the tick, so
//! sensor polling pauses for the length of the round trip.

mod node;
mod state;
pub mod processing_loop;

pub use node::{TickReport, VaultNode};
pub use processing_loop::ProcessingLoop;
pub use state::*;
