//! VaultAlert: vault intrusion node
//!
//! A single control loop watches a light sensor and an accelerometer inside
//! a closed enclosure, raises a local audible alarm on a sudden light or
//! motion change, reports state to a remote endpoint on a fixed period, and
//! accepts a remote reset through the report response.
//!
//! ## Architecture
//!
//! - **Acquisition**: motion + light drivers combined into one `Reading`
//! - **Detection**: latching motion / light triggers
//! - **Alarm**: sticky Inactive/Active latch, cleared only remotely
//! - **Actuator**: edge-driven buzzer control
//! - **Telemetry**: periodic reports and remote reset
//! - **Hub** (feature `hub`): the remote endpoint the node reports to

pub mod config;
pub mod types;
pub mod acquisition;
pub mod detection;
pub mod alarm;
pub mod actuator;
pub mod network;
pub mod telemetry;
pub mod pipeline;
#[cfg(feature = "hub")]
pub mod hub;

// Re-export configuration
pub use config::{ConfigError, NodeConfig};

// Re-export commonly used types
pub use types::{
    Acceleration, AlarmState, Reading, RemoteCommand, TelemetryPayload, TriggerFlags,
    VaultStatus,
};

// Re-export stages
pub use acquisition::{LightSource, MotionSource, SensorReader};
pub use actuator::{Actuator, ActuatorCommand, Buzzer, LogBuzzer};
pub use alarm::AlarmStateMachine;
pub use detection::{DetectionEngine, DetectionOutcome, DetectionThresholds};
pub use network::{AlwaysConnected, HostLink, NetworkLink};
pub use telemetry::{
    ChannelResponse, HttpChannel, ReportOutcome, TelemetryChannel, TelemetryError,
    TelemetryReporter,
};

// Re-export the node
pub use pipeline::{NodeStats, ProcessingLoop, TickReport, VaultContext, VaultNode};
