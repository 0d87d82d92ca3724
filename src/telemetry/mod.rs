//! Telemetry - periodic state reports and the remote reset channel
//!
//! - [`channel`]: transport abstraction and the HTTP implementation
//! - [`reporter`]: report scheduling, response interpretation, flag clearing

pub mod channel;
pub mod reporter;

pub use channel::{ChannelResponse, HttpChannel, TelemetryChannel, TelemetryError};
pub use reporter::{ReportOutcome, TelemetryReporter};
