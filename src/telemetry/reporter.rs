//! Telemetry Reporter
//!
//! ```text
//!   Idle ──(period elapsed)──► Reporting ──► Idle
//! ```
//!
//! The period is measured on the monotonic clock passed in as `now`; the
//! first report is due one full period after the reporter is created.
//! `Reporting` always finishes inside the tick that started it.
//!
//! Per due period:
//! - link down: request a reconnect, leave the trigger flags alone
//! - link up: post the payload, scan the response for the reset token,
//!   then clear the trigger flags whether or not the post succeeded
//!
//! Skipped and failed reports are not retried early; the next attempt waits
//! for the next period.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::channel::TelemetryChannel;
use crate::network::NetworkLink;
use crate::pipeline::VaultContext;
use crate::types::{RemoteCommand, TelemetryPayload};

/// What one `poll` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Period has not elapsed.
    NotDue,
    /// Link was down; reconnect requested, nothing sent.
    Skipped,
    /// The endpoint answered (any status).
    Delivered {
        payload: TelemetryPayload,
        status: u16,
        reset_applied: bool,
    },
    /// No response was obtained.
    Failed {
        payload: TelemetryPayload,
        error: String,
    },
}

impl ReportOutcome {
    /// A payload was built and a send attempted.
    pub const fn attempted(&self) -> bool {
        matches!(self, Self::Delivered { .. } | Self::Failed { .. })
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryReporter {
    period: Duration,
    last_attempt: Instant,
}

impl TelemetryReporter {
    pub const fn new(period: Duration, start: Instant) -> Self {
        Self {
            period,
            last_attempt: start,
        }
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_attempt) >= self.period
    }

    /// Run one report cycle if the period has elapsed.
    pub async fn poll<C, N>(
        &mut self,
        now: Instant,
        ctx: &mut VaultContext,
        channel: &C,
        link: &mut N,
    ) -> ReportOutcome
    where
        C: TelemetryChannel + ?Sized,
        N: NetworkLink + ?Sized,
    {
        if !self.is_due(now) {
            return ReportOutcome::NotDue;
        }
        self.last_attempt = now;

        if !link.is_connected().await {
            warn!("📵 No connectivity, skipping report");
            link.reconnect().await;
            return ReportOutcome::Skipped;
        }

        let payload = TelemetryPayload::new(ctx.reading.light_level, &ctx.flags, ctx.alarm.state());
        debug!(?payload, "📤 Sending telemetry");

        let outcome = match channel.post(&payload).await {
            Ok(resp) => {
                if resp.is_success() {
                    info!(
                        status = resp.status,
                        vault = %payload.vault_status,
                        alarm = payload.alarm_active,
                        "📡 Report delivered"
                    );
                } else {
                    warn!(status = resp.status, "Report answered with non-success status");
                }

                let reset_applied = match RemoteCommand::from_response_body(&resp.body) {
                    Some(RemoteCommand::Reset) => {
                        info!("📥 Remote reset command received");
                        ctx.alarm.apply_remote_reset()
                    }
                    None => false,
                };

                ReportOutcome::Delivered {
                    payload,
                    status: resp.status,
                    reset_applied,
                }
            }
            Err(e) => {
                warn!("❌ Report failed: {}", e);
                ReportOutcome::Failed {
                    payload,
                    error: e.to_string(),
                }
            }
        };

        ctx.flags.clear();
        outcome
    }
}
