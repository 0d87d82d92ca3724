//! Vault node: wires the stages together and runs one tick at a time.

use std::time::Instant;

use tracing::debug;

use super::state::{NodeStats, VaultContext};
use crate::acquisition::{LightSource, MotionSource, SensorReader};
use crate::actuator::{Actuator, ActuatorCommand, Buzzer};
use crate::detection::{DetectionEngine, DetectionOutcome};
use crate::network::NetworkLink;
use crate::telemetry::{ReportOutcome, TelemetryChannel, TelemetryReporter};
use crate::types::Reading;

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub reading: Reading,
    pub detection: DetectionOutcome,
    pub alarm_raised: bool,
    pub actuator: Option<ActuatorCommand>,
    pub report: ReportOutcome,
}

pub struct VaultNode<M, L, B, C, N>
where
    M: MotionSource,
    L: LightSource,
    B: Buzzer,
    C: TelemetryChannel,
    N: NetworkLink,
{
    reader: SensorReader<M, L>,
    engine: DetectionEngine,
    actuator: Actuator<B>,
    reporter: TelemetryReporter,
    channel: C,
    link: N,
    ctx: VaultContext,
    stats: NodeStats,
}

impl<M, L, B, C, N> VaultNode<M, L, B, C, N>
where
    M: MotionSource,
    L: LightSource,
    B: Buzzer,
    C: TelemetryChannel,
    N: NetworkLink,
{
    pub fn new(
        reader: SensorReader<M, L>,
        engine: DetectionEngine,
        actuator: Actuator<B>,
        reporter: TelemetryReporter,
        channel: C,
        link: N,
    ) -> Self {
        Self {
            reader,
            engine,
            actuator,
            reporter,
            channel,
            link,
            ctx: VaultContext::default(),
            stats: NodeStats::default(),
        }
    }

    /// Run every stage once. `now` drives the report schedule.
    pub async fn tick(&mut self, now: Instant) -> TickReport {
        self.stats.ticks += 1;

        let reading = self.reader.read();
        self.ctx.reading = reading;

        let detection = self.engine.evaluate(&reading, &mut self.ctx.flags);

        let alarm_raised = self.ctx.alarm.observe(&self.ctx.flags);
        if alarm_raised {
            self.stats.alarms_raised += 1;
        }

        let actuator = self.actuator.sync(self.ctx.alarm.is_active());

        let report = self
            .reporter
            .poll(now, &mut self.ctx, &self.channel, &mut self.link)
            .await;
        self.record(&report);

        TickReport {
            reading,
            detection,
            alarm_raised,
            actuator,
            report,
        }
    }

    fn record(&mut self, report: &ReportOutcome) {
        match report {
            ReportOutcome::NotDue => {}
            ReportOutcome::Skipped => {
                self.stats.reports_skipped += 1;
                self.stats.reconnects_requested += 1;
            }
            ReportOutcome::Delivered { reset_applied, .. } => {
                self.stats.reports_delivered += 1;
                if *reset_applied {
                    self.stats.resets_applied += 1;
                }
            }
            ReportOutcome::Failed { .. } => self.stats.reports_failed += 1,
        }
        if !matches!(report, ReportOutcome::NotDue) {
            debug!(stats = %self.stats, "Report cycle finished");
        }
    }

    pub const fn context(&self) -> &VaultContext {
        &self.ctx
    }

    pub const fn stats(&self) -> NodeStats {
        self.stats
    }

    pub const fn actuator(&self) -> &Actuator<B> {
        &self.actuator
    }

    pub const fn link(&self) -> &N {
        &self.link
    }

    pub const fn channel(&self) -> &C {
        &self.channel
    }
}
