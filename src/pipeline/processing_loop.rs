//! Tick loop driving a [`VaultNode`] until cancelled.

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::{NodeStats, VaultNode};
use crate::acquisition::{LightSource, MotionSource};
use crate::actuator::Buzzer;
use crate::network::NetworkLink;
use crate::telemetry::TelemetryChannel;

/// Ticks between heartbeat log lines.
const HEARTBEAT_EVERY: u64 = 6_000;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

pub struct ProcessingLoop {
    tick_interval: Duration,
    cancel_token: CancellationToken,
}

impl ProcessingLoop {
    pub const fn new(tick_interval: Duration, cancel_token: CancellationToken) -> Self {
        Self {
            tick_interval,
            cancel_token,
        }
    }

    /// Tick the node until the token is cancelled. Returns final statistics.
    pub async fn run<M, L, B, C, N>(self, node: &mut VaultNode<M, L, B, C, N>) -> NodeStats
    where
        M: MotionSource,
        L: LightSource,
        B: Buzzer,
        C: TelemetryChannel,
        N: NetworkLink,
    {
        let mut ticker = tokio::time::interval(self.tick_interval);
        // A slow report delays the following ticks instead of bursting them.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            tick_ms = self.tick_interval.as_millis() as u64,
            "🛡️  Monitoring vault..."
        );
        info!("{RULE}");

        loop {
            let now: Instant = tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    info!("[ProcessingLoop] Shutdown signal received");
                    break;
                }
                now = ticker.tick() => now,
            };

            let report = node.tick(now.into_std()).await;

            let ticks = node.stats().ticks;
            if ticks % HEARTBEAT_EVERY == 0 {
                let ctx = node.context();
                info!(
                    "💓 {} ticks | light {} | alarm {} | {}",
                    ticks,
                    report.reading.light_level,
                    ctx.alarm.state(),
                    node.stats()
                );
            }
        }

        let stats = node.stats();
        info!("");
        info!("{RULE}");
        info!("📊 FINAL STATISTICS");
        info!("{RULE}");
        info!("   Ticks:                {}", stats.ticks);
        info!("   Alarms Raised:        {}", stats.alarms_raised);
        info!("   Remote Resets:        {}", stats.resets_applied);
        info!("   Reports Delivered:    {}", stats.reports_delivered);
        info!("   Reports Failed:       {}", stats.reports_failed);
        info!("   Reports Skipped:      {}", stats.reports_skipped);
        info!("   Reconnects Requested: {}", stats.reconnects_requested);
        info!("   Alarm At Shutdown:    {}", node.context().alarm.state());
        info!("{RULE}");

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::SensorReader;
    use crate::actuator::{Actuator, LogBuzzer};
    use crate::detection::DetectionEngine;
    use crate::network::AlwaysConnected;
    use crate::telemetry::{ChannelResponse, TelemetryError, TelemetryReporter};
    use crate::types::{Acceleration, TelemetryPayload};
    use async_trait::async_trait;

    struct Still;

    impl MotionSource for Still {
        fn acceleration(&mut self) -> Acceleration {
            Acceleration::REST
        }
    }

    impl LightSource for Still {
        fn light_level(&mut self) -> u16 {
            0
        }
    }

    struct Silent;

    #[async_trait]
    impl TelemetryChannel for Silent {
        async fn post(&self, _payload: &TelemetryPayload) -> Result<ChannelResponse, TelemetryError> {
            Ok(ChannelResponse {
                status: 200,
                body: "true".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_runs_until_cancelled() {
        let mut node = VaultNode::new(
            SensorReader::new(Still, Still),
            DetectionEngine::default(),
            Actuator::new(LogBuzzer, 2_000),
            TelemetryReporter::new(Duration::from_secs(2), Instant::now().into_std()),
            Silent,
            AlwaysConnected,
        );

        let token = CancellationToken::new();
        let stopper = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(300)).await;
            stopper.cancel();
        });

        let stats = ProcessingLoop::new(Duration::from_millis(10), token)
            .run(&mut node)
            .await;
        assert!(stats.ticks >= 10, "ticks = {}", stats.ticks);
        assert_eq!(stats.alarms_raised, 0);
    }
}
