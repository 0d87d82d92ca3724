//! Node → Hub HTTP Round Trip
//!
//! Serves the hub router on a loopback port and reports to it with the real
//! `HttpChannel`, including a queued mute arriving as a remote reset.

#![cfg(feature = "hub")]

use std::sync::Arc;
use std::time::{Duration, Instant};

use vault_alert::hub::api::build_router;
use vault_alert::hub::config::HubConfig;
use vault_alert::hub::notifier::LogNotifier;
use vault_alert::hub::HubState;
use vault_alert::{
    Acceleration, Actuator, AlarmState, AlwaysConnected, DetectionEngine, HttpChannel,
    LightSource, LogBuzzer, MotionSource, ReportOutcome, SensorReader, TelemetryChannel,
    TelemetryError, TelemetryPayload, TelemetryReporter, TriggerFlags, VaultNode,
};

async fn spawn_hub() -> (Arc<HubState>, String) {
    let state = HubState::new(HubConfig::default(), Arc::new(LogNotifier));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_router(Arc::clone(&state));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (state, format!("http://{addr}/api/collect"))
}

struct OpenDoor;

impl MotionSource for OpenDoor {
    fn acceleration(&mut self) -> Acceleration {
        Acceleration::REST
    }
}

impl LightSource for OpenDoor {
    fn light_level(&mut self) -> u16 {
        640
    }
}

#[tokio::test]
async fn test_post_sends_fixed_json_fields() {
    let (state, endpoint) = spawn_hub().await;
    let channel = HttpChannel::new(&endpoint, Duration::from_secs(5)).unwrap();

    let resp = channel
        .post(&TelemetryPayload::new(33, &TriggerFlags::new(), AlarmState::Inactive))
        .await
        .unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, "true");

    let ledger = state.ledger();
    let stored = ledger.history().next().unwrap();
    assert_eq!(
        stored.data,
        serde_json::json!({
            "light_level": 33,
            "motion_detected": false,
            "alarm_active": false,
            "vault_status": "CLOSED",
        })
    );
}

#[tokio::test]
async fn test_refused_connection_is_http_error() {
    // Bind and drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let channel =
        HttpChannel::new(&format!("http://{addr}/api/collect"), Duration::from_secs(2)).unwrap();
    let err = channel
        .post(&TelemetryPayload::new(0, &TriggerFlags::new(), AlarmState::Inactive))
        .await
        .unwrap_err();
    assert!(matches!(err, TelemetryError::Http(_)));
}

#[tokio::test]
async fn test_hub_mute_resets_node_alarm() {
    let (state, endpoint) = spawn_hub().await;
    let start = Instant::now();
    let period = Duration::from_millis(100);

    let mut node = VaultNode::new(
        SensorReader::new(OpenDoor, OpenDoor),
        DetectionEngine::default(),
        Actuator::new(LogBuzzer, 2_000),
        TelemetryReporter::new(period, start),
        HttpChannel::new(&endpoint, Duration::from_secs(5)).unwrap(),
        AlwaysConnected,
    );

    node.tick(start).await;
    assert!(node.context().alarm.is_active());

    // First report: plain acknowledgement.
    let report = node.tick(start + period).await;
    assert!(matches!(
        report.report,
        ReportOutcome::Delivered { status: 200, reset_applied: false, .. }
    ));
    assert!(node.context().alarm.is_active());

    state.ledger().queue_mute();

    // Second report carries the mute back as "false".
    let report = node.tick(start + period * 2).await;
    assert!(matches!(
        report.report,
        ReportOutcome::Delivered { reset_applied: true, .. }
    ));
    assert!(!node.context().alarm.is_active());
    assert_eq!(node.stats().resets_applied, 1);

    // Door is still open, so the next tick raises the alarm again.
    let report = node.tick(start + period * 2 + Duration::from_millis(10)).await;
    assert!(report.alarm_raised);
    assert_eq!(state.ledger().len(), 2);
}
