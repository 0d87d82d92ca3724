//! Report ingestion

use crate::hub::notifier::Alert;
use crate::hub::{HubState, ReportRecord};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::{debug, info};

/// Reply that tells the node to clear its alarm.
pub const MUTE_REPLY: &str = "false";

/// Reply for a report with no queued command.
pub const ACK_REPLY: &str = "true";

/// `POST /api/collect`
///
/// Stores the report, raises alerts on rising motion or door state, and
/// answers `"false"` exactly once after a mute was queued.
pub async fn collect(State(hub): State<Arc<HubState>>, body: Bytes) -> (StatusCode, &'static str) {
    let data: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(v @ serde_json::Value::Object(_)) => v,
        _ => return (StatusCode::BAD_REQUEST, "Invalid JSON"),
    };

    let record = ReportRecord {
        timestamp: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        data,
    };
    debug!(data = %record.data, "Report received");

    let timestamp = record.timestamp.clone();
    let light_level = record.light_level();
    let status = record.vault_status().to_string();

    // Ledger lock is released before any notification goes out.
    let (triggers, mute) = {
        let mut ledger = hub.ledger();
        let triggers = ledger.record(record);
        (triggers, ledger.take_mute())
    };

    if !triggers.is_empty() {
        let alert = Alert::from_triggers(&triggers, &timestamp, light_level, &status);
        info!(subject = %alert.subject, "Trigger detected, notifying");
        hub.notifier.notify(&alert).await;
    }

    if mute {
        info!("Sending MUTE command to device");
        (StatusCode::OK, MUTE_REPLY)
    } else {
        (StatusCode::OK, ACK_REPLY)
    }
}
