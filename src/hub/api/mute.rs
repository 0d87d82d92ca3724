//! Operator mute

use crate::hub::HubState;
use axum::extract::State;
use std::sync::Arc;
use tracing::info;

/// `POST|GET /api/mute` - queue a reset for the next report.
pub async fn queue_mute(State(hub): State<Arc<HubState>>) -> &'static str {
    hub.ledger().queue_mute();
    info!("Mute requested manually");
    "Mute command queued. The alarm will stop the next time the device reports in."
}
