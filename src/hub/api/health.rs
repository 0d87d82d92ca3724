//! Health check endpoint

use crate::hub::HubState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub history_len: usize,
    pub history_capacity: usize,
    pub mute_pending: bool,
}

pub async fn get_health(State(hub): State<Arc<HubState>>) -> Json<HealthResponse> {
    let ledger = hub.ledger();
    Json(HealthResponse {
        status: "healthy".to_string(),
        history_len: ledger.len(),
        history_capacity: hub.config.history_capacity,
        mute_pending: ledger.mute_pending(),
    })
}
