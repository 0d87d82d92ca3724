//! Report history for plotting

use crate::hub::HubState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct HistoryPoint {
    pub timestamp: String,
    /// 1 when the vault was reported OPEN
    pub vault_open: u8,
    /// 1 when motion was reported
    pub motion: u8,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub points: Vec<HistoryPoint>,
}

/// `GET /api/history` - oldest first.
pub async fn get_history(State(hub): State<Arc<HubState>>) -> Json<HistoryResponse> {
    let points = hub
        .ledger()
        .history()
        .map(|r| HistoryPoint {
            timestamp: r.timestamp.clone(),
            vault_open: u8::from(r.vault_status() == "OPEN"),
            motion: u8::from(r.motion()),
        })
        .collect();

    Json(HistoryResponse { points })
}
