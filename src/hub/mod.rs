//! Vault Hub - remote endpoint for VaultAlert nodes
//!
//! ## Modules
//!
//! - `config`   - Hub configuration (env vars, CLI args)
//! - `api`      - HTTP route handlers
//! - `notifier` - Alert delivery (log, webhook)
//!
//! The hub keeps a bounded report history, raises an alert when a node's
//! motion or door state rises, and hands out a queued mute as the `"false"`
//! reply to the next report.

pub mod api;
pub mod config;
pub mod notifier;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use notifier::AlertNotifier;

// ============================================================================
// Report Ledger
// ============================================================================

/// One stored report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRecord {
    /// Receive time, `%Y-%m-%d %H:%M:%S` UTC.
    pub timestamp: String,
    /// The report body as sent.
    pub data: serde_json::Value,
}

impl ReportRecord {
    pub fn motion(&self) -> bool {
        self.data
            .get("motion_detected")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }

    pub fn vault_status(&self) -> &str {
        self.data
            .get("vault_status")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("CLOSED")
    }

    pub fn light_level(&self) -> i64 {
        self.data
            .get("light_level")
            .and_then(serde_json::Value::as_i64)
            .unwrap_or(0)
    }
}

/// Mutable hub state, guarded by one lock.
#[derive(Debug)]
pub struct Ledger {
    history: VecDeque<ReportRecord>,
    capacity: usize,
    last_motion: bool,
    last_vault_status: String,
    mute_pending: bool,
}

impl Ledger {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
            last_motion: false,
            last_vault_status: "CLOSED".to_string(),
            mute_pending: false,
        }
    }

    /// Store a report and return the alert triggers it raised.
    pub fn record(&mut self, record: ReportRecord) -> Vec<&'static str> {
        let mut triggers = Vec::new();

        let motion = record.motion();
        let status = record.vault_status().to_string();

        if motion && !self.last_motion {
            triggers.push("Motion Detected");
        }
        if status == "OPEN" && self.last_vault_status == "CLOSED" {
            triggers.push("Vault Opened");
        }
        self.last_motion = motion;
        self.last_vault_status = status;

        if self.capacity > 0 {
            if self.history.len() >= self.capacity {
                self.history.pop_front();
            }
            self.history.push_back(record);
        }

        triggers
    }

    pub fn queue_mute(&mut self) {
        self.mute_pending = true;
    }

    /// Take the queued mute, if any.
    pub fn take_mute(&mut self) -> bool {
        std::mem::take(&mut self.mute_pending)
    }

    pub const fn mute_pending(&self) -> bool {
        self.mute_pending
    }

    pub fn history(&self) -> impl Iterator<Item = &ReportRecord> {
        self.history.iter()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

// ============================================================================
// Hub State
// ============================================================================

/// Shared hub application state
pub struct HubState {
    pub config: config::HubConfig,
    ledger: Mutex<Ledger>,
    pub notifier: Arc<dyn AlertNotifier>,
}

impl HubState {
    pub fn new(config: config::HubConfig, notifier: Arc<dyn AlertNotifier>) -> Arc<Self> {
        Arc::new(Self {
            ledger: Mutex::new(Ledger::new(config.history_capacity)),
            config,
            notifier,
        })
    }

    /// Lock the ledger. A poisoned lock still yields the data; every
    /// critical section leaves the ledger consistent.
    pub fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
