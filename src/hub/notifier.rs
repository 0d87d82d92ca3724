//! Alert delivery
//!
//! Alerts are dispatched after the ledger lock is released, so a slow
//! webhook never holds up report handling.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

/// Alert raised by a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub subject: String,
    pub body: String,
}

impl Alert {
    /// Build the alert for a set of triggers raised by one report.
    pub fn from_triggers(triggers: &[&str], timestamp: &str, light_level: i64, status: &str) -> Self {
        Self {
            subject: format!("[VaultAlert] {}", triggers.join(" | ")),
            body: format!(
                "Security Alert Triggered!\n\n\
                 Events: {}\n\
                 Time: {}\n\
                 Light Level: {}\n\
                 Status: {}\n",
                triggers.join(", "),
                timestamp,
                light_level,
                status
            ),
        }
    }
}

#[async_trait]
pub trait AlertNotifier: Send + Sync {
    async fn notify(&self, alert: &Alert);
}

/// Writes alerts to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl AlertNotifier for LogNotifier {
    async fn notify(&self, alert: &Alert) {
        warn!(subject = %alert.subject, "🚨 {}", alert.body.trim_end().replace('\n', " | "));
    }
}

/// Posts alerts as JSON `{subject, body}` to a webhook.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    http: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl AlertNotifier for WebhookNotifier {
    async fn notify(&self, alert: &Alert) {
        match self.http.post(&self.url).json(alert).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!(subject = %alert.subject, "Alert delivered to webhook");
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "Alert webhook rejected notification");
            }
            Err(e) => {
                warn!("Failed to deliver alert to webhook: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_text() {
        let alert = Alert::from_triggers(
            &["Motion Detected", "Vault Opened"],
            "2026-01-01 12:00:00",
            820,
            "OPEN",
        );
        assert_eq!(alert.subject, "[VaultAlert] Motion Detected | Vault Opened");
        assert!(alert.body.contains("Events: Motion Detected, Vault Opened"));
        assert!(alert.body.contains("Light Level: 820"));
        assert!(alert.body.contains("Status: OPEN"));
    }
}
