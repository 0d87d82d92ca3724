//! Hub configuration - environment variables, CLI args, defaults

use tracing::{info, warn};

use crate::config::defaults::{HUB_BIND_ADDR, HUB_HISTORY_CAPACITY, HUB_WEBHOOK_TIMEOUT_SECS};

/// Vault Hub configuration
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Bind address (e.g., "0.0.0.0:7071")
    pub bind_address: String,
    /// Reports kept for `/api/history` (default: 100)
    pub history_capacity: usize,
    /// Alert webhook URL; alerts are only logged when unset
    pub webhook_url: Option<String>,
    /// Webhook request timeout in seconds (default: 10)
    pub webhook_timeout_secs: u64,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            bind_address: HUB_BIND_ADDR.to_string(),
            history_capacity: HUB_HISTORY_CAPACITY,
            webhook_url: None,
            webhook_timeout_secs: HUB_WEBHOOK_TIMEOUT_SECS,
        }
    }
}

impl HubConfig {
    /// Load configuration from environment variables with CLI overrides
    pub fn from_env(bind_address: Option<String>, port: Option<u16>) -> Self {
        let mut config = Self::default();

        // Bind address: CLI --bind-address > --port > VAULT_HUB_ADDR
        if let Some(addr) = bind_address {
            config.bind_address = addr;
        } else if let Some(p) = port {
            config.bind_address = format!("0.0.0.0:{}", p);
        } else if let Ok(addr) = std::env::var("VAULT_HUB_ADDR") {
            config.bind_address = addr;
        }

        if let Ok(v) = std::env::var("VAULT_HUB_HISTORY") {
            match v.parse() {
                Ok(n) => config.history_capacity = n,
                Err(_) => warn!(value = %v, "VAULT_HUB_HISTORY is not a number, keeping default"),
            }
        }

        config.webhook_url = std::env::var("VAULT_ALERT_WEBHOOK")
            .ok()
            .filter(|url| !url.trim().is_empty());
        if config.webhook_url.is_none() {
            info!("VAULT_ALERT_WEBHOOK not set - alerts will only be logged");
        }

        if let Ok(v) = std::env::var("VAULT_ALERT_WEBHOOK_TIMEOUT") {
            if let Ok(n) = v.parse() {
                config.webhook_timeout_secs = n;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HubConfig::default();
        assert_eq!(config.bind_address, "0.0.0.0:7071");
        assert_eq!(config.history_capacity, 100);
        assert!(config.webhook_url.is_none());
    }

    #[test]
    fn test_cli_bind_address_wins_over_port() {
        let config = HubConfig::from_env(Some("127.0.0.1:9000".to_string()), Some(8000));
        assert_eq!(config.bind_address, "127.0.0.1:9000");
    }

    #[test]
    fn test_port_binds_all_interfaces() {
        let config = HubConfig::from_env(None, Some(8000));
        assert_eq!(config.bind_address, "0.0.0.0:8000");
    }
}
