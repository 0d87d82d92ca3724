//! Network link supervision
//!
//! The reporter asks the link whether it is up before each report and asks
//! it to reconnect when it is not. On a host the "link" is reachability of
//! the telemetry endpoint's host name, checked with a bounded DNS lookup.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Connectivity interface used by the telemetry reporter.
#[async_trait]
pub trait NetworkLink: Send {
    /// Whether a report can be attempted right now.
    async fn is_connected(&mut self) -> bool;

    /// Begin re-establishing the link. Must not wait for completion.
    async fn reconnect(&mut self);
}

/// Host-side link that resolves the endpoint's host under a timeout.
#[derive(Debug)]
pub struct HostLink {
    /// `host:port` of the telemetry endpoint.
    target: String,
    probe_timeout: Duration,
    connected: bool,
    reconnects: u64,
}

impl HostLink {
    /// Build a link for `endpoint`. Returns `None` if the URL has no host.
    pub fn for_endpoint(endpoint: &str, probe_timeout: Duration) -> Option<Self> {
        let url = reqwest::Url::parse(endpoint).ok()?;
        let host = url.host_str()?;
        let port = url.port_or_known_default()?;
        Some(Self {
            target: format!("{host}:{port}"),
            probe_timeout,
            connected: false,
            reconnects: 0,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Reconnect requests seen so far.
    pub const fn reconnects(&self) -> u64 {
        self.reconnects
    }

    async fn probe(&self) -> bool {
        match tokio::time::timeout(self.probe_timeout, tokio::net::lookup_host(self.target.as_str())).await {
            Ok(Ok(mut addrs)) => addrs.next().is_some(),
            Ok(Err(e)) => {
                debug!(addr = %self.target, "Link probe failed: {}", e);
                false
            }
            Err(_) => {
                debug!(addr = %self.target, "Link probe timed out");
                false
            }
        }
    }
}

#[async_trait]
impl NetworkLink for HostLink {
    async fn is_connected(&mut self) -> bool {
        let up = self.probe().await;
        if up != self.connected {
            if up {
                info!(addr = %self.target, "📶 Link up");
            } else {
                warn!(addr = %self.target, "📵 Link down");
            }
            self.connected = up;
        }
        up
    }

    async fn reconnect(&mut self) {
        self.reconnects += 1;
        info!(
            addr = %self.target,
            attempt = self.reconnects,
            "🔄 Reconnect requested"
        );
    }
}

/// Link that is always up. Used when the endpoint is local.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConnected;

#[async_trait]
impl NetworkLink for AlwaysConnected {
    async fn is_connected(&mut self) -> bool {
        true
    }

    async fn reconnect(&mut self) {}
}
