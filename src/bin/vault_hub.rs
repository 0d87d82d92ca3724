//! Vault Hub - remote endpoint for VaultAlert nodes
//!
//! ```bash
//! cargo run --bin vault-hub -- --port 7071
//!
//! # queue a remote reset for the next report
//! curl -X POST http://127.0.0.1:7071/api/mute
//! ```
//!
//! ## Environment variables
//!
//! | Variable                      | Description                                   |
//! |-------------------------------|-----------------------------------------------|
//! | `VAULT_HUB_ADDR`              | Bind address (default: 0.0.0.0:7071)          |
//! | `VAULT_HUB_HISTORY`           | Reports kept for /api/history (default: 100)  |
//! | `VAULT_ALERT_WEBHOOK`         | Alert webhook URL (alerts are logged if unset)|
//! | `VAULT_ALERT_WEBHOOK_TIMEOUT` | Webhook timeout in seconds (default: 10)      |

use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use vault_alert::hub;
use vault_alert::hub::notifier::{AlertNotifier, LogNotifier, WebhookNotifier};

#[derive(Parser, Debug)]
#[command(name = "vault-hub", about = "Vault Hub - report collector and remote reset endpoint")]
struct CliArgs {
    /// Port to listen on (default: 7071)
    #[arg(long, short)]
    port: Option<u16>,

    /// Bind address (overrides --port)
    #[arg(long)]
    bind_address: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,vault_hub=debug")),
        )
        .init();

    let args = CliArgs::parse();
    let config = hub::config::HubConfig::from_env(args.bind_address, args.port);

    info!(bind = %config.bind_address, history = config.history_capacity, "Starting Vault Hub");

    let notifier: Arc<dyn AlertNotifier> = match &config.webhook_url {
        Some(url) => {
            info!(url = %url, "Alerts go to webhook");
            Arc::new(
                WebhookNotifier::new(url, Duration::from_secs(config.webhook_timeout_secs))
                    .context("Failed to build webhook client")?,
            )
        }
        None => Arc::new(LogNotifier),
    };

    let state = hub::HubState::new(config.clone(), notifier);

    let app = hub::api::build_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!(address = %config.bind_address, "Vault Hub listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Vault Hub shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
