//! VaultAlert node
//!
//! Runs the intrusion-detection loop on a host, with simulated or fed sensors
//! and a log-backed buzzer, reporting to a remote endpoint.
//!
//! # Usage
//!
//! ```bash
//! # Simulated door-open episode against a local vault-hub
//! cargo run --bin vault-alert -- --scenario door-open
//!
//! # Readings from stdin, one JSON object per line
//! ./sensor_feed | ./vault-alert --source stdin
//!
//! # Show the effective configuration and exit
//! ./vault-alert --print-config
//! ```
//!
//! # Environment Variables
//!
//! - `VAULT_CONFIG`: Path to a TOML config file (default: ./vault_config.toml)
//! - `VAULT_ENDPOINT`: Report endpoint URL
//! - `RUST_LOG`: Logging level (default: info)

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use vault_alert::acquisition::{FeedSensors, LightSource, MotionSource, Scenario, SimulatedSensors};
use vault_alert::{
    Actuator, DetectionEngine, HostLink, HttpChannel, LogBuzzer, NodeConfig, ProcessingLoop,
    SensorReader, TelemetryReporter, VaultNode,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    /// Scripted scenario readings
    Simulated,
    /// JSON readings from stdin
    Stdin,
}

#[derive(Parser, Debug)]
#[command(name = "vault-alert")]
#[command(about = "VaultAlert intrusion-detection node")]
#[command(version)]
struct CliArgs {
    /// Config file (overrides VAULT_CONFIG and ./vault_config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Report endpoint URL (overrides config and VAULT_ENDPOINT)
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Report period in milliseconds
    #[arg(long, value_name = "MS")]
    report_interval_ms: Option<u64>,

    /// Where sensor readings come from
    #[arg(long, value_enum, default_value = "simulated")]
    source: SourceKind,

    /// Scenario for the simulated source: quiet, door-open, tamper, intrusion
    #[arg(long, default_value = "intrusion")]
    scenario: Scenario,

    /// Seed for simulated sensor noise
    #[arg(long, default_value = "7")]
    seed: u64,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.json_logs);

    let config = load_config(&args)?;

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    info!("🔐 VaultAlert node '{}' starting", config.node.name);
    info!(
        endpoint = %config.telemetry.endpoint,
        report_ms = config.telemetry.report_interval_ms,
        light_threshold = config.detection.light_threshold,
        motion_threshold_g = config.detection.motion_threshold_g,
        "Configuration"
    );

    let cancel_token = CancellationToken::new();
    {
        let token = cancel_token.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Ctrl+C received, stopping"),
                Err(e) => warn!("Failed to listen for Ctrl+C: {}", e),
            }
            token.cancel();
        });
    }

    match args.source {
        SourceKind::Simulated => {
            info!(scenario = %args.scenario, seed = args.seed, "📟 Using simulated sensors");
            let (motion, light) =
                SimulatedSensors::pair(args.scenario, config.sensors.tick_interval(), args.seed);
            run_node(&config, motion, light, cancel_token).await
        }
        SourceKind::Stdin => {
            info!("📟 Reading sensor data from stdin");
            let (feed, _reader) = FeedSensors::from_stdin();
            run_node(&config, feed.clone(), feed, cancel_token).await
        }
    }
}

// ============================================================================
// Setup
// ============================================================================

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Config file, then `VAULT_ENDPOINT`, then CLI flags; validated last.
fn load_config(args: &CliArgs) -> Result<NodeConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let mut config = NodeConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.apply_env_overrides();
            config
        }
        None => NodeConfig::load(),
    };

    if let Some(endpoint) = &args.endpoint {
        config.telemetry.endpoint.clone_from(endpoint);
    }
    if let Some(ms) = args.report_interval_ms {
        config.telemetry.report_interval_ms = ms;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

async fn run_node<M, L>(
    config: &NodeConfig,
    motion: M,
    light: L,
    cancel_token: CancellationToken,
) -> Result<()>
where
    M: MotionSource,
    L: LightSource,
{
    let reader = SensorReader::with_light_max(motion, light, config.sensors.light_max);
    let engine = DetectionEngine::new(config.detection.thresholds());
    let actuator = Actuator::new(LogBuzzer, config.actuator.tone_hz);
    let reporter = TelemetryReporter::new(config.telemetry.report_interval(), Instant::now());
    let channel = HttpChannel::new(&config.telemetry.endpoint, config.telemetry.request_timeout())
        .context("Failed to build telemetry channel")?;
    let link = HostLink::for_endpoint(&config.telemetry.endpoint, config.network.probe_timeout())
        .context("Telemetry endpoint has no host")?;

    let mut node = VaultNode::new(reader, engine, actuator, reporter, channel, link);

    let stats = ProcessingLoop::new(config.sensors.tick_interval(), cancel_token)
        .run(&mut node)
        .await;

    info!("{}", stats);
    Ok(())
}
