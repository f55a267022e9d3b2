use anyhow::{Context, Result};
use beacon::server::{ServerConfig, config::parse_bind_address, serve};
use clap::Parser;
use colored::*;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "beacon=info,beacon_server=info,tower_http=info";

/// WebRTC signaling relay: rooms, presence and SDP/ICE forwarding over WebSocket.
#[derive(Parser)]
#[command(name = "beacon", version)]
struct Cli {
    /// Address to listen on (overrides BEACON_BIND_ADDRESS).
    #[arg(long)]
    bind: Option<String>,

    /// WebSocket route (overrides BEACON_SIGNAL_PATH).
    #[arg(long)]
    signal_path: Option<String>,

    /// Allowed CORS origin; repeat for several (overrides BEACON_ALLOWED_ORIGINS).
    #[arg(long = "allowed-origin")]
    allowed_origins: Vec<String>,

    /// Log filter directives, e.g. "beacon_server=debug".
    #[arg(long, env = "RUST_LOG")]
    log: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = cli.log.as_deref().unwrap_or(DEFAULT_LOG_FILTER);
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(filter).context("Invalid log filter")?)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config(cli).map_err(|e| {
        error!("Failed to load configuration: {:#}", e);
        e
    })?;

    println!("{}", "📡 Beacon signaling server".green().bold());
    println!("   🔌 Listen: {}", config.bind_address.to_string().cyan());
    println!("   🛰  Socket: {}", config.signal_path.cyan());
    println!("   🌐 Origins: {}", config.allowed_origins.join(", ").cyan());

    serve(config, shutdown_signal()).await
}

fn load_config(cli: Cli) -> Result<ServerConfig> {
    let mut config = ServerConfig::from_env().context("Failed to read environment")?;

    if let Some(bind) = cli.bind {
        config.bind_address = parse_bind_address(&bind)?;
    }
    if let Some(path) = cli.signal_path {
        config.signal_path = path;
    }
    if !cli.allowed_origins.is_empty() {
        config.allowed_origins = cli.allowed_origins;
    }

    config.validate()?;
    Ok(config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT, shutting down"),
            Err(e) => error!("Failed to listen for SIGINT: {}", e),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM, shutting down");
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
