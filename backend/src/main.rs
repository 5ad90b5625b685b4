//! Tonebridge backend server.

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use tonebridge::config::{Config, DeviceMode, LimitsProfile};
use tonebridge::gateway::{DeviceGateway, HttpDeviceGateway};
use tonebridge::state::AppState;
use tonebridge::{create_app_with_state, validator::Limits};

/// Tonebridge - Effects Processor Control Plane
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Device bridge base URL (forwarding mode)
    #[arg(long)]
    device_url: Option<String>,

    /// Deployment profile
    #[arg(long, value_enum)]
    mode: Option<DeviceMode>,

    /// Validation range profile
    #[arg(long, value_enum)]
    limits: Option<LimitsProfile>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::from_figment(args.port, args.device_url, args.mode, args.limits)?;

    // Initialize logging - config log_level, then RUST_LOG, then info
    let filter = match config.log_level {
        Some(ref level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    fmt().with_env_filter(filter).with_target(false).compact().init();

    info!("Starting Tonebridge backend ({} mode)...", config.mode);

    let gateway: Option<Arc<dyn DeviceGateway>> = match config.mode {
        DeviceMode::Forwarding => {
            info!("Forwarding updates to device at {}", config.device_url);
            Some(Arc::new(HttpDeviceGateway::new(
                &config.device_url,
                Duration::from_secs(config.timeout_secs),
            )?))
        }
        DeviceMode::Polling => {
            info!("Polling profile: device fetches /api/effects itself");
            None
        }
    };

    let state = AppState::new(gateway, Limits::from(config.limits));
    let app = create_app_with_state(state);

    // Bind to 0.0.0.0 to be accessible from all interfaces
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down gracefully...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}
