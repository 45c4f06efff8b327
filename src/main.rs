use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use iot_relay::config::{load_config, RelayConfig};
use iot_relay::http::RelayServer;
use iot_relay::lifecycle::Shutdown;
use iot_relay::observability;

#[derive(Parser)]
#[command(name = "iot-relay")]
#[command(about = "Relay gateway between the admin console and the IoT backend", long_about = None)]
struct Args {
    /// TOML config file. Without one, defaults plus environment overrides apply.
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::from_env()?,
    };

    observability::init_tracing(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "iot-relay starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        mount_prefix = %config.relay.mount_prefix,
        backend_origin = %config.relay.origin(),
        timeout_secs = config.relay.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validation already checked the address.
        let addr = config.observability.metrics_address.parse()?;
        observability::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let shutdown = Shutdown::new();

    let server = RelayServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
