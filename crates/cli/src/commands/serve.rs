//! `pathcraft serve` — start the HTTP gateway and worker pool.

use tracing::info;

pub async fn run(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = pathcraft_config::AppConfig::load()?;

    if let Some(port) = port {
        config.gateway.port = port;
    }

    info!(
        host = %config.gateway.host,
        port = config.gateway.port,
        workers = config.queue.workers,
        "Starting Pathcraft"
    );

    pathcraft_gateway::start(config).await
}
