use actix_web::HttpServer;
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use og_api::{create_app, AppState};
use og_core::services::GatewayService;
use og_shared::config::{AppConfig, LogFormat, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    tracing::info!(
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting OTP gateway"
    );

    let gateway = og_infra::build_gateway(&config)
        .await
        .context("failed to initialise gateway")?;

    let shutdown = CancellationToken::new();
    gateway.start(shutdown.clone()).await;

    let service: Arc<dyn GatewayService> = gateway.clone();
    let state = AppState::new(service);
    let cors = config.cors.clone();

    let bind_address = config.server.bind_address();
    tracing::info!(%bind_address, "HTTP server binding");

    let mut server = HttpServer::new(move || create_app(state.clone(), &cors))
        .keep_alive(Duration::from_secs(config.server.keep_alive))
        .shutdown_timeout(config.server.shutdown_timeout);
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let result = server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await;

    tracing::info!("HTTP server stopped, shutting down background tasks");
    shutdown.cancel();
    gateway.shutdown().await;

    result.context("HTTP server error")
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}
