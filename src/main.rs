use std::sync::Arc;

use anyhow::Context;
use plumber_payroll::api::{AppState, create_router, shutdown_signal};
use plumber_payroll::calculation::CommissionPolicy;
use plumber_payroll::config::ConfigLoader;
use plumber_payroll::service::PayrollService;
use plumber_payroll::storage::MemoryStorage;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir =
        std::env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("loading configuration from {config_dir}"))?;

    let service = PayrollService::new(Arc::new(MemoryStorage::new()), CommissionPolicy::default());
    let seeded = service.seed_plumbers(config.seed_plumbers()).await?;
    tracing::info!(seeded, config_dir = %config_dir, "Store initialised");

    let listen_addr =
        std::env::var("LISTEN_ADDR").unwrap_or_else(|_| config.listen_addr().to_string());
    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("binding {listen_addr}"))?;
    tracing::info!(addr = %listen_addr, "Payroll service listening");

    axum::serve(listener, create_router(AppState::new(service)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Payroll service stopped");

    Ok(())
}
