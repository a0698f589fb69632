//! Campus Portal API
//!
//! ```bash
//! portal-api --config portal.toml
//! portal-api --config portal.toml --check
//! PORTAL_LISTEN=127.0.0.1:3000 portal-api
//! ```

use anyhow::Context;
use clap::Parser;
use portal_api::{build_router, config::PortalConfig, AppState};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "portal-api")]
#[command(version)]
#[command(about = "Campus Portal API", long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(long, short, env = "PORTAL_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overrides the config file
    #[arg(long, env = "PORTAL_LISTEN")]
    listen: Option<String>,

    /// Validate the config and capability registry, then exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = PortalConfig::load(args.config.as_deref()).context("loading config")?;
    if let Some(listen) = args.listen {
        config.listen = listen;
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_filter.clone()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::from_config(&config).context("building capability registry")?;
    if args.check {
        println!(
            "registry ok: {} capabilities, {} loaders",
            state.registry.descriptors().len(),
            state.registry.implementations().len()
        );
        return Ok(());
    }

    if config.uses_dev_secret() {
        tracing::warn!("using the development JWT secret; set auth.jwt_secret");
    }

    let app = build_router(state);

    tracing::info!("Portal API listening on {}", config.listen);
    let listener = tokio::net::TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("binding {}", config.listen))?;
    axum::serve(listener, app).await.context("serving")?;

    Ok(())
}
