use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use shiptrack_api::{app, AppState};
use shiptrack_store::{app_config::Config, RecaptchaClient, SheetClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "shiptrack_api=debug,shiptrack_store=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    if config.rgs_secret.is_empty() {
        tracing::warn!("RGS_SECRET is not set, sheet lookups will carry an empty secret");
    }
    if config.recaptcha_secret.is_empty() {
        tracing::warn!("RECAPTCHA_SECRET is not set, every verification will be rejected");
    }

    let sheet = SheetClient::from_config(&config).context("Failed to build sheet client")?;
    let recaptcha =
        RecaptchaClient::from_config(&config).context("Failed to build reCAPTCHA client")?;

    let app_state = AppState::new(&config, Arc::new(sheet), Arc::new(recaptcha));
    tracing::info!(
        "Allowed origins: {:?}, upstream timeout: {}s",
        app_state.origins,
        config.upstream_timeout_secs
    );

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Shipment tracker backend running on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
