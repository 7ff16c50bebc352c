use anyhow::Context;
use roomcast_server::{AppState, Config, CoordinatorHandle, router};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roomcast_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting roomcast gateway");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Configuration loaded: {:?}", config);

    let coordinator = CoordinatorHandle::spawn(config.notice_capacity);
    let app = router(AppState::new(coordinator));

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!("Listening on http://{}", config.bind_address);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
