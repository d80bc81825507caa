//! event-server: team registration, QR attendance and admin export

use std::net::SocketAddr;

use event_server::{AppState, Config, create_router, init_logger, rate_limit};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_logger(config.log_level.as_deref(), config.log_dir.as_deref());

    tracing::info!("Starting event-server (env: {})", config.environment);

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    let http_addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));

    let state = AppState::new(config).await;
    rate_limit::spawn_cleanup(state.rate_limiter.clone());

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(http_addr).await?;
    tracing::info!("event-server HTTP listening on {http_addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
