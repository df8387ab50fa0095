use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use binintel::api::router::create_router;
use binintel::api::ws_types::WsMessage;
use binintel::config::AppConfig;
use binintel::ingestion::PageFetcher;
use binintel::services::ThresholdTracker;
use binintel::threeds::ThreeDsClient;
use binintel::{db, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    let metrics_handle = metrics::init_metrics()?;

    tracing::info!("Connecting to database...");
    let db = db::init_pool(&config.database_url).await?;
    tracing::info!("Database connected, migrations applied");

    // --- Enforcement oracle ---
    if !config.has_oracle_credentials() {
        tracing::warn!("THREEDS_API_KEY not set, every 3DS lookup will fail");
    }
    let oracle = ThreeDsClient::with_timeout(
        config.threeds_api_key.clone(),
        Duration::from_secs(config.oracle_timeout_secs),
    )?
    .with_base_url(config.threeds_base_url.clone())
    .with_api_host(config.threeds_api_host.clone());

    // --- Page fetcher ---
    let fetcher = PageFetcher::with_settings(
        &config.fetch_user_agent,
        Duration::from_secs(config.fetch_timeout_secs),
    )?
    .with_max_bytes(config.fetch_max_bytes);

    if config.api_token.is_none() {
        tracing::warn!("API_TOKEN not set, /api routes are unauthenticated");
    }

    // --- WebSocket broadcast channel for the live feed ---
    let (ws_tx, _) = broadcast::channel::<WsMessage>(256);

    let state = AppState {
        db,
        config,
        oracle: Arc::new(oracle),
        fetcher,
        tracker: Arc::new(ThresholdTracker::new()),
        ws_tx,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();
}
