pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod ingestion;
pub mod intelligence;
pub mod metrics;
pub mod models;
pub mod services;
pub mod threeds;
pub mod validation;

use std::sync::Arc;
use tokio::sync::broadcast;

use crate::api::ws_types::WsMessage;
use crate::config::AppConfig;
use crate::ingestion::PageFetcher;
use crate::services::ThresholdTracker;
use crate::threeds::EnforcementOracle;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: AppConfig,
    pub oracle: Arc<dyn EnforcementOracle>,
    pub fetcher: PageFetcher,
    pub tracker: Arc<ThresholdTracker>,
    pub ws_tx: broadcast::Sender<WsMessage>,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
