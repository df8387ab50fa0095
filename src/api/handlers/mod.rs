pub mod check;
pub mod health;
pub mod metrics;
pub mod records;
pub mod scrape;
pub mod thresholds;
pub mod ws;

use serde::Serialize;

use crate::api::ws_types::{BinClassifiedData, WsMessage};
use crate::db::bin_repo;
use crate::models::NewBinRecord;
use crate::AppState;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Persist a classified BIN, register it with the threshold tracker and
/// notify dashboard clients. Returns whether the row was stored; a storage
/// failure is logged and does not fail the request.
pub(crate) async fn record_classification(state: &AppState, record: NewBinRecord) -> bool {
    state
        .tracker
        .track(
            &record.bin_number,
            record.is_3ds,
            record.scheme.as_deref(),
            record.issuer.as_deref(),
        )
        .await;

    let persisted = match bin_repo::insert_bin_record(&state.db, &record).await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!(
                error = %e,
                bin = %record.bin_number,
                "Failed to save BIN record"
            );
            false
        }
    };

    // No subscribers is not an error.
    let _ = state.ws_tx.send(WsMessage::BinClassified(BinClassifiedData {
        bin: record.bin_number,
        is_3ds: record.is_3ds,
        risk_tier: record.risk_level,
        fraud_context: record.fraud_context,
        scheme: record.scheme,
        country: record.country,
        source: record.source,
        source_url: record.source_url,
    }));

    persisted
}
