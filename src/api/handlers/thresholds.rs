use axum::extract::{Path, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ApiResponse;
use crate::db::threshold_repo;
use crate::errors::AppError;
use crate::services::threshold_tracker::{merge_history, ThresholdEntry, TrackedBin};
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> Json<ApiResponse<Vec<TrackedBin>>> {
    Json(ApiResponse::ok(state.tracker.list().await))
}

#[derive(Serialize)]
pub struct ThresholdHistory {
    pub bin: TrackedBin,
    pub entries: Vec<ThresholdEntry>,
    /// False when the database could not be read and only session data is shown.
    pub from_database: bool,
}

pub async fn history(
    State(state): State<AppState>,
    Path(bin): Path<String>,
) -> Result<Json<ApiResponse<ThresholdHistory>>, AppError> {
    let tracked = state
        .tracker
        .get(&bin)
        .await
        .ok_or_else(|| AppError::NotFound(format!("BIN {bin} has not been checked yet")))?;

    let (persisted, from_database) = match threshold_repo::get_thresholds_for_bin(&state.db, &bin).await {
        Ok(rows) => (rows, true),
        Err(e) => {
            tracing::warn!(error = %e, bin = %bin, "Threshold history unavailable, using session data");
            (Vec::new(), false)
        }
    };

    let entries = merge_history(&persisted, &tracked.thresholds);

    Ok(Json(ApiResponse::ok(ThresholdHistory {
        bin: tracked,
        entries,
        from_database,
    })))
}

#[derive(Deserialize)]
pub struct RecordThresholdRequest {
    pub amount: Decimal,
    pub triggered: bool,
}

#[derive(Serialize)]
pub struct RecordThresholdResponse {
    pub bin: String,
    pub amount: Decimal,
    pub triggered: bool,
    pub persisted: bool,
}

pub async fn record(
    State(state): State<AppState>,
    Path(bin): Path<String>,
    Json(body): Json<RecordThresholdRequest>,
) -> Result<Json<ApiResponse<RecordThresholdResponse>>, AppError> {
    let amount = body.amount.round_dp(2);
    state.tracker.record(&bin, amount, body.triggered).await?;

    let persisted = match threshold_repo::insert_threshold(&state.db, &bin, amount, body.triggered).await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!(error = %e, bin = %bin, "Failed to save threshold, kept in session only");
            false
        }
    };

    tracing::info!(bin = %bin, amount = %amount, triggered = body.triggered, "Threshold recorded");

    Ok(Json(ApiResponse::ok(RecordThresholdResponse {
        bin,
        amount,
        triggered: body.triggered,
        persisted,
    })))
}
