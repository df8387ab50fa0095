use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use super::ApiResponse;
use crate::db::bin_repo;
use crate::errors::AppError;
use crate::models::BinRecord;
use crate::services::export::{records_to_csv, RecordFilter};
use crate::AppState;

#[derive(Serialize)]
pub struct RecordList {
    /// Rows stored in total, before the recent-records limit.
    pub total: i64,
    pub shown: usize,
    pub records: Vec<BinRecord>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<RecordFilter>,
) -> Result<Json<ApiResponse<RecordList>>, AppError> {
    let total = bin_repo::count_records(&state.db).await?;
    let all = bin_repo::get_recent_records(&state.db, state.config.record_list_limit).await?;
    let records = filter.apply(all);

    Ok(Json(ApiResponse::ok(RecordList {
        total,
        shown: records.len(),
        records,
    })))
}

pub async fn export(
    State(state): State<AppState>,
    Query(filter): Query<RecordFilter>,
) -> Result<impl IntoResponse, AppError> {
    let all = bin_repo::get_recent_records(&state.db, state.config.record_list_limit).await?;
    let records = filter.apply(all);
    let body = records_to_csv(&records).map_err(|e| AppError::Internal(e.into()))?;

    tracing::info!(rows = records.len(), "Exported BIN records");

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8"),
            (CONTENT_DISPOSITION, "attachment; filename=\"bin_records.csv\""),
        ],
        body,
    ))
}

pub async fn history(
    State(state): State<AppState>,
    Path(bin): Path<String>,
) -> Result<Json<ApiResponse<Vec<BinRecord>>>, AppError> {
    let records = bin_repo::get_bin_history(&state.db, &bin).await?;
    Ok(Json(ApiResponse::ok(records)))
}
