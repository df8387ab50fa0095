use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{record_classification, ApiResponse};
use crate::errors::AppError;
use crate::ingestion::check_bin;
use crate::intelligence::RiskTier;
use crate::models::{NewBinRecord, RecordSource};
use crate::validation::parse_optional_ip;
use crate::AppState;

#[derive(Deserialize)]
pub struct CheckRequest {
    /// 6-digit BIN or full card number.
    pub input: String,
    #[serde(default)]
    pub ip_address: Option<String>,
}

#[derive(Serialize)]
pub struct CheckResponse {
    pub input: String,
    pub bin: String,
    pub scheme: String,
    pub card_type: String,
    pub country: String,
    pub issuer: String,
    pub ip_location: String,
    pub is_3ds: bool,
    pub risk_tier: RiskTier,
    pub risk_icon: &'static str,
    pub persisted: bool,
    pub raw_response: serde_json::Value,
}

fn or_unknown(v: &Option<String>) -> String {
    v.clone().unwrap_or_else(|| "Unknown".into())
}

pub async fn check(
    State(state): State<AppState>,
    Json(body): Json<CheckRequest>,
) -> Result<Json<ApiResponse<CheckResponse>>, AppError> {
    let input = body.input.trim();
    let ip = parse_optional_ip(body.ip_address.as_deref()).map_err(AppError::BadRequest)?;

    let result = check_bin(state.oracle.as_ref(), input, ip).await?;
    let e = &result.enforcement;

    let persisted = record_classification(
        &state,
        NewBinRecord {
            bin_number: result.bin.to_string(),
            ip_address: ip.map(|i| i.to_string()),
            scheme: e.scheme.clone(),
            card_type: e.card_type.clone(),
            country: e.country.clone(),
            issuer: e.issuer.clone(),
            ip_country: e.ip_country.clone(),
            is_3ds: e.is_3ds,
            risk_level: result.risk_tier,
            fraud_context: false,
            raw_response: e.raw_response.clone(),
            source: RecordSource::Manual,
            source_url: None,
        },
    )
    .await;

    Ok(Json(ApiResponse::ok(CheckResponse {
        input: input.to_string(),
        bin: result.bin.to_string(),
        scheme: or_unknown(&e.scheme),
        card_type: or_unknown(&e.card_type),
        country: or_unknown(&e.country),
        issuer: or_unknown(&e.issuer),
        ip_location: if ip.is_some() {
            or_unknown(&e.ip_country)
        } else {
            "N/A".into()
        },
        is_3ds: e.is_3ds,
        risk_tier: result.risk_tier,
        risk_icon: result.risk_tier.icon(),
        persisted,
        raw_response: e.raw_response.clone(),
    })))
}
