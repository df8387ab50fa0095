use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{record_classification, ApiResponse};
use crate::errors::AppError;
use crate::ingestion::scrape_url;
use crate::intelligence::RiskTier;
use crate::models::{NewBinRecord, RecordSource};
use crate::validation::parse_optional_ip;
use crate::AppState;

#[derive(Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
    #[serde(default)]
    pub ip_address: Option<String>,
}

#[derive(Serialize)]
pub struct ScrapedBin {
    pub bin: String,
    pub country: String,
    pub scheme: String,
    pub issuer: String,
    pub is_3ds: bool,
    pub risk_tier: RiskTier,
    pub fraud_context: bool,
}

#[derive(Serialize)]
pub struct ScrapeResponse {
    pub url: String,
    pub found: usize,
    pub saved: usize,
    pub results: Vec<ScrapedBin>,
}

pub async fn scrape(
    State(state): State<AppState>,
    Json(body): Json<ScrapeRequest>,
) -> Result<Json<ApiResponse<ScrapeResponse>>, AppError> {
    let url = body.url.trim().to_string();
    let ip = parse_optional_ip(body.ip_address.as_deref()).map_err(AppError::BadRequest)?;

    let records = scrape_url(&state.fetcher, state.oracle.as_ref(), &url, ip).await?;

    let mut saved = 0;
    let mut results = Vec::with_capacity(records.len());
    for record in records {
        let e = record.enforcement;
        let stored = record_classification(
            &state,
            NewBinRecord {
                bin_number: record.bin.to_string(),
                ip_address: ip.map(|i| i.to_string()),
                scheme: e.scheme.clone(),
                card_type: e.card_type.clone(),
                country: e.country.clone(),
                issuer: e.issuer.clone(),
                ip_country: e.ip_country.clone(),
                is_3ds: e.is_3ds,
                risk_level: record.risk_tier,
                fraud_context: record.fraud_context,
                raw_response: e.raw_response.clone(),
                source: RecordSource::Scraper,
                source_url: Some(url.clone()),
            },
        )
        .await;
        if stored {
            saved += 1;
        }

        results.push(ScrapedBin {
            bin: record.bin.to_string(),
            country: e.country.unwrap_or_else(|| "Unknown".into()),
            scheme: e.scheme.unwrap_or_else(|| "Unknown".into()),
            issuer: e.issuer.unwrap_or_else(|| "Unknown".into()),
            is_3ds: e.is_3ds,
            risk_tier: record.risk_tier,
            fraud_context: record.fraud_context,
        });
    }

    tracing::info!(url = %url, found = results.len(), saved, "Scrape complete");

    Ok(Json(ApiResponse::ok(ScrapeResponse {
        url,
        found: results.len(),
        saved,
        results,
    })))
}
