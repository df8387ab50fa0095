use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::RecordSource;
use crate::intelligence::RiskTier;

/// Database row for bin_records table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BinRecord {
    pub id: Uuid,
    pub bin_number: String,
    pub ip_address: String,
    pub scheme: Option<String>,
    pub card_type: Option<String>,
    pub country: Option<String>,
    pub issuer: Option<String>,
    pub ip_country: Option<String>,
    pub is_3ds: bool,
    pub risk_level: String,
    pub fraud_context: bool,
    pub raw_response: serde_json::Value,
    pub source: String,
    pub source_url: Option<String>,
    pub checked_at: DateTime<Utc>,
}

/// Insert payload for a classified BIN.
#[derive(Debug, Clone)]
pub struct NewBinRecord {
    pub bin_number: String,
    pub ip_address: Option<String>,
    pub scheme: Option<String>,
    pub card_type: Option<String>,
    pub country: Option<String>,
    pub issuer: Option<String>,
    pub ip_country: Option<String>,
    pub is_3ds: bool,
    pub risk_level: RiskTier,
    pub fraud_context: bool,
    pub raw_response: serde_json::Value,
    pub source: RecordSource,
    pub source_url: Option<String>,
}
