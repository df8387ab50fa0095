use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for threshold_records table.
/// One observation of whether 3DS triggered at a given dollar amount.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ThresholdRecord {
    pub id: Uuid,
    pub bin_number: String,
    pub amount: Decimal,
    pub triggered: bool,
    pub recorded_at: DateTime<Utc>,
}
