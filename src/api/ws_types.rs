use serde::Serialize;

use crate::intelligence::RiskTier;
use crate::models::RecordSource;

/// Messages broadcast to all connected WebSocket clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum WsMessage {
    #[serde(rename = "bin_classified")]
    BinClassified(BinClassifiedData),
}

#[derive(Debug, Clone, Serialize)]
pub struct BinClassifiedData {
    pub bin: String,
    pub is_3ds: bool,
    pub risk_tier: RiskTier,
    pub fraud_context: bool,
    pub scheme: Option<String>,
    pub country: Option<String>,
    pub source: RecordSource,
    pub source_url: Option<String>,
}
