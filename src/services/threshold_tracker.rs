use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::ThresholdRecord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThresholdError {
    #[error("BIN {0} has not been checked yet")]
    UnknownBin(String),

    #[error("amount must be at least 0.01, got {0}")]
    AmountTooSmall(Decimal),
}

/// A BIN that has been checked or scraped, with the dollar amounts at which
/// 3DS was observed to trigger (or not) this session.
#[derive(Debug, Clone, Serialize)]
pub struct TrackedBin {
    pub bin: String,
    pub is_3ds: bool,
    pub scheme: String,
    pub issuer: String,
    pub thresholds: BTreeMap<Decimal, bool>,
}

/// Keyed store of checked BINs. Owned by the service state; the discovery
/// core never reads or writes it.
#[derive(Debug, Default)]
pub struct ThresholdTracker {
    bins: RwLock<BTreeMap<String, TrackedBin>>,
}

impl ThresholdTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a BIN. An already tracked BIN keeps its first snapshot.
    pub async fn track(
        &self,
        bin: &str,
        is_3ds: bool,
        scheme: Option<&str>,
        issuer: Option<&str>,
    ) -> bool {
        let mut bins = self.bins.write().await;
        if bins.contains_key(bin) {
            return false;
        }

        bins.insert(
            bin.to_string(),
            TrackedBin {
                bin: bin.to_string(),
                is_3ds,
                scheme: scheme.unwrap_or("Unknown").to_string(),
                issuer: issuer.unwrap_or("Unknown").to_string(),
                thresholds: BTreeMap::new(),
            },
        );
        true
    }

    /// Record whether 3DS triggered at `amount` for a tracked BIN.
    /// A repeated amount overwrites the earlier observation.
    pub async fn record(
        &self,
        bin: &str,
        amount: Decimal,
        triggered: bool,
    ) -> Result<(), ThresholdError> {
        if amount < min_amount() {
            return Err(ThresholdError::AmountTooSmall(amount));
        }

        let mut bins = self.bins.write().await;
        let tracked = bins
            .get_mut(bin)
            .ok_or_else(|| ThresholdError::UnknownBin(bin.to_string()))?;
        tracked.thresholds.insert(amount.round_dp(2), triggered);
        Ok(())
    }

    pub async fn get(&self, bin: &str) -> Option<TrackedBin> {
        self.bins.read().await.get(bin).cloned()
    }

    pub async fn list(&self) -> Vec<TrackedBin> {
        self.bins.read().await.values().cloned().collect()
    }
}

fn min_amount() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

// ---------------------------------------------------------------------------
// History merge
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySource {
    Database,
    Session,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThresholdEntry {
    pub amount: Decimal,
    pub triggered: bool,
    pub recorded_at: Option<DateTime<Utc>>,
    pub source: EntrySource,
}

/// Merge persisted observations with session-only ones, sorted by amount.
/// A session amount already present in the database is dropped.
pub fn merge_history(
    persisted: &[ThresholdRecord],
    session: &BTreeMap<Decimal, bool>,
) -> Vec<ThresholdEntry> {
    let mut entries: Vec<ThresholdEntry> = persisted
        .iter()
        .map(|r| ThresholdEntry {
            amount: r.amount.round_dp(2),
            triggered: r.triggered,
            recorded_at: Some(r.recorded_at),
            source: EntrySource::Database,
        })
        .collect();

    for (amount, triggered) in session {
        let amount = amount.round_dp(2);
        if entries.iter().any(|e| e.amount == amount) {
            continue;
        }
        entries.push(ThresholdEntry {
            amount,
            triggered: *triggered,
            recorded_at: None,
            source: EntrySource::Session,
        });
    }

    entries.sort_by(|a, b| a.amount.cmp(&b.amount));
    entries
}
