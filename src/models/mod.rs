pub mod bin_record;
pub mod threshold;

pub use bin_record::{BinRecord, NewBinRecord};
pub use threshold::ThresholdRecord;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::intelligence::classifier::RiskTier;
use crate::threeds::EnforcementResult;

/// Number of digits in a Bank Identification Number.
pub const BIN_LENGTH: usize = 6;

// ---------------------------------------------------------------------------
// CandidateBin
// ---------------------------------------------------------------------------

/// A 6-digit BIN candidate. Only constructible from exactly six ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CandidateBin(String);

impl CandidateBin {
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() == BIN_LENGTH && s.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    /// Leading six digits of a card number or BIN input.
    pub fn from_card_prefix(input: &str) -> Option<Self> {
        input.get(..BIN_LENGTH).and_then(Self::parse)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CandidateBin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// DiscoveryRecord: discovery pipeline output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryRecord {
    pub bin: CandidateBin,
    pub enforcement: EnforcementResult,
    pub risk_tier: RiskTier,
    pub fraud_context: bool,
}

// ---------------------------------------------------------------------------
// RecordSource
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    Manual,
    Scraper,
}

impl RecordSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordSource::Manual => "manual",
            RecordSource::Scraper => "scraper",
        }
    }
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_bin_accepts_six_digits() {
        let bin = CandidateBin::parse("411111").unwrap();
        assert_eq!(bin.as_str(), "411111");
        assert_eq!(bin.to_string(), "411111");
    }

    #[test]
    fn test_candidate_bin_rejects_bad_shapes() {
        assert!(CandidateBin::parse("41111").is_none());
        assert!(CandidateBin::parse("4111111").is_none());
        assert!(CandidateBin::parse(" 41111").is_none());
        assert!(CandidateBin::parse("41a111").is_none());
        assert!(CandidateBin::parse("").is_none());
    }

    #[test]
    fn test_candidate_bin_from_card_prefix() {
        let bin = CandidateBin::from_card_prefix("4571730021788388").unwrap();
        assert_eq!(bin.as_str(), "457173");
        assert!(CandidateBin::from_card_prefix("4571").is_none());
    }
}
