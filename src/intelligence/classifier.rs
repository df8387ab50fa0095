use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Risk tier assigned to a BIN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    /// Issuer enforces 3DS: low risk regardless of where the BIN was found.
    Enforced,
    /// No 3DS, found in a neutral context.
    Weak,
    /// No 3DS, found in a fraud-adjacent context.
    Unsafe,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Enforced => "Enforced",
            RiskTier::Weak => "Weak",
            RiskTier::Unsafe => "Unsafe",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            RiskTier::Enforced => "✅",
            RiskTier::Weak => "⚠️",
            RiskTier::Unsafe => "❌",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Enforced" => Ok(RiskTier::Enforced),
            "Weak" => Ok(RiskTier::Weak),
            "Unsafe" => Ok(RiskTier::Unsafe),
            other => Err(format!("unknown risk tier: {other}")),
        }
    }
}

/// Classify a BIN from its 3DS status and the context it was found in.
///
/// Rules:
/// - **Enforced**: 3DS is enforced (dominates the fraud signal).
/// - **Unsafe**: no 3DS and found in a fraud context.
/// - **Weak**: everything else.
pub fn classify(is_3ds: bool, fraud_context: bool) -> RiskTier {
    if is_3ds {
        RiskTier::Enforced
    } else if fraud_context {
        RiskTier::Unsafe
    } else {
        RiskTier::Weak
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_decision_table() {
        assert_eq!(classify(true, true), RiskTier::Enforced);
        assert_eq!(classify(true, false), RiskTier::Enforced);
        assert_eq!(classify(false, true), RiskTier::Unsafe);
        assert_eq!(classify(false, false), RiskTier::Weak);
    }

    #[test]
    fn test_risk_tier_string_forms() {
        for tier in [RiskTier::Enforced, RiskTier::Weak, RiskTier::Unsafe] {
            assert_eq!(tier.as_str().parse::<RiskTier>().unwrap(), tier);
        }
        assert!("unsafe".parse::<RiskTier>().is_err());
    }

    #[test]
    fn test_risk_tier_serializes_as_name() {
        let json = serde_json::to_string(&RiskTier::Unsafe).unwrap();
        assert_eq!(json, "\"Unsafe\"");
    }

    #[test]
    fn test_risk_tier_icons() {
        assert_eq!(RiskTier::Enforced.icon(), "✅");
        assert_eq!(RiskTier::Weak.icon(), "⚠️");
        assert_eq!(RiskTier::Unsafe.icon(), "❌");
    }
}
