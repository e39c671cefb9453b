//! # Risk Classification
//!
//! Five fixed triage tiers. Each tier carries an immutable priority code and the
//! maximum number of minutes a patient of that tier may wait before service.
//! The association is a lookup table, not behavior on the variants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Triage risk tier assigned at intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskClassification {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
}

/// Fixed attributes of a risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskTier {
    pub risk: RiskClassification,
    pub priority: u8,
    pub description: &'static str,
    pub max_wait_minutes: i64,
}

/// Tier table in priority order
pub const RISK_TIERS: [RiskTier; 5] = [
    RiskTier {
        risk: RiskClassification::Red,
        priority: 1,
        description: "Emergency",
        max_wait_minutes: 0,
    },
    RiskTier {
        risk: RiskClassification::Orange,
        priority: 2,
        description: "Very urgent",
        max_wait_minutes: 10,
    },
    RiskTier {
        risk: RiskClassification::Yellow,
        priority: 3,
        description: "Urgent",
        max_wait_minutes: 30,
    },
    RiskTier {
        risk: RiskClassification::Green,
        priority: 4,
        description: "Less urgent",
        max_wait_minutes: 120,
    },
    RiskTier {
        risk: RiskClassification::Blue,
        priority: 5,
        description: "Not urgent",
        max_wait_minutes: 240,
    },
];

impl RiskClassification {
    /// All tiers in priority order (most critical first)
    pub const ALL: [RiskClassification; 5] =
        [Self::Red, Self::Orange, Self::Yellow, Self::Green, Self::Blue];

    pub fn tier(&self) -> &'static RiskTier {
        &RISK_TIERS[*self as usize]
    }

    pub fn priority(&self) -> u8 {
        self.tier().priority
    }

    pub fn max_wait_minutes(&self) -> i64 {
        self.tier().max_wait_minutes
    }

    pub fn description(&self) -> &'static str {
        self.tier().description
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "RED",
            Self::Orange => "ORANGE",
            Self::Yellow => "YELLOW",
            Self::Green => "GREEN",
            Self::Blue => "BLUE",
        }
    }
}

impl fmt::Display for RiskClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RiskClassification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RED" => Ok(Self::Red),
            "ORANGE" => Ok(Self::Orange),
            "YELLOW" => Ok(Self::Yellow),
            "GREEN" => Ok(Self::Green),
            "BLUE" => Ok(Self::Blue),
            _ => Err(format!("Invalid risk classification: {s}")),
        }
    }
}
