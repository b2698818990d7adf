//! Risk tier classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Percentage at or above which content is dangerous.
pub const DANGEROUS_THRESHOLD: u8 = 70;
/// Percentage at or above which content is suspicious.
pub const SUSPICIOUS_THRESHOLD: u8 = 40;

/// Risk tier of analyzed content, ordered `Safe < Suspicious < Dangerous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// No meaningful risk signals (below 40)
    Safe,
    /// Some red flags, verify before acting (40-69)
    Suspicious,
    /// Strong scam indicators (70 and above)
    Dangerous,
}

impl Tier {
    /// Classify a percentage with the built-in thresholds.
    pub fn from_percentage(percentage: u8) -> Self {
        Self::classify(percentage, DANGEROUS_THRESHOLD, SUSPICIOUS_THRESHOLD)
    }

    /// Classify a percentage against explicit thresholds.
    pub fn classify(percentage: u8, dangerous: u8, suspicious: u8) -> Self {
        if percentage >= dangerous {
            Tier::Dangerous
        } else if percentage >= suspicious {
            Tier::Suspicious
        } else {
            Tier::Safe
        }
    }

    /// Whether the tier should be treated as a warning by callers.
    pub fn is_flagged(&self) -> bool {
        !matches!(self, Tier::Safe)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Safe => "safe",
            Tier::Suspicious => "suspicious",
            Tier::Dangerous => "dangerous",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Safe => write!(f, "Safe"),
            Tier::Suspicious => write!(f, "Suspicious"),
            Tier::Dangerous => write!(f, "Dangerous"),
        }
    }
}
