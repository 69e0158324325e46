//! Score bands with their diagnosis and investment recommendation.
//!
//! Bands are evaluated from the top down and the first match wins:
//! - >= 80: Excellent
//! - >= 60: Good
//! - >= 40: Moderate
//! - < 40: Weak

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisBand {
    Weak,
    Moderate,
    Good,
    Excellent,
}

impl DiagnosisBand {
    pub fn diagnosis(self) -> &'static str {
        match self {
            Self::Excellent => {
                "Excellent financial condition; solid capital structure and healthy margins."
            }
            Self::Good => {
                "Good financial condition, with attention points in margins or leverage."
            }
            Self::Moderate => {
                "Moderate situation, with weaknesses in profitability or indebtedness."
            }
            Self::Weak => "Weak financial condition; elevated operational and financial risk.",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            Self::Excellent => "Attractive profile for institutional and strategic investors.",
            Self::Good => {
                "May be considered for investment, provided operating efficiency is monitored."
            }
            Self::Moderate => {
                "Investment requires deeper analysis and possible capital restructuring."
            }
            Self::Weak => "Not recommended for investment at this stage.",
        }
    }
}

impl std::fmt::Display for DiagnosisBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Weak => "Weak",
        };
        write!(f, "{}", s)
    }
}

/// Lower bound (inclusive) of each band above `Weak`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandThresholds {
    pub excellent: Score,
    pub good: Score,
    pub moderate: Score,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            excellent: dec!(80),
            good: dec!(60),
            moderate: dec!(40),
        }
    }
}

/// Map a health score to its band.
pub fn classify(score: Score, thresholds: &BandThresholds) -> DiagnosisBand {
    if score >= thresholds.excellent {
        DiagnosisBand::Excellent
    } else if score >= thresholds.good {
        DiagnosisBand::Good
    } else if score >= thresholds.moderate {
        DiagnosisBand::Moderate
    } else {
        DiagnosisBand::Weak
    }
}
