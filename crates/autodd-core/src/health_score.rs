//! Weighted 0-100 financial health score.
//!
//! Five KPIs contribute. Each is normalised against an ideal value and capped
//! at full credit:
//!
//! ```text
//! normalize(v, ideal) = 0                      if v is undefined or ideal == 0
//!                     = 1                      if v / ideal overflows
//!                     = min(v / ideal, 1)      otherwise
//! ```
//!
//! Margins, ROE and current ratio score `normalize(v)`; leverage is inverted
//! and scores `1 - normalize(v)`, so a Debt/Equity at or above the ideal
//! loses its whole weight. The weighted sum is multiplied by 100 and clamped
//! into [0, 100].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::kpi::{KpiName, KpiSet};
use crate::types::*;

const SCORE_MAX: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Configuration types
// ---------------------------------------------------------------------------

/// Weight of each scored KPI. Must total 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub ebitda_margin: Ratio,
    pub net_margin: Ratio,
    pub roe: Ratio,
    pub debt_to_equity: Ratio,
    pub current_ratio: Ratio,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            ebitda_margin: dec!(0.25),
            net_margin: dec!(0.20),
            roe: dec!(0.25),
            debt_to_equity: dec!(0.20),
            current_ratio: dec!(0.10),
        }
    }
}

impl ScoreWeights {
    pub fn total(&self) -> Ratio {
        self.ebitda_margin + self.net_margin + self.roe + self.debt_to_equity + self.current_ratio
    }

    /// `(kpi, weight)` for the five scored KPIs, in declaration order.
    pub fn entries(&self) -> [(KpiName, Ratio); 5] {
        [
            (KpiName::EbitdaMargin, self.ebitda_margin),
            (KpiName::NetMargin, self.net_margin),
            (KpiName::Roe, self.roe),
            (KpiName::DebtToEquity, self.debt_to_equity),
            (KpiName::CurrentRatio, self.current_ratio),
        ]
    }
}

/// Value at which each scored KPI earns full credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthIdeals {
    pub ebitda_margin: Ratio,
    pub net_margin: Ratio,
    pub roe: Ratio,
    pub debt_to_equity: Ratio,
    pub current_ratio: Ratio,
}

impl Default for HealthIdeals {
    fn default() -> Self {
        Self {
            ebitda_margin: dec!(0.20),
            net_margin: dec!(0.10),
            roe: dec!(0.15),
            debt_to_equity: dec!(1.0),
            current_ratio: dec!(1.5),
        }
    }
}

impl HealthIdeals {
    pub fn entries(&self) -> [(KpiName, Ratio); 5] {
        [
            (KpiName::EbitdaMargin, self.ebitda_margin),
            (KpiName::NetMargin, self.net_margin),
            (KpiName::Roe, self.roe),
            (KpiName::DebtToEquity, self.debt_to_equity),
            (KpiName::CurrentRatio, self.current_ratio),
        ]
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// How one KPI fed into the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub kpi: KpiName,
    pub value: Option<Ratio>,
    pub ideal: Ratio,
    pub weight: Ratio,
    /// `normalize(value, ideal)`, in [0, 1].
    pub normalized: Ratio,
    /// Lower values score higher (leverage).
    pub inverted: bool,
    /// Points added to the 0-100 score.
    pub contribution: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScore {
    pub score: Score,
    pub components: Vec<ScoreComponent>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Scale `value` against `ideal`, capped at 1.
pub fn normalize(value: Option<Ratio>, ideal: Ratio) -> Ratio {
    match value {
        None => Decimal::ZERO,
        Some(_) if ideal.is_zero() => Decimal::ZERO,
        Some(v) => v
            .checked_div(ideal)
            .map_or(Decimal::ONE, |r| r.min(Decimal::ONE)),
    }
}

/// Combine the five scored KPIs into a 0-100 health score.
pub fn calculate_health_score(
    kpis: &KpiSet,
    ideals: &HealthIdeals,
    weights: &ScoreWeights,
) -> HealthScore {
    let components: Vec<ScoreComponent> = weights
        .entries()
        .iter()
        .zip(ideals.entries().iter())
        .map(|(&(kpi, weight), &(_, ideal))| {
            let value = kpis.get(kpi);
            let normalized = normalize(value, ideal);
            let inverted = kpi == KpiName::DebtToEquity;
            let credit = if inverted {
                Decimal::ONE - normalized
            } else {
                normalized
            };
            ScoreComponent {
                kpi,
                value,
                ideal,
                weight,
                normalized,
                inverted,
                contribution: weight * credit * SCORE_MAX,
            }
        })
        .collect();

    let raw: Score = components.iter().map(|c| c.contribution).sum();
    let score = raw.clamp(Decimal::ZERO, SCORE_MAX);

    tracing::debug!(%score, "health score computed");

    HealthScore { score, components }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
