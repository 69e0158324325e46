//! Injected analysis configuration.
//!
//! Benchmarks, ideals, weights and thresholds all travel in one
//! [`AnalysisConfig`] value so callers (and tests) can substitute alternate
//! sets. `Default` reproduces the standard market table.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::benchmark::BenchmarkTable;
use crate::diagnosis::BandThresholds;
use crate::financials::InputPolicy;
use crate::health_score::{HealthIdeals, ScoreWeights};
use crate::insights::DEFAULT_INSIGHT_THRESHOLD;
use crate::{types::*, AutoDdError, AutoDdResult};

/// Allowed drift of the weight total away from 1.
const WEIGHT_TOLERANCE: Decimal = dec!(0.000000001);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub benchmarks: BenchmarkTable,
    pub ideals: HealthIdeals,
    pub weights: ScoreWeights,
    pub bands: BandThresholds,
    /// Deviation (percentage points) a KPI must strictly exceed to be reported.
    pub insight_threshold_pct: Percent,
    pub input_policy: InputPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            benchmarks: BenchmarkTable::default(),
            ideals: HealthIdeals::default(),
            weights: ScoreWeights::default(),
            bands: BandThresholds::default(),
            insight_threshold_pct: DEFAULT_INSIGHT_THRESHOLD,
            input_policy: InputPolicy::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a JSON document; missing sections fall back to defaults.
    pub fn from_json(json: &str) -> AutoDdResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AutoDdResult<()> {
        for (kpi, w) in self.weights.entries() {
            if w < Decimal::ZERO {
                return Err(invalid(
                    &format!("weights.{}", kpi.key()),
                    "Weight cannot be negative.",
                ));
            }
            if w > Decimal::ONE {
                return Err(invalid(
                    &format!("weights.{}", kpi.key()),
                    "Weight cannot exceed 1.",
                ));
            }
        }
        let total = self.weights.total();
        if (total - Decimal::ONE).abs() > WEIGHT_TOLERANCE {
            return Err(invalid(
                "weights",
                &format!("Weights must total 1, got {total}."),
            ));
        }

        for (kpi, ideal) in self.ideals.entries() {
            if ideal < Decimal::ZERO {
                return Err(invalid(
                    &format!("ideals.{}", kpi.key()),
                    "Ideal value cannot be negative.",
                ));
            }
        }
        for (kpi, b) in self.benchmarks.entries() {
            if b < Decimal::ZERO {
                return Err(invalid(
                    &format!("benchmarks.{}", kpi.key()),
                    "Benchmark cannot be negative.",
                ));
            }
        }

        let b = &self.bands;
        if !(b.excellent > b.good && b.good > b.moderate) {
            return Err(invalid(
                "bands",
                "Thresholds must be strictly descending: excellent > good > moderate.",
            ));
        }
        if b.moderate < Decimal::ZERO || b.excellent > dec!(100) {
            return Err(invalid("bands", "Thresholds must lie within [0, 100]."));
        }

        if self.insight_threshold_pct < Decimal::ZERO {
            return Err(invalid(
                "insight_threshold_pct",
                "Insight threshold cannot be negative.",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> AutoDdError {
    AutoDdError::InvalidInput {
        field: field.into(),
        reason: reason.into(),
    }
}
