//! Raw income-statement and balance-sheet figures, and the boundary check
//! that keeps negative numbers out of the calculation pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{types::*, AutoDdError, AutoDdResult};

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// The ten figures collected for one analysis request.
///
/// `total_liabilities` is collected alongside the others but no KPI reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFinancials {
    pub revenue: Money,
    pub gross_profit: Money,
    pub ebitda: Money,
    pub net_income: Money,
    pub total_assets: Money,
    #[serde(default)]
    pub total_liabilities: Money,
    pub equity: Money,
    pub net_debt: Money,
    /// Liquidity pair is optional on the entry form and defaults to zero.
    #[serde(default)]
    pub current_assets: Money,
    #[serde(default)]
    pub current_liabilities: Money,
}

/// How the boundary treats negative figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPolicy {
    /// Fail with `InvalidInput` on the first negative field.
    #[default]
    Reject,
    /// Replace negative fields with zero and report each one as a warning.
    Clamp,
}

impl RawFinancials {
    /// All-zero figures.
    pub fn zero() -> Self {
        Self {
            revenue: Decimal::ZERO,
            gross_profit: Decimal::ZERO,
            ebitda: Decimal::ZERO,
            net_income: Decimal::ZERO,
            total_assets: Decimal::ZERO,
            total_liabilities: Decimal::ZERO,
            equity: Decimal::ZERO,
            net_debt: Decimal::ZERO,
            current_assets: Decimal::ZERO,
            current_liabilities: Decimal::ZERO,
        }
    }

    /// Field name / value pairs in entry-form order.
    pub fn fields(&self) -> [(&'static str, Money); 10] {
        [
            ("revenue", self.revenue),
            ("gross_profit", self.gross_profit),
            ("ebitda", self.ebitda),
            ("net_income", self.net_income),
            ("total_assets", self.total_assets),
            ("total_liabilities", self.total_liabilities),
            ("equity", self.equity),
            ("net_debt", self.net_debt),
            ("current_assets", self.current_assets),
            ("current_liabilities", self.current_liabilities),
        ]
    }

    fn clamped(&self) -> Self {
        let floor = |v: Money| v.max(Decimal::ZERO);
        Self {
            revenue: floor(self.revenue),
            gross_profit: floor(self.gross_profit),
            ebitda: floor(self.ebitda),
            net_income: floor(self.net_income),
            total_assets: floor(self.total_assets),
            total_liabilities: floor(self.total_liabilities),
            equity: floor(self.equity),
            net_debt: floor(self.net_debt),
            current_assets: floor(self.current_assets),
            current_liabilities: floor(self.current_liabilities),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reject any negative figure.
pub fn validate_financials(input: &RawFinancials) -> AutoDdResult<()> {
    for (field, value) in input.fields() {
        if value < Decimal::ZERO {
            return Err(AutoDdError::InvalidInput {
                field: field.into(),
                reason: format!("Must be non-negative, got {value}."),
            });
        }
    }
    Ok(())
}

/// Apply `policy` to the raw figures.
///
/// Returns the figures the pipeline should use together with one warning per
/// clamped field. Under [`InputPolicy::Reject`] the figures are returned
/// unchanged or the call fails.
pub fn normalize_financials(
    input: &RawFinancials,
    policy: InputPolicy,
) -> AutoDdResult<(RawFinancials, Vec<String>)> {
    match policy {
        InputPolicy::Reject => {
            validate_financials(input)?;
            Ok((input.clone(), Vec::new()))
        }
        InputPolicy::Clamp => {
            let warnings: Vec<String> = input
                .fields()
                .iter()
                .filter(|(_, v)| *v < Decimal::ZERO)
                .map(|(field, v)| {
                    tracing::warn!(field = *field, value = %v, "negative input clamped to zero");
                    format!("{field} was negative ({v}) and has been clamped to zero.")
                })
                .collect();
            Ok((input.clamped(), warnings))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
