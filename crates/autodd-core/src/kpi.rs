//! The seven tracked financial ratios.
//!
//! A ratio whose denominator is zero is not an error: it is carried as `None`
//! through deviation, scoring and display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::financials::RawFinancials;
use crate::types::*;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// KPI identifiers, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiName {
    GrossMargin,
    EbitdaMargin,
    NetMargin,
    Roe,
    Roa,
    DebtToEquity,
    CurrentRatio,
}

impl KpiName {
    /// Every KPI in declaration order. Insight and table ordering follow this.
    pub const ALL: [KpiName; 7] = [
        KpiName::GrossMargin,
        KpiName::EbitdaMargin,
        KpiName::NetMargin,
        KpiName::Roe,
        KpiName::Roa,
        KpiName::DebtToEquity,
        KpiName::CurrentRatio,
    ];

    /// Stable machine key, identical to the serde representation.
    pub fn key(self) -> &'static str {
        match self {
            Self::GrossMargin => "gross_margin",
            Self::EbitdaMargin => "ebitda_margin",
            Self::NetMargin => "net_margin",
            Self::Roe => "roe",
            Self::Roa => "roa",
            Self::DebtToEquity => "debt_to_equity",
            Self::CurrentRatio => "current_ratio",
        }
    }

    /// Human-readable label used in tables, charts and insights.
    pub fn label(self) -> &'static str {
        match self {
            Self::GrossMargin => "Gross Margin",
            Self::EbitdaMargin => "EBITDA Margin",
            Self::NetMargin => "Net Margin",
            Self::Roe => "ROE",
            Self::Roa => "ROA",
            Self::DebtToEquity => "Debt/Equity",
            Self::CurrentRatio => "Current Ratio",
        }
    }

    /// The guard that leaves this KPI undefined when it fails.
    pub fn guard(self) -> &'static str {
        match self {
            Self::GrossMargin | Self::EbitdaMargin | Self::NetMargin => {
                "revenue must be positive"
            }
            Self::Roe | Self::DebtToEquity => "equity must be positive",
            Self::Roa => "total assets must be positive",
            Self::CurrentRatio => "current assets and current liabilities must both be positive",
        }
    }

    /// Plain-language explanation for the reader of the written report.
    pub fn explanation(self) -> &'static str {
        match self {
            Self::GrossMargin => {
                "Share of sales left after paying for the products or services sold. \
                 A high margin shows the company creates value and has room to absorb expenses."
            }
            Self::EbitdaMargin => {
                "Operating result before interest, taxes, depreciation and amortization, \
                 relative to revenue. It shows the capacity to generate cash from core activities."
            }
            Self::NetMargin => {
                "Share of revenue that becomes profit once every expense is paid. \
                 A high net margin signals an efficient and profitable company."
            }
            Self::Roe => {
                "Net income relative to shareholders' equity: how much the owners' capital earns."
            }
            Self::Roa => {
                "Net income relative to total assets: how well the asset base is turned into profit."
            }
            Self::DebtToEquity => {
                "Net debt relative to equity: how much the company owes to banks and creditors \
                 compared with its own capital. Lower is healthier."
            }
            Self::CurrentRatio => {
                "Current assets relative to current liabilities: the ease of paying short-term bills. \
                 A high ratio means obligations can be met comfortably."
            }
        }
    }

    /// `(numerator, denominator)` taken from the raw figures.
    fn operands(self, input: &RawFinancials) -> (Money, Money) {
        match self {
            Self::GrossMargin => (input.gross_profit, input.revenue),
            Self::EbitdaMargin => (input.ebitda, input.revenue),
            Self::NetMargin => (input.net_income, input.revenue),
            Self::Roe => (input.net_income, input.equity),
            Self::Roa => (input.net_income, input.total_assets),
            Self::DebtToEquity => (input.net_debt, input.equity),
            Self::CurrentRatio => (input.current_assets, input.current_liabilities),
        }
    }

    /// Whether [`KpiName::guard`] is satisfied by `input`.
    pub fn guard_holds(self, input: &RawFinancials) -> bool {
        let (numerator, denominator) = self.operands(input);
        match self {
            Self::CurrentRatio => numerator > Decimal::ZERO && denominator > Decimal::ZERO,
            _ => denominator > Decimal::ZERO,
        }
    }
}

impl std::fmt::Display for KpiName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One derived ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiValue {
    pub kpi: KpiName,
    pub value: Option<Ratio>,
}

/// All seven ratios for one company, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KpiSet {
    values: Vec<KpiValue>,
}

impl KpiSet {
    /// Build a set from explicit values. KPIs not listed are undefined.
    pub fn from_values(values: &[(KpiName, Option<Ratio>)]) -> Self {
        let values = KpiName::ALL
            .iter()
            .map(|&kpi| KpiValue {
                kpi,
                value: values
                    .iter()
                    .find(|(k, _)| *k == kpi)
                    .and_then(|(_, v)| *v),
            })
            .collect();
        Self { values }
    }

    pub fn get(&self, kpi: KpiName) -> Option<Ratio> {
        self.values
            .iter()
            .find(|v| v.kpi == kpi)
            .and_then(|v| v.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &KpiValue> {
        self.values.iter()
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.value.is_some()).count()
    }

    pub fn undefined(&self) -> impl Iterator<Item = KpiName> + '_ {
        self.values
            .iter()
            .filter(|v| v.value.is_none())
            .map(|v| v.kpi)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive the seven KPIs from raw figures.
///
/// A ratio is `None` when its guard fails or the quotient does not fit in a
/// `Decimal`.
pub fn calculate_kpis(input: &RawFinancials) -> KpiSet {
    let values = KpiName::ALL
        .iter()
        .map(|&kpi| {
            let value = if kpi.guard_holds(input) {
                let (numerator, denominator) = kpi.operands(input);
                numerator.checked_div(denominator)
            } else {
                None
            };
            KpiValue { kpi, value }
        })
        .collect();
    KpiSet { values }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
