//! Market benchmarks and percentage deviation per KPI.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::kpi::{KpiName, KpiSet};
use crate::types::*;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One reference value per KPI. A field per KPI keeps the lookup total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkTable {
    pub gross_margin: Ratio,
    pub ebitda_margin: Ratio,
    pub net_margin: Ratio,
    pub roe: Ratio,
    pub roa: Ratio,
    pub debt_to_equity: Ratio,
    pub current_ratio: Ratio,
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        Self {
            gross_margin: dec!(0.40),
            ebitda_margin: dec!(0.20),
            net_margin: dec!(0.10),
            roe: dec!(0.15),
            roa: dec!(0.07),
            debt_to_equity: dec!(1.0),
            current_ratio: dec!(1.5),
        }
    }
}

impl BenchmarkTable {
    pub fn get(&self, kpi: KpiName) -> Ratio {
        match kpi {
            KpiName::GrossMargin => self.gross_margin,
            KpiName::EbitdaMargin => self.ebitda_margin,
            KpiName::NetMargin => self.net_margin,
            KpiName::Roe => self.roe,
            KpiName::Roa => self.roa,
            KpiName::DebtToEquity => self.debt_to_equity,
            KpiName::CurrentRatio => self.current_ratio,
        }
    }

    /// `(kpi, benchmark)` pairs in declaration order.
    pub fn entries(&self) -> Vec<(KpiName, Ratio)> {
        KpiName::ALL.iter().map(|&k| (k, self.get(k))).collect()
    }
}

/// A KPI next to its benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviationRow {
    pub kpi: KpiName,
    pub value: Option<Ratio>,
    pub benchmark: Ratio,
    /// `(value - benchmark) / benchmark * 100`; `None` when the value is
    /// undefined or the benchmark is zero.
    pub deviation_pct: Option<Percent>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Attach a benchmark and deviation to every KPI, in declaration order.
pub fn compare_to_benchmarks(kpis: &KpiSet, benchmarks: &BenchmarkTable) -> Vec<DeviationRow> {
    kpis.iter()
        .map(|kv| {
            let benchmark = benchmarks.get(kv.kpi);
            DeviationRow {
                kpi: kv.kpi,
                value: kv.value,
                benchmark,
                deviation_pct: kv.value.and_then(|v| deviation_pct(v, benchmark)),
            }
        })
        .collect()
}

/// Percentage deviation of `value` from `benchmark`. `None` for a zero
/// benchmark or a deviation too large for a `Decimal`.
pub fn deviation_pct(value: Ratio, benchmark: Ratio) -> Option<Percent> {
    if benchmark.is_zero() {
        return None;
    }
    value
        .checked_sub(benchmark)?
        .checked_div(benchmark)?
        .checked_mul(dec!(100))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_values() {
        let t = BenchmarkTable::default();
        assert_eq!(t.get(KpiName::GrossMargin), dec!(0.40));
        assert_eq!(t.get(KpiName::EbitdaMargin), dec!(0.20));
        assert_eq!(t.get(KpiName::NetMargin), dec!(0.10));
        assert_eq!(t.get(KpiName::Roe), dec!(0.15));
        assert_eq!(t.get(KpiName::Roa), dec!(0.07));
        assert_eq!(t.get(KpiName::DebtToEquity), dec!(1.0));
        assert_eq!(t.get(KpiName::CurrentRatio), dec!(1.5));
        assert_eq!(t.entries().len(), 7);
    }

    #[test]
    fn test_deviation_formula() {
        // (0.45 - 0.40) / 0.40 * 100 = 12.5
        assert_eq!(deviation_pct(dec!(0.45), dec!(0.40)), Some(dec!(12.5)));
        // (0.06 - 0.07) / 0.07 * 100 ≈ -14.2857
        let d = deviation_pct(dec!(0.06), dec!(0.07)).unwrap();
        assert!((d - dec!(-14.2857)).abs() < dec!(0.001));
    }

    fn pow10(exp: u32) -> Decimal {
        Decimal::from_i128_with_scale(10_i128.pow(exp), 0)
    }

    #[test]
    fn test_out_of_range_deviation_is_none() {
        // 1e27 / 0.40 fits, the x100 step does not
        assert_eq!(deviation_pct(pow10(27), dec!(0.40)), None);
        assert_eq!(deviation_pct(Decimal::MAX, dec!(0.07)), None);
        assert!(deviation_pct(pow10(20), dec!(0.40)).is_some());
    }

    #[test]
    fn test_zero_benchmark_has_no_deviation() {
        assert_eq!(deviation_pct(dec!(0.5), Decimal::ZERO), None);
    }

    #[test]
    fn test_undefined_value_row_is_kept() {
        let kpis = KpiSet::from_values(&[(KpiName::Roe, Some(dec!(0.30)))]);
        let rows = compare_to_benchmarks(&kpis, &BenchmarkTable::default());
        assert_eq!(rows.len(), 7);

        let gm = &rows[0];
        assert_eq!(gm.kpi, KpiName::GrossMargin);
        assert_eq!(gm.value, None);
        assert_eq!(gm.benchmark, dec!(0.40));
        assert_eq!(gm.deviation_pct, None);

        let roe = rows.iter().find(|r| r.kpi == KpiName::Roe).unwrap();
        assert_eq!(roe.deviation_pct, Some(dec!(100)));
    }

    #[test]
    fn test_partial_table_deserializes_over_defaults() {
        let t: BenchmarkTable = serde_json::from_str(r#"{"roe": "0.20"}"#).unwrap();
        assert_eq!(t.roe, dec!(0.20));
        assert_eq!(t.gross_margin, dec!(0.40));
    }
}
