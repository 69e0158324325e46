//! Display payload handed to the chart and document collaborators.
//!
//! Nothing here computes new figures; it reshapes the analysis result into
//! formatted strings and plot-ready series.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisReport;
use crate::benchmark::{BenchmarkTable, DeviationRow};
use crate::health_score::ScoreWeights;
use crate::kpi::{KpiName, KpiSet};
use crate::types::*;

/// Label used when no company name was supplied.
pub const DEFAULT_COMPANY_LABEL: &str = "Analyzed Company";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Radar chart series: one axis per KPI in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarSeries {
    pub labels: Vec<String>,
    /// Undefined KPIs are plotted at zero.
    pub company: Vec<Ratio>,
    pub benchmark: Vec<Ratio>,
}

/// One glossary line of the written report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub term: String,
    pub explanation: String,
}

/// One formatted line of the indicator table. Undefined cells are empty.
/// A percentage too large to represent is also left empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub indicator: String,
    pub value: String,
    pub value_pct: String,
    pub benchmark: String,
    pub deviation: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn radar_series(kpis: &KpiSet, benchmarks: &BenchmarkTable) -> RadarSeries {
    RadarSeries {
        labels: kpis.iter().map(|kv| kv.kpi.label().to_string()).collect(),
        company: kpis
            .iter()
            .map(|kv| kv.value.unwrap_or(Decimal::ZERO))
            .collect(),
        benchmark: kpis.iter().map(|kv| benchmarks.get(kv.kpi)).collect(),
    }
}

pub fn display_rows(rows: &[DeviationRow]) -> Vec<DisplayRow> {
    rows.iter()
        .map(|r| DisplayRow {
            indicator: r.kpi.label().to_string(),
            value: r.value.map(|v| format_fixed(v, 2)).unwrap_or_default(),
            value_pct: r
                .value
                .and_then(|v| v.checked_mul(dec!(100)))
                .map(|v| format!("{}%", format_fixed(v, 2)))
                .unwrap_or_default(),
            benchmark: format_fixed(r.benchmark, 2),
            deviation: r
                .deviation_pct
                .map(|d| format!("{}%", format_signed(d, 1)))
                .unwrap_or_default(),
        })
        .collect()
}

/// Header lines of the written report.
pub fn summary_lines(report: &AnalysisReport) -> Vec<String> {
    vec![
        format!("Company: {}", report.company),
        format!(
            "Financial Health Score: {}/100",
            format_fixed(report.health_score.score, 1)
        ),
        format!("Diagnosis: {}", report.diagnosis),
        format!("Recommendation: {}", report.recommendation),
    ]
}

/// Plain-language description of how the score is built from `weights`.
pub fn score_methodology(weights: &ScoreWeights) -> String {
    let parts: Vec<String> = weights
        .entries()
        .iter()
        .map(|&(kpi, w)| {
            let pct = (w * dec!(100)).normalize();
            if kpi == KpiName::DebtToEquity {
                format!("{} ({pct}%, lower is better)", kpi.label())
            } else {
                format!("{} ({pct}%)", kpi.label())
            }
        })
        .collect();
    format!(
        "Financial Health Score: weighted average of {}. Each KPI earns credit up to its ideal value; result on a 0-100 scale.",
        parts.join(", ")
    )
}

/// Plain-language glossary: every KPI in declaration order, then the
/// benchmark comparison itself.
pub fn glossary() -> Vec<GlossaryEntry> {
    KpiName::ALL
        .iter()
        .map(|kpi| GlossaryEntry {
            term: kpi.label().to_string(),
            explanation: kpi.explanation().to_string(),
        })
        .chain(std::iter::once(GlossaryEntry {
            term: "Benchmark".to_string(),
            explanation: BENCHMARK_EXPLANATION.to_string(),
        }))
        .collect()
}

const BENCHMARK_EXPLANATION: &str = "Market average for the same indicator. \
    Comparing against it shows whether the company is competitive, above or below its peers.";

/// Trimmed company name, or [`DEFAULT_COMPANY_LABEL`] when blank.
pub fn company_label(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => DEFAULT_COMPANY_LABEL.to_string(),
    }
}

/// Round half away from zero to `dp` places and print exactly `dp` decimals.
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    // -0.04 rounds to a negative zero; print it unsigned.
    let rounded = if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    };
    format!("{:.*}", dp as usize, rounded)
}

/// Like [`format_fixed`] with an explicit `+` on non-negative values.
pub fn format_signed(value: Decimal, dp: u32) -> String {
    let s = format_fixed(value, dp);
    if s.starts_with('-') {
        s
    } else {
        format!("+{s}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::compare_to_benchmarks;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_fixed_rounding() {
        assert_eq!(format_fixed(dec!(12.5), 1), "12.5");
        assert_eq!(format_fixed(dec!(12.25), 1), "12.3");
        assert_eq!(format_fixed(dec!(-14.2857), 1), "-14.3");
        assert_eq!(format_fixed(dec!(25), 1), "25.0");
        assert_eq!(format_fixed(dec!(-0.04), 1), "0.0");
        assert_eq!(format_fixed(dec!(0.875), 2), "0.88");
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(dec!(12.5), 1), "+12.5");
        assert_eq!(format_signed(dec!(-12.5), 1), "-12.5");
        assert_eq!(format_signed(Decimal::ZERO, 1), "+0.0");
    }

    #[test]
    fn test_company_label_fallback() {
        assert_eq!(company_label(Some("  Acme S.A. ")), "Acme S.A.");
        assert_eq!(company_label(Some("   ")), DEFAULT_COMPANY_LABEL);
        assert_eq!(company_label(None), DEFAULT_COMPANY_LABEL);
    }

    #[test]
    fn test_radar_series_plots_undefined_as_zero() {
        let kpis = KpiSet::from_values(&[(KpiName::Roe, Some(dec!(0.2)))]);
        let series = radar_series(&kpis, &BenchmarkTable::default());
        assert_eq!(series.labels.len(), 7);
        assert_eq!(series.labels[0], "Gross Margin");
        assert_eq!(series.company[0], Decimal::ZERO);
        assert_eq!(series.company[3], dec!(0.2));
        assert_eq!(series.benchmark[6], dec!(1.5));
    }

    #[test]
    fn test_display_rows_formatting() {
        let kpis = KpiSet::from_values(&[(KpiName::GrossMargin, Some(dec!(0.45)))]);
        let rows = display_rows(&compare_to_benchmarks(&kpis, &BenchmarkTable::default()));
        assert_eq!(
            rows[0],
            DisplayRow {
                indicator: "Gross Margin".into(),
                value: "0.45".into(),
                value_pct: "45.00%".into(),
                benchmark: "0.40".into(),
                deviation: "+12.5%".into(),
            }
        );
        assert_eq!(rows[1].value, "");
        assert_eq!(rows[1].deviation, "");
        assert_eq!(rows[1].benchmark, "0.20");
    }

    #[test]
    fn test_display_row_with_huge_value_keeps_percentage_empty() {
        let kpis = KpiSet::from_values(&[(KpiName::GrossMargin, Some(Decimal::MAX))]);
        let rows = display_rows(&compare_to_benchmarks(&kpis, &BenchmarkTable::default()));
        assert!(!rows[0].value.is_empty());
        assert_eq!(rows[0].value_pct, "");
        assert_eq!(rows[0].deviation, "");
    }

    #[test]
    fn test_glossary_covers_kpis_then_benchmark() {
        let entries = glossary();
        assert_eq!(entries.len(), 8);
        assert_eq!(entries[0].term, "Gross Margin");
        assert_eq!(entries[5].term, "Debt/Equity");
        assert_eq!(entries[5].explanation, KpiName::DebtToEquity.explanation());
        assert_eq!(entries[7].term, "Benchmark");
        assert!(entries[7].explanation.starts_with("Market average"));
    }

    #[test]
    fn test_score_methodology_lists_weights() {
        let text = score_methodology(&ScoreWeights::default());
        assert!(text.contains("EBITDA Margin (25%)"));
        assert!(text.contains("Net Margin (20%)"));
        assert!(text.contains("Debt/Equity (20%, lower is better)"));
        assert!(text.contains("Current Ratio (10%)"));
    }
}
