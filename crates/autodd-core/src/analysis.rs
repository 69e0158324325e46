//! End-to-end financial health analysis.
//!
//! raw figures -> KPIs -> {benchmark deviations, health score}
//!             -> diagnosis band / insights -> report envelope

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::benchmark::{compare_to_benchmarks, DeviationRow};
use crate::config::AnalysisConfig;
use crate::diagnosis::{classify, DiagnosisBand};
use crate::financials::{normalize_financials, RawFinancials};
use crate::health_score::{calculate_health_score, HealthScore};
use crate::insights::generate_insights;
use crate::kpi::{calculate_kpis, KpiSet};
use crate::report::{company_label, radar_series, score_methodology, RadarSeries};
use crate::{types::*, AutoDdResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisInput {
    /// Display label only; never part of the calculation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub financials: RawFinancials,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub company: String,
    pub kpis: KpiSet,
    pub deviations: Vec<DeviationRow>,
    pub health_score: HealthScore,
    pub band: DiagnosisBand,
    pub diagnosis: String,
    pub recommendation: String,
    pub insights: Vec<String>,
    pub chart: RadarSeries,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the full analysis with an injected configuration.
pub fn analyze(
    input: &AnalysisInput,
    config: &AnalysisConfig,
) -> AutoDdResult<ComputationOutput<AnalysisReport>> {
    let start = Instant::now();
    config.validate()?;

    let (financials, mut warnings) = normalize_financials(&input.financials, config.input_policy)?;

    if financials.total_liabilities > Decimal::ZERO {
        warnings.push("total_liabilities is collected but not used by any KPI.".into());
    }

    let kpis = calculate_kpis(&financials);
    for kpi in kpis.undefined() {
        if kpi.guard_holds(&financials) {
            tracing::warn!(kpi = kpi.key(), "ratio outside the representable range");
            warnings.push(format!(
                "{} undefined: ratio is outside the representable range.",
                kpi.label()
            ));
        } else {
            warnings.push(format!("{} undefined: {}.", kpi.label(), kpi.guard()));
        }
    }
    tracing::debug!(defined = kpis.defined_count(), "kpis calculated");

    let deviations = compare_to_benchmarks(&kpis, &config.benchmarks);
    let health_score = calculate_health_score(&kpis, &config.ideals, &config.weights);
    let band = classify(health_score.score, &config.bands);
    let insights = generate_insights(&deviations, config.insight_threshold_pct);
    let chart = radar_series(&kpis, &config.benchmarks);

    tracing::debug!(score = %health_score.score, %band, "analysis complete");

    let report = AnalysisReport {
        company: company_label(input.company_name.as_deref()),
        kpis,
        deviations,
        health_score,
        band,
        diagnosis: band.diagnosis().to_string(),
        recommendation: band.recommendation().to_string(),
        insights,
        chart,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "benchmarks": config.benchmarks,
        "ideals": config.ideals,
        "band_thresholds": config.bands,
        "insight_threshold_pct": config.insight_threshold_pct,
        "input_policy": config.input_policy,
        "undefined_kpi_scoring": "undefined KPIs contribute zero; inverted leverage term earns full weight",
    });

    Ok(with_metadata(
        &score_methodology(&config.weights),
        &assumptions,
        warnings,
        elapsed,
        report,
    ))
}

/// [`analyze`] with the standard market configuration.
pub fn analyze_default(input: &AnalysisInput) -> AutoDdResult<ComputationOutput<AnalysisReport>> {
    analyze(input, &AnalysisConfig::default())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
