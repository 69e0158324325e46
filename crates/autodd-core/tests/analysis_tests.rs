use autodd_core::benchmark::BenchmarkTable;
use autodd_core::diagnosis::DiagnosisBand;
use autodd_core::financials::{InputPolicy, RawFinancials};
use autodd_core::insights::NO_DEVIATION_MESSAGE;
use autodd_core::kpi::KpiName;
use autodd_core::report::{display_rows, summary_lines};
use autodd_core::{analyze, analyze_default, AnalysisConfig, AnalysisInput, AutoDdError};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn approx_eq(a: Decimal, b: Decimal, eps: Decimal) -> bool {
    (a - b).abs() < eps
}

fn reference_company() -> AnalysisInput {
    AnalysisInput {
        company_name: Some("Alpargatas S.A.".into()),
        financials: RawFinancials {
            revenue: dec!(1000),
            gross_profit: dec!(450),
            ebitda: dec!(250),
            net_income: dec!(120),
            total_assets: dec!(2000),
            total_liabilities: Decimal::ZERO,
            equity: dec!(800),
            net_debt: dec!(700),
            current_assets: dec!(500),
            current_liabilities: dec!(300),
        },
    }
}

// ===========================================================================
// Reference examples
// ===========================================================================

#[test]
fn test_reference_company_kpis() {
    let out = analyze_default(&reference_company()).unwrap();
    let k = &out.result.kpis;
    assert_eq!(k.get(KpiName::GrossMargin), Some(dec!(0.45)));
    assert_eq!(k.get(KpiName::EbitdaMargin), Some(dec!(0.25)));
    assert_eq!(k.get(KpiName::NetMargin), Some(dec!(0.12)));
    assert_eq!(k.get(KpiName::Roe), Some(dec!(0.15)));
    assert_eq!(k.get(KpiName::Roa), Some(dec!(0.06)));
    assert_eq!(k.get(KpiName::DebtToEquity), Some(dec!(0.875)));
    assert!(approx_eq(
        k.get(KpiName::CurrentRatio).unwrap(),
        dec!(1.667),
        dec!(0.001)
    ));
}

#[test]
fn test_reference_company_score_and_band() {
    let out = analyze_default(&reference_company()).unwrap();
    assert_eq!(out.result.health_score.score, dec!(82.5));
    assert_eq!(out.result.band, DiagnosisBand::Excellent);
    assert_eq!(
        out.result.recommendation,
        DiagnosisBand::Excellent.recommendation()
    );
}

#[test]
fn test_reference_company_insights() {
    let out = analyze_default(&reference_company()).unwrap();
    // GM +12.5, EBITDA +25, NM +20, ROE 0, ROA -14.3, D/E -12.5, CR +11.1
    assert_eq!(
        out.result.insights,
        vec![
            "Gross Margin above benchmark (+12.5%)",
            "EBITDA Margin above benchmark (+25.0%)",
            "Net Margin above benchmark (+20.0%)",
            "ROA below benchmark (-14.3%)",
            "Debt/Equity below benchmark (-12.5%)",
            "Current Ratio above benchmark (+11.1%)",
        ]
    );
}

#[test]
fn test_all_zero_company() {
    let input = AnalysisInput {
        company_name: Some(String::new()),
        financials: RawFinancials::zero(),
    };
    let out = analyze_default(&input).unwrap();
    let r = &out.result;
    assert!(r.kpis.iter().all(|kv| kv.value.is_none()));
    assert!(r.deviations.iter().all(|d| d.deviation_pct.is_none()));
    assert_eq!(r.health_score.score, dec!(20));
    assert_eq!(r.band, DiagnosisBand::Weak);
    assert_eq!(r.insights, vec![NO_DEVIATION_MESSAGE]);
    assert!(r.chart.company.iter().all(|v| v.is_zero()));
}

// ===========================================================================
// Display payload
// ===========================================================================

#[test]
fn test_summary_lines() {
    let out = analyze_default(&reference_company()).unwrap();
    let lines = summary_lines(&out.result);
    assert_eq!(lines[0], "Company: Alpargatas S.A.");
    assert_eq!(lines[1], "Financial Health Score: 82.5/100");
    assert!(lines[2].starts_with("Diagnosis: Excellent"));
}

#[test]
fn test_display_rows_blank_for_undefined() {
    let mut input = reference_company();
    input.financials.equity = Decimal::ZERO;
    let out = analyze_default(&input).unwrap();
    let rows = display_rows(&out.result.deviations);
    let roe = rows.iter().find(|r| r.indicator == "ROE").unwrap();
    assert_eq!(roe.value, "");
    assert_eq!(roe.deviation, "");
    assert_eq!(roe.benchmark, "0.15");
    let roa = rows.iter().find(|r| r.indicator == "ROA").unwrap();
    assert_eq!(roa.value, "0.06");
    assert_eq!(roa.deviation, "-14.3%");
}

// ===========================================================================
// Injected configuration
// ===========================================================================

#[test]
fn test_alternate_benchmarks_change_deviations_not_score() {
    let config = AnalysisConfig {
        benchmarks: BenchmarkTable {
            gross_margin: dec!(0.45),
            ..BenchmarkTable::default()
        },
        ..AnalysisConfig::default()
    };
    let out = analyze(&reference_company(), &config).unwrap();
    assert_eq!(out.result.health_score.score, dec!(82.5));
    assert_eq!(out.result.deviations[0].deviation_pct, Some(Decimal::ZERO));
    assert!(!out
        .result
        .insights
        .iter()
        .any(|i| i.starts_with("Gross Margin")));
}

#[test]
fn test_config_from_json_drives_thresholds() {
    let config = AnalysisConfig::from_json(r#"{"bands": {"excellent": 90}}"#).unwrap();
    let out = analyze(&reference_company(), &config).unwrap();
    assert_eq!(out.result.band, DiagnosisBand::Good);
}

#[test]
fn test_clamp_policy_from_config() {
    let config = AnalysisConfig {
        input_policy: InputPolicy::Clamp,
        ..AnalysisConfig::default()
    };
    let mut input = reference_company();
    input.financials.revenue = dec!(-1000);
    let out = analyze(&input, &config).unwrap();
    assert_eq!(out.result.kpis.get(KpiName::GrossMargin), None);
    assert!(out.warnings.iter().any(|w| w.starts_with("revenue")));
}

#[test]
fn test_negative_input_error_names_field() {
    let mut input = reference_company();
    input.financials.current_assets = dec!(-1);
    match analyze_default(&input) {
        Err(AutoDdError::InvalidInput { field, .. }) => assert_eq!(field, "current_assets"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

// ===========================================================================
// JSON surface
// ===========================================================================

#[test]
fn test_input_from_json() {
    let json = r#"{
        "company_name": "Acme",
        "financials": {
            "revenue": 1000, "gross_profit": 450, "ebitda": 250, "net_income": 120,
            "total_assets": 2000, "equity": 800, "net_debt": 700,
            "current_assets": 500, "current_liabilities": 300
        }
    }"#;
    let input: AnalysisInput = serde_json::from_str(json).unwrap();
    let out = analyze_default(&input).unwrap();
    assert_eq!(out.result.health_score.score, dec!(82.5));

    let value = serde_json::to_value(&out).unwrap();
    assert_eq!(value["result"]["band"], "excellent");
    assert_eq!(value["result"]["kpis"][0]["kpi"], "gross_margin");
    assert_eq!(value["result"]["deviations"].as_array().unwrap().len(), 7);
}
