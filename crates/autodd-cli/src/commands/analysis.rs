use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use autodd_core::financials::RawFinancials;
use autodd_core::kpi::KpiName;
use autodd_core::report::{display_rows, glossary, summary_lines};
use autodd_core::{analyze, AnalysisConfig, AnalysisInput};

use crate::input;

/// Arguments for a financial health analysis
#[derive(Args, Default)]
pub struct AnalyzeArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON or YAML analysis config (benchmarks, weights, thresholds)
    #[arg(long)]
    pub config: Option<String>,

    /// Company name shown in the report
    #[arg(long)]
    pub company: Option<String>,

    /// Net revenue
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Gross profit
    #[arg(long)]
    pub gross_profit: Option<Decimal>,

    /// EBITDA
    #[arg(long)]
    pub ebitda: Option<Decimal>,

    /// Net income
    #[arg(long)]
    pub net_income: Option<Decimal>,

    /// Total assets
    #[arg(long)]
    pub total_assets: Option<Decimal>,

    /// Total liabilities
    #[arg(long)]
    pub total_liabilities: Option<Decimal>,

    /// Shareholders' equity
    #[arg(long)]
    pub equity: Option<Decimal>,

    /// Net debt
    #[arg(long)]
    pub net_debt: Option<Decimal>,

    /// Current assets
    #[arg(long)]
    pub current_assets: Option<Decimal>,

    /// Current liabilities
    #[arg(long)]
    pub current_liabilities: Option<Decimal>,
}

/// Arguments for printing the benchmark table
#[derive(Args, Default)]
pub struct BenchmarksArgs {
    /// Path to a JSON or YAML analysis config
    #[arg(long)]
    pub config: Option<String>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = load_config(args.config.as_deref())?;
    let piped = if args.input.is_none() {
        input::stdin::read_stdin()?
    } else {
        None
    };
    let analysis_input = resolve_input(&args, piped)?;
    analyze_to_value(&analysis_input, &config)
}

pub fn run_benchmarks(args: BenchmarksArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = load_config(args.config.as_deref())?;
    Ok(benchmark_table(&config))
}

fn load_config(path: Option<&str>) -> Result<AnalysisConfig, Box<dyn std::error::Error>> {
    match path {
        Some(p) => input::file::read_config(p),
        None => Ok(AnalysisConfig::default()),
    }
}

/// Input file, then piped stdin, then individual flags.
fn resolve_input(
    args: &AnalyzeArgs,
    piped: Option<Value>,
) -> Result<AnalysisInput, Box<dyn std::error::Error>> {
    let mut analysis_input: AnalysisInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = piped {
        serde_json::from_value(data)?
    } else {
        AnalysisInput {
            company_name: None,
            financials: RawFinancials {
                revenue: args.revenue
                    .ok_or("--revenue is required (or provide --input)")?,
                gross_profit: args.gross_profit
                    .ok_or("--gross-profit is required (or provide --input)")?,
                ebitda: args.ebitda
                    .ok_or("--ebitda is required (or provide --input)")?,
                net_income: args.net_income
                    .ok_or("--net-income is required (or provide --input)")?,
                total_assets: args.total_assets
                    .ok_or("--total-assets is required (or provide --input)")?,
                total_liabilities: args.total_liabilities.unwrap_or_default(),
                equity: args.equity
                    .ok_or("--equity is required (or provide --input)")?,
                net_debt: args.net_debt
                    .ok_or("--net-debt is required (or provide --input)")?,
                current_assets: args.current_assets.unwrap_or_default(),
                current_liabilities: args.current_liabilities.unwrap_or_default(),
            },
        }
    };

    if args.company.is_some() {
        analysis_input.company_name = args.company.clone();
    }
    Ok(analysis_input)
}

/// Envelope JSON plus a `display` section with the formatted report lines.
fn analyze_to_value(
    analysis_input: &AnalysisInput,
    config: &AnalysisConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let output = analyze(analysis_input, config)?;
    let display = json!({
        "summary": summary_lines(&output.result),
        "rows": display_rows(&output.result.deviations),
        "glossary": glossary(),
    });

    let mut value = serde_json::to_value(&output)?;
    if let Value::Object(ref mut map) = value {
        map.insert("display".into(), display);
    }
    Ok(value)
}

fn benchmark_table(config: &AnalysisConfig) -> Value {
    let weights = config.weights.entries();
    let ideals = config.ideals.entries();
    let rows: Vec<Value> = KpiName::ALL
        .iter()
        .map(|&kpi| {
            let weight = weights.iter().find(|(k, _)| *k == kpi).map(|(_, w)| *w);
            let ideal = ideals.iter().find(|(k, _)| *k == kpi).map(|(_, i)| *i);
            json!({
                "kpi": kpi.key(),
                "indicator": kpi.label(),
                "benchmark": config.benchmarks.get(kpi),
                "ideal": ideal,
                "weight": weight,
            })
        })
        .collect();
    Value::Array(rows)
}
