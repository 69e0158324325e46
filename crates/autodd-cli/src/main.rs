mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analysis::{AnalyzeArgs, BenchmarksArgs};

/// Financial health analysis from income-statement and balance-sheet figures
#[derive(Parser)]
#[command(
    name = "autodd",
    version,
    about = "Automated financial due diligence: KPIs, benchmarks and health score",
    long_about = "Computes seven financial KPIs from raw statement figures, compares them \
                  against market benchmarks, derives a weighted 0-100 financial health \
                  score and maps it to a diagnosis and investment recommendation."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse one company's financial figures
    Analyze(AnalyzeArgs),
    /// Show the benchmark, ideal and weight table in effect
    Benchmarks(BenchmarksArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

/// Diagnostics go to stderr so stdout carries only the result.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analysis::run_analyze(args),
        Commands::Benchmarks(args) => commands::analysis::run_benchmarks(args),
        Commands::Version => {
            println!("autodd {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    let value = match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    if let Err(e) = output::format_output(&cli.output, &value) {
        tracing::error!(error = %e, "output rendering failed");
        eprintln!("{}: failed to render output: {}", "error".red().bold(), e);
        process::exit(1);
    }
}
