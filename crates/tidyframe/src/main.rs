//! CLI entry point for the cleaning engine.

use anyhow::{Result, anyhow};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use polars::prelude::DataFrame;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tidyframe::io::{LoadOptions, load_csv, write_csv, write_json_report};
use tidyframe::{
    CleaningConfig, CleaningError, CleaningReport, DataCleaner, DataProfiler, DatasetAnalysis,
    NumericTolerance, ReportFormatter, ThresholdBasis,
};
use tracing::info;

/// CLI-compatible threshold basis enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliThresholdBasis {
    /// Measure each column after earlier columns dropped their rows
    Sequential,
    /// Measure every column against the table after critical drops
    Snapshot,
}

impl From<CliThresholdBasis> for ThresholdBasis {
    fn from(cli: CliThresholdBasis) -> Self {
        match cli {
            CliThresholdBasis::Sequential => ThresholdBasis::Sequential,
            CliThresholdBasis::Snapshot => ThresholdBasis::Snapshot,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Deterministic CSV cleaning",
    long_about = "Removes duplicate rows, drops rows missing critical values, and imputes or \
                  drops other missing values using a 5% threshold.\n\n\
                  EXAMPLES:\n  \
                  # Inspect a dataset\n  \
                  tidyframe analyze -i data.csv\n\n  \
                  # Clean with two critical columns\n  \
                  tidyframe clean -i data.csv -o cleaned.csv -c customer_id,product_id\n\n  \
                  # Machine-readable report\n  \
                  tidyframe clean -i data.csv -o cleaned.csv --json | jq .report"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report row/column counts, missing values, types and duplicates
    Analyze(AnalyzeArgs),
    /// Clean a dataset and write the result as CSV
    Clean(CleanArgs),
}

#[derive(clap::Args, Debug)]
struct AnalyzeArgs {
    /// Path to the CSV file to analyze
    #[arg(short, long)]
    input: PathBuf,

    /// Treat values like "$1,200" or "15%" as numbers
    #[arg(long)]
    lenient_numbers: bool,

    /// Output JSON to stdout instead of a human-readable summary
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args, Debug)]
struct CleanArgs {
    /// Path to the CSV file to clean
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the cleaned CSV
    #[arg(short, long)]
    output: PathBuf,

    /// Critical columns (repeatable or comma-separated)
    #[arg(short, long = "critical", value_delimiter = ',')]
    critical: Vec<String>,

    /// Missing fraction above which non-critical columns are imputed
    #[arg(long)]
    threshold: Option<f64>,

    /// Table state that missing fractions are measured against
    #[arg(long, value_enum)]
    basis: Option<CliThresholdBasis>,

    /// Treat values like "$1,200" or "15%" as numbers
    #[arg(long)]
    lenient_numbers: bool,

    /// Skip duplicate row removal
    #[arg(long)]
    keep_duplicates: bool,

    /// JSON file with a cleaning configuration; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output JSON to stdout instead of a human-readable summary
    ///
    /// Disables all logs; only the final JSON document is printed.
    #[arg(long)]
    json: bool,

    /// Also write the JSON summary to this path
    #[arg(short = 'r', long)]
    emit_report: Option<PathBuf>,
}

/// JSON document printed by `clean --json`.
#[derive(Debug, Serialize)]
struct CleanSummary<'a> {
    status: &'static str,
    generated_at: String,
    input_file: String,
    output_file: String,
    original_rows: usize,
    final_rows: usize,
    duplicates_removed: usize,
    actions_taken: Vec<String>,
    report: &'a CleaningReport,
}

/// JSON document printed by `analyze --json`.
#[derive(Debug, Serialize)]
struct AnalyzeSummary<'a> {
    status: &'static str,
    generated_at: String,
    input_file: String,
    analysis: &'a DatasetAnalysis,
}

#[derive(Debug, Serialize)]
struct ErrorSummary<'a> {
    status: &'static str,
    error: &'a CleaningError,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let json = match &cli.command {
        Command::Analyze(args) => args.json,
        Command::Clean(args) => args.json,
    };
    init_logging(&cli.log_level, cli.quiet, json);

    let outcome = match &cli.command {
        Command::Analyze(args) => run_analyze(args),
        Command::Clean(args) => run_clean(args),
    };

    match outcome {
        Ok(()) => Ok(()),
        Err(err) => {
            if json {
                let summary = ErrorSummary {
                    status: "error",
                    error: &err,
                };
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            Err(anyhow!(err))
        }
    }
}

fn run_analyze(args: &AnalyzeArgs) -> tidyframe::CleaningResult<()> {
    let df = load_input(&args.input)?;
    let tolerance = if args.lenient_numbers {
        NumericTolerance::Lenient
    } else {
        NumericTolerance::Strict
    };

    let analysis = DataProfiler::analyze(&df, tolerance)?;

    if args.json {
        let summary = AnalyzeSummary {
            status: "success",
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: args.input.display().to_string(),
            analysis: &analysis,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println!("{}", "=".repeat(60));
    println!("DATA ANALYSIS: {}", args.input.display());
    println!("{}", "=".repeat(60));
    for line in ReportFormatter::analysis_summary(&analysis) {
        println!("{}", line);
    }
    println!("{}", "=".repeat(60));
    Ok(())
}

fn run_clean(args: &CleanArgs) -> tidyframe::CleaningResult<()> {
    let config = build_config(args)?;
    let df = load_input(&args.input)?;

    let (mut cleaned, report) = DataCleaner::new(config).clean(&df)?.into_parts();
    write_csv(&mut cleaned, &args.output)?;

    let summary = CleanSummary {
        status: "success",
        generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        input_file: args.input.display().to_string(),
        output_file: args.output.display().to_string(),
        original_rows: report.rows_before,
        final_rows: report.rows_after,
        duplicates_removed: report.duplicates_removed,
        actions_taken: ReportFormatter::cleaning_summary(&report),
        report: &report,
    };

    if let Some(path) = &args.emit_report {
        write_json_report(&summary, path)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_clean_summary(&summary, &cleaned);
    Ok(())
}

/// Merge the optional config file with command-line overrides.
fn build_config(args: &CleanArgs) -> tidyframe::CleaningResult<CleaningConfig> {
    let mut config = match &args.config {
        Some(path) => CleaningConfig::from_json_file(path)?,
        None => CleaningConfig::default(),
    };

    for column in &args.critical {
        if !config.is_critical(column) {
            config.critical_columns.push(column.clone());
        }
    }
    if let Some(threshold) = args.threshold {
        config.missing_threshold = threshold;
    }
    if let Some(basis) = args.basis {
        config.threshold_basis = basis.into();
    }
    if args.lenient_numbers {
        config.numeric_tolerance = NumericTolerance::Lenient;
    }
    if args.keep_duplicates {
        config.remove_duplicates = false;
    }

    config.validate()?;
    Ok(config)
}

fn load_input(path: &Path) -> tidyframe::CleaningResult<DataFrame> {
    let df = load_csv(path, &LoadOptions::default())?;
    info!("Dataset loaded successfully: {:?}", df.shape());
    Ok(df)
}

/// Print a human-readable summary of the cleaning run.
///
/// Uses `println!` on purpose: this is the command's output, not a log.
fn print_clean_summary(summary: &CleanSummary<'_>, cleaned: &DataFrame) {
    println!();
    println!("{}", "=".repeat(60));
    println!("CLEANING COMPLETE");
    println!("{}", "=".repeat(60));
    println!("Input:  {} ({} rows)", summary.input_file, summary.original_rows);
    println!(
        "Output: {} ({} rows x {} columns)",
        summary.output_file,
        summary.final_rows,
        cleaned.width()
    );
    println!();
    println!("Actions Taken:");
    for action in &summary.actions_taken {
        println!("  - {}", action);
    }
    println!();
    println!("Use --json for machine-readable output");
    println!("{}", "=".repeat(60));
}
