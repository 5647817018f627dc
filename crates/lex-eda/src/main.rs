//! CLI entry point for exploratory data analysis.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use lex_eda::{
    AnalysisConfig, AnalysisReport, CorrelationMethod, CsvOptions, DataAnalyzer, DataFormat,
    DataLoader, OutlierMethod, ReportWriter, TracingObserver,
};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// CLI-compatible input format enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    Csv,
    /// JSON array of records
    Json,
    /// Newline-delimited JSON
    Jsonl,
    Parquet,
}

impl From<CliFormat> for DataFormat {
    fn from(cli: CliFormat) -> Self {
        match cli {
            CliFormat::Csv => DataFormat::Csv,
            CliFormat::Json => DataFormat::Json,
            CliFormat::Jsonl => DataFormat::JsonLines,
            CliFormat::Parquet => DataFormat::Parquet,
        }
    }
}

/// CLI-compatible correlation method enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliCorrelationMethod {
    /// Linear correlation
    Pearson,
    /// Rank correlation
    Spearman,
    /// Kendall's tau-b
    Kendall,
}

impl From<CliCorrelationMethod> for CorrelationMethod {
    fn from(cli: CliCorrelationMethod) -> Self {
        match cli {
            CliCorrelationMethod::Pearson => CorrelationMethod::Pearson,
            CliCorrelationMethod::Spearman => CorrelationMethod::Spearman,
            CliCorrelationMethod::Kendall => CorrelationMethod::Kendall,
        }
    }
}

/// CLI-compatible outlier method enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutlierMethod {
    /// Tukey's fences around the interquartile range
    Iqr,
    /// Absolute z-score threshold
    Zscore,
}

impl From<CliOutlierMethod> for OutlierMethod {
    fn from(cli: CliOutlierMethod) -> Self {
        match cli {
            CliOutlierMethod::Iqr => OutlierMethod::Iqr,
            CliOutlierMethod::Zscore => OutlierMethod::ZScore,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Exploratory Data Analysis",
    long_about = "Descriptive statistics, correlations, outliers and data quality for tabular data.\n\n\
                  EXAMPLES:\n  \
                  # Analyze a CSV file\n  \
                  lex-eda -f data.csv\n\n  \
                  # Analyze generated sample data and write report files\n  \
                  lex-eda --sample --report -o results/\n\n  \
                  # Machine-readable output\n  \
                  lex-eda -f data.parquet --json | jq .basic_info"
)]
struct Args {
    /// Path to the data file to analyze
    #[arg(short, long, conflicts_with = "sample")]
    file: Option<PathBuf>,

    /// Input format (inferred from the file extension if omitted)
    #[arg(long, value_enum)]
    format: Option<CliFormat>,

    /// CSV field separator
    #[arg(long, default_value = ",")]
    separator: char,

    /// Parse date-like CSV columns as dates
    #[arg(long)]
    parse_dates: bool,

    /// Analyze generated sample data instead of a file
    #[arg(long)]
    sample: bool,

    /// Number of rows of sample data
    #[arg(long, default_value = "1000")]
    sample_rows: usize,

    /// Seed for the sample data generator
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Output directory for report files
    #[arg(short, long, default_value = "outputs")]
    output: PathBuf,

    /// Write text and JSON report files to the output directory
    #[arg(short = 'r', long)]
    report: bool,

    /// Output the JSON report to stdout instead of the text summary
    ///
    /// Disables all logs; only the report is written to stdout.
    #[arg(long)]
    json: bool,

    /// Correlation method
    #[arg(long, value_enum, default_value = "pearson")]
    correlation_method: CliCorrelationMethod,

    /// Outlier detection method
    #[arg(long, value_enum, default_value = "iqr")]
    outlier_method: CliOutlierMethod,

    /// IQR fence multiplier
    #[arg(long, default_value = "1.5")]
    iqr_multiplier: f64,

    /// Absolute z-score above which a value is an outlier
    #[arg(long, default_value = "3.0")]
    zscore_threshold: f64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and the final result)
    #[arg(short, long)]
    quiet: bool,
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
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let (data, base_name) = load_input(&args)?;

    let config = AnalysisConfig::builder()
        .correlation_method(args.correlation_method.into())
        .outlier_method(args.outlier_method.into())
        .iqr_multiplier(args.iqr_multiplier)
        .zscore_threshold(args.zscore_threshold)
        .build()?;
    debug!("Analysis config: {:?}", config);

    let analyzer = DataAnalyzer::builder()
        .config(config)
        .observer(Arc::new(TracingObserver))
        .build(&data)?;
    let report = analyzer.generate_report()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report)?;
    }

    if args.report {
        let writer = ReportWriter::new(&args.output);
        let text_path = writer.write_text(&report, &base_name)?;
        let json_path = writer.write_json(&report, &base_name)?;
        if !args.json {
            println!("Reports written to:");
            println!("  {}", text_path.display());
            println!("  {}", json_path.display());
        }

        if args.sample {
            let file_name = format!("sample_data.{}", DataFormat::Csv.extension());
            DataLoader::save(&data, &args.output, &file_name, DataFormat::Csv)?;
        }
    }

    Ok(())
}

/// Load the requested file or generate sample data.
///
/// Returns the table and the base name used for report files.
fn load_input(args: &Args) -> Result<(DataFrame, String)> {
    if args.sample {
        info!("Generating {} rows of sample data", args.sample_rows);
        let df = DataLoader::create_sample_data(args.sample_rows, args.seed)?;
        return Ok((df, "sample".to_string()));
    }

    let Some(ref path) = args.file else {
        return Err(anyhow!("No input given: pass --file <PATH> or --sample"));
    };

    if !path.exists() {
        return Err(anyhow!("Input file not found: {}", path.display()));
    }

    let format = match args.format {
        Some(format) => format.into(),
        None => DataFormat::from_path(path)?,
    };

    let separator = u8::try_from(args.separator)
        .map_err(|_| anyhow!("Separator must be a single ASCII character"))?;
    let csv_options = CsvOptions {
        separator,
        try_parse_dates: args.parse_dates,
        ..CsvOptions::default()
    };

    info!("Loading dataset from: {}", path.display());
    let df = DataLoader::load(path, format, &csv_options)?;
    Ok((df, base_name(path)))
}

fn base_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string()
}

/// Print the human-readable summary.
///
/// Uses `println!` on purpose: this is the command's primary output and must
/// not depend on the log level.
fn print_summary(report: &AnalysisReport) -> Result<()> {
    let body = ReportWriter::render_text(report)?;
    println!("\n{}", "=".repeat(80));
    println!("EXPLORATORY DATA ANALYSIS");
    println!("{}", "=".repeat(80));
    print!("{}", body);
    println!("{}", "=".repeat(80));
    if !report.outliers.is_empty() {
        println!("Total outliers flagged: {}", report.total_outliers());
    }
    println!("Use --report to save text and JSON report files");
    Ok(())
}
