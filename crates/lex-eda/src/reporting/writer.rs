use crate::error::{EdaError, Result, ResultExt};
use crate::types::AnalysisReport;
use chrono::Local;
use std::fmt::{self, Write as _};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

const RULE_WIDTH: usize = 80;

/// Writes analysis reports under an output directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    /// Plain-text summary: overview, descriptive statistics, outlier counts
    /// and data quality.
    pub fn render_text(report: &AnalysisReport) -> Result<String> {
        let mut out = String::new();
        write_sections(&mut out, report)?;
        Ok(out)
    }

    /// Write `<base>_report.txt` with a generation timestamp header.
    pub fn write_text(&self, report: &AnalysisReport, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join(format!("{}_report.txt", base_name));
        let mut file = File::create(&path)?;
        writeln!(file, "EXPLORATORY DATA ANALYSIS REPORT")?;
        writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
        file.write_all(Self::render_text(report)?.as_bytes())?;

        info!("Report saved: {}", path.display());
        Ok(path)
    }

    /// Write `<base>_report.json` (pretty-printed).
    pub fn write_json(&self, report: &AnalysisReport, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join(format!("{}_report.json", base_name));
        let mut file = File::create(&path)?;
        let json = serde_json::to_string_pretty(report)
            .map_err(EdaError::from)
            .context(format!("Failed to serialize report {}", base_name))?;
        file.write_all(json.as_bytes())?;

        info!("Report saved: {}", path.display());
        Ok(path)
    }
}

fn write_sections(out: &mut impl fmt::Write, report: &AnalysisReport) -> fmt::Result {
    let info = &report.basic_info;

    section(out, "DATASET OVERVIEW")?;
    writeln!(out, "Rows:               {}", info.rows)?;
    writeln!(out, "Columns:            {}", info.columns)?;
    writeln!(out, "Memory:             {:.2} MB", info.memory_bytes as f64 / 1024.0 / 1024.0)?;
    writeln!(out, "Missing cells:      {}", info.missing_cells)?;
    writeln!(out, "Duplicate rows:     {}", info.duplicate_rows)?;
    writeln!(
        out,
        "Column types:       {} numeric, {} categorical, {} datetime",
        info.numeric_columns, info.categorical_columns, info.datetime_columns
    )?;
    for (dtype, count) in &info.data_types {
        writeln!(out, "  {:<16} {}", dtype, count)?;
    }

    section(out, "DESCRIPTIVE STATISTICS")?;
    if report.descriptive_stats.is_empty() {
        writeln!(out, "No numeric columns.")?;
    } else {
        writeln!(
            out,
            "{:<20} {:>8} {:>12} {:>12} {:>12} {:>12} {:>12}",
            "column", "count", "mean", "std", "min", "median", "max"
        )?;
        for s in &report.descriptive_stats {
            writeln!(
                out,
                "{:<20} {:>8} {:>12} {:>12} {:>12} {:>12} {:>12}",
                truncate(&s.column, 20),
                s.count,
                fmt_opt(s.mean),
                fmt_opt(s.std),
                fmt_opt(s.min),
                fmt_opt(s.p50),
                fmt_opt(s.max)
            )?;
        }
    }

    section(out, "CORRELATION")?;
    let matrix = &report.correlation_matrix;
    if matrix.is_empty() {
        writeln!(out, "Not enough numeric columns ({}).", matrix.method)?;
    } else {
        writeln!(out, "Method: {}", matrix.method)?;
        write!(out, "{:<20}", "")?;
        for name in &matrix.columns {
            write!(out, " {:>10}", truncate(name, 10))?;
        }
        writeln!(out)?;
        for (name, row) in matrix.columns.iter().zip(&matrix.values) {
            write!(out, "{:<20}", truncate(name, 20))?;
            for value in row {
                write!(out, " {:>10}", fmt_opt(*value))?;
            }
            writeln!(out)?;
        }
    }

    section(out, "OUTLIERS")?;
    if report.outliers.is_empty() {
        writeln!(out, "No numeric columns.")?;
    } else {
        for set in &report.outliers {
            writeln!(
                out,
                "{:<20} {:>6} ({})",
                truncate(&set.column, 20),
                set.len(),
                set.method
            )?;
        }
        writeln!(out, "Total: {}", report.total_outliers())?;
    }

    section(out, "DATA QUALITY")?;
    writeln!(
        out,
        "{:<20} {:<12} {:>10} {:>8} {:>10} {:>8}",
        "column", "dtype", "nulls", "null %", "unique", "uniq %"
    )?;
    for q in &report.data_quality {
        writeln!(
            out,
            "{:<20} {:<12} {:>10} {:>7.1}% {:>10} {:>7.1}%",
            truncate(&q.column, 20),
            truncate(&q.dtype, 12),
            q.null_count,
            q.null_percentage,
            q.unique_count,
            q.unique_percentage
        )?;
    }
    Ok(())
}

fn section(out: &mut impl fmt::Write, title: &str) -> fmt::Result {
    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
        t.push('~');
        t
    }
}
