//! Report output module.
//!
//! Renders an [`AnalysisReport`](crate::AnalysisReport) as a plain-text
//! summary and writes text or JSON report files.
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_eda::reporting::ReportWriter;
//!
//! let report = analyzer.generate_report()?;
//! let writer = ReportWriter::new("outputs");
//! writer.write_text(&report, "sales")?;   // outputs/sales_report.txt
//! writer.write_json(&report, "sales")?;   // outputs/sales_report.json
//! ```

mod writer;

pub use writer::ReportWriter;
