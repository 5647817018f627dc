//! Exploratory Data Analysis Library
//!
//! Automated exploratory analysis of tabular data built with Rust and Polars.
//!
//! # Overview
//!
//! - **Schema Classification**: numeric, categorical and datetime columns from declared dtypes
//! - **Descriptive Statistics**: moments, quartiles, skewness and kurtosis per numeric column
//! - **Correlation**: Pearson, Spearman and Kendall tau-b matrices over pairwise-complete rows
//! - **Outlier Detection**: IQR fences or z-score thresholds, reported as row positions
//! - **Data Quality**: null and uniqueness metrics for every column
//! - **Reports**: all of the above bundled in one serializable [`AnalysisReport`]
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_eda::{DataAnalyzer, DataLoader, CsvOptions, DataFormat};
//!
//! let df = DataLoader::load("sales.csv", DataFormat::Csv, &CsvOptions::default())?;
//!
//! let analyzer = DataAnalyzer::builder()
//!     .on_event(|event| eprintln!("{}: {}", event.stage.display_name(), event.message))
//!     .build(&df)?;
//!
//! let report = analyzer.generate_report()?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```
//!
//! # Snapshots
//!
//! The analyzer snapshots the `DataFrame` when built. Later changes to the
//! caller's frame are not observed and every operation is repeatable.
//!
//! # Empty inputs
//!
//! A table without numeric columns is not an error. Operations that need
//! numeric data return empty results and send an
//! [`EventKind::EmptyInput`](observer::EventKind::EmptyInput) event to the
//! observer instead.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod loader;
pub mod observer;
pub mod outliers;
pub mod quality;
pub mod reporting;
pub mod schema;
pub mod statistics;
pub mod table;
pub mod types;

// Re-exports for convenient access
pub use analyzer::{DataAnalyzer, DataAnalyzerBuilder};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use error::{EdaError, Result as EdaResult, ResultExt};
pub use loader::{CsvOptions, DataFormat, DataLoader, JsonLayout};
pub use observer::{
    AnalysisEvent, AnalysisObserver, AnalysisStage, ClosureObserver, EventKind, TracingObserver,
};
pub use outliers::OutlierDetector;
pub use quality::QualityReporter;
pub use reporting::ReportWriter;
pub use schema::ColumnClassification;
pub use statistics::StatisticsEngine;
pub use table::{Table, column_type_of, is_numeric_dtype};
pub use types::{
    AnalysisReport, BasicInfo, ColumnType, CorrelationMatrix, CorrelationMethod, OutlierMethod,
    OutlierSet, QualityRecord, StatisticsRecord,
};
