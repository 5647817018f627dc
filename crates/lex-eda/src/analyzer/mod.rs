//! Analysis facade over one table snapshot.
//!
//! [`DataAnalyzer`] takes an immutable snapshot of a `DataFrame` when it is
//! built and classifies its columns once. Every operation after that is a
//! pure function of the snapshot and the configuration, so repeated calls
//! return identical results and caller mutations of the source frame are
//! never observed.

mod builder;

pub use builder::DataAnalyzerBuilder;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::observer::{AnalysisEvent, AnalysisObserver, AnalysisStage};
use crate::outliers::OutlierDetector;
use crate::quality::QualityReporter;
use crate::schema::ColumnClassification;
use crate::statistics::StatisticsEngine;
use crate::table::Table;
use crate::types::{
    AnalysisReport, BasicInfo, CorrelationMatrix, CorrelationMethod, OutlierMethod, OutlierSet,
    QualityRecord, StatisticsRecord,
};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Exploratory analysis over an immutable table snapshot.
///
/// Use [`DataAnalyzer::builder()`] to configure methods and the event
/// observer.
///
/// # Example
///
/// ```rust,ignore
/// use lex_eda::{DataAnalyzer, CorrelationMethod};
///
/// let analyzer = DataAnalyzer::builder().build(&df)?;
/// let stats = analyzer.descriptive_statistics()?;
/// let corr = analyzer.correlation_analysis(CorrelationMethod::Spearman)?;
/// let report = analyzer.generate_report()?;
/// ```
pub struct DataAnalyzer {
    table: Table,
    classification: ColumnClassification,
    config: AnalysisConfig,
    observer: Arc<dyn AnalysisObserver>,
    detector: OutlierDetector,
}

// Independent analyses may run on worker threads.
static_assertions::assert_impl_all!(DataAnalyzer: Send, Sync);

impl DataAnalyzer {
    /// Create a new analyzer builder.
    pub fn builder() -> DataAnalyzerBuilder {
        DataAnalyzerBuilder::default()
    }

    /// Analyzer with default configuration that reports through `tracing`.
    pub fn new(df: &DataFrame) -> Self {
        Self::from_parts(
            df,
            AnalysisConfig::default(),
            Arc::new(crate::observer::TracingObserver),
        )
    }

    pub(crate) fn from_parts(
        df: &DataFrame,
        config: AnalysisConfig,
        observer: Arc<dyn AnalysisObserver>,
    ) -> Self {
        let table = Table::from_dataframe(df);
        let classification = ColumnClassification::classify(&table);

        observer.notify(AnalysisEvent::completed(
            AnalysisStage::Initialization,
            format!(
                "Loaded {} rows x {} columns ({} numeric, {} categorical, {} datetime)",
                table.height(),
                table.width(),
                classification.numeric.len(),
                classification.categorical.len(),
                classification.datetime.len()
            ),
        ));

        Self {
            detector: OutlierDetector::from_config(&config),
            table,
            classification,
            config,
            observer,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn classification(&self) -> &ColumnClassification {
        &self.classification
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Dataset shape, memory footprint, missing cells and duplicate rows.
    pub fn basic_info(&self) -> Result<BasicInfo> {
        let frame = self.table.frame();

        let mut missing_cells = 0;
        let mut data_types = BTreeMap::new();
        for name in self.table.column_names() {
            missing_cells += self.table.missing_count(&name)?;
            *data_types.entry(self.table.dtype_name(&name)?).or_insert(0) += 1;
        }

        let duplicate_rows = if frame.width() == 0 || frame.height() == 0 {
            0
        } else {
            frame.height()
                - frame
                    .unique::<&str, &str>(None, UniqueKeepStrategy::First, None)?
                    .height()
        };

        let info = BasicInfo {
            rows: frame.height(),
            columns: frame.width(),
            memory_bytes: frame.estimated_size() as u64,
            missing_cells,
            duplicate_rows,
            numeric_columns: self.classification.numeric.len(),
            categorical_columns: self.classification.categorical.len(),
            datetime_columns: self.classification.datetime.len(),
            data_types,
        };

        self.observer.notify(AnalysisEvent::completed(
            AnalysisStage::BasicInfo,
            format!(
                "{} missing cells, {} duplicate rows",
                info.missing_cells, info.duplicate_rows
            ),
        ));
        Ok(info)
    }

    /// Descriptive statistics for every numeric column, in table order.
    ///
    /// A table without numeric columns yields an empty list and an
    /// empty-input event.
    pub fn descriptive_statistics(&self) -> Result<Vec<StatisticsRecord>> {
        let stage = AnalysisStage::DescriptiveStatistics;
        if self.classification.numeric.is_empty() {
            self.warn_empty(stage, "No numeric columns found for descriptive statistics");
            return Ok(Vec::new());
        }

        let records = StatisticsEngine::describe(&self.table, &self.classification.numeric)?;
        self.observer.notify(AnalysisEvent::completed(
            stage,
            format!("Described {} numeric columns", records.len()),
        ));
        Ok(records)
    }

    /// Pairwise correlation matrix over the numeric columns.
    ///
    /// Fewer than two numeric columns yield an empty matrix and an
    /// empty-input event.
    pub fn correlation_analysis(&self, method: CorrelationMethod) -> Result<CorrelationMatrix> {
        let stage = AnalysisStage::Correlation;
        if self.classification.numeric.len() < 2 {
            self.warn_empty(
                stage,
                "Need at least 2 numeric columns for correlation analysis",
            );
            return Ok(CorrelationMatrix::empty(method));
        }

        let matrix = StatisticsEngine::correlate(&self.table, &self.classification.numeric, method)?;
        self.observer.notify(AnalysisEvent::completed(
            stage,
            format!(
                "{} correlation over {} columns",
                method,
                matrix.columns.len()
            ),
        ));
        Ok(matrix)
    }

    /// Outlier sets for every numeric column, in table order.
    pub fn detect_outliers(&self, method: OutlierMethod) -> Result<Vec<OutlierSet>> {
        let stage = AnalysisStage::OutlierDetection;
        if self.classification.numeric.is_empty() {
            self.warn_empty(stage, "No numeric columns found for outlier detection");
            return Ok(Vec::new());
        }

        let sets = self
            .detector
            .detect(&self.table, &self.classification.numeric, method)?;
        let total: usize = sets.iter().map(OutlierSet::len).sum();
        self.observer.notify(AnalysisEvent::completed(
            stage,
            format!("Flagged {} outliers using {}", total, method),
        ));
        Ok(sets)
    }

    /// Null, uniqueness and range metrics for every column.
    pub fn data_quality_report(&self) -> Result<Vec<QualityRecord>> {
        let records = QualityReporter::report(&self.table, &self.classification)?;
        self.observer.notify(AnalysisEvent::completed(
            AnalysisStage::DataQuality,
            format!("Assessed {} columns", records.len()),
        ));
        Ok(records)
    }

    /// Run every analysis with the configured methods.
    ///
    /// Empty inputs only produce empty sections; data errors propagate.
    pub fn generate_report(&self) -> Result<AnalysisReport> {
        let report = AnalysisReport {
            basic_info: self.basic_info()?,
            descriptive_stats: self.descriptive_statistics()?,
            correlation_matrix: self.correlation_analysis(self.config.correlation_method)?,
            outliers: self.detect_outliers(self.config.outlier_method)?,
            data_quality: self.data_quality_report()?,
        };

        self.observer.notify(AnalysisEvent::completed(
            AnalysisStage::Report,
            "Analysis report generated",
        ));
        Ok(report)
    }

    fn warn_empty(&self, stage: AnalysisStage, message: &str) {
        self.observer
            .notify(AnalysisEvent::empty_input(stage, message));
    }
}

impl std::fmt::Debug for DataAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataAnalyzer")
            .field("rows", &self.table.height())
            .field("columns", &self.table.width())
            .field("classification", &self.classification)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
