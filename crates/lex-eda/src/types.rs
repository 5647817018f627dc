use crate::error::EdaError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Declared value domain of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Integer or floating point numbers
    Numeric,
    /// Strings and categoricals
    Categorical,
    /// Date or datetime values
    Datetime,
    /// Anything else (booleans, lists, binary, ...)
    Other,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
            Self::Datetime => "datetime",
            Self::Other => "other",
        }
    }
}

/// Correlation coefficient used by [`correlation_analysis`](crate::DataAnalyzer::correlation_analysis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMethod {
    /// Linear (product-moment) correlation
    #[default]
    Pearson,
    /// Pearson correlation of average ranks
    Spearman,
    /// Kendall's tau-b
    Kendall,
}

impl CorrelationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pearson => "pearson",
            Self::Spearman => "spearman",
            Self::Kendall => "kendall",
        }
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorrelationMethod {
    type Err = EdaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pearson" => Ok(Self::Pearson),
            "spearman" => Ok(Self::Spearman),
            "kendall" => Ok(Self::Kendall),
            other => Err(EdaError::InvalidArgument(format!(
                "unsupported correlation method '{}' (expected pearson, spearman or kendall)",
                other
            ))),
        }
    }
}

/// Rule used by [`detect_outliers`](crate::DataAnalyzer::detect_outliers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierMethod {
    /// Tukey's fences around the interquartile range
    #[default]
    Iqr,
    /// Absolute z-score above a threshold
    ZScore,
}

impl OutlierMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Iqr => "iqr",
            Self::ZScore => "zscore",
        }
    }
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutlierMethod {
    type Err = EdaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "iqr" => Ok(Self::Iqr),
            "zscore" | "z-score" => Ok(Self::ZScore),
            other => Err(EdaError::InvalidArgument(format!(
                "unsupported outlier method '{}' (expected iqr or zscore)",
                other
            ))),
        }
    }
}

/// Descriptive statistics for one numeric column.
///
/// Statistics that are undefined for the available sample (mean of nothing,
/// standard deviation of a single value, ...) are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsRecord {
    pub column: String,
    /// Number of non-missing values
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub variance: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
    pub skewness: Option<f64>,
    pub kurtosis: Option<f64>,
    pub missing_count: usize,
    pub missing_percentage: f64,
}

/// Square, symmetric correlation matrix over the numeric columns.
///
/// `None` entries are undefined coefficients (zero variance or too few
/// complete pairs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub method: CorrelationMethod,
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn empty(method: CorrelationMethod) -> Self {
        Self {
            method,
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient between two columns, `None` if undefined or unknown.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }
}

/// Rows flagged as anomalous in one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierSet {
    pub column: String,
    pub method: OutlierMethod,
    /// Row positions in the table, ascending
    pub row_indices: Vec<usize>,
    /// Value-space fence: `Q1 - k*IQR` or `mean - t*sigma`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<f64>,
}

impl OutlierSet {
    pub fn empty(column: impl Into<String>, method: OutlierMethod) -> Self {
        Self {
            column: column.into(),
            method,
            row_indices: Vec::new(),
            lower_bound: None,
            upper_bound: None,
        }
    }

    pub fn len(&self) -> usize {
        self.row_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_indices.is_empty()
    }
}

/// Null, uniqueness and range metrics for one column of any type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityRecord {
    pub column: String,
    pub dtype: String,
    pub column_type: ColumnType,
    pub non_null_count: usize,
    pub null_count: usize,
    pub null_percentage: f64,
    pub unique_count: usize,
    pub unique_percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_value: Option<f64>,
}

/// Dataset-level overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub rows: usize,
    pub columns: usize,
    pub memory_bytes: u64,
    pub missing_cells: usize,
    pub duplicate_rows: usize,
    pub numeric_columns: usize,
    pub categorical_columns: usize,
    pub datetime_columns: usize,
    /// Number of columns per dtype name
    pub data_types: BTreeMap<String, usize>,
}

/// Complete analysis bundle produced by [`generate_report`](crate::DataAnalyzer::generate_report).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub basic_info: BasicInfo,
    pub descriptive_stats: Vec<StatisticsRecord>,
    pub correlation_matrix: CorrelationMatrix,
    pub outliers: Vec<OutlierSet>,
    pub data_quality: Vec<QualityRecord>,
}

impl AnalysisReport {
    /// Total number of flagged cells across all columns.
    pub fn total_outliers(&self) -> usize {
        self.outliers.iter().map(OutlierSet::len).sum()
    }
}
