//! Immutable table snapshot the analysis runs over.
//!
//! A [`Table`] is taken from a polars `DataFrame` once, at analyzer
//! construction. Polars column buffers are immutable and reference counted,
//! so the snapshot shares no mutable state with the caller's frame: replacing
//! or mutating columns of the original afterwards produces new buffers and
//! leaves the snapshot untouched.

use crate::error::{EdaError, Result};
use crate::types::ColumnType;
use polars::prelude::*;

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Map a polars dtype onto the declared column type.
///
/// Booleans are deliberately `Other`: they take part in no partition.
pub fn column_type_of(dtype: &DataType) -> ColumnType {
    if is_numeric_dtype(dtype) {
        ColumnType::Numeric
    } else if matches!(dtype, DataType::Datetime(_, _) | DataType::Date) {
        ColumnType::Datetime
    } else if matches!(dtype, DataType::String | DataType::Categorical(..)) {
        ColumnType::Categorical
    } else {
        ColumnType::Other
    }
}

/// Rectangular, named, typed columns; row identity is the position index.
#[derive(Debug, Clone)]
pub struct Table {
    frame: DataFrame,
}

impl Table {
    /// Snapshot a DataFrame.
    pub fn from_dataframe(df: &DataFrame) -> Self {
        Self { frame: df.clone() }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn series(&self, name: &str) -> Result<&Series> {
        self.frame
            .column(name)
            .map(|col| col.as_materialized_series())
            .map_err(|_| EdaError::ColumnNotFound(name.to_string()))
    }

    pub fn column_type(&self, name: &str) -> Result<ColumnType> {
        Ok(column_type_of(self.series(name)?.dtype()))
    }

    /// Human readable dtype name, e.g. `i64`, `str`, `date`.
    pub fn dtype_name(&self, name: &str) -> Result<String> {
        Ok(self.series(name)?.dtype().to_string())
    }

    /// Values of a numeric column as `f64`, `None` marking missing cells.
    ///
    /// Floating NaN counts as missing, the same as a null.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let series = self.series(name)?;
        if !is_numeric_dtype(series.dtype()) {
            return Err(EdaError::MalformedData {
                column: name.to_string(),
                reason: format!("expected a numeric column, found {}", series.dtype()),
            });
        }

        let casted = series
            .cast(&DataType::Float64)
            .map_err(|e| EdaError::MalformedData {
                column: name.to_string(),
                reason: e.to_string(),
            })?;
        let values = casted.f64().map_err(|e| EdaError::MalformedData {
            column: name.to_string(),
            reason: e.to_string(),
        })?;

        Ok(values
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect())
    }

    /// Number of missing cells in a column (nulls, plus NaN for numeric columns).
    pub fn missing_count(&self, name: &str) -> Result<usize> {
        let series = self.series(name)?;
        if is_numeric_dtype(series.dtype()) {
            Ok(self.numeric_values(name)?.iter().filter(|v| v.is_none()).count())
        } else {
            Ok(series.null_count())
        }
    }
}

impl From<DataFrame> for Table {
    fn from(frame: DataFrame) -> Self {
        Self { frame }
    }
}

/// Keep only present values.
pub(crate) fn present(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().flatten().copied().collect()
}
