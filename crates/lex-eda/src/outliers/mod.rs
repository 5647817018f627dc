//! Outlier detection for numeric columns.
//!
//! Two rules are supported:
//! - IQR: values strictly outside `[Q1 - k*IQR, Q3 + k*IQR]`
//! - Z-score: values whose `|x - mean| / sigma` exceeds a threshold, using the
//!   population standard deviation
//!
//! Flagged rows are reported by their position in the table. Missing cells
//! are never flagged.

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::statistics::moments;
use crate::table::{Table, present};
use crate::types::{OutlierMethod, OutlierSet};
use tracing::debug;

/// Flags anomalous values per numeric column.
#[derive(Debug, Clone)]
pub struct OutlierDetector {
    iqr_multiplier: f64,
    zscore_threshold: f64,
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl OutlierDetector {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            iqr_multiplier: config.iqr_multiplier,
            zscore_threshold: config.zscore_threshold,
        }
    }

    /// Detect outliers in each listed numeric column, in the given order.
    pub fn detect(
        &self,
        table: &Table,
        numeric_columns: &[String],
        method: OutlierMethod,
    ) -> Result<Vec<OutlierSet>> {
        numeric_columns
            .iter()
            .map(|name| {
                let values = table.numeric_values(name)?;
                let set = self.detect_values(name, &values, method);
                debug!("{}: {} outliers ({})", name, set.len(), method);
                Ok(set)
            })
            .collect()
    }

    /// Detect outliers in a single column's cells.
    pub fn detect_values(
        &self,
        column: &str,
        values: &[Option<f64>],
        method: OutlierMethod,
    ) -> OutlierSet {
        let observed = present(values);
        let bounds = match method {
            OutlierMethod::Iqr => self.iqr_bounds(&observed),
            OutlierMethod::ZScore => self.zscore_bounds(&observed),
        };

        let Some((lower, upper)) = bounds else {
            return OutlierSet::empty(column, method);
        };

        let row_indices = values
            .iter()
            .enumerate()
            .filter_map(|(idx, v)| v.filter(|x| *x < lower || *x > upper).map(|_| idx))
            .collect();

        OutlierSet {
            column: column.to_string(),
            method,
            row_indices,
            lower_bound: Some(lower),
            upper_bound: Some(upper),
        }
    }

    fn iqr_bounds(&self, observed: &[f64]) -> Option<(f64, f64)> {
        let sorted = moments::sorted(observed);
        let q1 = moments::quantile_sorted(&sorted, 0.25)?;
        let q3 = moments::quantile_sorted(&sorted, 0.75)?;
        let iqr = q3 - q1;
        Some((
            q1 - self.iqr_multiplier * iqr,
            q3 + self.iqr_multiplier * iqr,
        ))
    }

    /// `None` for fewer than two values or a zero standard deviation, where
    /// no value can exceed the threshold.
    fn zscore_bounds(&self, observed: &[f64]) -> Option<(f64, f64)> {
        if observed.len() < 2 {
            return None;
        }
        let mean = moments::mean(observed)?;
        let sigma = moments::population_std(observed)?;
        if sigma == 0.0 {
            return None;
        }
        let spread = self.zscore_threshold * sigma;
        Some((mean - spread, mean + spread))
    }
}
