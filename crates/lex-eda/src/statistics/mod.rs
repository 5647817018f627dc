//! Statistics engine for numeric columns.
//!
//! This module provides:
//! - Descriptive statistics (moments, quantiles, shape)
//! - Pairwise correlation matrices (Pearson, Spearman, Kendall tau-b)
//!
//! Missing cells (nulls and NaN) are excluded per column for descriptive
//! statistics and per pair for correlations.

mod correlation;
pub(crate) mod moments;

use crate::error::Result;
use crate::table::{Table, present};
use crate::types::{CorrelationMatrix, CorrelationMethod, StatisticsRecord};

/// Stateless numeric summaries over a [`Table`].
pub struct StatisticsEngine;

impl StatisticsEngine {
    /// Describe each listed numeric column, in the given order.
    pub fn describe(table: &Table, numeric_columns: &[String]) -> Result<Vec<StatisticsRecord>> {
        let total_rows = table.height();
        numeric_columns
            .iter()
            .map(|name| {
                let values = table.numeric_values(name)?;
                Ok(Self::describe_values(name, &values, total_rows))
            })
            .collect()
    }

    /// Describe a single column from its raw cells.
    pub fn describe_values(
        column: &str,
        values: &[Option<f64>],
        total_rows: usize,
    ) -> StatisticsRecord {
        let observed = present(values);
        let sorted = moments::sorted(&observed);
        let variance = moments::sample_variance(&observed);
        let missing_count = values.len() - observed.len();

        StatisticsRecord {
            column: column.to_string(),
            count: observed.len(),
            mean: moments::mean(&observed),
            std: variance.map(f64::sqrt),
            variance,
            min: sorted.first().copied(),
            p25: moments::quantile_sorted(&sorted, 0.25),
            p50: moments::quantile_sorted(&sorted, 0.5),
            p75: moments::quantile_sorted(&sorted, 0.75),
            max: sorted.last().copied(),
            skewness: moments::skewness(&observed),
            kurtosis: moments::kurtosis(&observed),
            missing_count,
            missing_percentage: percentage(missing_count, total_rows),
        }
    }

    /// Correlation matrix over the listed numeric columns.
    ///
    /// Returns an empty matrix when fewer than two columns are given.
    pub fn correlate(
        table: &Table,
        numeric_columns: &[String],
        method: CorrelationMethod,
    ) -> Result<CorrelationMatrix> {
        let columns = numeric_columns
            .iter()
            .map(|name| table.numeric_values(name))
            .collect::<Result<Vec<_>>>()?;
        Self::correlate_values(numeric_columns, &columns, method)
    }

    /// Correlation matrix from pre-extracted column cells.
    pub fn correlate_values(
        names: &[String],
        columns: &[Vec<Option<f64>>],
        method: CorrelationMethod,
    ) -> Result<CorrelationMatrix> {
        if names.len() < 2 {
            return Ok(CorrelationMatrix::empty(method));
        }

        let k = names.len();
        let mut values = vec![vec![None; k]; k];
        for i in 0..k {
            values[i][i] = Self::self_correlation(&columns[i]);
            for j in (i + 1)..k {
                let (x, y) = complete_pairs(&columns[i], &columns[j]);
                let r = Self::coefficient(&x, &y, method)?;
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(CorrelationMatrix {
            method,
            columns: names.to_vec(),
            values,
        })
    }

    fn coefficient(x: &[f64], y: &[f64], method: CorrelationMethod) -> Result<Option<f64>> {
        match method {
            CorrelationMethod::Pearson => correlation::pearson(x, y),
            CorrelationMethod::Spearman => correlation::spearman(x, y),
            CorrelationMethod::Kendall => Ok(correlation::kendall(x, y)),
        }
    }

    /// A column correlates perfectly with itself unless it has no variance.
    fn self_correlation(values: &[Option<f64>]) -> Option<f64> {
        moments::sample_variance(&present(values))
            .filter(|v| *v > 0.0)
            .map(|_| 1.0)
    }
}

/// Rows where both cells are present.
fn complete_pairs(a: &[Option<f64>], b: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
    a.iter()
        .zip(b)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .unzip()
}

pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
