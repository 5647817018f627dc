use crate::error::Result;
use crate::schema::ColumnClassification;
use crate::statistics::{moments, percentage};
use crate::table::{Table, present};
use crate::types::QualityRecord;
use std::collections::HashSet;

pub struct QualityReporter;

impl QualityReporter {
    /// One record per column, in table order.
    ///
    /// Range metrics (min, max, mean, std) are filled for numeric columns only.
    pub fn report(
        table: &Table,
        classification: &ColumnClassification,
    ) -> Result<Vec<QualityRecord>> {
        table
            .column_names()
            .iter()
            .map(|name| {
                if classification.is_numeric(name) {
                    Self::numeric_record(table, name)
                } else {
                    Self::generic_record(table, name)
                }
            })
            .collect()
    }

    fn numeric_record(table: &Table, name: &str) -> Result<QualityRecord> {
        let values = table.numeric_values(name)?;
        let observed = present(&values);
        let total = values.len();

        // -0.0 and 0.0 are the same value
        let unique_count = observed
            .iter()
            .map(|v| (if *v == 0.0 { 0.0f64 } else { *v }).to_bits())
            .collect::<HashSet<_>>()
            .len();
        let sorted = moments::sorted(&observed);

        Ok(QualityRecord {
            column: name.to_string(),
            dtype: table.dtype_name(name)?,
            column_type: table.column_type(name)?,
            non_null_count: observed.len(),
            null_count: total - observed.len(),
            null_percentage: percentage(total - observed.len(), total),
            unique_count,
            unique_percentage: percentage(unique_count, total),
            min_value: sorted.first().copied(),
            max_value: sorted.last().copied(),
            mean_value: moments::mean(&observed),
            std_value: moments::sample_variance(&observed).map(f64::sqrt),
        })
    }

    fn generic_record(table: &Table, name: &str) -> Result<QualityRecord> {
        let series = table.series(name)?;
        let total = series.len();
        let null_count = series.null_count();
        let unique_count = series.drop_nulls().n_unique()?;

        Ok(QualityRecord {
            column: name.to_string(),
            dtype: table.dtype_name(name)?,
            column_type: table.column_type(name)?,
            non_null_count: total - null_count,
            null_count,
            null_percentage: percentage(null_count, total),
            unique_count,
            unique_percentage: percentage(unique_count, total),
            min_value: None,
            max_value: None,
            mean_value: None,
            std_value: None,
        })
    }
}
