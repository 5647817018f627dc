//! Schema classification.
//!
//! Partitions the columns of a [`Table`] into numeric, categorical and
//! datetime groups from their declared dtypes. Columns of any other type
//! (booleans included) belong to no group.

use crate::table::{Table, column_type_of};
use crate::types::ColumnType;
use serde::{Deserialize, Serialize};

/// Disjoint partition of column names, each list in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnClassification {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
    pub datetime: Vec<String>,
}

impl ColumnClassification {
    /// Classify every column of a table.
    pub fn classify(table: &Table) -> Self {
        let mut classification = Self::default();

        for column in table.frame().get_columns() {
            let name = column.name().to_string();
            match column_type_of(column.dtype()) {
                ColumnType::Numeric => classification.numeric.push(name),
                ColumnType::Categorical => classification.categorical.push(name),
                ColumnType::Datetime => classification.datetime.push(name),
                ColumnType::Other => {}
            }
        }

        classification
    }

    pub fn is_numeric(&self, column: &str) -> bool {
        self.numeric.iter().any(|c| c == column)
    }

    /// Total number of classified columns.
    pub fn len(&self) -> usize {
        self.numeric.len() + self.categorical.len() + self.datetime.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
