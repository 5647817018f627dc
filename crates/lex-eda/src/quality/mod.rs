//! Data quality reporting module.
//!
//! This module produces per-column null, uniqueness and range metrics for
//! every column of a table, whatever its type.

mod reporter;

pub use reporter::QualityReporter;
