//! Dataset profiling.
//!
//! This module provides:
//! - Column kind inference (numeric vs categorical)
//! - A quality overview of a dataset before cleaning

mod type_inference;

pub use type_inference::{infer_column_kind, infer_column_kinds};

use crate::cleaner::remove_duplicates;
use crate::config::NumericTolerance;
use crate::error::Result;
use crate::types::{ColumnAnalysis, DatasetAnalysis};
use crate::utils::{missing_count, present_mask};
use polars::prelude::*;
use tracing::debug;

/// Data profiler for analyzing dataset structure before cleaning.
pub struct DataProfiler;

impl DataProfiler {
    /// Summarize row/column counts, per-column missing and unique counts,
    /// dtypes, inferred kinds and the number of duplicate rows.
    pub fn analyze(df: &DataFrame, tolerance: NumericTolerance) -> Result<DatasetAnalysis> {
        let mut columns = Vec::with_capacity(df.width());
        let mut total_missing = 0;

        for col in df.get_columns() {
            let series = col.as_materialized_series();
            let missing_values = missing_count(series)?;
            let unique_values = series.filter(&present_mask(series)?)?.n_unique()?;
            total_missing += missing_values;

            columns.push(ColumnAnalysis {
                name: series.name().to_string(),
                data_type: series.dtype().to_string(),
                kind: infer_column_kind(series, tolerance),
                unique_values,
                missing_values,
            });
        }

        let (_, duplicate_rows) = remove_duplicates(df)?;
        debug!(
            "Analyzed {} rows x {} columns: {} duplicates, {} missing cells",
            df.height(),
            df.width(),
            duplicate_rows,
            total_missing
        );

        Ok(DatasetAnalysis {
            total_rows: df.height(),
            total_columns: df.width(),
            duplicate_rows,
            total_missing,
            columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnKind;

    #[test]
    fn test_analyze_counts() {
        let df = df![
            "customer_id" => [Some(1i64), Some(1), Some(2), None],
            "city" => [Some("Oslo"), Some("Oslo"), None, Some("Bergen")],
        ]
        .unwrap();

        let analysis = DataProfiler::analyze(&df, NumericTolerance::Strict).unwrap();

        assert_eq!(analysis.total_rows, 4);
        assert_eq!(analysis.total_columns, 2);
        assert_eq!(analysis.duplicate_rows, 1);
        assert_eq!(analysis.total_missing, 2);

        let id = &analysis.columns[0];
        assert_eq!(id.name, "customer_id");
        assert_eq!(id.kind, ColumnKind::Numeric);
        assert_eq!(id.unique_values, 2);
        assert_eq!(id.missing_values, 1);

        let city = &analysis.columns[1];
        assert_eq!(city.kind, ColumnKind::Categorical);
        assert_eq!(city.unique_values, 2);
        assert_eq!(analysis.columns_with_missing(), vec!["customer_id", "city"]);
    }

    #[test]
    fn test_analyze_empty_table() {
        let df = df![
            "a" => Vec::<i64>::new(),
        ]
        .unwrap();

        let analysis = DataProfiler::analyze(&df, NumericTolerance::Strict).unwrap();
        assert_eq!(analysis.total_rows, 0);
        assert_eq!(analysis.duplicate_rows, 0);
        assert_eq!(analysis.columns[0].unique_values, 0);
    }

    #[test]
    fn test_analyze_counts_nan_as_missing() {
        let df = df![
            "score" => [Some(1.0), Some(f64::NAN), None, Some(1.0)],
        ]
        .unwrap();

        let analysis = DataProfiler::analyze(&df, NumericTolerance::Strict).unwrap();
        assert_eq!(analysis.columns[0].missing_values, 2);
        assert_eq!(analysis.columns[0].unique_values, 1);
    }
}
