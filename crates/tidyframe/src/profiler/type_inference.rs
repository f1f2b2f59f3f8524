//! Column kind inference.

use crate::config::NumericTolerance;
use crate::types::ColumnKind;
use crate::utils::{is_numeric_dtype, parse_numeric};
use polars::prelude::*;

/// Classify a column as numeric or categorical.
///
/// Native numeric dtypes (integers of any width, floats, `Decimal`) are
/// numeric. String columns are numeric when they
/// hold at least one non-missing value and every non-missing value parses
/// under `tolerance`. Everything else (booleans, dates, all-missing
/// columns) is categorical.
pub fn infer_column_kind(series: &Series, tolerance: NumericTolerance) -> ColumnKind {
    let dtype = series.dtype();
    if is_numeric_dtype(dtype) {
        return ColumnKind::Numeric;
    }
    if !matches!(dtype, DataType::String) {
        return ColumnKind::Categorical;
    }

    let Ok(values) = series.str() else {
        return ColumnKind::Categorical;
    };

    let mut seen_any = false;
    for value in values.into_iter().flatten() {
        if parse_numeric(value, tolerance).is_none() {
            return ColumnKind::Categorical;
        }
        seen_any = true;
    }

    if seen_any {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

/// Infer the kind of every column, in table column order.
pub fn infer_column_kinds(
    df: &DataFrame,
    tolerance: NumericTolerance,
) -> Vec<(String, ColumnKind)> {
    df.get_columns()
        .iter()
        .map(|col| {
            let series = col.as_materialized_series();
            (
                series.name().to_string(),
                infer_column_kind(series, tolerance),
            )
        })
        .collect()
}
